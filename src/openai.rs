//! # Feature: OpenAI Chat Completion
//!
//! Single-turn chat completion against the OpenAI API with a fixed model,
//! fixed system prompt and fixed token limit per adapter.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.0.0: Initial release with chat completions endpoint

use crate::error::GenerationError;
use crate::generation::{GenerationBackend, GenerationOutcome};
use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    error: ApiErrorDetails,
}

#[derive(Deserialize, Debug)]
struct ApiErrorDetails {
    message: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        OpenAiClient {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Run one chat completion and return the response text.
    pub async fn complete(
        &self,
        model: &str,
        system_prompt: &str,
        max_tokens: u32,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        info!("Running chat completion | Model: {}", model);

        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            max_tokens,
        };

        debug!("Sending request to OpenAI chat completions API");
        let response = self
            .client
            .post(COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            // Prefer the API's own error message over the raw body.
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&response_text) {
                return Err(GenerationError::from_status(status, &api_error.error.message));
            }
            return Err(GenerationError::from_status(status, &response_text));
        }

        let chat: ChatResponse = serde_json::from_str(&response_text)?;
        extract_completion(chat)
    }
}

fn extract_completion(chat: ChatResponse) -> Result<String, GenerationError> {
    chat.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| GenerationError::Transform("no completion in response".to_string()))
}

/// Chat-completion adapter over one OpenAI model.
pub struct OpenAiChat {
    client: Arc<OpenAiClient>,
    model: &'static str,
    system_prompt: &'static str,
    max_tokens: u32,
}

impl OpenAiChat {
    pub fn new(
        client: Arc<OpenAiClient>,
        model: &'static str,
        system_prompt: &'static str,
        max_tokens: u32,
    ) -> Self {
        OpenAiChat {
            client,
            model,
            system_prompt,
            max_tokens,
        }
    }
}

#[async_trait]
impl GenerationBackend for OpenAiChat {
    async fn generate(&self, prompt: &str) -> Result<GenerationOutcome, GenerationError> {
        let text = self
            .client
            .complete(self.model, self.system_prompt, self.max_tokens, prompt)
            .await?;
        Ok(GenerationOutcome::Text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_completion_text() {
        let chat: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Hi there!"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_completion(chat).unwrap(), "Hi there!");
    }

    #[test]
    fn test_empty_choices_is_transform_error() {
        let chat: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        let err = extract_completion(chat).unwrap_err();
        assert!(matches!(err, GenerationError::Transform(_)));
    }

    #[test]
    fn test_missing_content_is_transform_error() {
        let chat: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert!(extract_completion(chat).is_err());
    }

    #[test]
    fn test_api_error_body_decodes() {
        let api_error: ApiError = serde_json::from_str(
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
        )
        .unwrap();
        assert_eq!(api_error.error.message, "Incorrect API key provided");
    }
}
