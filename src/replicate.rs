//! # Feature: Replicate Generation
//!
//! Image and chat generation through Replicate's synchronous predictions
//! endpoint. Each adapter hard-binds one hosted model and its fixed input
//! parameters; only the prompt comes from the user.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.0.0: FLUX 1.1 Pro, SDXL and Llama 3 adapters over `Prefer: wait`

use crate::error::GenerationError;
use crate::generation::{GenerationBackend, GenerationOutcome};
use async_trait::async_trait;
use log::{debug, info};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

const API_BASE: &str = "https://api.replicate.com/v1";

/// Thin HTTP layer shared by all Replicate-backed adapters.
#[derive(Clone)]
pub struct ReplicateClient {
    api_token: String,
    client: reqwest::Client,
}

#[derive(Deserialize, Debug)]
struct Prediction {
    status: String,
    #[serde(default)]
    output: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

impl ReplicateClient {
    pub fn new(api_token: String) -> Self {
        ReplicateClient {
            api_token,
            client: reqwest::Client::new(),
        }
    }

    /// Run one prediction and wait for it to finish.
    ///
    /// Uses the synchronous mode of the predictions endpoint (`Prefer: wait`),
    /// so the call suspends until the model has produced its output. Returns
    /// the output normalized to a list of string segments: image models yield
    /// one or more URIs, language models yield token pieces to be joined.
    pub async fn run(&self, model: &str, input: Value) -> Result<Vec<String>, GenerationError> {
        info!("Running Replicate prediction | Model: {}", model);

        debug!("Sending request to Replicate predictions API");
        let response = self
            .client
            .post(format!("{}/models/{}/predictions", API_BASE, model))
            .header("Authorization", format!("Bearer {}", self.api_token))
            .header("Prefer", "wait")
            .json(&json!({ "input": input }))
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::from_status(status, &response_text));
        }

        let prediction: Prediction = serde_json::from_str(&response_text)?;
        prediction_output(prediction)
    }

    /// Download a generated file to bytes.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, GenerationError> {
        debug!("Downloading generated file");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Transform(format!(
                "file download failed with status {}",
                status
            )));
        }

        let bytes = response.bytes().await?;
        info!("File downloaded | Size: {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

/// Extract the output segments from a finished prediction.
fn prediction_output(prediction: Prediction) -> Result<Vec<String>, GenerationError> {
    if let Some(error) = prediction.error {
        if !error.is_null() {
            let message = error.as_str().map(str::to_string).unwrap_or_else(|| error.to_string());
            return Err(GenerationError::Api(format!("prediction failed: {}", message)));
        }
    }

    if prediction.status != "succeeded" {
        return Err(GenerationError::Api(format!(
            "prediction ended with status '{}'",
            prediction.status
        )));
    }

    match prediction.output {
        Some(Value::String(s)) => Ok(vec![s]),
        Some(Value::Array(items)) => {
            let mut segments = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => segments.push(s),
                    other => {
                        return Err(GenerationError::Transform(format!(
                            "unexpected output element: {}",
                            other
                        )))
                    }
                }
            }
            Ok(segments)
        }
        _ => Err(GenerationError::Transform(
            "prediction has no output".to_string(),
        )),
    }
}

/// How an image adapter delivers its result.
#[derive(Debug, Clone, Copy)]
pub enum ImageDelivery {
    /// Download the first output URI and attach the bytes under this filename.
    Attachment { filename: &'static str },
    /// Pass the first output URI through for the embed's image field.
    Url,
}

/// Text-to-image adapter over one Replicate model.
pub struct ReplicateImage {
    client: Arc<ReplicateClient>,
    model: &'static str,
    params: Value,
    delivery: ImageDelivery,
}

impl ReplicateImage {
    pub fn new(
        client: Arc<ReplicateClient>,
        model: &'static str,
        params: Value,
        delivery: ImageDelivery,
    ) -> Self {
        ReplicateImage {
            client,
            model,
            params,
            delivery,
        }
    }

    fn input(&self, prompt: &str) -> Value {
        let mut input = self.params.clone();
        if let Some(map) = input.as_object_mut() {
            map.insert("prompt".to_string(), Value::String(prompt.to_string()));
        }
        input
    }
}

#[async_trait]
impl GenerationBackend for ReplicateImage {
    async fn generate(&self, prompt: &str) -> Result<GenerationOutcome, GenerationError> {
        let outputs = self.client.run(self.model, self.input(prompt)).await?;
        let url = outputs
            .first()
            .ok_or_else(|| GenerationError::Transform("prediction output is empty".to_string()))?;

        match self.delivery {
            ImageDelivery::Attachment { filename } => {
                let bytes = self.client.download(url).await?;
                Ok(GenerationOutcome::ImageBytes { bytes, filename })
            }
            ImageDelivery::Url => Ok(GenerationOutcome::ImageUrl(url.clone())),
        }
    }
}

/// Chat-completion adapter over one Replicate language model.
///
/// Language models on Replicate stream their completion as a list of token
/// pieces; the adapter joins them into the final response string.
pub struct ReplicateChat {
    client: Arc<ReplicateClient>,
    model: &'static str,
    system_prompt: &'static str,
    max_tokens: u32,
}

impl ReplicateChat {
    pub fn new(
        client: Arc<ReplicateClient>,
        model: &'static str,
        system_prompt: &'static str,
        max_tokens: u32,
    ) -> Self {
        ReplicateChat {
            client,
            model,
            system_prompt,
            max_tokens,
        }
    }
}

#[async_trait]
impl GenerationBackend for ReplicateChat {
    async fn generate(&self, prompt: &str) -> Result<GenerationOutcome, GenerationError> {
        let input = json!({
            "prompt": prompt,
            "system_prompt": self.system_prompt,
            "max_tokens": self.max_tokens,
        });

        let segments = self.client.run(self.model, input).await?;
        if segments.is_empty() {
            return Err(GenerationError::Transform(
                "prediction output is empty".to_string(),
            ));
        }

        Ok(GenerationOutcome::Text(segments.concat()))
    }
}
