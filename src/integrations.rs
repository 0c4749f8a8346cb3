//! # Feature: Generation Integrations
//!
//! The command surface: each integration binds one command name to one
//! external model with a fixed parameter set and a fixed presentation
//! (embed color, title, acknowledgement verb). Nothing here is runtime
//! configurable.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: flux, sdxl, chatgpt and llama integrations

use crate::context::AppContext;
use crate::generation::GenerationBackend;
use crate::openai::OpenAiChat;
use crate::replicate::{ImageDelivery, ReplicateChat, ReplicateImage};
use serde_json::json;

const ASSISTANT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant replying inside a Discord channel. \
     Keep answers concise and direct.";

const CHAT_MAX_TOKENS: u32 = 1024;

/// One command bound to one external model.
pub struct Integration {
    /// Command name, matched after the prefix.
    pub command: &'static str,
    /// Display name used as the embed title.
    pub title: &'static str,
    /// Embed accent color.
    pub color: u32,
    /// Verb shown in the acknowledgement, e.g. "Generating".
    pub ack_verb: &'static str,
    /// Request/response adapter for the bound model.
    pub backend: Box<dyn GenerationBackend>,
}

/// Build every integration the bot exposes.
pub fn registry(ctx: &AppContext) -> Vec<Integration> {
    vec![
        Integration {
            command: "flux",
            title: "FLUX 1.1 Pro",
            color: 0x5865F2,
            ack_verb: "Generating",
            backend: Box::new(ReplicateImage::new(
                ctx.replicate.clone(),
                "black-forest-labs/flux-1.1-pro",
                json!({
                    "aspect_ratio": "1:1",
                    "output_format": "webp",
                    "output_quality": 80,
                    "safety_tolerance": 2,
                    "prompt_upsampling": true,
                }),
                ImageDelivery::Attachment {
                    filename: "flux.png",
                },
            )),
        },
        Integration {
            command: "sdxl",
            title: "SDXL",
            color: 0x9B59B6,
            ack_verb: "Generating",
            backend: Box::new(ReplicateImage::new(
                ctx.replicate.clone(),
                "stability-ai/sdxl",
                json!({
                    "width": 1024,
                    "height": 1024,
                    "num_inference_steps": 25,
                }),
                ImageDelivery::Url,
            )),
        },
        Integration {
            command: "chatgpt",
            title: "ChatGPT",
            color: 0x10A37F,
            ack_verb: "Thinking",
            backend: Box::new(OpenAiChat::new(
                ctx.openai.clone(),
                "gpt-4o-mini",
                ASSISTANT_SYSTEM_PROMPT,
                CHAT_MAX_TOKENS,
            )),
        },
        Integration {
            command: "llama",
            title: "Llama 3",
            color: 0x1877F2,
            ack_verb: "Thinking",
            backend: Box::new(ReplicateChat::new(
                ctx.replicate.clone(),
                "meta/meta-llama-3-70b-instruct",
                ASSISTANT_SYSTEM_PROMPT,
                CHAT_MAX_TOKENS,
            )),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::collections::HashSet;

    fn test_context() -> AppContext {
        AppContext::new(Config {
            discord_token: "test_discord_token".to_string(),
            replicate_api_token: "test_replicate_token".to_string(),
            openai_api_key: "test_openai_key".to_string(),
            command_prefix: "!".to_string(),
            log_level: "info".to_string(),
        })
    }

    #[test]
    fn test_registry_commands_are_unique() {
        let integrations = registry(&test_context());
        let names: HashSet<&str> = integrations.iter().map(|i| i.command).collect();
        assert_eq!(names.len(), integrations.len());
    }

    #[test]
    fn test_registry_exposes_expected_commands() {
        let integrations = registry(&test_context());
        let names: Vec<&str> = integrations.iter().map(|i| i.command).collect();
        assert!(names.contains(&"flux"));
        assert!(names.contains(&"sdxl"));
        assert!(names.contains(&"chatgpt"));
        assert!(names.contains(&"llama"));
    }
}
