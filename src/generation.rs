//! Normalized boundary between backend adapters and message formatting.
//!
//! Each external API hands back a different shape (a readable binary file, a
//! URL-bearing list, a completion string). Adapters flatten all of them into
//! one `GenerationOutcome` so the dispatcher can format results without
//! knowing which API produced them.

use crate::error::GenerationError;
use async_trait::async_trait;

/// What one generation call produced, after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Downloaded image payload, attached to the reply under a fixed filename.
    ImageBytes {
        bytes: Vec<u8>,
        filename: &'static str,
    },
    /// Hosted image, embedded by URL without downloading.
    ImageUrl(String),
    /// Completion text, rendered as an embed description.
    Text(String),
}

/// One external model plus its fixed parameter set.
///
/// `generate` performs exactly one generation call (plus a download for
/// binary outcomes). Implementations own their request/response shapes; only
/// the prompt varies between invocations.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GenerationOutcome, GenerationError>;
}
