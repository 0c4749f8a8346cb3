//! Outbound message seam between the dispatcher and the chat platform.

use anyhow::Result;
use async_trait::async_trait;

/// Discord caps embed descriptions at 4096 characters.
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;

/// Opaque handle to a sent message, used to delete the placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub channel_id: u64,
    pub message_id: u64,
}

/// A titled, colored result embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedSpec {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub image_url: Option<String>,
    pub footer: String,
}

/// Everything a command handler may send back to the channel it was invoked
/// in. The production implementation wraps the Discord HTTP client; tests use
/// a recording implementation.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Send a plain text message, returning a handle to it.
    async fn send_text(&self, text: &str) -> Result<MessageRef>;

    /// Delete a previously sent message.
    async fn delete(&self, message: MessageRef) -> Result<()>;

    /// Send a message with a binary file attached.
    async fn send_attachment(&self, text: &str, filename: &str, bytes: &[u8]) -> Result<()>;

    /// Send a rich embed.
    async fn send_embed(&self, embed: EmbedSpec) -> Result<()>;
}

/// Clamp an embed description to the platform limit, cutting on a char
/// boundary.
pub fn clamp_description(text: String) -> String {
    if text.len() <= EMBED_DESCRIPTION_LIMIT {
        return text;
    }

    let mut end = EMBED_DESCRIPTION_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_description_untouched() {
        let text = "Hi there!".to_string();
        assert_eq!(clamp_description(text.clone()), text);
    }

    #[test]
    fn test_long_description_clamped_to_limit() {
        let text = "x".repeat(EMBED_DESCRIPTION_LIMIT + 100);
        let clamped = clamp_description(text);
        assert_eq!(clamped.len(), EMBED_DESCRIPTION_LIMIT);
    }

    #[test]
    fn test_clamp_respects_char_boundaries() {
        // 'é' is two bytes; the leading ASCII char puts every following char
        // boundary on an odd offset, so the limit itself lands mid-char.
        let text = format!("a{}", "é".repeat(EMBED_DESCRIPTION_LIMIT));
        let clamped = clamp_description(text);
        assert_eq!(clamped.len(), EMBED_DESCRIPTION_LIMIT - 1);
        assert!(clamped.is_char_boundary(clamped.len()));
    }
}
