//! Production `Responder` over the Discord HTTP API, scoped to the channel a
//! command arrived in.

use crate::responder::{EmbedSpec, MessageRef, Responder};
use anyhow::Result;
use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::channel::AttachmentType;
use serenity::model::id::ChannelId;
use std::borrow::Cow;
use std::sync::Arc;

pub struct ChannelResponder {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl ChannelResponder {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        ChannelResponder { http, channel_id }
    }
}

#[async_trait]
impl Responder for ChannelResponder {
    async fn send_text(&self, text: &str) -> Result<MessageRef> {
        let message = self.channel_id.say(&self.http, text).await?;
        Ok(MessageRef {
            channel_id: message.channel_id.0,
            message_id: message.id.0,
        })
    }

    async fn delete(&self, message: MessageRef) -> Result<()> {
        self.http
            .delete_message(message.channel_id, message.message_id)
            .await?;
        Ok(())
    }

    async fn send_attachment(&self, text: &str, filename: &str, bytes: &[u8]) -> Result<()> {
        let attachment = AttachmentType::Bytes {
            data: Cow::Borrowed(bytes),
            filename: filename.to_string(),
        };

        self.channel_id
            .send_files(&self.http, vec![attachment], |m| m.content(text))
            .await?;
        Ok(())
    }

    async fn send_embed(&self, embed: EmbedSpec) -> Result<()> {
        self.channel_id
            .send_message(&self.http, |m| {
                m.embed(|e| {
                    e.title(&embed.title)
                        .description(&embed.description)
                        .color(embed.color);
                    if let Some(url) = &embed.image_url {
                        e.image(url);
                    }
                    e.footer(|f| f.text(&embed.footer))
                })
            })
            .await?;
        Ok(())
    }
}
