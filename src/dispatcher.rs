//! Command parsing and the one generic handler every integration runs
//! through: acknowledge, call the backend, replace the acknowledgement with
//! the formatted result, report any failure as a single error message.

use crate::integrations::Integration;
use crate::responder::{clamp_description, EmbedSpec, Responder};
use anyhow::Result;
use log::{error, info};
use std::collections::HashMap;

/// A parsed `<prefix><name> <free text>` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    pub name: &'a str,
    /// Everything after the command name, trimmed, passed verbatim to the
    /// backend. May be empty.
    pub prompt: &'a str,
}

/// Parse a message into a command invocation, if it is one.
pub fn parse_command<'a>(prefix: &str, content: &'a str) -> Option<ParsedCommand<'a>> {
    let rest = content.strip_prefix(prefix)?;

    let (name, prompt) = match rest.split_once(char::is_whitespace) {
        Some((name, prompt)) => (name, prompt.trim()),
        None => (rest.trim_end(), ""),
    };

    if name.is_empty() {
        return None;
    }

    Some(ParsedCommand { name, prompt })
}

pub struct Dispatcher {
    prefix: String,
    integrations: HashMap<&'static str, Integration>,
}

impl Dispatcher {
    /// Register every integration under its command name once.
    pub fn new(prefix: impl Into<String>, integrations: Vec<Integration>) -> Self {
        let mut map = HashMap::with_capacity(integrations.len());
        for integration in integrations {
            let previous = map.insert(integration.command, integration);
            debug_assert!(previous.is_none(), "duplicate command registration");
        }

        Dispatcher {
            prefix: prefix.into(),
            integrations: map,
        }
    }

    /// Handle one incoming message end to end.
    ///
    /// Messages that are not commands, and command names with no registered
    /// integration, are ignored silently. Failures never propagate: they are
    /// logged and reported into the channel as one error message.
    pub async fn handle_message(&self, responder: &dyn Responder, requester: &str, content: &str) {
        let Some(command) = parse_command(&self.prefix, content) else {
            return;
        };

        let Some(integration) = self.integrations.get(command.name) else {
            return;
        };

        info!(
            "Processing command: {} from user: {}",
            integration.command, requester
        );

        if let Err(e) = run_integration(integration, responder, requester, command.prompt).await {
            error!("Command '{}' failed: {}", integration.command, e);
            if let Err(send_err) = responder
                .send_text(&format!("An error occurred: {}", e))
                .await
            {
                error!("Failed to send error message: {}", send_err);
            }
        }
    }
}

/// The shared handler body: ack, one generation call, replace ack with the
/// formatted outcome. All-or-nothing; any error bubbles to the caller and the
/// acknowledgement is left in place.
async fn run_integration(
    integration: &Integration,
    responder: &dyn Responder,
    requester: &str,
    prompt: &str,
) -> Result<()> {
    use crate::generation::GenerationOutcome::*;

    let ack = responder
        .send_text(&format!("\"{}\"\n> {}...", prompt, integration.ack_verb))
        .await?;

    let outcome = integration.backend.generate(prompt).await?;

    responder.delete(ack).await?;

    match outcome {
        ImageBytes { bytes, filename } => {
            responder
                .send_attachment(&format!("\"{}\"", prompt), filename, &bytes)
                .await?;
        }
        ImageUrl(url) => {
            responder
                .send_embed(EmbedSpec {
                    title: integration.title.to_string(),
                    description: format!("\"{}\"", prompt),
                    color: integration.color,
                    image_url: Some(url),
                    footer: format!("requested by {}", requester),
                })
                .await?;
        }
        Text(text) => {
            responder
                .send_embed(EmbedSpec {
                    title: integration.title.to_string(),
                    description: clamp_description(text),
                    color: integration.color,
                    image_url: None,
                    footer: format!("requested by {}", requester),
                })
                .await?;
        }
    }

    Ok(())
}
