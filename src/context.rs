use crate::config::Config;
use crate::openai::OpenAiClient;
use crate::replicate::ReplicateClient;
use std::sync::Arc;

/// Shared application state, built once in `main` and injected into the
/// integration registry and dispatcher instead of living in globals.
pub struct AppContext {
    pub config: Config,
    pub replicate: Arc<ReplicateClient>,
    pub openai: Arc<OpenAiClient>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let replicate = Arc::new(ReplicateClient::new(config.replicate_api_token.clone()));
        let openai = Arc::new(OpenAiClient::new(config.openai_api_key.clone()));
        AppContext {
            config,
            replicate,
            openai,
        }
    }
}
