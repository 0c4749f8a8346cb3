use anyhow::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub replicate_api_token: String,
    pub openai_api_key: String,
    pub command_prefix: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            discord_token: env::var("DISCORD_TOKEN")
                .map_err(|_| anyhow::anyhow!("DISCORD_TOKEN environment variable not set"))?,
            replicate_api_token: env::var("REPLICATE_API_TOKEN")
                .map_err(|_| anyhow::anyhow!("REPLICATE_API_TOKEN environment variable not set"))?,
            openai_api_key: env::var("OPENAI_API_KEY")
                .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))?,
            command_prefix: env::var("COMMAND_PREFIX").unwrap_or_else(|_| "!".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    // Environment variables are process-global, so both cases run in one test
    // to avoid racing against each other under the parallel test runner.
    #[test]
    fn test_config_from_env() {
        env::remove_var("DISCORD_TOKEN");
        env::remove_var("REPLICATE_API_TOKEN");
        env::remove_var("OPENAI_API_KEY");

        let result = Config::from_env();
        assert!(result.is_err());

        env::set_var("DISCORD_TOKEN", "test_discord_token");
        env::set_var("REPLICATE_API_TOKEN", "test_replicate_token");
        env::set_var("OPENAI_API_KEY", "test_openai_key");
        env::remove_var("COMMAND_PREFIX");
        env::remove_var("LOG_LEVEL");

        let config = Config::from_env().unwrap();
        assert_eq!(config.discord_token, "test_discord_token");
        assert_eq!(config.replicate_api_token, "test_replicate_token");
        assert_eq!(config.openai_api_key, "test_openai_key");
        assert_eq!(config.command_prefix, "!");
        assert_eq!(config.log_level, "info");

        env::remove_var("DISCORD_TOKEN");
        env::remove_var("REPLICATE_API_TOKEN");
        env::remove_var("OPENAI_API_KEY");
    }
}
