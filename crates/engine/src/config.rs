//! Engine settings
//!
//! Loaded from an optional TOML/YAML file plus `TRAVEL_CHAT_`-prefixed
//! environment variables. Every field has a serde default so an empty
//! source yields a working configuration.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use travel_chat_core::{Error, Result};

const DEFAULT_SYSTEM_PROMPT: &str = "Remember you are a travel assistant and can only \
discuss travel topics. If the user is asking about non-travel topics, politely redirect \
them back to travel discussions. Based on the conversation history, provide helpful \
travel information or ask for more details to assist with travel planning.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Past prompts handed to the LLM fallback, before the system prompt.
    #[serde(default = "default_history_turn_limit")]
    pub history_turn_limit: usize,

    /// Utterances at or above this length are never treated as
    /// date-only flight continuations.
    #[serde(default = "default_date_only_max_len")]
    pub date_only_max_len: usize,

    /// Upper bound on the `$` tier a price threshold maps to.
    #[serde(default = "default_price_tier_cap")]
    pub price_tier_cap: usize,

    /// Rating thresholds are clamped to this value.
    #[serde(default = "default_rating_cap")]
    pub rating_cap: f64,

    /// Destination suggestions offered on origin-only flight queries.
    #[serde(default = "default_destination_suggestion_limit")]
    pub destination_suggestion_limit: usize,

    /// System prompt appended to LLM fallback conversations.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_history_turn_limit() -> usize {
    10
}

fn default_date_only_max_len() -> usize {
    20
}

fn default_price_tier_cap() -> usize {
    4
}

fn default_rating_cap() -> f64 {
    5.0
}

fn default_destination_suggestion_limit() -> usize {
    5
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_turn_limit: default_history_turn_limit(),
            date_only_max_len: default_date_only_max_len(),
            price_tier_cap: default_price_tier_cap(),
            rating_cap: default_rating_cap(),
            destination_suggestion_limit: default_destination_suggestion_limit(),
            system_prompt: default_system_prompt(),
        }
    }
}

/// Load settings from an optional config file and the environment.
pub fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::with_name(path).required(false));
    }
    builder = builder.add_source(
        Environment::with_prefix("TRAVEL_CHAT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|err| Error::Config(err.to_string()))?;
    config
        .try_deserialize()
        .map_err(|err| Error::Config(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.history_turn_limit, 10);
        assert_eq!(config.date_only_max_len, 20);
        assert_eq!(config.price_tier_cap, 4);
        assert_eq!(config.rating_cap, 5.0);
        assert!(config.system_prompt.contains("travel assistant"));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.history_turn_limit, EngineConfig::default().history_turn_limit);
    }
}
