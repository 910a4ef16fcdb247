use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::generation::parser::ParserStrategy;
use crate::llm_client::retry::{DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_ATTEMPTS};
use crate::llm_client::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or any value is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub llm_model: String,
    pub llm_max_tokens: u32,
    pub parser_strategy: ParserStrategy,
    pub retry_attempts: u32,
    pub retry_base_delay_ms: u64,
    /// Return the fallback resume instead of 429 when the model stays busy.
    pub fallback_on_busy: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Config {
            anthropic_api_key: require(&lookup, "ANTHROPIC_API_KEY")?,
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            llm_model: lookup("LLM_MODEL")
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_max_tokens: parse_or(&lookup, "LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            parser_strategy: parse_or(&lookup, "RESUME_PARSER_STRATEGY", ParserStrategy::Json)?,
            retry_attempts: parse_or(&lookup, "LLM_RETRY_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?,
            retry_base_delay_ms: parse_or(&lookup, "LLM_RETRY_BASE_DELAY_MS", DEFAULT_BASE_DELAY_MS)?,
            fallback_on_busy: parse_or(&lookup, "FALLBACK_ON_BUSY", false)?,
        };

        if config.retry_attempts == 0 {
            return Err(anyhow!("LLM_RETRY_ATTEMPTS must be at least 1"));
        }
        if config.llm_max_tokens == 0 {
            return Err(anyhow!("LLM_MAX_TOKENS must be at least 1"));
        }
        Ok(config)
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{key} has an invalid value '{raw}': {e}")),
    }
}
