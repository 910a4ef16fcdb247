use std::sync::Arc;

use crate::config::Config;
use crate::generation::generator::GenerationSettings;
use crate::llm_client::retry::RetryPolicy;
use crate::llm_client::LlmProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable LLM provider. Production: `LlmClient` over the Anthropic Messages API.
    pub llm: Arc<dyn LlmProvider>,
    /// Parser strategy, retry policy and busy-fallback policy, resolved once from `Config`.
    pub generation: GenerationSettings,
}

impl AppState {
    pub fn new(llm: Arc<dyn LlmProvider>, config: &Config) -> Self {
        let generation = GenerationSettings {
            strategy: config.parser_strategy,
            retry: RetryPolicy::new(config.retry_attempts, config.retry_base_delay_ms),
            fallback_on_busy: config.fallback_on_busy,
        };
        Self { llm, generation }
    }
}
