//! Transport-level retry around `LlmProvider::generate`.
//!
//! Bounded attempts, doubling backoff, retry only on transient provider errors.
//! Content-level retries (re-prompting after unparseable output) live in the
//! generation pipeline, not here.

use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{LlmProvider, ProviderError};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY_MS: u64 = 600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_millis(base_delay_ms),
        }
    }

    /// Sleep before the given zero-based attempt: none before the first, then
    /// base, 2×base, 4×base, ...
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let factor = 1u32.checked_shl(attempt - 1).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Total time spent sleeping when every attempt fails transiently.
    pub fn total_backoff(&self) -> Duration {
        (0..self.max_attempts.max(1))
            .map(|a| self.delay_before(a))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

#[derive(Debug, Error)]
pub enum InvokeError {
    /// Every attempt hit a transient error. Callers map this to "AI busy" or fall back.
    #[error("LLM still unavailable after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: ProviderError },

    /// Non-transient failure; propagated on first occurrence without retry.
    #[error("LLM call failed: {0}")]
    Fatal(ProviderError),
}

/// Calls the provider, retrying transient failures with exponential backoff.
pub async fn invoke(
    provider: &dyn LlmProvider,
    policy: &RetryPolicy,
    prompt: &str,
    system: &str,
) -> Result<String, InvokeError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut last_error: Option<ProviderError> = None;

    for attempt in 0..max_attempts {
        if attempt > 0 {
            let delay = policy.delay_before(attempt);
            warn!(
                attempt,
                max_attempts,
                delay_ms = delay.as_millis() as u64,
                "LLM call failed transiently, backing off"
            );
            tokio::time::sleep(delay).await;
        }

        match provider.generate(prompt, system).await {
            Ok(text) => {
                if attempt > 0 {
                    info!(
                        model = provider.model(),
                        attempts = attempt + 1,
                        "LLM call succeeded after retries"
                    );
                }
                return Ok(text);
            }
            Err(e) if e.is_transient() => {
                warn!(attempt = attempt + 1, error = %e, "Transient LLM error");
                last_error = Some(e);
            }
            Err(e) => return Err(InvokeError::Fatal(e)),
        }
    }

    Err(InvokeError::Exhausted {
        attempts: max_attempts,
        last: last_error.unwrap_or(ProviderError::EmptyContent),
    })
}
