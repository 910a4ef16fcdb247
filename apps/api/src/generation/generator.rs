//! Resume Generation: orchestrates the full normalization pipeline.
//!
//! Flow: build prompt → invoke (transport retry) → extract → parse → normalize.
//! On a parse failure the chain runs once more with a stricter prompt; if that
//! also fails, the fallback assembler mirrors the candidate's own input.
//!
//! Malformed model output never reaches the caller as an error. Only upstream
//! failures (exhausted retries, auth, other provider errors) surface.

use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::extractor::extract;
use crate::generation::fallback;
use crate::generation::normalizer::normalize;
use crate::generation::parser::{parse, ParseError, ParserStrategy, ResumeDraft};
use crate::generation::prompt_builder::{build_prompt, build_strict_prompt, BuiltPrompt};
use crate::llm_client::retry::{invoke, InvokeError, RetryPolicy};
use crate::llm_client::LlmProvider;
use crate::models::candidate::CandidateInput;
use crate::models::resume::GeneratedResume;

/// Per-request knobs, derived from `Config` at startup.
#[derive(Debug, Clone, Default)]
pub struct GenerationSettings {
    pub strategy: ParserStrategy,
    pub retry: RetryPolicy,
    /// When the first attempt exhausts its retries: `true` returns the fallback
    /// resume, `false` surfaces `AppError::AiBusy`.
    pub fallback_on_busy: bool,
}

/// Result of one generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOutcome {
    pub resume: GeneratedResume,
    /// `false` when the resume is the unenhanced fallback mirror of the input.
    pub generated: bool,
}

impl GenerationOutcome {
    fn generated(resume: GeneratedResume) -> Self {
        Self {
            resume,
            generated: true,
        }
    }

    fn fallback(candidate: &CandidateInput) -> Self {
        Self {
            resume: fallback::assemble(candidate),
            generated: false,
        }
    }
}

/// Runs the generation pipeline for one candidate.
pub async fn generate_resume(
    llm: &dyn LlmProvider,
    settings: &GenerationSettings,
    candidate: &CandidateInput,
) -> Result<GenerationOutcome, AppError> {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "generate_resume",
        %request_id,
        strategy = %settings.strategy,
        model = llm.model()
    );
    run_pipeline(llm, settings, candidate).instrument(span).await
}

async fn run_pipeline(
    llm: &dyn LlmProvider,
    settings: &GenerationSettings,
    candidate: &CandidateInput,
) -> Result<GenerationOutcome, AppError> {
    let strategy = settings.strategy;
    info!(
        experiences = candidate.experiences.len(),
        "Generating resume"
    );

    // Attempt 1: upstream failures surface (or fall back, per policy).
    let first = build_prompt(candidate, strategy);
    let raw = match call(llm, &settings.retry, &first).await {
        Ok(raw) => raw,
        Err(InvokeError::Exhausted { attempts, last }) if settings.fallback_on_busy => {
            warn!(attempts, error = %last, "LLM busy after retries, returning fallback resume");
            return Ok(GenerationOutcome::fallback(candidate));
        }
        Err(e) => return Err(e.into()),
    };

    match parse_response(&raw, strategy) {
        Ok(draft) => {
            info!("Resume generated on first attempt");
            return Ok(GenerationOutcome::generated(normalize(&draft, candidate)));
        }
        Err(e) => warn!(error = %e, "First response unparseable, re-prompting with stricter format"),
    }

    // Attempt 2: stricter prompt. Any failure from here on falls back.
    let strict = build_strict_prompt(candidate, strategy);
    let raw = match call(llm, &settings.retry, &strict).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "Stricter re-prompt failed, returning fallback resume");
            return Ok(GenerationOutcome::fallback(candidate));
        }
    };

    match parse_response(&raw, strategy) {
        Ok(draft) => {
            info!("Resume generated on stricter re-prompt");
            Ok(GenerationOutcome::generated(normalize(&draft, candidate)))
        }
        Err(e) => {
            warn!(error = %e, "Stricter response unparseable, returning fallback resume");
            Ok(GenerationOutcome::fallback(candidate))
        }
    }
}

async fn call(
    llm: &dyn LlmProvider,
    policy: &RetryPolicy,
    built: &BuiltPrompt,
) -> Result<String, InvokeError> {
    let raw = invoke(llm, policy, &built.prompt, built.system).await?;
    debug!(chars = raw.len(), "Raw model response: {raw}");
    Ok(raw)
}

fn parse_response(raw: &str, strategy: ParserStrategy) -> Result<ResumeDraft, ParseError> {
    parse(&extract(raw, strategy))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
