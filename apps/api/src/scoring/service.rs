//! Resume Scoring: rubric evaluation of already-extracted resume text.
//!
//! Flow: truncate → prompt → invoke (transport retry) → brace slice → JSON parse → normalize.
//! Unlike generation there is no re-prompt and no fallback: a response without a
//! parseable JSON object fails the request.

use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::retry::{invoke, RetryPolicy};
use crate::llm_client::LlmProvider;
use crate::models::score::ResumeScoreResult;
use crate::scoring::normalizer::normalize_result;
use crate::scoring::prompts::{RESUME_SCORE_PROMPT, RESUME_SCORE_SYSTEM};

/// Only the head of long resumes is sent to the model.
pub const MAX_TEXT_CHARS: usize = 12_000;

pub async fn score_resume_text(
    llm: &dyn LlmProvider,
    policy: &RetryPolicy,
    resume_text: &str,
) -> Result<ResumeScoreResult, AppError> {
    let text = truncate_chars(resume_text.trim(), MAX_TEXT_CHARS);
    info!(chars = text.chars().count(), model = llm.model(), "Scoring resume");

    let prompt = RESUME_SCORE_PROMPT.replace("{resume_text}", text);
    let raw = invoke(llm, policy, &prompt, RESUME_SCORE_SYSTEM).await?;
    debug!("Raw scoring response: {raw}");

    let cleaned = raw.replace('\r', "");
    let json_text = score_json_slice(cleaned.trim())
        .ok_or_else(|| AppError::ScoringFailed("response did not include a JSON object".into()))?;
    let value: serde_json::Value = serde_json::from_str(json_text)
        .map_err(|e| AppError::ScoringFailed(format!("invalid JSON in response: {e}")))?;

    let result = normalize_result(&value);
    info!(overall_score = result.overall_score, "Resume scored");
    Ok(result)
}

/// First `max` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Slice from the first `{` to the last `}` inclusive. `None` when either is missing
/// or they are out of order.
fn score_json_slice(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{status, ScriptedProvider};

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 100), "short");
        let long = "é".repeat(MAX_TEXT_CHARS + 10);
        assert_eq!(truncate_chars(&long, MAX_TEXT_CHARS).chars().count(), MAX_TEXT_CHARS);
    }

    #[test]
    fn test_score_json_slice() {
        assert_eq!(score_json_slice("Here: {\"a\": 1} done"), Some("{\"a\": 1}"));
        assert_eq!(score_json_slice("no braces"), None);
        assert_eq!(score_json_slice("{ unterminated"), None);
        assert_eq!(score_json_slice("} backwards {"), None);
    }

    #[tokio::test]
    async fn test_scores_fenced_response_with_carriage_returns() {
        let provider = ScriptedProvider::always(
            "```json\r\n{\"overallScore\": 78, \"categories\": {\"atsCompatibility\": \"91\"}, \"strengths\": [\"Clear\"]}\r\n```",
        );
        let result = score_resume_text(&provider, &RetryPolicy::default(), "Ada Lovelace\nEngineer")
            .await
            .unwrap();
        assert_eq!(result.overall_score, 78);
        assert_eq!(result.categories.ats_compatibility, 91);
        assert_eq!(result.strengths, vec!["Clear"]);
        assert!(provider.prompts()[0].ends_with("Ada Lovelace\nEngineer"));
    }

    #[tokio::test]
    async fn test_prompt_carries_truncated_text() {
        let provider = ScriptedProvider::always("{}");
        let text = "x".repeat(MAX_TEXT_CHARS + 500);
        score_resume_text(&provider, &RetryPolicy::default(), &text)
            .await
            .unwrap();
        let prompt = &provider.prompts()[0];
        assert!(prompt.contains(&"x".repeat(MAX_TEXT_CHARS)));
        assert!(!prompt.contains(&"x".repeat(MAX_TEXT_CHARS + 1)));
    }

    #[tokio::test]
    async fn test_unparseable_response_fails_scoring() {
        for raw in ["I cannot score this.", "{\"overallScore\": 80", "{not json}"] {
            let provider = ScriptedProvider::always(raw);
            let result = score_resume_text(&provider, &RetryPolicy::default(), "resume").await;
            assert!(
                matches!(result, Err(AppError::ScoringFailed(_))),
                "{raw:?} should fail scoring"
            );
            assert_eq!(provider.calls(), 1, "scoring never re-prompts");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_surface_busy() {
        let provider = ScriptedProvider::new(vec![
            Err(status(429)),
            Err(status(429)),
            Err(status(429)),
        ]);
        let result = score_resume_text(&provider, &RetryPolicy::default(), "resume").await;
        assert!(matches!(result, Err(AppError::AiBusy(_))));
    }
}
