//! Axum route handlers for the Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::generation::generator::generate_resume;
use crate::models::candidate::CandidateInput;
use crate::models::resume::GeneratedResume;
use crate::state::AppState;

const INVALID_PAYLOAD: &str = "Invalid payload";

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub resume: GeneratedResume,
    /// `false` when the resume mirrors the input because the model output was unusable.
    pub generated: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
///
/// Full pipeline: prompt → invoke (with retry) → extract → parse → normalize,
/// falling back to the candidate's own content when the model output cannot be used.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<CandidateInput>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(candidate) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected generate payload");
        AppError::Validation(INVALID_PAYLOAD.to_string())
    })?;
    if candidate.full_name.trim().is_empty() || candidate.email.trim().is_empty() {
        return Err(AppError::Validation(INVALID_PAYLOAD.to_string()));
    }

    let outcome = generate_resume(state.llm.as_ref(), &state.generation, &candidate).await?;

    Ok(Json(GenerateResponse {
        success: true,
        resume: outcome.resume,
        generated: outcome.generated,
    }))
}
