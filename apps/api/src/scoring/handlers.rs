//! Axum route handlers for the Scoring API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::score::ResumeScoreResult;
use crate::scoring::service::score_resume_text;
use crate::state::AppState;

pub const RESUME_FIELD: &str = "resume";
pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const MAX_UPLOAD_MB: usize = 5;
pub const MAX_UPLOAD_BYTES: usize = MAX_UPLOAD_MB * 1024 * 1024;
/// Request body limit for the upload route: the file plus multipart framing.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

const UNREADABLE_PDF: &str =
    "Unable to read text from this PDF. Please upload a text-based resume.";

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub success: bool,
    pub data: ResumeScoreResult,
}

/// POST /api/v1/resumes/score
///
/// Multipart upload (field `resume`, PDF, ≤ 5 MB). Extracts the text layer and
/// returns a normalized rubric score.
pub async fn handle_score(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScoreResponse>, AppError> {
    let pdf = read_resume_upload(multipart).await?;
    info!(bytes = pdf.len(), "Resume upload accepted");

    let text = extract_pdf_text(pdf).await?;
    let data = score_resume_text(state.llm.as_ref(), &state.generation.retry, &text).await?;

    Ok(Json(ScoreResponse {
        success: true,
        data,
    }))
}

/// Finds the `resume` file field and validates its type and size.
async fn read_resume_upload(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(RESUME_FIELD) || field.file_name().is_none() {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;
        validate_upload(content_type.as_deref(), data.len())?;
        return Ok(data);
    }
    Err(AppError::Validation("Resume file is required.".to_string()))
}

pub fn validate_upload(content_type: Option<&str>, size: usize) -> Result<(), AppError> {
    let is_pdf = content_type
        .map(|ct| ct.trim().eq_ignore_ascii_case(PDF_MIME_TYPE))
        .unwrap_or(false);
    if !is_pdf {
        return Err(AppError::UnsupportedMediaType(
            "Please upload a PDF file.".to_string(),
        ));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(too_large());
    }
    Ok(())
}

/// PDF text extraction is CPU-bound, so it runs on the blocking pool.
async fn extract_pdf_text(pdf: Bytes) -> Result<String, AppError> {
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}")))?;

    match extracted {
        Ok(text) if !text.trim().is_empty() => Ok(text),
        Ok(_) => Err(AppError::Validation(UNREADABLE_PDF.to_string())),
        Err(e) => {
            tracing::warn!(error = %e, "PDF text extraction failed");
            Err(AppError::Validation(UNREADABLE_PDF.to_string()))
        }
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large()
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}

fn too_large() -> AppError {
    AppError::PayloadTooLarge(format!("PDF is too large. Max {MAX_UPLOAD_MB}MB."))
}
