//! Axum route handlers for the Cover Letter API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::pipeline::{run_pipeline, PipelineOutcome};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CoverLettersRequest {
    pub resume_text: String,
}

/// POST /api/v1/cover-letters
///
/// Full pipeline: keyword selection → job search → letter drafting → file write.
pub async fn handle_cover_letters(
    State(state): State<AppState>,
    Json(request): Json<CoverLettersRequest>,
) -> Result<Json<PipelineOutcome>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    let settings = state.pipeline_settings();
    let outcome = run_pipeline(&request.resume_text, &settings, state.drafter.as_ref()).await?;
    Ok(Json(outcome))
}
