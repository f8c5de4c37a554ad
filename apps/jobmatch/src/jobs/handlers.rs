//! Axum route handlers for the Jobs API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::jobs::dataset::Record;
use crate::jobs::profile::{profile_dataset, DatasetProfile};
use crate::jobs::search::{search_jobs, SearchQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub columns: Vec<String>,
    pub keyword: String,
    /// Defaults to `SEARCH_LIMIT` when omitted.
    pub limit: Option<i64>,
}

/// POST /api/v1/jobs/search
///
/// Returns matching job rows as a JSON array of records, in dataset order.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<Record>>, AppError> {
    let query = SearchQuery {
        columns: request.columns,
        keyword: request.keyword,
        limit: request.limit.unwrap_or(state.config.search_limit),
    };
    let path = state.config.jobs_dataset_path.clone();

    let records = tokio::task::spawn_blocking(move || search_jobs(path, &query))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    Ok(Json(records))
}

/// GET /api/v1/jobs/profile
pub async fn handle_profile(
    State(state): State<AppState>,
) -> Result<Json<DatasetProfile>, AppError> {
    let path = state.config.jobs_dataset_path.clone();
    let profile = tokio::task::spawn_blocking(move || profile_dataset(path))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;
    Ok(Json(profile))
}
