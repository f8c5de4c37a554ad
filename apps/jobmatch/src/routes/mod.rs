pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::letters::handlers as letters;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs API
        .route("/api/v1/jobs/search", post(jobs::handle_search))
        .route("/api/v1/jobs/profile", get(jobs::handle_profile))
        // Résumé API
        .route("/api/v1/resumes/extract", post(resume::handle_extract))
        // Cover Letter API
        .route("/api/v1/cover-letters", post(letters::handle_cover_letters))
        .with_state(state)
}
