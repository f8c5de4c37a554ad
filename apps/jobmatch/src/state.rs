use std::sync::Arc;

use crate::config::Config;
use crate::letters::drafter::LetterDrafter;
use crate::pipeline::PipelineSettings;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Text-generation backend. Default: `LlmLetterDrafter`.
    pub drafter: Arc<dyn LetterDrafter>,
}

impl AppState {
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings::from_config(&self.config)
    }
}
