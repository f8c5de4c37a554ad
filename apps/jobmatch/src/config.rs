use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a default except the API key, which only the commands
/// that call the LLM ask for.
#[derive(Debug, Clone)]
pub struct Config {
    pub jobs_dataset_path: PathBuf,
    pub letters_output_path: PathBuf,
    pub search_limit: i64,
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            jobs_dataset_path: or_default("JOBS_DATASET_PATH", "job_descriptions.csv").into(),
            letters_output_path: or_default("LETTERS_OUTPUT_PATH", "cv.txt").into(),
            search_limit: or_default("SEARCH_LIMIT", "10")
                .parse::<i64>()
                .context("SEARCH_LIMIT must be an integer")?,
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            port: or_default("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: or_default("RUST_LOG", "info"),
        })
    }

    /// The API key, or an error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str> {
        self.anthropic_api_key.as_deref().with_context(|| {
            "The ANTHROPIC_API_KEY environment variable is not set or is invalid. \
             Please check your .env file."
                .to_string()
        })
    }
}
