//! Letter drafter, the text-generation seam of the pipeline.
//!
//! `LlmLetterDrafter` is the production backend. The pipeline and HTTP
//! handlers only see `dyn LetterDrafter`.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::jobs::dataset::Record;
use crate::letters::generator::{draft_letters, CoverLetter};
use crate::letters::keyword::{select_keyword, KeywordSelection};
use crate::llm_client::LlmClient;

#[async_trait]
pub trait LetterDrafter: Send + Sync {
    /// Chooses the search keyword and the dataset columns to search.
    async fn select_keyword(
        &self,
        resume_text: &str,
        columns: &[String],
    ) -> Result<KeywordSelection, AppError>;

    /// Writes one cover letter per job record.
    async fn draft_letters(
        &self,
        resume_text: &str,
        jobs: &[Record],
    ) -> Result<Vec<CoverLetter>, AppError>;
}

/// Claude-backed drafter.
pub struct LlmLetterDrafter(pub LlmClient);

#[async_trait]
impl LetterDrafter for LlmLetterDrafter {
    async fn select_keyword(
        &self,
        resume_text: &str,
        columns: &[String],
    ) -> Result<KeywordSelection, AppError> {
        select_keyword(resume_text, columns, &self.0).await
    }

    async fn draft_letters(
        &self,
        resume_text: &str,
        jobs: &[Record],
    ) -> Result<Vec<CoverLetter>, AppError> {
        draft_letters(resume_text, jobs, &self.0).await
    }
}
