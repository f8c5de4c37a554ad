//! Cover-letter pipeline: résumé text in, letters file out.
//!
//! Flow: select keyword → search jobs → draft letters → render → write.
//! When the search finds nothing, no letters are drafted and the output file
//! is left untouched. File reads and the final write run on the blocking pool.

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::jobs::dataset::{JobDataset, Record};
use crate::jobs::search::{search_jobs, SearchQuery};
use crate::letters::drafter::LetterDrafter;
use crate::letters::generator::{render_letters, CoverLetter};
use crate::letters::writer::write_letters;

/// Where the pipeline reads from and writes to.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub dataset_path: PathBuf,
    pub output_path: PathBuf,
    pub search_limit: i64,
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            dataset_path: config.jobs_dataset_path.clone(),
            output_path: config.letters_output_path.clone(),
            search_limit: config.search_limit,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub run_id: Uuid,
    pub keyword: String,
    pub columns: Vec<String>,
    pub jobs: Vec<Record>,
    pub letters: Vec<CoverLetter>,
    /// `None` when nothing was written.
    pub output_path: Option<PathBuf>,
}

pub async fn run_pipeline(
    resume_text: &str,
    settings: &PipelineSettings,
    drafter: &dyn LetterDrafter,
) -> Result<PipelineOutcome, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume text cannot be empty".to_string()));
    }

    let run_id = Uuid::new_v4();
    info!("Pipeline run {run_id} started");

    // Step 1: keyword selection. Only the header is read here.
    let dataset_path = settings.dataset_path.clone();
    let columns = blocking(move || JobDataset::read_columns(dataset_path)).await??;
    let selection = drafter.select_keyword(resume_text, &columns).await?;
    info!(
        "Run {run_id}: keyword {:?} in columns {:?}",
        selection.keyword, selection.columns
    );

    // Step 2: search
    let query = SearchQuery {
        columns: selection.columns.clone(),
        keyword: selection.keyword.clone(),
        limit: settings.search_limit,
    };
    let dataset_path = settings.dataset_path.clone();
    let jobs = blocking(move || search_jobs(dataset_path, &query)).await??;

    if jobs.is_empty() {
        warn!("Run {run_id}: no jobs matched {:?}", selection.keyword);
        return Ok(PipelineOutcome {
            run_id,
            keyword: selection.keyword,
            columns: selection.columns,
            jobs,
            letters: Vec::new(),
            output_path: None,
        });
    }

    // Step 3: draft
    let letters = drafter.draft_letters(resume_text, &jobs).await?;
    info!("Run {run_id}: drafted {} letter(s)", letters.len());

    // Step 4: render + write
    let document = render_letters(&letters, Utc::now());
    let output_path = settings.output_path.clone();
    blocking(move || write_letters(&output_path, &document)).await??;

    Ok(PipelineOutcome {
        run_id,
        keyword: selection.keyword,
        columns: selection.columns,
        jobs,
        letters,
        output_path: Some(settings.output_path.clone()),
    })
}

/// Runs `f` on the blocking thread pool.
async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(e.into()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::letters::keyword::KeywordSelection;

    /// Deterministic drafter: fixed keyword, one letter per job titled after
    /// the job's "Job Title" column.
    pub(crate) struct StubDrafter {
        pub keyword: String,
        pub columns: Vec<String>,
        pub seen_columns: Mutex<Vec<String>>,
    }

    impl StubDrafter {
        pub(crate) fn new(keyword: &str, columns: &[&str]) -> Self {
            Self {
                keyword: keyword.to_string(),
                columns: columns.iter().map(|c| c.to_string()).collect(),
                seen_columns: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LetterDrafter for StubDrafter {
        async fn select_keyword(
            &self,
            _resume_text: &str,
            columns: &[String],
        ) -> Result<KeywordSelection, AppError> {
            *self.seen_columns.lock().unwrap() = columns.to_vec();
            Ok(KeywordSelection {
                keyword: self.keyword.clone(),
                columns: self.columns.clone(),
            })
        }

        async fn draft_letters(
            &self,
            resume_text: &str,
            jobs: &[Record],
        ) -> Result<Vec<CoverLetter>, AppError> {
            Ok(jobs
                .iter()
                .map(|job| CoverLetter {
                    job_title: job
                        .get("Job Title")
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string(),
                    company: job
                        .get("Company")
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string(),
                    body: format!("Dear hiring manager, {resume_text}"),
                })
                .collect())
        }
    }

    pub(crate) const JOBS_CSV: &str = "\
Job Title,Company,skills
Data Engineer,Acme,\"Python, Spark\"
Frontend Developer,Globex,\"React, HTML\"
ML Engineer,Initech,\"python, PyTorch\"
";

    fn settings(dir: &tempfile::TempDir, limit: i64) -> PipelineSettings {
        let dataset_path = dir.path().join("jobs.csv");
        std::fs::write(&dataset_path, JOBS_CSV).unwrap();
        PipelineSettings {
            dataset_path,
            output_path: dir.path().join("cv.txt"),
            search_limit: limit,
        }
    }

    #[tokio::test]
    async fn test_pipeline_writes_one_letter_per_matched_job() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir, 10);
        let drafter = StubDrafter::new("Python", &["skills"]);

        let outcome = run_pipeline("Jane Doe, Python", &settings, &drafter)
            .await
            .unwrap();

        assert_eq!(outcome.jobs.len(), 2);
        assert_eq!(outcome.letters.len(), 2);
        assert_eq!(outcome.output_path.as_deref(), Some(settings.output_path.as_path()));

        let written = std::fs::read_to_string(&settings.output_path).unwrap();
        assert!(written.contains("1. Data Engineer at Acme"));
        assert!(written.contains("2. ML Engineer at Initech"));
        assert!(!written.contains("Frontend Developer"));
    }

    #[tokio::test]
    async fn test_pipeline_passes_dataset_columns_to_drafter() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir, 10);
        let drafter = StubDrafter::new("Python", &["skills"]);

        run_pipeline("resume", &settings, &drafter).await.unwrap();
        assert_eq!(
            *drafter.seen_columns.lock().unwrap(),
            vec!["Job Title", "Company", "skills"]
        );
    }

    #[tokio::test]
    async fn test_pipeline_respects_search_limit() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir, 1);
        let drafter = StubDrafter::new("python", &["skills"]);

        let outcome = run_pipeline("resume", &settings, &drafter).await.unwrap();
        assert_eq!(outcome.jobs.len(), 1);
        assert_eq!(outcome.jobs[0]["Job Title"], "Data Engineer");
    }

    #[tokio::test]
    async fn test_pipeline_without_matches_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir, 10);
        let drafter = StubDrafter::new("COBOL", &["skills"]);

        let outcome = run_pipeline("resume", &settings, &drafter).await.unwrap();
        assert!(outcome.jobs.is_empty());
        assert!(outcome.letters.is_empty());
        assert!(outcome.output_path.is_none());
        assert!(!settings.output_path.exists());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_pipeline_runs_on_single_threaded_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir, 10);
        let drafter = StubDrafter::new("react", &["skills"]);

        let outcome = run_pipeline("resume", &settings, &drafter).await.unwrap();
        assert_eq!(outcome.jobs.len(), 1);
        assert!(settings.output_path.exists());
    }

    #[tokio::test]
    async fn test_pipeline_selects_keyword_from_header_before_loading_rows() {
        let dir = tempfile::tempdir().unwrap();
        let dataset_path = dir.path().join("jobs.csv");
        std::fs::write(&dataset_path, "Job Title,Company,skills\nOnly one field\n").unwrap();
        let settings = PipelineSettings {
            dataset_path,
            output_path: dir.path().join("cv.txt"),
            search_limit: 10,
        };
        let drafter = StubDrafter::new("Python", &["skills"]);

        let err = run_pipeline("resume", &settings, &drafter).await.unwrap_err();
        assert!(matches!(err, AppError::Dataset(_)));
        assert_eq!(
            *drafter.seen_columns.lock().unwrap(),
            vec!["Job Title", "Company", "skills"]
        );
        assert!(!settings.output_path.exists());
    }

    #[tokio::test]
    async fn test_pipeline_rejects_blank_resume() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir, 10);
        let drafter = StubDrafter::new("Python", &["skills"]);

        let err = run_pipeline("  \n", &settings, &drafter).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_pipeline_missing_dataset_fails() {
        let dir = tempfile::tempdir().unwrap();
        let settings = PipelineSettings {
            dataset_path: dir.path().join("absent.csv"),
            output_path: dir.path().join("cv.txt"),
            search_limit: 10,
        };
        let drafter = StubDrafter::new("Python", &["skills"]);

        let err = run_pipeline("resume", &settings, &drafter).await.unwrap_err();
        assert!(matches!(err, AppError::Dataset(_)));
    }
}
