//! Cover-letter generation — one personalized letter per matched job,
//! rendered into a single text document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::jobs::dataset::Record;
use crate::jobs::search::records_to_json;
use crate::letters::prompts::{LETTERS_PROMPT_TEMPLATE, LETTERS_ROLE};
use crate::llm_client::prompts::{json_system, RESUME_GROUNDING_INSTRUCTION};
use crate::llm_client::LlmClient;

const LETTER_DIVIDER: &str = "----------------------------------------";
/// Room for ten ~350-word letters plus JSON overhead.
const LETTERS_MAX_TOKENS: u32 = 8192;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverLetter {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct LettersResponse {
    letters: Vec<CoverLetter>,
}

pub fn build_letters_prompt(resume_text: &str, jobs: &[Record]) -> String {
    LETTERS_PROMPT_TEMPLATE
        .replace("{grounding}", RESUME_GROUNDING_INSTRUCTION)
        .replace("{jobs_json}", &records_to_json(jobs))
        .replace("{resume_text}", resume_text)
}

/// Drafts letters for `jobs`. Letters with an empty body are dropped.
pub async fn draft_letters(
    resume_text: &str,
    jobs: &[Record],
    llm: &LlmClient,
) -> Result<Vec<CoverLetter>, AppError> {
    if jobs.is_empty() {
        return Ok(Vec::new());
    }

    let prompt = build_letters_prompt(resume_text, jobs);
    let response: LettersResponse = llm
        .call_json(&prompt, &json_system(LETTERS_ROLE), LETTERS_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter drafting failed: {e}")))?;

    let letters = discard_blank_letters(response.letters);
    if letters.len() != jobs.len() {
        warn!(
            "Expected {} cover letters, model returned {}",
            jobs.len(),
            letters.len()
        );
    }
    if letters.is_empty() {
        return Err(AppError::Llm("Model returned no cover letters".to_string()));
    }
    Ok(letters)
}

fn discard_blank_letters(letters: Vec<CoverLetter>) -> Vec<CoverLetter> {
    letters
        .into_iter()
        .filter(|l| !l.body.trim().is_empty())
        .collect()
}

/// Renders all letters into one document, each under its own heading.
pub fn render_letters(letters: &[CoverLetter], generated_at: DateTime<Utc>) -> String {
    let mut out = format!(
        "Cover letters ({}), generated {}\n",
        letters.len(),
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    for (i, letter) in letters.iter().enumerate() {
        out.push('\n');
        out.push_str(LETTER_DIVIDER);
        out.push('\n');
        out.push_str(&format!("{}. {}\n", i + 1, letter_heading(letter)));
        out.push_str(LETTER_DIVIDER);
        out.push_str("\n\n");
        out.push_str(letter.body.trim());
        out.push('\n');
    }

    out
}

fn letter_heading(letter: &CoverLetter) -> String {
    let title = letter.job_title.trim();
    let company = letter.company.trim();
    match (title.is_empty(), company.is_empty()) {
        (false, false) => format!("{title} at {company}"),
        (false, true) => title.to_string(),
        (true, false) => company.to_string(),
        (true, true) => "Untitled position".to_string(),
    }
}
