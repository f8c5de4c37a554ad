//! Keyword selection — asks the LLM which keyword best represents the résumé
//! and which dataset columns to search it in.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::letters::prompts::{KEYWORD_SELECT_PROMPT_TEMPLATE, KEYWORD_SELECT_ROLE};
use crate::llm_client::prompts::json_system;
use crate::llm_client::LlmClient;

/// Column searched when the model does not name any.
pub const DEFAULT_SEARCH_COLUMN: &str = "skills";

const KEYWORD_MAX_TOKENS: u32 = 256;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSelection {
    pub keyword: String,
    #[serde(default)]
    pub columns: Vec<String>,
}

/// Builds the selection prompt, listing the dataset's columns one per line.
pub fn build_keyword_prompt(resume_text: &str, columns: &[String]) -> String {
    let column_list = columns
        .iter()
        .map(|c| format!("- {c}"))
        .collect::<Vec<_>>()
        .join("\n");
    KEYWORD_SELECT_PROMPT_TEMPLATE
        .replace("{columns}", &column_list)
        .replace("{resume_text}", resume_text)
}

/// Trims the model's answer. A blank keyword is rejected; blank or duplicate
/// column names are dropped and an empty list falls back to `skills`.
///
/// Column names are not checked against the dataset here. The search itself
/// ignores unknown columns.
pub fn normalize_selection(raw: KeywordSelection) -> Result<KeywordSelection, AppError> {
    let keyword = raw.keyword.trim().to_string();
    if keyword.is_empty() {
        return Err(AppError::Llm(
            "Keyword selection returned an empty keyword".to_string(),
        ));
    }

    let mut columns: Vec<String> = Vec::new();
    for column in raw.columns {
        let column = column.trim();
        if !column.is_empty() && !columns.iter().any(|c| c == column) {
            columns.push(column.to_string());
        }
    }
    if columns.is_empty() {
        columns.push(DEFAULT_SEARCH_COLUMN.to_string());
    }

    Ok(KeywordSelection { keyword, columns })
}

/// Picks the search keyword and columns for `resume_text`.
pub async fn select_keyword(
    resume_text: &str,
    columns: &[String],
    llm: &LlmClient,
) -> Result<KeywordSelection, AppError> {
    let prompt = build_keyword_prompt(resume_text, columns);
    let raw: KeywordSelection = llm
        .call_json(&prompt, &json_system(KEYWORD_SELECT_ROLE), KEYWORD_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Llm(format!("Keyword selection failed: {e}")))?;
    normalize_selection(raw)
}
