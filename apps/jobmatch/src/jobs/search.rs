//! Keyword row filter. Returns the first N dataset rows in which any of the
//! requested columns contains the keyword.
//!
//! Matching rules:
//! - case-insensitive literal substring (no pattern syntax)
//! - a row matches if ANY requested column matches (per-row OR)
//! - requested columns missing from the dataset are skipped, never an error
//! - null cells never match
//! - results keep dataset order and are truncated to `limit`; `limit <= 0` yields nothing

use std::path::Path;

use tracing::{debug, info};

use crate::jobs::dataset::{DatasetError, JobDataset, Record};

/// One search request against the job dataset.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub columns: Vec<String>,
    pub keyword: String,
    pub limit: i64,
}

/// Loads the dataset at `path` and runs the filter against it.
/// The file is re-read on every call.
pub fn search_jobs(
    path: impl AsRef<Path>,
    query: &SearchQuery,
) -> Result<Vec<Record>, DatasetError> {
    let dataset = JobDataset::load(path)?;
    let records = filter_rows(&dataset, query);
    info!(
        "Search for {:?} in {:?} matched {} row(s) (limit {})",
        query.keyword,
        query.columns,
        records.len(),
        query.limit
    );
    Ok(records)
}

/// Same as [`search_jobs`], serialized record-oriented:
/// `[{"column": value, ...}, ...]`.
pub fn search_jobs_json(
    path: impl AsRef<Path>,
    query: &SearchQuery,
) -> Result<String, DatasetError> {
    let records = search_jobs(path, query)?;
    Ok(records_to_json(&records))
}

pub fn records_to_json(records: &[Record]) -> String {
    serde_json::Value::Array(
        records
            .iter()
            .cloned()
            .map(serde_json::Value::Object)
            .collect(),
    )
    .to_string()
}

/// Filters an already loaded dataset.
pub fn filter_rows(dataset: &JobDataset, query: &SearchQuery) -> Vec<Record> {
    let limit = usize::try_from(query.limit).unwrap_or(0);
    if limit == 0 {
        return Vec::new();
    }

    let included = match_mask(dataset, &query.columns, &query.keyword);

    included
        .iter()
        .enumerate()
        .filter(|(_, hit)| **hit)
        .map(|(row, _)| dataset.record(row))
        .take(limit)
        .collect()
}

/// Per-row inclusion flags: OR of [`column_mask`] over every requested
/// column that exists.
pub fn match_mask(dataset: &JobDataset, columns: &[String], keyword: &str) -> Vec<bool> {
    let mut included = vec![false; dataset.len()];

    for column in columns {
        let Some(column_hits) = column_mask(dataset, column, keyword) else {
            debug!("Ignoring unknown column {column:?}");
            continue;
        };
        for (flag, hit) in included.iter_mut().zip(column_hits) {
            *flag |= hit;
        }
    }

    included
}

/// Flags for a single column, or `None` if the dataset has no such column.
pub fn column_mask(dataset: &JobDataset, column: &str, keyword: &str) -> Option<Vec<bool>> {
    let index = dataset.column_index(column)?;
    let needle = keyword.to_lowercase();
    Some(
        dataset
            .column_values(index)
            .map(|value| value.is_some_and(|v| contains_ignore_case(v, &needle)))
            .collect(),
    )
}

/// `needle` must already be lowercased.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn jobs() -> JobDataset {
        let rows = [
            ("Looking for a Python developer", Some("Python, SQL")),
            ("Senior HTML developer wanted", Some("HTML, CSS")),
            ("Embedded engineer", Some("C++ programmer, RTOS")),
            ("Data scientist", None),
            ("Backend role using python daily", Some("Django, PostgreSQL")),
        ];
        JobDataset::from_rows(
            vec!["Job Description".into(), "skills".into()],
            rows.iter()
                .map(|(desc, skills)| vec![Some(desc.to_string()), skills.map(String::from)])
                .collect(),
        )
    }

    fn query(columns: &[&str], keyword: &str, limit: i64) -> SearchQuery {
        SearchQuery {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            keyword: keyword.to_string(),
            limit,
        }
    }

    fn descriptions(records: &[Record]) -> Vec<&str> {
        records
            .iter()
            .map(|r| r["Job Description"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_keyword_matches_in_requested_column() {
        let records = filter_rows(&jobs(), &query(&["skills"], "python", 10));
        assert_eq!(descriptions(&records), vec!["Looking for a Python developer"]);
    }

    #[test]
    fn test_keyword_absent_returns_empty() {
        let records = filter_rows(&jobs(), &query(&["skills"], "Java", 10));
        assert!(records.is_empty());
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let records = filter_rows(&jobs(), &query(&["skills"], "html", 10));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["skills"], "HTML, CSS");
    }

    #[test]
    fn test_keyword_is_literal_not_pattern() {
        let records = filter_rows(&jobs(), &query(&["skills"], "C++", 10));
        assert_eq!(descriptions(&records), vec!["Embedded engineer"]);

        // "." must not act as a wildcard
        let records = filter_rows(&jobs(), &query(&["skills"], "p.thon", 10));
        assert!(records.is_empty());
    }

    #[test]
    fn test_any_column_match_includes_row() {
        let records = filter_rows(&jobs(), &query(&["Job Description", "skills"], "python", 10));
        assert_eq!(
            descriptions(&records),
            vec![
                "Looking for a Python developer",
                "Backend role using python daily"
            ]
        );
    }

    #[test]
    fn test_records_carry_all_columns() {
        let records = filter_rows(&jobs(), &query(&["skills"], "sql", 10));
        assert_eq!(
            serde_json::Value::Object(records[0].clone()),
            json!({
                "Job Description": "Looking for a Python developer",
                "skills": "Python, SQL"
            })
        );
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        let records = filter_rows(&jobs(), &query(&["Salary", "skills"], "python", 10));
        assert_eq!(records.len(), 1);

        let records = filter_rows(&jobs(), &query(&["Salary", "Company"], "python", 10));
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_column_list_returns_empty() {
        let records = filter_rows(&jobs(), &query(&[], "python", 10));
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_keyword_matches_every_non_null_value() {
        let records = filter_rows(&jobs(), &query(&["skills"], "", 10));
        // the row with a null skills cell is the only one excluded
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| !r["skills"].is_null()));
    }

    #[test]
    fn test_null_cells_never_match() {
        let mask = column_mask(&jobs(), "skills", "").unwrap();
        assert_eq!(mask, vec![true, true, true, false, true]);
    }

    #[test]
    fn test_limit_truncates_in_dataset_order() {
        let records = filter_rows(&jobs(), &query(&["Job Description"], "e", 2));
        assert_eq!(
            descriptions(&records),
            vec!["Looking for a Python developer", "Senior HTML developer wanted"]
        );
    }

    #[test]
    fn test_limit_above_match_count_returns_all_matches() {
        let records = filter_rows(&jobs(), &query(&["Job Description"], "developer", 100));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_non_positive_limit_returns_empty() {
        assert!(filter_rows(&jobs(), &query(&["skills"], "python", 0)).is_empty());
        assert!(filter_rows(&jobs(), &query(&["skills"], "python", -5)).is_empty());
    }

    #[test]
    fn test_result_never_exceeds_limit_and_keeps_order() {
        let dataset = jobs();
        for limit in 0..7 {
            let records = filter_rows(&dataset, &query(&["Job Description", "skills"], "", limit));
            assert!(records.len() <= limit as usize);
            assert_eq!(records.len(), (limit as usize).min(dataset.len()));
            let expected: Vec<Record> = (0..records.len()).map(|i| dataset.record(i)).collect();
            assert_eq!(records, expected);
        }
    }

    #[test]
    fn test_column_mask_unknown_column_is_none() {
        assert!(column_mask(&jobs(), "Salary", "x").is_none());
    }

    #[test]
    fn test_match_mask_is_or_of_column_masks() {
        let dataset = jobs();
        let desc = column_mask(&dataset, "Job Description", "developer").unwrap();
        let skills = column_mask(&dataset, "skills", "developer").unwrap();
        let combined = match_mask(
            &dataset,
            &["Job Description".to_string(), "skills".to_string()],
            "developer",
        );
        let expected: Vec<bool> = desc.iter().zip(&skills).map(|(a, b)| *a || *b).collect();
        assert_eq!(combined, expected);
    }

    #[test]
    fn test_search_jobs_json_reads_file_each_call() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Job Title,skills").unwrap();
        writeln!(file, "Data Engineer,\"Python, Spark\"").unwrap();
        file.flush().unwrap();

        let q = query(&["skills"], "python", 10);
        let first = search_jobs_json(file.path(), &q).unwrap();
        assert_eq!(first, r#"[{"Job Title":"Data Engineer","skills":"Python, Spark"}]"#);

        writeln!(file, "ML Engineer,python").unwrap();
        file.flush().unwrap();
        assert_eq!(search_jobs(file.path(), &q).unwrap().len(), 2);
    }

    #[test]
    fn test_null_spellings_in_file_never_match() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Job Title,skills").unwrap();
        writeln!(file, "Analyst,N/A").unwrap();
        writeln!(file, "Tester,NaN").unwrap();
        writeln!(file, "Data Engineer,Python").unwrap();
        file.flush().unwrap();

        let records = search_jobs(file.path(), &query(&["skills"], "", 10)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Job Title"], "Data Engineer");

        assert!(search_jobs(file.path(), &query(&["skills"], "n/a", 10))
            .unwrap()
            .is_empty());

        let all = search_jobs(file.path(), &query(&["Job Title"], "", 10)).unwrap();
        assert_eq!(all[0]["skills"], serde_json::Value::Null);
    }

    #[test]
    fn test_search_jobs_missing_file_fails() {
        let err = search_jobs("/no/such/jobs.csv", &query(&["skills"], "x", 10)).unwrap_err();
        assert!(matches!(err, DatasetError::Open { .. }));
    }
}
