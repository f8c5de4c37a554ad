//! Dataset profile: row count and missing values per column.

use std::path::Path;

use serde::Serialize;

use crate::jobs::dataset::{DatasetError, JobDataset};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub missing: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetProfile {
    pub row_count: usize,
    pub columns: Vec<ColumnProfile>,
}

pub fn profile_dataset(path: impl AsRef<Path>) -> Result<DatasetProfile, DatasetError> {
    Ok(compute_profile(&JobDataset::load(path)?))
}

pub fn compute_profile(dataset: &JobDataset) -> DatasetProfile {
    let columns = dataset
        .columns()
        .iter()
        .enumerate()
        .map(|(index, name)| ColumnProfile {
            name: name.clone(),
            missing: dataset.column_values(index).filter(Option::is_none).count(),
        })
        .collect();

    DatasetProfile {
        row_count: dataset.len(),
        columns,
    }
}
