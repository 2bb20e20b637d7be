//! Error taxonomy for a sync run
//!
//! Every variant is fatal: the run stops and the output file is left
//! untouched. Values that can be defaulted (difficulty, url) never produce
//! an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// The source table could not be obtained
    #[error("failed to fetch source table from {source_name}")]
    Fetch {
        source_name: String,
        #[source]
        cause: anyhow::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A column that cannot be synthesized is absent after header normalization
    #[error("required column '{column}' is missing (found: {found})")]
    MissingColumn { column: &'static str, found: String },

    /// `row` is 1-based and counts data rows, not the header
    #[error("row {row}: cannot parse date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("failed to write output to {path}")]
    Write {
        path: String,
        #[source]
        cause: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, SyncError>;
