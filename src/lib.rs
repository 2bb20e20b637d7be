//! Deadline Sync Library
//!
//! This library turns a deadline spreadsheet, published as a CSV export, into
//! the `data/deadlines.json` file a static site renders. Each run fetches the
//! whole table, cleans it through a fixed sequence of steps and replaces the
//! output file.
//!
//! # Architecture
//!
//! - **Source Layer**: `source` module - HTTP or file access to the CSV export
//! - **Domain Layer**: `table`, `normalize` and `deadline` modules - column cleanup,
//!   day-first dates, difficulty and url defaults, sorting
//! - **Persistence Layer**: `storage` module - pretty JSON written atomically
//!
//! # Example
//!
//! ```no_run
//! use deadline_sync::{DeadlineSync, HttpSource, DEFAULT_OUTPUT_PATH, DEFAULT_SOURCE_URL};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let sync = DeadlineSync::new(HttpSource::new(DEFAULT_SOURCE_URL), DEFAULT_OUTPUT_PATH);
//!     let records = sync.run()?;
//!     println!("{} deadlines", records.len());
//!     Ok(())
//! }
//! ```

pub mod deadline;
pub mod error;
pub mod normalize;
pub mod source;
pub mod storage;
pub mod table;

use tracing::info;

pub use deadline::{DeadlineRecord, Difficulty};
pub use error::SyncError;
pub use normalize::normalize;
pub use source::{FileSource, HttpSource, TableSource};
pub use storage::Storage;
pub use table::Table;

/// Published CSV export of the deadline spreadsheet
pub const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/1l7xAoM2Dt2HQMHk_f_CedVYC9jKW7FpNY-4_-9zNL_s/export?format=csv&gid=0";

/// Output path, relative to the site root
pub const DEFAULT_OUTPUT_PATH: &str = "data/deadlines.json";

/// One sync run: fetch, normalize, write
///
/// Nothing is written unless every step before the write succeeds.
pub struct DeadlineSync<S: TableSource> {
    source: S,
    storage: Storage,
}

impl<S: TableSource> DeadlineSync<S> {
    /// Create a new sync run
    ///
    /// # Arguments
    /// * `source` - Where the CSV export is read from
    /// * `output_path` - JSON file to replace, usually `DEFAULT_OUTPUT_PATH`
    ///
    /// # Example
    /// ```no_run
    /// # use deadline_sync::{DeadlineSync, FileSource};
    /// let sync = DeadlineSync::new(FileSource::new("export.csv"), "data/deadlines.json");
    /// ```
    pub fn new(source: S, output_path: impl AsRef<std::path::Path>) -> Self {
        Self {
            source,
            storage: Storage::new(output_path),
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Fetch and normalize without touching the output file
    pub fn prepare(&self) -> Result<Vec<DeadlineRecord>, SyncError> {
        let text = self.source.fetch().map_err(|cause| SyncError::Fetch {
            source_name: self.source.describe(),
            cause,
        })?;

        let table = Table::from_csv(&text)?;
        info!(rows = table.len(), columns = table.columns.len(), "parsed source table");
        normalize(table)
    }

    /// Fetch, normalize and replace the output file
    ///
    /// # Returns
    /// The records that were written, or the first fatal error. On error the
    /// output file is left as it was.
    pub fn run(&self) -> Result<Vec<DeadlineRecord>, SyncError> {
        let records = self.prepare()?;
        self.write(&records)?;
        Ok(records)
    }

    /// Normalize an already parsed table and write it
    ///
    /// # Arguments
    /// * `table` - Table built by hand or by `Table::from_csv`; rows shorter
    ///   than the header read their missing cells as empty
    ///
    /// # Returns
    /// The records that were written, or the first fatal error
    pub fn sync_table(&self, table: Table) -> Result<Vec<DeadlineRecord>, SyncError> {
        let records = normalize(table)?;
        self.write(&records)?;
        Ok(records)
    }

    fn write(&self, records: &[DeadlineRecord]) -> Result<(), SyncError> {
        self.storage.save(records).map_err(|cause| SyncError::Write {
            path: self.storage.path().display().to_string(),
            cause,
        })?;
        info!(
            path = %self.storage.path().display(),
            records = records.len(),
            "wrote deadlines"
        );
        Ok(())
    }
}
