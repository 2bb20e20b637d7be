//! Common test utilities for integration tests
#![allow(dead_code)]

use anyhow::{Result, bail};
use deadline_sync::{DeadlineSync, Table, TableSource};
use std::path::PathBuf;
use tempfile::TempDir;

/// Source serving a fixed CSV string, no network involved
pub struct StaticSource(pub String);

impl TableSource for StaticSource {
    fn describe(&self) -> String {
        "static".to_string()
    }

    fn fetch(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Source that always fails, standing in for an unreachable spreadsheet
pub struct UnreachableSource;

impl TableSource for UnreachableSource {
    fn describe(&self) -> String {
        "https://unreachable.invalid/export".to_string()
    }

    fn fetch(&self) -> Result<String> {
        bail!("connection refused")
    }
}

/// Create a sync run over `csv` writing to `data/deadlines.json` in a temp dir
pub fn get_test_sync(csv: &str) -> (DeadlineSync<StaticSource>, PathBuf, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("data").join("deadlines.json");
    let sync = DeadlineSync::new(StaticSource(csv.to_string()), &output);
    (sync, output, temp_dir)
}

/// Build a table from literal cells; empty strings are missing cells
pub fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    let mut table = Table::new(columns.iter().map(|c| c.to_string()).collect());
    for &row in rows {
        table.push_row(row);
    }
    table
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
