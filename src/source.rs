//! Where the CSV export comes from

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Provider of the raw CSV text for one run
pub trait TableSource {
    /// Human-readable location, used in logs and errors
    fn describe(&self) -> String;

    /// Read the whole export
    fn fetch(&self) -> Result<String>;
}

/// Published spreadsheet fetched over HTTP(S)
///
/// One blocking GET per run, no retries.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TableSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            bail!("HTTP error: {}", status);
        }

        let body = response.text().context("Failed to read response body")?;
        info!(url = %self.url, bytes = body.len(), "fetched source table");
        Ok(body)
    }
}

/// CSV export already saved on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TableSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String> {
        let body = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        info!(path = %self.path.display(), bytes = body.len(), "read source table");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_source_reads_whole_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.csv");
        fs::write(&path, "subject,title,date\nMath,HW1,01/02/2024\n").unwrap();

        let source = FileSource::new(&path);
        assert_eq!(
            source.fetch().unwrap(),
            "subject,title,date\nMath,HW1,01/02/2024\n"
        );
        assert!(source.describe().ends_with("export.csv"));
    }

    #[test]
    fn test_file_source_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let source = FileSource::new(temp_dir.path().join("missing.csv"));
        let err = source.fetch().unwrap_err();
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn test_http_source_keeps_url() {
        let source = HttpSource::new("https://example.com/export?format=csv");
        assert_eq!(source.url(), "https://example.com/export?format=csv");
        assert_eq!(source.describe(), "https://example.com/export?format=csv");
    }
}
