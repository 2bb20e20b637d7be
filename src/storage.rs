use crate::deadline::DeadlineRecord;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// JSON file the static site reads its deadlines from
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read back a previously written file; a missing file is an empty list
    pub fn load(&self) -> Result<Vec<DeadlineRecord>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.file_path)?;
        let records: Vec<DeadlineRecord> = serde_json::from_str(&content)?;
        Ok(records)
    }

    /// Replace the file with `records`
    ///
    /// The JSON goes to a temporary file next to the target and is renamed
    /// over it, so readers see either the old list or the new one.
    pub fn save(&self, records: &[DeadlineRecord]) -> Result<()> {
        let content = to_json(records)?;

        let dir = match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(content.as_bytes())?;
        temp.persist(&self.file_path)
            .with_context(|| format!("Failed to replace {}", self.file_path.display()))?;
        Ok(())
    }
}

/// Pretty-printed JSON array with non-ASCII text left as is
pub fn to_json(records: &[DeadlineRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadline::Difficulty;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(subject: &str, date: (i32, u32, u32)) -> DeadlineRecord {
        DeadlineRecord {
            subject: subject.to_string(),
            title: "Контрольная работа".to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            difficulty: Difficulty::Exam,
            url: String::new(),
        }
    }

    #[test]
    fn test_to_json_is_indented_and_unescaped() {
        let json = to_json(&[record("Матан", (2024, 3, 15))]).unwrap();
        let expected = r#"[
  {
    "subject": "Матан",
    "title": "Контрольная работа",
    "date": "2024-03-15",
    "difficulty": "exam",
    "url": ""
  }
]"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_to_json_empty_list() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("deadlines.json");
        let storage = Storage::new(&path);

        storage.save(&[record("Math", (2024, 2, 1))]).unwrap();
        assert!(path.exists());
        assert_eq!(storage.load().unwrap(), vec![record("Math", (2024, 2, 1))]);
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("deadlines.json");
        fs::write(&path, "stale content that is much longer than the new list").unwrap();

        let storage = Storage::new(&path);
        storage.save(&[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(temp_dir.path().join("nope.json"));
        assert!(storage.load().unwrap().is_empty());
    }
}
