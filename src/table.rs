//! In-memory table built from a CSV export
//!
//! Holds ordered column names and rows of optional cells. The column-level
//! cleaning steps (empty columns, auto-generated columns, header names and
//! aliases) live here; value-level steps are in `normalize`.

use crate::error::Result;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Marker for columns a spreadsheet export generated rather than a person named
static UNNAMED_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Unnamed").expect("valid regex"));

/// Header variants accepted for each canonical column
///
/// Lookup happens after names are trimmed and lowercased.
const COLUMN_ALIASES: &[(&str, &[&str])] = &[
    ("subject", &["subject", "course", "предмет"]),
    ("title", &["title", "name", "task", "название", "задание"]),
    ("date", &["date", "deadline", "due", "дата", "дедлайн"]),
    ("difficulty", &["difficulty", "level", "сложность"]),
    ("url", &["url", "link", "ссылка"]),
];

/// A parsed CSV document
///
/// Rows built by `from_csv` and `push_row` have exactly `columns.len()`
/// cells. A cell is `None` when the source left it empty; a cell a
/// hand-built row does not reach reads as `None` too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Parse CSV text whose first record is the header
    ///
    /// Short rows are padded with missing cells and cells past the last
    /// header are dropped, so ragged exports still produce a rectangular table.
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut table = Table::new(columns);

        for record in reader.records() {
            let record = record?;
            let row = (0..table.columns.len())
                .map(|i| record.get(i).filter(|cell| !cell.is_empty()).map(str::to_string))
                .collect();
            table.rows.push(row);
        }

        Ok(table)
    }

    /// Append a row given as raw cells; empty strings become missing cells
    pub fn push_row<S: AsRef<str>>(&mut self, cells: &[S]) {
        let row = (0..self.columns.len())
            .map(|i| {
                cells
                    .get(i)
                    .map(|c| c.as_ref())
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
            })
            .collect();
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of one column, top to bottom
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).and_then(Option::as_deref))
    }

    /// Keep only the columns for which `keep(index, name)` is true
    fn retain_columns<F>(&mut self, mut keep: F)
    where
        F: FnMut(usize, &str) -> bool,
    {
        let mask: Vec<bool> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| keep(i, name))
            .collect();

        let mut flags = mask.iter();
        self.columns.retain(|_| *flags.next().unwrap_or(&true));
        for row in &mut self.rows {
            let mut flags = mask.iter();
            row.retain(|_| *flags.next().unwrap_or(&true));
        }
    }

    /// Drop columns with no value in any row
    ///
    /// With no rows at all every column counts as empty.
    pub fn drop_empty_columns(&mut self) {
        let empty: Vec<bool> = (0..self.columns.len())
            .map(|i| self.column_values(i).all(|cell| cell.is_none()))
            .collect();
        self.retain_columns(|i, name| {
            if empty[i] {
                debug!(column = name, "dropping empty column");
            }
            !empty[i]
        });
    }

    /// Drop export artifacts such as `Unnamed: 0` and blank headers
    pub fn drop_unnamed_columns(&mut self) {
        self.retain_columns(|_, name| {
            let unnamed = name.trim().is_empty() || UNNAMED_COLUMN.is_match(name);
            if unnamed {
                debug!(column = name, "dropping auto-generated column");
            }
            !unnamed
        });
    }

    /// Trim and lowercase every column name
    pub fn normalize_column_names(&mut self) {
        for name in &mut self.columns {
            *name = name.trim().to_lowercase();
        }
    }

    /// Rename known header variants to their canonical name
    ///
    /// When several columns end up with the same canonical name, the leftmost
    /// one is kept and the rest are dropped.
    pub fn apply_aliases(&mut self) {
        for name in &mut self.columns {
            if let Some(canonical) = canonical_name(name)
                && name != canonical
            {
                debug!(from = %name, to = canonical, "renaming column");
                *name = canonical.to_string();
            }
        }

        let mut seen = Vec::with_capacity(self.columns.len());
        let duplicate: Vec<bool> = self
            .columns
            .iter()
            .map(|name| {
                let is_canonical = canonical_name(name).is_some();
                let dup = is_canonical && seen.contains(name);
                seen.push(name.clone());
                dup
            })
            .collect();

        self.retain_columns(|i, name| {
            if duplicate[i] {
                warn!(column = name, "duplicate column, keeping the first one");
            }
            !duplicate[i]
        });
    }
}

/// Canonical column for a normalized header name, if it is a known variant
pub fn canonical_name(name: &str) -> Option<&'static str> {
    COLUMN_ALIASES
        .iter()
        .find(|(_, variants)| variants.contains(&name))
        .map(|(canonical, _)| *canonical)
}
