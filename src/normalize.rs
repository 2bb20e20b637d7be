//! Table to deadline records
//!
//! Runs the fixed cleaning sequence over a freshly parsed table:
//! column cleanup, day-first date parsing, difficulty and url defaults,
//! projection onto the five canonical fields and sorting by date.

use crate::deadline::{DeadlineRecord, Difficulty};
use crate::error::{Result, SyncError};
use crate::table::Table;
use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info, warn};

/// Accepted date layouts, tried in order
///
/// Two-digit years must come first, `%Y` also accepts `24` as a year.
/// On a four-digit year they leave digits behind and are rejected.
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%y",
    "%d.%m.%y",
    "%d-%m-%y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d-%m-%Y",
    "%d %B %Y",
];

/// Time of day that may trail a date; it is discarded
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

fn is_time_suffix(rest: &str) -> bool {
    if rest.is_empty() {
        return true;
    }
    let time = rest.strip_prefix('T').unwrap_or(rest).trim_start();
    // a bare remainder with no separator is leftover digits, not a time
    if time.len() == rest.len() {
        return false;
    }
    TIME_FORMATS
        .iter()
        .any(|fmt| NaiveTime::parse_from_str(time, fmt).is_ok())
}

/// Parse a date the way a day-first spreadsheet locale writes it
///
/// `01/02/2024` is the 1st of February. Year-first input (`2024-02-01`,
/// `2024/02/01`) is read year, month, day. A trailing time of day is dropped.
///
/// # Arguments
/// * `raw` - Cell content as exported, surrounding whitespace allowed
///
/// # Returns
/// The calendar date, or `None` for blank or unrecognized values
pub fn parse_day_first_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    DATE_FORMATS.iter().find_map(|fmt| {
        let (date, rest) = NaiveDate::parse_and_remainder(value, fmt).ok()?;
        is_time_suffix(rest).then_some(date)
    })
}

/// Run the column-level cleanup: empty and auto-generated columns,
/// header case and whitespace, header aliases
pub fn clean_columns(table: &mut Table) {
    table.drop_empty_columns();
    table.drop_unnamed_columns();
    table.normalize_column_names();
    table.apply_aliases();
    debug!(columns = ?table.columns, "columns after cleanup");
}

fn required_column(table: &Table, column: &'static str) -> Result<usize> {
    table
        .column_index(column)
        .ok_or_else(|| SyncError::MissingColumn {
            column,
            found: if table.columns.is_empty() {
                "none".to_string()
            } else {
                table.columns.join(", ")
            },
        })
}

/// Parse every value of the `date` column
pub fn parse_dates(table: &Table) -> Result<Vec<NaiveDate>> {
    let index = required_column(table, "date")?;
    table
        .column_values(index)
        .enumerate()
        .map(|(i, cell)| {
            let raw = cell.unwrap_or_default();
            parse_day_first_date(raw).ok_or_else(|| SyncError::InvalidDate {
                row: i + 1,
                value: raw.to_string(),
            })
        })
        .collect()
}

/// True when a non-blank label was replaced by the default
fn is_unknown_label(raw: &str, difficulty: Difficulty) -> bool {
    let label = raw.trim().to_lowercase();
    !label.is_empty() && label != difficulty.as_str()
}

/// Difficulty per row, `Medium` for every row when the column is absent
pub fn normalize_difficulty(table: &Table) -> Vec<Difficulty> {
    let Some(index) = table.column_index("difficulty") else {
        debug!("no difficulty column, defaulting every row to medium");
        return vec![Difficulty::Medium; table.len()];
    };

    table
        .column_values(index)
        .enumerate()
        .map(|(i, cell)| {
            let difficulty = Difficulty::from_label(cell);
            if let Some(raw) = cell
                && is_unknown_label(raw, difficulty)
            {
                warn!(row = i + 1, value = raw, "unknown difficulty, using medium");
            }
            difficulty
        })
        .collect()
}

/// Trimmed url per row, empty when missing or when the column is absent
pub fn normalize_url(table: &Table) -> Vec<String> {
    let Some(index) = table.column_index("url") else {
        debug!("no url column, defaulting every row to empty");
        return vec![String::new(); table.len()];
    };

    table
        .column_values(index)
        .map(|cell| cell.unwrap_or_default().trim().to_string())
        .collect()
}

/// Turn a raw table into sorted deadline records
///
/// Runs column cleanup, then builds one record per row. Extra columns are
/// ignored and rows shorter than the header read their missing cells as empty.
///
/// # Arguments
/// * `table` - Table as parsed from the export or built by hand
///
/// # Returns
/// Records sorted by date, or `MissingColumn` when `subject`, `title` or
/// `date` is absent and `InvalidDate` for the first unparseable date
pub fn normalize(mut table: Table) -> Result<Vec<DeadlineRecord>> {
    clean_columns(&mut table);

    let dates = parse_dates(&table)?;
    let difficulties = normalize_difficulty(&table);
    let urls = normalize_url(&table);

    let subject = required_column(&table, "subject")?;
    let title = required_column(&table, "title")?;

    let mut records: Vec<DeadlineRecord> = table
        .rows
        .into_iter()
        .zip(dates)
        .zip(difficulties)
        .zip(urls)
        .map(|(((mut row, date), difficulty), url)| DeadlineRecord {
            subject: row.get_mut(subject).and_then(Option::take).unwrap_or_default(),
            title: row.get_mut(title).and_then(Option::take).unwrap_or_default(),
            date,
            difficulty,
            url,
        })
        .collect();

    // stable, so rows sharing a date keep spreadsheet order
    records.sort_by_key(|record| record.date);

    info!(records = records.len(), "normalized deadlines");
    Ok(records)
}
