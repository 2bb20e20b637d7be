use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty label shown next to a deadline on the site
///
/// The set is closed: anything the spreadsheet holds outside of it is
/// coerced to `Medium` during normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    /// Exams and tests, highlighted separately by the front-end
    Exam,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Exam,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Exam => "exam",
        }
    }

    /// Lenient parse of a raw spreadsheet cell
    ///
    /// Trims and lowercases the label. Blank, missing and unknown labels all
    /// fall back to `Medium`.
    pub fn from_label(raw: Option<&str>) -> Self {
        raw.map(|s| s.trim().to_lowercase())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "exam" => Ok(Difficulty::Exam),
            _ => Err(format!(
                "Invalid difficulty '{}'. Valid options are: easy, medium, hard, exam",
                s
            )),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One deadline as published to `data/deadlines.json`
///
/// Field order here is the field order of the JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineRecord {
    /// Course or subject name
    pub subject: String,
    /// What is due
    pub title: String,
    /// Due date, serialized as YYYY-MM-DD
    pub date: NaiveDate,
    pub difficulty: Difficulty,
    /// Link to the assignment, empty when there is none
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_accepts_known_labels_in_any_case() {
        assert_eq!(Difficulty::from_label(Some("Hard ")), Difficulty::Hard);
        assert_eq!(Difficulty::from_label(Some("  EXAM")), Difficulty::Exam);
        assert_eq!(Difficulty::from_label(Some("easy")), Difficulty::Easy);
    }

    #[test]
    fn test_from_label_falls_back_to_medium() {
        assert_eq!(Difficulty::from_label(None), Difficulty::Medium);
        assert_eq!(Difficulty::from_label(Some("")), Difficulty::Medium);
        assert_eq!(Difficulty::from_label(Some("   ")), Difficulty::Medium);
        assert_eq!(Difficulty::from_label(Some("impossible")), Difficulty::Medium);
    }

    #[test]
    fn test_from_str_rejects_unnormalized_input() {
        assert!("Hard".parse::<Difficulty>().is_err());
        assert!(" hard".parse::<Difficulty>().is_err());
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
    }

    #[test]
    fn test_record_serializes_in_field_order() {
        let record = DeadlineRecord {
            subject: "Math".to_string(),
            title: "HW1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            difficulty: Difficulty::Hard,
            url: String::new(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"subject":"Math","title":"HW1","date":"2024-02-01","difficulty":"hard","url":""}"#
        );
    }

    #[test]
    fn test_all_labels_round_trip_through_display() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>(), Ok(difficulty));
        }
    }
}
