use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{DayNumber, Season};

/// XP awarded for a completed day when the syllabus does not set one.
pub const DEFAULT_DAY_XP: u32 = 10;

fn default_xp() -> u32 {
    DEFAULT_DAY_XP
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Configuration errors raised while reading or validating a syllabus.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyllabusError {
    #[error("syllabus has no days")]
    Empty,

    #[error("syllabus day at position {position} has day_number {found}; days must be numbered 1..N in order")]
    NonDense { position: usize, found: u32 },

    #[error("failed to parse syllabus: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read syllabus file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

//
// ─── DAY ───────────────────────────────────────────────────────────────────────
//

/// A single curriculum day, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusDay {
    day_number: DayNumber,
    season: Season,
    #[serde(default = "default_xp")]
    xp: u32,
    #[serde(default)]
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    focus: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tasks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    warmup: Option<String>,
}

impl SyllabusDay {
    /// Build a day with the default XP and no descriptive extras.
    #[must_use]
    pub fn new(day_number: DayNumber, season: Season, title: impl Into<String>) -> Self {
        Self {
            day_number,
            season,
            xp: DEFAULT_DAY_XP,
            title: title.into(),
            focus: None,
            tasks: Vec::new(),
            warmup: None,
        }
    }

    #[must_use]
    pub fn with_xp(mut self, xp: u32) -> Self {
        self.xp = xp;
        self
    }

    #[must_use]
    pub fn with_focus(mut self, focus: impl Into<String>) -> Self {
        self.focus = Some(focus.into());
        self
    }

    #[must_use]
    pub fn with_tasks(mut self, tasks: Vec<String>) -> Self {
        self.tasks = tasks;
        self
    }

    #[must_use]
    pub fn with_warmup(mut self, warmup: impl Into<String>) -> Self {
        self.warmup = Some(warmup.into());
        self
    }

    #[must_use]
    pub fn day_number(&self) -> DayNumber {
        self.day_number
    }

    #[must_use]
    pub fn season(&self) -> Season {
        self.season
    }

    #[must_use]
    pub fn xp(&self) -> u32 {
        self.xp
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    #[must_use]
    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    #[must_use]
    pub fn warmup(&self) -> Option<&str> {
        self.warmup.as_deref()
    }
}

//
// ─── SYLLABUS ──────────────────────────────────────────────────────────────────
//

#[derive(Deserialize)]
struct SyllabusFile {
    days: Vec<SyllabusDay>,
}

/// Ordered curriculum with day numbers exactly `1..=len`.
///
/// Because numbering is dense, day `n` always lives at index `n - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syllabus {
    days: Vec<SyllabusDay>,
}

impl Syllabus {
    /// Validate and wrap an ordered list of days.
    ///
    /// # Errors
    ///
    /// Returns `SyllabusError::Empty` when `days` is empty, and
    /// `SyllabusError::NonDense` when numbering has a gap, duplicate or
    /// out-of-order entry.
    pub fn new(days: Vec<SyllabusDay>) -> Result<Self, SyllabusError> {
        if days.is_empty() {
            return Err(SyllabusError::Empty);
        }
        for (position, day) in days.iter().enumerate() {
            if day.day_number.index() != position {
                return Err(SyllabusError::NonDense {
                    position: position + 1,
                    found: day.day_number.value(),
                });
            }
        }
        Ok(Self { days })
    }

    /// Parse the `{"days": [...]}` JSON document.
    ///
    /// # Errors
    ///
    /// Returns `SyllabusError::Parse` for malformed JSON or invalid field
    /// values (zero day numbers, seasons outside 1..=4), and the validation
    /// errors of [`Syllabus::new`].
    pub fn from_json_str(raw: &str) -> Result<Self, SyllabusError> {
        let file: SyllabusFile = serde_json::from_str(raw)?;
        Self::new(file.days)
    }

    /// Read and parse a syllabus file.
    ///
    /// # Errors
    ///
    /// Returns `SyllabusError::Io` if the file cannot be read, otherwise the
    /// errors of [`Syllabus::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, SyllabusError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SyllabusError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    #[must_use]
    pub fn days(&self) -> &[SyllabusDay] {
        &self.days
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the syllabus has no days. A validated syllabus always has one.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// The last day number, i.e. the number of days.
    #[must_use]
    pub fn last_day(&self) -> DayNumber {
        self.days[self.days.len() - 1].day_number
    }

    #[must_use]
    pub fn get(&self, day: DayNumber) -> Option<&SyllabusDay> {
        self.days.get(day.index())
    }

    #[must_use]
    pub fn contains(&self, day: DayNumber) -> bool {
        day.index() < self.days.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyllabusDay> {
        self.days.iter()
    }

    /// Days belonging to `season`, in syllabus order.
    pub fn in_season(&self, season: Season) -> impl Iterator<Item = &SyllabusDay> {
        self.days.iter().filter(move |day| day.season == season)
    }
}

impl<'a> IntoIterator for &'a Syllabus {
    type Item = &'a SyllabusDay;
    type IntoIter = std::slice::Iter<'a, SyllabusDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "days": [
            {"day_number": 1, "season": 1, "title": "Ownership", "tasks": ["read ch4"]},
            {"day_number": 2, "season": 1, "xp": 20, "title": "Borrowing", "warmup": "10 min kata"},
            {"day_number": 3, "season": 2, "xp": 0, "title": "Traits", "extra": "ignored"}
        ]
    }"#;

    #[test]
    fn parses_days_with_defaults() {
        let syllabus = Syllabus::from_json_str(SAMPLE).unwrap();
        assert_eq!(syllabus.len(), 3);

        let first = &syllabus.days()[0];
        assert_eq!(first.xp(), DEFAULT_DAY_XP);
        assert_eq!(first.tasks(), ["read ch4".to_string()]);
        assert_eq!(first.warmup(), None);

        let second = syllabus.get(DayNumber::new(2).unwrap()).unwrap();
        assert_eq!(second.xp(), 20);
        assert_eq!(second.warmup(), Some("10 min kata"));

        assert_eq!(syllabus.days()[2].xp(), 0);
        assert_eq!(syllabus.last_day().value(), 3);
    }

    #[test]
    fn rejects_empty_syllabus() {
        let err = Syllabus::from_json_str(r#"{"days": []}"#).unwrap_err();
        assert!(matches!(err, SyllabusError::Empty));
    }

    #[test]
    fn rejects_gaps_and_duplicates() {
        let gap = r#"{"days": [
            {"day_number": 1, "season": 1},
            {"day_number": 3, "season": 1}
        ]}"#;
        let err = Syllabus::from_json_str(gap).unwrap_err();
        assert!(matches!(err, SyllabusError::NonDense { position: 2, found: 3 }));

        let dup = r#"{"days": [
            {"day_number": 1, "season": 1},
            {"day_number": 1, "season": 1}
        ]}"#;
        assert!(matches!(
            Syllabus::from_json_str(dup),
            Err(SyllabusError::NonDense { .. })
        ));
    }

    #[test]
    fn rejects_bad_field_values() {
        let season = r#"{"days": [{"day_number": 1, "season": 5}]}"#;
        assert!(matches!(
            Syllabus::from_json_str(season),
            Err(SyllabusError::Parse(_))
        ));

        let zero = r#"{"days": [{"day_number": 0, "season": 1}]}"#;
        assert!(matches!(
            Syllabus::from_json_str(zero),
            Err(SyllabusError::Parse(_))
        ));

        assert!(matches!(
            Syllabus::from_json_str("not json"),
            Err(SyllabusError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Syllabus::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SyllabusError::Io { .. }));
    }

    #[test]
    fn filters_days_by_season() {
        let syllabus = Syllabus::from_json_str(SAMPLE).unwrap();
        let season_one = Season::new(1).unwrap();
        let numbers: Vec<u32> = syllabus
            .in_season(season_one)
            .map(|day| day.day_number().value())
            .collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(syllabus.in_season(Season::new(4).unwrap()).count(), 0);
    }
}
