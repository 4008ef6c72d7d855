use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 1-based position of a day in the syllabus.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DayNumber(u32);

impl DayNumber {
    /// The first day of every syllabus.
    pub const FIRST: Self = Self(1);

    /// Creates a new `DayNumber`.
    ///
    /// # Errors
    ///
    /// Returns `DayNumberError::Zero` for `0`; day numbers start at 1.
    pub fn new(value: u32) -> Result<Self, DayNumberError> {
        if value == 0 {
            return Err(DayNumberError::Zero);
        }
        Ok(Self(value))
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Zero-based index into an ordered syllabus.
    #[must_use]
    pub fn index(&self) -> usize {
        // u32 always fits in usize on supported targets
        self.0 as usize - 1
    }

    /// The following day number. Saturates at `u32::MAX`.
    #[must_use]
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DayNumberError {
    #[error("day numbers start at 1")]
    Zero,
    #[error("failed to parse day number from {raw:?}")]
    Parse { raw: String },
}

impl TryFrom<u32> for DayNumber {
    type Error = DayNumberError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DayNumber> for u32 {
    fn from(day: DayNumber) -> Self {
        day.0
    }
}

/// Season grouping of syllabus days (1..=4).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Season(u8);

impl Season {
    /// Every season, in display order.
    pub const ALL: [Self; 4] = [Self(1), Self(2), Self(3), Self(4)];

    /// Creates a new `Season`.
    ///
    /// # Errors
    ///
    /// Returns `SeasonError::OutOfRange` unless `value` is in `1..=4`.
    pub fn new(value: u8) -> Result<Self, SeasonError> {
        if !(1..=4).contains(&value) {
            return Err(SeasonError::OutOfRange { value });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeasonError {
    #[error("season must be between 1 and 4, got {value}")]
    OutOfRange { value: u8 },
}

impl TryFrom<u8> for Season {
    type Error = SeasonError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Season> for u8 {
    fn from(season: Season) -> Self {
        season.0
    }
}

impl fmt::Debug for DayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DayNumber({})", self.0)
    }
}

impl fmt::Debug for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Season({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for DayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

impl FromStr for DayNumber {
    type Err = DayNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let value = raw.parse::<u32>().map_err(|_| DayNumberError::Parse {
            raw: raw.to_string(),
        })?;
        Self::new(value)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_number_rejects_zero() {
        assert_eq!(DayNumber::new(0), Err(DayNumberError::Zero));
    }

    #[test]
    fn day_number_display_and_index() {
        let day = DayNumber::new(12).unwrap();
        assert_eq!(day.to_string(), "12");
        assert_eq!(day.index(), 11);
        assert_eq!(day.next().value(), 13);
    }

    #[test]
    fn day_number_from_str() {
        let day: DayNumber = " 7 ".parse().unwrap();
        assert_eq!(day, DayNumber::new(7).unwrap());
        assert!("0".parse::<DayNumber>().is_err());
        assert!(matches!(
            "seven".parse::<DayNumber>(),
            Err(DayNumberError::Parse { .. })
        ));
    }

    #[test]
    fn season_bounds() {
        assert!(Season::new(0).is_err());
        assert!(Season::new(5).is_err());
        assert_eq!(Season::new(4).unwrap().value(), 4);
        assert_eq!(Season::ALL.len(), 4);
    }

    #[test]
    fn serde_rejects_invalid_values() {
        assert!(serde_json::from_str::<DayNumber>("0").is_err());
        assert!(serde_json::from_str::<Season>("9").is_err());
        let day: DayNumber = serde_json::from_str("3").unwrap();
        assert_eq!(day.value(), 3);
    }
}
