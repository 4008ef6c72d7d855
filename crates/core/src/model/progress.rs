use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::DayNumber;

/// How an update affects the `done` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoneChange {
    #[default]
    Keep,
    Toggle,
    Set(bool),
}

/// Fields submitted for a single day.
///
/// `Some` overwrites the stored value even when it is empty or `false`;
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressUpdate {
    pub done: DoneChange,
    pub notes: Option<String>,
    pub warmup_done: Option<bool>,
}

impl ProgressUpdate {
    /// The shape a day form submits: optional toggle plus both fields.
    #[must_use]
    pub fn form(toggle_done: bool, notes: impl Into<String>, warmup_done: bool) -> Self {
        Self {
            done: if toggle_done {
                DoneChange::Toggle
            } else {
                DoneChange::Keep
            },
            notes: Some(notes.into()),
            warmup_done: Some(warmup_done),
        }
    }

    #[must_use]
    pub fn toggle() -> Self {
        Self {
            done: DoneChange::Toggle,
            ..Self::default()
        }
    }
}

/// Coarse lifecycle of a day, derived from its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    NotStarted,
    InProgress,
    Done,
}

impl DayState {
    #[must_use]
    pub fn of(record: Option<&ProgressRecord>) -> Self {
        match record {
            Some(r) if r.done => Self::Done,
            Some(r) if !r.notes.is_empty() || r.warmup_done => Self::InProgress,
            _ => Self::NotStarted,
        }
    }
}

/// Persisted progress for one syllabus day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub day_number: DayNumber,
    pub done: bool,
    pub notes: String,
    pub warmup_done: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    /// A fresh record with every field at its default.
    #[must_use]
    pub fn new(day_number: DayNumber) -> Self {
        Self {
            day_number,
            done: false,
            notes: String::new(),
            warmup_done: false,
            completed_at: None,
        }
    }

    /// Apply an update in place.
    ///
    /// `completed_at` follows the `done` transition: set to `now` on
    /// false -> true, cleared on true -> false, untouched otherwise.
    pub fn apply(&mut self, update: ProgressUpdate, now: DateTime<Utc>) {
        let target = match update.done {
            DoneChange::Keep => self.done,
            DoneChange::Toggle => !self.done,
            DoneChange::Set(value) => value,
        };
        if target != self.done {
            self.done = target;
            self.completed_at = if target { Some(now) } else { None };
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        if let Some(warmup_done) = update.warmup_done {
            self.warmup_done = warmup_done;
        }
    }

    #[must_use]
    pub fn state(&self) -> DayState {
        DayState::of(Some(self))
    }
}

/// All progress records keyed by day number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressMap {
    records: BTreeMap<DayNumber, ProgressRecord>,
}

impl ProgressMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any existing one for the same day.
    pub fn insert(&mut self, record: ProgressRecord) -> Option<ProgressRecord> {
        self.records.insert(record.day_number, record)
    }

    #[must_use]
    pub fn get(&self, day: DayNumber) -> Option<&ProgressRecord> {
        self.records.get(&day)
    }

    #[must_use]
    pub fn is_done(&self, day: DayNumber) -> bool {
        self.get(day).is_some_and(|record| record.done)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &ProgressRecord> {
        self.records.values()
    }
}

impl FromIterator<ProgressRecord> for ProgressMap {
    fn from_iter<I: IntoIterator<Item = ProgressRecord>>(iter: I) -> Self {
        let mut map = Self::new();
        for record in iter {
            map.insert(record);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn day(n: u32) -> DayNumber {
        DayNumber::new(n).unwrap()
    }

    #[test]
    fn toggle_sets_and_clears_completed_at() {
        let now = fixed_now();
        let mut record = ProgressRecord::new(day(1));

        record.apply(ProgressUpdate::toggle(), now);
        assert!(record.done);
        assert_eq!(record.completed_at, Some(now));

        record.apply(ProgressUpdate::toggle(), now + Duration::hours(1));
        assert!(!record.done);
        assert_eq!(record.completed_at, None);
    }

    #[test]
    fn setting_done_twice_keeps_original_timestamp() {
        let now = fixed_now();
        let mut record = ProgressRecord::new(day(2));
        let set_done = ProgressUpdate {
            done: DoneChange::Set(true),
            ..ProgressUpdate::default()
        };

        record.apply(set_done.clone(), now);
        record.apply(set_done, now + Duration::days(1));
        assert_eq!(record.completed_at, Some(now));
    }

    #[test]
    fn form_update_overwrites_notes_and_warmup() {
        let now = fixed_now();
        let mut record = ProgressRecord::new(day(3));
        record.apply(ProgressUpdate::form(false, "read chapter", true), now);
        assert_eq!(record.notes, "read chapter");
        assert!(record.warmup_done);
        assert!(!record.done);

        record.apply(ProgressUpdate::form(false, "", false), now);
        assert_eq!(record.notes, "");
        assert!(!record.warmup_done);
    }

    #[test]
    fn partial_update_leaves_other_fields() {
        let now = fixed_now();
        let mut record = ProgressRecord::new(day(4));
        record.apply(ProgressUpdate::form(true, "kept", true), now);

        record.apply(
            ProgressUpdate {
                notes: Some("changed".into()),
                ..ProgressUpdate::default()
            },
            now,
        );
        assert!(record.done);
        assert!(record.warmup_done);
        assert_eq!(record.notes, "changed");
    }

    #[test]
    fn day_state_transitions() {
        let now = fixed_now();
        assert_eq!(DayState::of(None), DayState::NotStarted);

        let mut record = ProgressRecord::new(day(1));
        assert_eq!(record.state(), DayState::NotStarted);

        record.apply(ProgressUpdate::form(false, "halfway", false), now);
        assert_eq!(record.state(), DayState::InProgress);

        record.apply(ProgressUpdate::toggle(), now);
        assert_eq!(record.state(), DayState::Done);

        record.apply(ProgressUpdate::toggle(), now);
        assert_eq!(record.state(), DayState::InProgress);
    }

    #[test]
    fn map_keeps_one_record_per_day() {
        let mut map = ProgressMap::new();
        map.insert(ProgressRecord::new(day(1)));
        let mut replacement = ProgressRecord::new(day(1));
        replacement.done = true;
        let previous = map.insert(replacement);

        assert!(previous.is_some());
        assert_eq!(map.len(), 1);
        assert!(map.is_done(day(1)));
        assert!(!map.is_done(day(2)));
    }
}
