use sqlx::Row;
use tracker_core::model::{DayNumber, ProgressRecord};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn day_number_from_i64(v: i64) -> Result<DayNumber, StorageError> {
    let raw = u32::try_from(v)
        .map_err(|_| StorageError::Serialization(format!("day_number out of range: {v}")))?;
    DayNumber::new(raw).map_err(ser)
}

pub(crate) fn day_number_to_i64(day: DayNumber) -> i64 {
    i64::from(day.value())
}

pub(crate) fn bool_to_i64(value: bool) -> i64 {
    i64::from(value)
}

fn bool_from_i64(field: &'static str, value: i64) -> Result<bool, StorageError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StorageError::Serialization(format!(
            "invalid {field}: {other}"
        ))),
    }
}

pub(crate) fn map_progress_row(row: &sqlx::sqlite::SqliteRow) -> Result<ProgressRecord, StorageError> {
    Ok(ProgressRecord {
        day_number: day_number_from_i64(row.try_get::<i64, _>("day_number").map_err(ser)?)?,
        done: bool_from_i64("done", row.try_get::<i64, _>("done").map_err(ser)?)?,
        notes: row.try_get::<String, _>("notes").map_err(ser)?,
        warmup_done: bool_from_i64(
            "warmup_done",
            row.try_get::<i64, _>("warmup_done").map_err(ser)?,
        )?,
        completed_at: row.try_get("completed_at").map_err(ser)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_number_rejects_zero_and_negative() {
        assert!(day_number_from_i64(0).is_err());
        assert!(day_number_from_i64(-3).is_err());
        assert_eq!(day_number_from_i64(12).unwrap().value(), 12);
    }

    #[test]
    fn bools_are_strict() {
        assert!(!bool_from_i64("done", 0).unwrap());
        assert!(bool_from_i64("done", 1).unwrap());
        assert!(bool_from_i64("done", 2).is_err());
        assert_eq!(bool_to_i64(true), 1);
    }
}
