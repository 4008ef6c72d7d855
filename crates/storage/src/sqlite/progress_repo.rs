use async_trait::async_trait;
use tracker_core::model::{DayNumber, ProgressMap, ProgressRecord};

use super::SqliteRepository;
use super::mapping::{bool_to_i64, day_number_to_i64, map_progress_row};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn get_all(&self) -> Result<ProgressMap, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT day_number, done, notes, warmup_done, completed_at
            FROM progress
            ORDER BY day_number ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut map = ProgressMap::new();
        for row in rows {
            map.insert(map_progress_row(&row)?);
        }
        tracing::debug!(records = map.len(), "loaded progress");
        Ok(map)
    }

    async fn get(&self, day: DayNumber) -> Result<Option<ProgressRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT day_number, done, notes, warmup_done, completed_at
            FROM progress
            WHERE day_number = ?1
            ",
        )
        .bind(day_number_to_i64(day))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_progress_row).transpose()
    }

    async fn save(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO progress (day_number, done, notes, warmup_done, completed_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(day_number) DO UPDATE SET
                done = excluded.done,
                notes = excluded.notes,
                warmup_done = excluded.warmup_done,
                completed_at = excluded.completed_at
            ",
        )
        .bind(day_number_to_i64(record.day_number))
        .bind(bool_to_i64(record.done))
        .bind(record.notes.as_str())
        .bind(bool_to_i64(record.warmup_done))
        .bind(record.completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
