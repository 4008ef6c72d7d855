use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracker_core::model::{DayNumber, ProgressMap, ProgressRecord};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for per-day progress records.
///
/// Implementations hold at most one record per day number. `save` is a
/// single all-or-nothing write; a `get` followed by `save` is not atomic,
/// so two writers racing on the same day resolve as last-writer-wins.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch every persisted record keyed by day number.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if records cannot be read or decoded.
    async fn get_all(&self) -> Result<ProgressMap, StorageError>;

    /// Fetch the record for a single day, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be read or decoded.
    async fn get(&self, day: DayNumber) -> Result<Option<ProgressRecord>, StorageError>;

    /// Insert or replace the record for `record.day_number`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save(&self, record: &ProgressRecord) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<BTreeMap<DayNumber, ProgressRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get_all(&self) -> Result<ProgressMap, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.values().cloned().collect())
    }

    async fn get(&self, day: DayNumber) -> Result<Option<ProgressRecord>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&day).cloned())
    }

    async fn save(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(record.day_number, record.clone());
        Ok(())
    }
}

/// Holds the progress repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(InMemoryRepository::new());
        Self { progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::model::ProgressUpdate;
    use tracker_core::time::fixed_now;

    fn day(n: u32) -> DayNumber {
        DayNumber::new(n).unwrap()
    }

    #[tokio::test]
    async fn save_replaces_existing_record() {
        let repo = InMemoryRepository::new();
        let mut record = ProgressRecord::new(day(1));
        repo.save(&record).await.unwrap();

        record.apply(ProgressUpdate::form(true, "done it", true), fixed_now());
        repo.save(&record).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        let stored = all.get(day(1)).unwrap();
        assert!(stored.done);
        assert_eq!(stored.notes, "done it");
        assert_eq!(stored.completed_at, Some(fixed_now()));
    }

    #[tokio::test]
    async fn get_missing_day_is_none() {
        let repo = InMemoryRepository::new();
        assert!(repo.get(day(4)).await.unwrap().is_none());
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn same_day_writers_race_last_write_wins() {
        // Two writers read the same snapshot, then both save. Nothing detects
        // the conflict: the first writer's notes are silently lost.
        let repo = InMemoryRepository::new();
        repo.save(&ProgressRecord::new(day(2))).await.unwrap();

        let mut first = repo.get(day(2)).await.unwrap().unwrap();
        let mut second = repo.get(day(2)).await.unwrap().unwrap();

        first.apply(ProgressUpdate::form(true, "first", false), fixed_now());
        second.apply(ProgressUpdate::form(false, "second", true), fixed_now());

        repo.save(&first).await.unwrap();
        repo.save(&second).await.unwrap();

        let stored = repo.get(day(2)).await.unwrap().unwrap();
        assert_eq!(stored, second);
        assert!(!stored.done);
        assert_eq!(stored.notes, "second");
    }

    #[test]
    fn storage_in_memory_shares_one_repository() {
        let storage = Storage::in_memory();
        let clone = storage.clone();
        assert!(Arc::ptr_eq(&storage.progress, &clone.progress));
    }
}
