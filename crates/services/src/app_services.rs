use std::path::PathBuf;
use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::syllabus_source::{FileSyllabusSource, SyllabusSource};

/// Assembles app-facing services over a storage backend and syllabus file.
#[derive(Clone)]
pub struct AppServices {
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and a JSON syllabus file.
    ///
    /// The syllabus is loaded once up front so a missing or malformed file
    /// fails at startup; requests still re-read it.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// syllabus cannot be loaded.
    pub async fn new_sqlite(
        db_url: &str,
        syllabus_path: impl Into<PathBuf>,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let source: Arc<dyn SyllabusSource> = Arc::new(FileSyllabusSource::new(syllabus_path));
        let syllabus = source.load()?;
        tracing::info!(days = syllabus.len(), "syllabus loaded");

        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_parts(storage, source, clock))
    }

    /// Build services from an existing storage backend and syllabus source.
    #[must_use]
    pub fn from_parts(storage: Storage, syllabus: Arc<dyn SyllabusSource>, clock: Clock) -> Self {
        let progress = Arc::new(ProgressService::new(
            clock,
            syllabus,
            Arc::clone(&storage.progress),
        ));
        Self { progress }
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}
