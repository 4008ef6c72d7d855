use std::path::{Path, PathBuf};

use tracker_core::model::{Syllabus, SyllabusError};

/// Supplies the curriculum to services.
///
/// Sources are consulted on every request; nothing is cached between calls.
pub trait SyllabusSource: Send + Sync {
    /// Load the current syllabus.
    ///
    /// # Errors
    ///
    /// Returns `SyllabusError` if the source is missing or malformed. No
    /// fallback syllabus is substituted.
    fn load(&self) -> Result<Syllabus, SyllabusError>;
}

/// Reads a `{"days": [...]}` JSON file each time it is asked.
#[derive(Debug, Clone)]
pub struct FileSyllabusSource {
    path: PathBuf,
}

impl FileSyllabusSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SyllabusSource for FileSyllabusSource {
    fn load(&self) -> Result<Syllabus, SyllabusError> {
        tracing::debug!(path = %self.path.display(), "loading syllabus");
        Syllabus::from_path(&self.path)
    }
}

/// A fixed in-memory syllabus.
#[derive(Debug, Clone)]
pub struct StaticSyllabusSource {
    syllabus: Syllabus,
}

impl StaticSyllabusSource {
    #[must_use]
    pub fn new(syllabus: Syllabus) -> Self {
        Self { syllabus }
    }
}

impl SyllabusSource for StaticSyllabusSource {
    fn load(&self) -> Result<Syllabus, SyllabusError> {
        Ok(self.syllabus.clone())
    }
}
