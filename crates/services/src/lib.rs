#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress_service;
pub mod syllabus_source;

pub use tracker_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, ProgressServiceError};
pub use progress_service::{Dashboard, DayView, ProgressService, ProgressSummary, SyllabusEntry};
pub use syllabus_source::{FileSyllabusSource, StaticSyllabusSource, SyllabusSource};
