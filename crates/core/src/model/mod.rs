mod ids;
mod progress;
mod syllabus;

pub use ids::{DayNumber, DayNumberError, Season, SeasonError};
pub use progress::{DayState, DoneChange, ProgressMap, ProgressRecord, ProgressUpdate};
pub use syllabus::{DEFAULT_DAY_XP, Syllabus, SyllabusDay, SyllabusError};
