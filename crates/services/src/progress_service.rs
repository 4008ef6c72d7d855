use std::sync::Arc;

use serde::Serialize;
use storage::repository::ProgressRepository;
use tracker_core::model::{
    DayNumber, DayState, ProgressRecord, ProgressUpdate, Syllabus, SyllabusDay,
};
use tracker_core::navigation::{
    UPCOMING_LIMIT, completed_count, completion_pct, compute_today, prev_next, upcoming,
};
use tracker_core::{Badge, Progression};

use crate::Clock;
use crate::error::ProgressServiceError;
use crate::syllabus_source::SyllabusSource;

/// Headline numbers plus the day to work on next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub today: SyllabusDay,
    pub xp: u32,
    pub streak: u32,
    pub badges: Vec<Badge>,
    pub total: usize,
}

/// One row of the syllabus listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyllabusEntry {
    pub day: SyllabusDay,
    pub state: DayState,
    pub record: Option<ProgressRecord>,
}

/// A single day with its progress and neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    pub day: SyllabusDay,
    pub record: Option<ProgressRecord>,
    pub prev: DayNumber,
    pub next: DayNumber,
    pub total: usize,
}

/// Everything the progress summary shows.
///
/// `pct` is `floor(100 * completed / total)`; `upcoming` holds at most
/// seven open days in syllabus order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub xp: u32,
    pub streak: u32,
    pub badges: Vec<Badge>,
    pub today: SyllabusDay,
    pub completed: usize,
    pub pct: u8,
    pub upcoming: Vec<SyllabusDay>,
}

/// Reads progress, applies updates and derives the gamification views.
///
/// The syllabus and the progress map are loaded fresh on every call.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    syllabus: Arc<dyn SyllabusSource>,
    progress: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        clock: Clock,
        syllabus: Arc<dyn SyllabusSource>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            clock,
            syllabus,
            progress,
        }
    }

    /// Load the syllabus from the configured source.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Syllabus` if the source is missing or malformed.
    pub fn syllabus(&self) -> Result<Syllabus, ProgressServiceError> {
        Ok(self.syllabus.load()?)
    }

    /// Today's day plus XP, streak and badges.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` on syllabus or storage failures.
    pub async fn dashboard(&self) -> Result<Dashboard, ProgressServiceError> {
        let syllabus = self.syllabus()?;
        let progress = self.progress.get_all().await?;
        let Progression { xp, streak, badges } = Progression::compute(&syllabus, &progress);
        let today = day_at(&syllabus, compute_today(&syllabus, &progress));

        Ok(Dashboard {
            today,
            xp,
            streak,
            badges,
            total: syllabus.len(),
        })
    }

    /// Every syllabus day paired with its record, in syllabus order.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` on syllabus or storage failures.
    pub async fn syllabus_overview(&self) -> Result<Vec<SyllabusEntry>, ProgressServiceError> {
        let syllabus = self.syllabus()?;
        let progress = self.progress.get_all().await?;

        Ok(syllabus
            .iter()
            .map(|day| {
                let record = progress.get(day.day_number()).cloned();
                SyllabusEntry {
                    day: day.clone(),
                    state: DayState::of(record.as_ref()),
                    record,
                }
            })
            .collect())
    }

    /// A single day with its record and prev/next navigation.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::InvalidDayNumber` if `day` is outside
    /// `1..=len(syllabus)`, or other errors on syllabus/storage failures.
    pub async fn day_view(&self, day: u32) -> Result<DayView, ProgressServiceError> {
        let syllabus = self.syllabus()?;
        let day_number = validate_day(&syllabus, day)?;
        let record = self.progress.get(day_number).await?;
        let (prev, next) = prev_next(day_number, syllabus.last_day().value());

        Ok(DayView {
            day: day_at(&syllabus, day_number),
            record,
            prev,
            next,
            total: syllabus.len(),
        })
    }

    /// Create-or-update the record for `day` and persist it.
    ///
    /// A missing record is created with defaults before the update applies.
    /// Moving to done stamps `completed_at` with the clock; moving back
    /// clears it.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::InvalidDayNumber` without writing
    /// anything if `day` is outside the syllabus, or
    /// `ProgressServiceError::Storage` if the write fails.
    pub async fn update_day(
        &self,
        day: u32,
        update: ProgressUpdate,
    ) -> Result<ProgressRecord, ProgressServiceError> {
        let syllabus = self.syllabus()?;
        let day_number = validate_day(&syllabus, day)?;

        let mut record = self
            .progress
            .get(day_number)
            .await?
            .unwrap_or_else(|| ProgressRecord::new(day_number));
        let was_done = record.done;
        record.apply(update, self.clock.now());
        self.progress.save(&record).await?;

        tracing::info!(
            day = day_number.value(),
            done = record.done,
            toggled = was_done != record.done,
            warmup_done = record.warmup_done,
            "updated day progress"
        );
        Ok(record)
    }

    /// XP, streak, badges, completion and the next open days.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` on syllabus or storage failures.
    pub async fn summary(&self) -> Result<ProgressSummary, ProgressServiceError> {
        let syllabus = self.syllabus()?;
        let progress = self.progress.get_all().await?;
        let Progression { xp, streak, badges } = Progression::compute(&syllabus, &progress);
        let completed = completed_count(&progress);

        Ok(ProgressSummary {
            xp,
            streak,
            badges,
            today: day_at(&syllabus, compute_today(&syllabus, &progress)),
            completed,
            pct: completion_pct(completed, syllabus.len()),
            upcoming: upcoming(&syllabus, &progress, UPCOMING_LIMIT)
                .into_iter()
                .cloned()
                .collect(),
        })
    }

    /// Unlocked badges in display order.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` on syllabus or storage failures.
    pub async fn badges(&self) -> Result<Vec<Badge>, ProgressServiceError> {
        let syllabus = self.syllabus()?;
        let progress = self.progress.get_all().await?;
        Ok(Progression::compute(&syllabus, &progress).badges)
    }
}

fn validate_day(syllabus: &Syllabus, day: u32) -> Result<DayNumber, ProgressServiceError> {
    DayNumber::new(day)
        .ok()
        .filter(|day_number| syllabus.contains(*day_number))
        .ok_or(ProgressServiceError::InvalidDayNumber {
            day,
            total: syllabus.len(),
        })
}

// `day` always comes from `compute_today` or `validate_day`, both in range.
fn day_at(syllabus: &Syllabus, day: DayNumber) -> SyllabusDay {
    syllabus
        .get(day)
        .unwrap_or(&syllabus.days()[0])
        .clone()
}
