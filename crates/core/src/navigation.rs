use crate::model::{DayNumber, ProgressMap, Syllabus, SyllabusDay};

/// How many upcoming days the progress summary lists.
pub const UPCOMING_LIMIT: usize = 7;

/// Number of records marked done.
#[must_use]
pub fn completed_count(progress: &ProgressMap) -> usize {
    progress.records().filter(|record| record.done).count()
}

/// The day to work on: `min(len(syllabus), completed + 1)`.
///
/// This counts completions rather than searching for the first incomplete
/// day. When completions are not contiguous from day 1 the result can point
/// at a day that is already done; callers that need the first open day
/// should use [`upcoming`] instead.
#[must_use]
pub fn compute_today(syllabus: &Syllabus, progress: &ProgressMap) -> DayNumber {
    let next = completed_count(progress).saturating_add(1).min(syllabus.len());
    // a validated syllabus has at least one day
    u32::try_from(next)
        .ok()
        .and_then(|n| DayNumber::new(n).ok())
        .unwrap_or(DayNumber::FIRST)
}

/// Previous and next day numbers, clamped to `1..=total_days`.
#[must_use]
pub fn prev_next(day: DayNumber, total_days: u32) -> (DayNumber, DayNumber) {
    let total = total_days.max(1);
    let prev = day.value().saturating_sub(1).max(1);
    let next = day.value().saturating_add(1).min(total);
    (
        DayNumber::new(prev).unwrap_or(DayNumber::FIRST),
        DayNumber::new(next).unwrap_or(DayNumber::FIRST),
    )
}

/// Floor of `100 * completed / total`, or 0 for an empty syllabus.
#[must_use]
pub fn completion_pct(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (completed.saturating_mul(100) / total).min(100);
    u8::try_from(pct).unwrap_or(100)
}

/// First `limit` syllabus days, in order, that are not done.
#[must_use]
pub fn upcoming<'a>(
    syllabus: &'a Syllabus,
    progress: &ProgressMap,
    limit: usize,
) -> Vec<&'a SyllabusDay> {
    syllabus
        .iter()
        .filter(|day| !progress.is_done(day.day_number()))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProgressRecord, Season};

    fn day(n: u32) -> DayNumber {
        DayNumber::new(n).unwrap()
    }

    fn syllabus(len: u32) -> Syllabus {
        let season = Season::new(1).unwrap();
        Syllabus::new(
            (1..=len)
                .map(|n| SyllabusDay::new(day(n), season, format!("Day {n}")))
                .collect(),
        )
        .unwrap()
    }

    fn done(n: u32) -> ProgressRecord {
        let mut record = ProgressRecord::new(day(n));
        record.done = true;
        record
    }

    #[test]
    fn prev_next_clamps_at_boundaries() {
        assert_eq!(prev_next(day(1), 30), (day(1), day(2)));
        assert_eq!(prev_next(day(30), 30), (day(29), day(30)));
        assert_eq!(prev_next(day(15), 30), (day(14), day(16)));
        assert_eq!(prev_next(day(1), 1), (day(1), day(1)));
    }

    #[test]
    fn today_follows_completed_count() {
        let s = syllabus(5);
        assert_eq!(compute_today(&s, &ProgressMap::new()), day(1));

        let progress: ProgressMap = [done(1), done(2)].into_iter().collect();
        assert_eq!(compute_today(&s, &progress), day(3));
    }

    #[test]
    fn today_caps_at_last_day() {
        let s = syllabus(3);
        let progress: ProgressMap = (1..=3).map(done).collect();
        assert_eq!(compute_today(&s, &progress), day(3));
    }

    #[test]
    fn today_counts_sparse_completions_literally() {
        let s = syllabus(10);
        let progress: ProgressMap = [done(5)].into_iter().collect();
        // one completion, so "today" is day 2 even though day 1 is open
        assert_eq!(compute_today(&s, &progress), day(2));
    }

    #[test]
    fn today_ignores_records_not_done() {
        let s = syllabus(4);
        let mut progress: ProgressMap = [done(1)].into_iter().collect();
        progress.insert(ProgressRecord::new(day(2)));
        assert_eq!(compute_today(&s, &progress), day(2));
    }

    #[test]
    fn pct_floors() {
        assert_eq!(completion_pct(1, 3), 33);
        assert_eq!(completion_pct(2, 3), 66);
        assert_eq!(completion_pct(3, 3), 100);
        assert_eq!(completion_pct(0, 0), 0);
    }

    #[test]
    fn upcoming_skips_done_days_and_limits() {
        let s = syllabus(12);
        let progress: ProgressMap = [done(1), done(3)].into_iter().collect();
        let days: Vec<u32> = upcoming(&s, &progress, UPCOMING_LIMIT)
            .iter()
            .map(|d| d.day_number().value())
            .collect();
        assert_eq!(days, vec![2, 4, 5, 6, 7, 8, 9]);
    }
}
