use std::fmt;

use serde::{Serialize, Serializer};

use crate::model::{DayNumber, ProgressMap, Season, Syllabus};

/// Extra XP for a completed day whose warm-up was also done.
pub const WARMUP_BONUS_XP: u32 = 2;

const LEVEL_ONE_XP: u32 = 100;
const LEVEL_TWO_XP: u32 = 300;
const LEVEL_THREE_XP: u32 = 600;
const ONE_WEEK_STREAK: u32 = 7;
const DEEP_HABIT_STREAK: u32 = 21;
const SEASON_MASTERY_RATIO: f64 = 0.9;

//
// ─── BADGES ────────────────────────────────────────────────────────────────────
//

/// An achievement unlocked by crossing an XP, streak or season threshold.
///
/// The `Display` output is the exact label shown to users; serialization
/// uses the same label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    Momentum,
    Flow,
    SystemsThinker,
    OneWeekStreak,
    DeepHabit,
    SeasonMastered(Season),
}

impl Badge {
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Badge::Momentum => f.write_str("Level 1 — Momentum"),
            Badge::Flow => f.write_str("Level 2 — Flow"),
            Badge::SystemsThinker => f.write_str("Level 3 — Systems Thinker"),
            Badge::OneWeekStreak => f.write_str("One-Week Streak"),
            Badge::DeepHabit => f.write_str("Deep Habit"),
            Badge::SeasonMastered(season) => write!(f, "Season {season} — Mastered"),
        }
    }
}

impl Serialize for Badge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

//
// ─── DERIVATIONS ───────────────────────────────────────────────────────────────
//

/// Sum of XP over completed syllabus days, plus the warm-up bonus.
///
/// Records for day numbers outside the syllabus contribute nothing.
#[must_use]
pub fn compute_xp(progress: &ProgressMap, syllabus: &Syllabus) -> u32 {
    syllabus
        .iter()
        .filter_map(|day| {
            let record = progress.get(day.day_number())?;
            if !record.done {
                return None;
            }
            let bonus = if record.warmup_done { WARMUP_BONUS_XP } else { 0 };
            Some(day.xp().saturating_add(bonus))
        })
        .fold(0_u32, u32::saturating_add)
}

/// Consecutive completed days counted from day 1.
///
/// The first missing or not-done day ends the count, so a gap at day 1
/// yields 0 no matter how many later days are done.
#[must_use]
pub fn compute_streak(progress: &ProgressMap) -> u32 {
    let mut streak = 0;
    let mut day = DayNumber::FIRST;
    while progress.is_done(day) {
        streak += 1;
        if day.value() == u32::MAX {
            break;
        }
        day = day.next();
    }
    streak
}

/// Badges in display order: XP levels, streaks, then seasons 1..=4.
#[must_use]
pub fn compute_badges(
    xp: u32,
    streak: u32,
    syllabus: &Syllabus,
    progress: &ProgressMap,
) -> Vec<Badge> {
    let mut badges = Vec::new();
    if xp >= LEVEL_ONE_XP {
        badges.push(Badge::Momentum);
    }
    if xp >= LEVEL_TWO_XP {
        badges.push(Badge::Flow);
    }
    if xp >= LEVEL_THREE_XP {
        badges.push(Badge::SystemsThinker);
    }
    if streak >= ONE_WEEK_STREAK {
        badges.push(Badge::OneWeekStreak);
    }
    if streak >= DEEP_HABIT_STREAK {
        badges.push(Badge::DeepHabit);
    }
    for season in Season::ALL {
        if season_mastered(season, syllabus, progress) {
            badges.push(Badge::SeasonMastered(season));
        }
    }
    badges
}

fn season_mastered(season: Season, syllabus: &Syllabus, progress: &ProgressMap) -> bool {
    let (total, done) = syllabus
        .in_season(season)
        .fold((0_u32, 0_u32), |(total, done), day| {
            let done = done + u32::from(progress.is_done(day.day_number()));
            (total + 1, done)
        });
    if total == 0 {
        return false;
    }
    f64::from(done) / f64::from(total) >= SEASON_MASTERY_RATIO
}

/// XP, streak and badges computed together, in dependency order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progression {
    pub xp: u32,
    pub streak: u32,
    pub badges: Vec<Badge>,
}

impl Progression {
    #[must_use]
    pub fn compute(syllabus: &Syllabus, progress: &ProgressMap) -> Self {
        let xp = compute_xp(progress, syllabus);
        let streak = compute_streak(progress);
        let badges = compute_badges(xp, streak, syllabus, progress);
        Self { xp, streak, badges }
    }
}
