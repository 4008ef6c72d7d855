//! Plain-text views printed by the CLI.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use services::{Dashboard, DayView, ProgressSummary, SyllabusEntry};
use tracker_core::Badge;
use tracker_core::model::{DayState, SyllabusDay};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn state_marker(state: DayState) -> &'static str {
    match state {
        DayState::NotStarted => "[ ]",
        DayState::InProgress => "[~]",
        DayState::Done => "[x]",
    }
}

fn day_heading(day: &SyllabusDay) -> String {
    format!(
        "Day {} · Season {} · {} XP — {}",
        day.day_number(),
        day.season(),
        day.xp(),
        day.title()
    )
}

fn push_badges(out: &mut String, badges: &[Badge]) {
    if badges.is_empty() {
        out.push_str("Badges: none yet\n");
        return;
    }
    out.push_str("Badges:\n");
    for badge in badges {
        let _ = writeln!(out, "  * {badge}");
    }
}

#[must_use]
pub fn render_dashboard(view: &Dashboard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Today: {}", day_heading(&view.today));
    if let Some(focus) = view.today.focus() {
        let _ = writeln!(out, "Focus: {focus}");
    }
    let _ = writeln!(
        out,
        "XP: {}   Streak: {}   Days: {}",
        view.xp, view.streak, view.total
    );
    push_badges(&mut out, &view.badges);
    out
}

#[must_use]
pub fn render_syllabus(entries: &[SyllabusEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{} {}",
            state_marker(entry.state),
            day_heading(&entry.day)
        );
    }
    out
}

#[must_use]
pub fn render_day(view: &DayView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", day_heading(&view.day));
    if let Some(focus) = view.day.focus() {
        let _ = writeln!(out, "Focus: {focus}");
    }
    if let Some(warmup) = view.day.warmup() {
        let _ = writeln!(out, "Warm-up: {warmup}");
    }
    if !view.day.tasks().is_empty() {
        out.push_str("Tasks:\n");
        for task in view.day.tasks() {
            let _ = writeln!(out, "  - {task}");
        }
    }

    match &view.record {
        Some(record) => {
            let status = match record.completed_at {
                Some(at) if record.done => format!("done ({})", format_datetime(at)),
                _ if record.done => "done".to_string(),
                _ => "not done".to_string(),
            };
            let _ = writeln!(out, "Status: {status}");
            let _ = writeln!(
                out,
                "Warm-up done: {}",
                if record.warmup_done { "yes" } else { "no" }
            );
            if !record.notes.is_empty() {
                let _ = writeln!(out, "Notes: {}", record.notes);
            }
        }
        None => out.push_str("Status: not started\n"),
    }

    let _ = writeln!(
        out,
        "< day {}   {}/{}   day {} >",
        view.prev,
        view.day.day_number(),
        view.total,
        view.next
    );
    out
}

#[must_use]
pub fn render_summary(view: &ProgressSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Completed: {} ({}%)   XP: {}   Streak: {}",
        view.completed, view.pct, view.xp, view.streak
    );
    let _ = writeln!(out, "Today: {}", day_heading(&view.today));
    push_badges(&mut out, &view.badges);
    if view.upcoming.is_empty() {
        out.push_str("Upcoming: nothing left\n");
    } else {
        out.push_str("Upcoming:\n");
        for day in &view.upcoming {
            let _ = writeln!(out, "  {}", day_heading(day));
        }
    }
    out
}

#[must_use]
pub fn render_badges(badges: &[Badge]) -> String {
    let mut out = String::new();
    push_badges(&mut out, badges);
    out
}
