use tracker_core::model::{DayNumber, ProgressMap, Season, Syllabus};
use tracker_core::navigation::{UPCOMING_LIMIT, compute_today, upcoming};

const BUNDLED: &str = include_str!("../../../data/syllabus.json");

#[test]
fn bundled_syllabus_parses_and_covers_every_season() {
    let syllabus = Syllabus::from_json_str(BUNDLED).unwrap();
    assert_eq!(syllabus.len(), 16);
    for season in Season::ALL {
        assert_eq!(syllabus.in_season(season).count(), 4, "season {season}");
    }
    assert!(syllabus.iter().all(|day| day.xp() > 0));
}

#[test]
fn fresh_start_points_at_day_one() {
    let syllabus = Syllabus::from_json_str(BUNDLED).unwrap();
    let progress = ProgressMap::new();
    assert_eq!(compute_today(&syllabus, &progress), DayNumber::FIRST);
    assert_eq!(upcoming(&syllabus, &progress, UPCOMING_LIMIT).len(), UPCOMING_LIMIT);
}
