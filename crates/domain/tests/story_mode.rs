//! End-to-end story-mode flow through the public domain API.

use chrono::{Duration, TimeZone, Utc};
use sprachreise_domain::{
    is_unlocked, CatalogState, CompletionChange, DifficultyLevel, GameProgress,
    InvalidCompletionError, Scenario, ScenarioCatalog, ScenarioId, ScenarioName, Score,
};

fn sid(id: &str) -> ScenarioId {
    ScenarioId::new(id).unwrap()
}

fn two_scenario_catalog() -> CatalogState {
    let s1 = Scenario::new(
        sid("s1"),
        ScenarioName::new("Accommodation").unwrap(),
        1,
        vec![DifficultyLevel::A1, DifficultyLevel::A2],
    )
    .unwrap()
    .with_required(true);
    let s2 = Scenario::new(
        sid("s2"),
        ScenarioName::new("City Registration").unwrap(),
        2,
        vec![DifficultyLevel::A1],
    )
    .unwrap()
    .with_required(true);

    // fetched out of order on purpose
    CatalogState::from(ScenarioCatalog::new(vec![s2, s1]).unwrap())
}

#[test]
fn completing_both_required_scenarios_finishes_story_mode() {
    let catalog = two_scenario_catalog();
    let mut progress = GameProgress::new();
    let now = Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap();

    assert!(is_unlocked(&sid("s1"), &catalog, &progress));
    assert!(!is_unlocked(&sid("s2"), &catalog, &progress));

    let first = progress
        .record_completion(&catalog, &sid("s1"), DifficultyLevel::A1, Score::new(85), now)
        .unwrap();
    assert!(matches!(first.change, CompletionChange::Recorded { .. }));
    assert!(progress.is_scenario_completed(&sid("s1")));
    assert!(is_unlocked(&sid("s2"), &catalog, &progress));
    assert!(!progress.story_mode_completed());

    let second = progress
        .record_completion(
            &catalog,
            &sid("s2"),
            DifficultyLevel::A1,
            Score::new(60),
            now + Duration::minutes(10),
        )
        .unwrap();
    assert!(second.story_mode_newly_completed);
    assert!(progress.story_mode_completed());
}

#[test]
fn level_outside_scenario_is_rejected_and_progress_unchanged() {
    let catalog = two_scenario_catalog();
    let mut progress = GameProgress::new();
    let now = Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap();
    progress
        .record_completion(&catalog, &sid("s1"), DifficultyLevel::A2, Score::new(40), now)
        .unwrap();
    let before = progress.snapshot();

    let err = progress
        .record_completion(&catalog, &sid("s1"), DifficultyLevel::C2, Score::new(10), now)
        .unwrap_err();

    assert!(matches!(err, InvalidCompletionError::LevelNotAvailable { .. }));
    assert_eq!(progress.snapshot(), before);
}

#[test]
fn raw_scores_are_validated_before_recording() {
    assert!(Score::from_raw(-5.0).is_err());
    assert!(Score::from_raw(f64::NAN).is_err());
    assert_eq!(Score::from_raw(60.0).unwrap(), Score::new(60));
}
