//! Full story-mode flow against file-backed adapters.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sprachreise_domain::{DifficultyLevel, PlayerId, ScenarioId, ScenarioStatus};
use sprachreise_engine::infrastructure::ports::NavigatorPort;
use sprachreise_engine::infrastructure::settings::EngineSettings;
use sprachreise_engine::use_cases::story_mode::{CatalogLoad, GameAssignment, Persistence};
use sprachreise_engine::App;

const CATALOG: &str = r#"{
    "success": true,
    "scenarios": [
        {
            "_id": "s2",
            "name": "City Registration",
            "order": 2,
            "availableLevels": ["A1"],
            "mapPosition": { "x": 60, "y": 35 }
        },
        {
            "_id": "s1",
            "name": "Accommodation",
            "storyContext": "Alex just arrived in Berlin",
            "order": 1,
            "availableLevels": ["A1", "A2"],
            "mapPosition": { "x": 20, "y": 70 }
        }
    ],
    "configs": [
        {
            "scenario": "s1",
            "difficultyLevel": "A1",
            "gameType": { "componentName": "AnagramGame" }
        }
    ]
}"#;

#[derive(Default)]
struct RecordingNavigator {
    delays: Mutex<Vec<Duration>>,
}

#[async_trait]
impl NavigatorPort for RecordingNavigator {
    async fn return_to_story_map(&self, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
    }
}

fn id(s: &str) -> ScenarioId {
    ScenarioId::new(s).unwrap()
}

#[tokio::test]
async fn plays_through_story_mode_and_restores_progress() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("catalog.json");
    std::fs::write(&catalog_path, CATALOG).unwrap();

    let settings = EngineSettings {
        catalog_path: Some(catalog_path),
        progress_dir: Some(dir.path().join("progress")),
        return_delay: Duration::from_millis(10),
        ..EngineSettings::default()
    };
    let navigator = Arc::new(RecordingNavigator::default());
    let player_id = PlayerId::new();

    let app = App::from_settings(&settings, navigator.clone());
    let story = &app.use_cases.story_mode;

    let load = story.load_catalog.execute(false).await.unwrap();
    assert!(matches!(load, CatalogLoad::Loaded { scenarios: 2, configs: 1, .. }));
    story.begin_session.execute(player_id).await.unwrap();

    let markers = app.store.story_map().await;
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].scenario_id, id("s1"));
    assert_eq!(markers[0].status, ScenarioStatus::Available);
    assert_eq!(markers[1].status, ScenarioStatus::Locked);

    let launch = story
        .start_scenario
        .execute(&id("s1"), DifficultyLevel::A1)
        .await
        .unwrap();
    assert!(matches!(launch.assignment, GameAssignment::MiniGame { .. }));

    let result = story
        .session_adapter
        .on_session_complete(&id("s1"), DifficultyLevel::A1, 85.0)
        .await
        .unwrap();
    assert_eq!(result.persistence, Persistence::Saved);
    assert!(!result.outcome.story_mode_completed);

    let launch = story
        .start_scenario
        .execute(&id("s2"), DifficultyLevel::A1)
        .await
        .unwrap();
    assert_eq!(launch.assignment, GameAssignment::Unconfigured);

    let result = story
        .session_adapter
        .complete_without_game(&id("s2"), DifficultyLevel::A1)
        .await
        .unwrap();
    assert!(result.outcome.story_mode_newly_completed);
    assert_eq!(
        *navigator.delays.lock().unwrap(),
        vec![Duration::from_millis(10); 2]
    );

    // A fresh app for the same player picks up the saved progress
    let app = App::from_settings(&settings, Arc::new(RecordingNavigator::default()));
    let story = &app.use_cases.story_mode;
    story.load_catalog.execute(false).await.unwrap();
    let start = story.begin_session.execute(player_id).await.unwrap();

    assert_eq!(start.restored_records, 2);
    assert!(start.story_mode_completed);
    assert_eq!(
        app.store
            .get_completion(&id("s2"), DifficultyLevel::A1)
            .await
            .map(|r| r.score().points()),
        Some(85)
    );
}

#[tokio::test]
async fn missing_catalog_file_keeps_everything_locked() {
    let dir = tempfile::tempdir().unwrap();
    let settings = EngineSettings {
        catalog_path: Some(dir.path().join("missing.json")),
        ..EngineSettings::default()
    };
    let app = App::from_settings(&settings, Arc::new(RecordingNavigator::default()));
    let story = &app.use_cases.story_mode;

    assert!(story.load_catalog.execute(false).await.is_err());
    assert!(!app.store.is_catalog_loaded().await);
    assert!(!app.store.is_unlocked(&id("s1")).await);

    let err = story
        .session_adapter
        .on_session_complete(&id("s1"), DifficultyLevel::A1, 85.0)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        sprachreise_domain::InvalidCompletionError::UnknownScenario(id("s1"))
    );
}

#[tokio::test]
async fn app_started_from_a_directory_reads_its_env_file() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("catalog.json");
    std::fs::write(&catalog_path, CATALOG).unwrap();
    std::fs::write(
        dir.path().join(".env"),
        format!("SPRACHREISE_CATALOG_PATH={}\n", catalog_path.display()),
    )
    .unwrap();

    let app = App::from_env(dir.path(), Arc::new(RecordingNavigator::default()));

    let load = app.use_cases.story_mode.load_catalog.execute(false).await.unwrap();
    assert!(matches!(load, CatalogLoad::Loaded { scenarios: 2, .. }));
}
