//! Scenes built from config files on disk.

use std::fs;

use tempfile::TempDir;

use barn_door::config::{AppConfig, SceneTuning};
use barn_door::scene::Scene;
use barn_door::schedule::View;

#[test]
fn scene_from_config_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"scene":{"canvas_width":1000,"canvas_height":400,"door_speed":4}}"#,
    )?;

    let config = AppConfig::load_from(&path)?;
    let mut scene = Scene::new(&config.scene, View::Exterior);
    assert_eq!(scene.door().speed(), 4.0);

    scene.toggle();
    for _ in 0..1_000 {
        scene.step();
    }
    assert!(scene.door().is_closed());
    assert!(
        scene
            .crossing()
            .actors()
            .iter()
            .all(|a| a.x == scene.crossing().layout().inside_x)
    );
    Ok(())
}

#[test]
fn invalid_config_file_is_an_error() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"scene":{"door_speed":-1}}"#)?;

    let err = AppConfig::load_from(&path).unwrap_err();
    assert!(format!("{err:#}").contains("door speed must be positive"));
    assert!(AppConfig::load_from(&dir.path().join("missing.json")).is_err());
    Ok(())
}

#[test]
fn default_tuning_round_trips_through_json() -> anyhow::Result<()> {
    let json = serde_json::to_string(&SceneTuning::default())?;
    let config = AppConfig::from_json(&format!(r#"{{"scene":{json}}}"#))?;
    assert_eq!(config.scene, SceneTuning::default());
    Ok(())
}
