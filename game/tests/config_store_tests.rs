use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use wristflap::{ConfigStore, GameConfig, GameError};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("wristflap_config_{tag}_{nanos}"))
}

#[test]
fn missing_file_loads_defaults() {
    let dir = unique_temp_dir("missing");
    let store = ConfigStore::new(dir.join("config.json"));
    let config = store.load().expect("missing config is not an error");
    assert_eq!(config, GameConfig::default());
}

#[test]
fn saved_config_loads_back() {
    let dir = unique_temp_dir("roundtrip");
    let store = ConfigStore::new(dir.join("nested").join("config.json"));
    let config = GameConfig {
        sensitivity: 2.25,
        time_between_pipe_spawn: 45,
        seed: 99,
        ..GameConfig::default()
    };

    store.save(&config).expect("save should create parent dirs");
    assert_eq!(store.load().expect("load"), config);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let dir = unique_temp_dir("malformed");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    fs::write(&path, "{ not json").unwrap();

    let err = ConfigStore::new(&path).load().unwrap_err();
    match err {
        GameError::ConfigParse { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected ConfigParse, got {other:?}"),
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unplayable_values_are_rejected() {
    let dir = unique_temp_dir("invalid");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    // The gap can never fit the player.
    fs::write(&path, r#"{"player_height": 200.0, "gap_height": 150.0}"#).unwrap();

    let err = ConfigStore::new(&path).load().unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig(_)), "got {err:?}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn out_of_range_values_are_sanitized_on_load() {
    let dir = unique_temp_dir("sanitize");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    fs::write(&path, r#"{"time_between_pipe_spawn": 0, "stage_every": 0}"#).unwrap();

    let config = ConfigStore::new(&path).load().expect("sanitized config loads");
    assert_eq!(config.time_between_pipe_spawn, 1);
    assert_eq!(config.stage_every, 1);

    let _ = fs::remove_dir_all(&dir);
}
