//! Integration tests for threshold persistence.

use std::fs;

use serde_json::json;
use wcagscan::settings::{
    load_thresholds, reset_thresholds, save_thresholds, FileStore, SettingsStore,
    CUSTOM_RATIOS_KEY,
};
use wcagscan::{ContrastAudit, Error, ThresholdConfig};

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut store = FileStore::open(&path).unwrap();
    assert_eq!(load_thresholds(&store).unwrap(), ThresholdConfig::wcag_aa());
    assert!(!path.exists());

    let custom = ThresholdConfig::new(5.5, 3.5, 2.5);
    save_thresholds(&mut store, &custom).unwrap();
    assert!(path.exists());

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(load_thresholds(&reopened).unwrap(), custom);
}

#[test]
fn test_file_store_preserves_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

    let mut store = FileStore::open(&path).unwrap();
    save_thresholds(&mut store, &ThresholdConfig::wcag_aaa()).unwrap();
    reset_thresholds(&mut store).unwrap();

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved, json!({"theme": "dark"}));
    assert_eq!(store.get("theme").unwrap(), Some(json!("dark")));
}

#[test]
fn test_file_store_rejects_non_object() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "[1, 2, 3]").unwrap();

    assert!(matches!(FileStore::open(&path), Err(Error::Settings(_))));
}

#[test]
fn test_file_store_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "").unwrap();

    let store = FileStore::open(&path).unwrap();
    assert!(store.get(CUSTOM_RATIOS_KEY).unwrap().is_none());
}

#[test]
fn test_persisted_thresholds_drive_audit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut store = FileStore::open(&path).unwrap();
    save_thresholds(&mut store, &ThresholdConfig::new(25.0, 25.0, 1.0)).unwrap();

    let snapshot = r#"{
        "name": "Page",
        "selection": ["1:1"],
        "children": [{
            "id": "1:1",
            "type": "FRAME",
            "fills": [{"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1}}],
            "children": [{
                "id": "1:2",
                "type": "TEXT",
                "characters": "Hello",
                "fontSize": 16,
                "fontWeight": 400,
                "fills": [{"type": "SOLID", "color": {"r": 0, "g": 0, "b": 0}}]
            }]
        }]
    }"#;

    let report = ContrastAudit::new()
        .with_settings(&store)
        .unwrap()
        .load_bytes(snapshot.as_bytes())
        .unwrap()
        .scan_selection();

    let text = &report.response.results[0];
    assert_eq!(text.required, 25.0);
    assert!(!text.pass);
    assert_eq!(report.thresholds.non_text, 1.0);
}
