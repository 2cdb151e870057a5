use exptrack_config::{ConfigError, Settings, SettingsManager, DEFAULT_SETTINGS_FILE};
use tempfile::tempdir;

#[test]
fn missing_file_writes_default_document() {
    let dir = tempdir().expect("tempdir");
    let manager = SettingsManager::in_dir(dir.path());
    assert!(!manager.path().exists());

    let settings = manager.load().expect("load");
    assert_eq!(settings, Settings::default());
    assert!(dir.path().join(DEFAULT_SETTINGS_FILE).exists());

    let raw = std::fs::read_to_string(manager.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["budgets"]["Bills"], 1000.0);
    assert_eq!(value["categories"][0], "Food");
}

#[test]
fn saved_settings_round_trip() {
    let dir = tempdir().expect("tempdir");
    let manager = SettingsManager::in_dir(dir.path());
    let mut settings = manager.load().unwrap();
    settings.set_budget("Food", 650.0);
    settings.add_category("Travel");
    manager.save(&settings).unwrap();

    let reloaded = SettingsManager::in_dir(dir.path()).load().unwrap();
    assert_eq!(reloaded.budget_for("Food"), 650.0);
    assert!(reloaded.has_category("Travel"));
    assert_eq!(reloaded.categories.last().map(String::as_str), Some("Travel"));
}

#[test]
fn save_leaves_no_temporary_file_behind() {
    let dir = tempdir().expect("tempdir");
    let manager = SettingsManager::in_dir(dir.path());
    manager.save(&Settings::default()).unwrap();
    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![DEFAULT_SETTINGS_FILE.to_string()]);
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempdir().expect("tempdir");
    let manager = SettingsManager::in_dir(dir.path().join("nested").join("data"));
    manager.save(&Settings::default()).unwrap();
    assert!(manager.path().exists());
}

#[test]
fn partial_document_fills_missing_sections() {
    let dir = tempdir().expect("tempdir");
    let manager = SettingsManager::in_dir(dir.path());
    std::fs::write(manager.path(), r#"{ "budgets": { "Food": 10 } }"#).unwrap();
    let settings = manager.load().unwrap();
    assert_eq!(settings.budget_for("Food"), 10.0);
    assert!(settings.categories.is_empty());
}

#[test]
fn malformed_document_is_a_serde_error() {
    let dir = tempdir().expect("tempdir");
    let manager = SettingsManager::in_dir(dir.path());
    std::fs::write(manager.path(), "{ budgets: ").unwrap();
    let err = manager.load().unwrap_err();
    assert!(matches!(err, ConfigError::Serde(_)));
}
