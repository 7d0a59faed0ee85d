use pickle_core::config::{ConfigStore, PickleConfig};
use tempfile::TempDir;

#[test]
fn missing_file_loads_defaults() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_path(temp.path().join("pickle.toml"));

    assert_eq!(store.load().unwrap(), PickleConfig::default());
}

#[test]
fn save_then_load_preserves_settings() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_path(temp.path().join("nested").join("pickle.toml"));

    let mut config = PickleConfig::default();
    config.registry.base_url = "https://mirror.example.org/get".to_string();
    config.download.timeout_secs = 15;
    config.git.program = "/usr/local/bin/git".to_string();
    store.save(&config).unwrap();

    assert_eq!(store.load().unwrap(), config);
}

#[test]
fn malformed_file_reports_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pickle.toml");
    std::fs::write(&path, "[registry\nbase_url = 1").unwrap();

    let err = ConfigStore::from_path(&path).load().unwrap_err();
    assert!(format!("{err:#}").contains("pickle.toml"));
}

#[test]
fn init_writes_defaults_once() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_path(temp.path().join("pickle").join("pickle.toml"));

    assert!(store.init(false).unwrap());
    assert_eq!(store.load().unwrap(), PickleConfig::default());

    let mut custom = PickleConfig::default();
    custom.download.max_archive_bytes = 1024;
    store.save(&custom).unwrap();

    assert!(!store.init(false).unwrap());
    assert_eq!(store.load().unwrap().download.max_archive_bytes, 1024);

    assert!(store.init(true).unwrap());
    assert_eq!(store.load().unwrap(), PickleConfig::default());
}
