//! Tests for the layered configuration manager
//!
//! These tests use an isolated config file per test and cover value
//! validation, list handling and the typed values seen by `load`.

use nfogen_cli::config::ConfigManager;
use nfogen_core::{HashAlgorithm, IdSource};
use std::fs;
use tempfile::TempDir;

// Test helper: Create a temporary config manager with isolated directory
fn create_test_config_manager(temp_dir: &TempDir) -> ConfigManager {
    let config_path = temp_dir.path().join("nfogen").join("config.toml");
    ConfigManager::with_path(config_path)
}

#[test]
fn test_load_without_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_manager = create_test_config_manager(&temp_dir);

    let config = config_manager.load().unwrap();

    assert!(!config.scan.overwrite);
    assert_eq!(config.descriptor.extension, "nfo");
    assert_eq!(config.identifier.algorithm, HashAlgorithm::MD5);
}

#[test]
fn test_set_creates_file_and_parent_directory() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    config_manager.set("scan.overwrite", "true").unwrap();

    let config_path = config_manager.get_config_path();
    assert!(config_path.exists());
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[scan]"));
    assert!(content.contains("overwrite = true"));

    assert!(config_manager.load().unwrap().scan.overwrite);
}

#[test]
fn test_set_typed_values() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    config_manager.set("identifier.source", "FILENAME").unwrap();
    config_manager.set("identifier.algorithm", "sha1").unwrap();
    config_manager.set("scan.max_depth", "3").unwrap();
    config_manager.set("scan.containers", "mkv, mp4").unwrap();

    let config = config_manager.load().unwrap();
    assert_eq!(config.identifier.source, IdSource::Filename);
    assert_eq!(config.identifier.algorithm, HashAlgorithm::SHA1);
    assert_eq!(config.scan.max_depth, Some(3));
    assert_eq!(config.scan.containers, vec!["mkv", "mp4"]);

    assert_eq!(config_manager.get("identifier.source").unwrap(), "filename");
    assert_eq!(config_manager.get("scan.containers").unwrap(), "mkv,mp4");
}

#[test]
fn test_set_preserves_other_values() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    config_manager.set("descriptor.extension", "xml").unwrap();
    config_manager
        .set("identifier.unique_id_type", "custom")
        .unwrap();

    assert_eq!(config_manager.get("descriptor.extension").unwrap(), "xml");
    assert_eq!(
        config_manager.get("identifier.unique_id_type").unwrap(),
        "custom"
    );
}

#[test]
fn test_set_rejects_invalid_values() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = create_test_config_manager(&temp_dir);

    assert!(config_manager.set("scan.overwrite", "maybe").is_err());
    assert!(config_manager.set("scan.max_depth", "-1").is_err());
    assert!(config_manager.set("identifier.source", "inode").is_err());
    assert!(config_manager.set("identifier.algorithm", "crc32").is_err());
    assert!(config_manager.set("descriptor.extra_elements", "plot,bad name").is_err());
    assert!(config_manager.set("descriptor.extension", " ").is_err());
    assert!(config_manager.set("unknown.key", "x").is_err());

    // Nothing was written
    assert!(!config_manager.get_config_path().exists());
}

#[test]
fn test_get_unknown_key() {
    let temp_dir = TempDir::new().unwrap();
    let config_manager = create_test_config_manager(&temp_dir);

    assert!(config_manager.get("scan.nonexistent").is_err());
    assert!(config_manager.get("scan.root.deeper").is_err());
}

#[test]
fn test_list_contains_all_sections() {
    let temp_dir = TempDir::new().unwrap();
    let config_manager = create_test_config_manager(&temp_dir);

    let items = config_manager.list().unwrap();
    let keys: Vec<&str> = items.iter().map(|(k, _)| k.as_str()).collect();

    assert!(keys.contains(&"scan.root"));
    assert!(keys.contains(&"scan.containers"));
    assert!(keys.contains(&"descriptor.emit_empty_elements"));
    assert!(keys.contains(&"identifier.algorithm"));

    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn test_load_reads_handwritten_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_manager = create_test_config_manager(&temp_dir);
    let config_path = config_manager.get_config_path();
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(
        &config_path,
        r#"
[descriptor]
emit_empty_elements = false
extra_elements = ["rating"]

[identifier]
source = "absolute"
"#,
    )
    .unwrap();

    let config = config_manager.load().unwrap();
    assert!(!config.descriptor.emit_empty_elements);
    assert_eq!(config.descriptor.extra_elements, vec!["rating"]);
    assert_eq!(config.identifier.source, IdSource::Absolute);
    // Unset values keep their defaults
    assert_eq!(config.descriptor.extension, "nfo");
}

#[test]
fn test_load_rejects_malformed_values() {
    let temp_dir = TempDir::new().unwrap();
    let config_manager = create_test_config_manager(&temp_dir);
    let config_path = config_manager.get_config_path();
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "[identifier]\nalgorithm = \"crc32\"\n").unwrap();

    assert!(config_manager.load().is_err());
}
