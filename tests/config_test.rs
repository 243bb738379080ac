//! Integration tests for Settings loading from a config file.
//!
//! These tests pass an explicit config path, so the user's global config
//! never leaks in.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use regionlink::config::{expand_env_vars, Settings, DEFAULT_STORAGE_KEY};

#[test]
fn given_missing_config_file_when_load_then_defaults() {
    let temp = TempDir::new().unwrap();

    let settings = Settings::load_from(Some(&temp.path().join("absent.toml"))).unwrap();

    assert_eq!(settings.storage_key, DEFAULT_STORAGE_KEY);
    assert_eq!(settings.tooltip.link_text, "Kunjungi Website");
}

#[test]
fn given_config_file_when_load_then_values_applied() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("regionlink.toml");
    let data_dir = temp.path().join("data");
    fs::write(
        &path,
        format!(
            r#"
data_dir = "{}"
storage_key = "regions"
label_property = "NAME_1"

[tooltip]
link_text = "Visit website"

[map]
zoom = 7
"#,
            data_dir.display()
        ),
    )
    .unwrap();

    // Act
    let settings = Settings::load_from(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.data_dir, data_dir);
    assert_eq!(settings.storage_key, "regions");
    assert_eq!(settings.label_property, "NAME_1");
    assert_eq!(settings.tooltip.link_text, "Visit website");
    // section replaced as a whole, unspecified keys fall back to defaults
    assert_eq!(
        settings.tooltip.unregistered_message,
        "Belum ada website terdaftar untuk wilayah ini."
    );
    assert_eq!(settings.map.zoom, 7);
    assert_eq!(settings.map.center_lat, -2.5);
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("regionlink.toml");
    fs::write(&path, "storage_key = [").unwrap();

    let err = Settings::load_from(Some(&path)).unwrap_err();

    assert!(err.to_string().starts_with("config error"));
}

#[test]
fn given_boundary_file_with_tilde_when_load_then_expanded() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("regionlink.toml");
    fs::write(&path, r#"boundary_file = "~/maps/kabkota.json""#).unwrap();

    let settings = Settings::load_from(Some(&path)).unwrap();

    let home = PathBuf::from(std::env::var("HOME").expect("HOME should be set"));
    assert_eq!(
        settings.boundary_file,
        Some(home.join("maps/kabkota.json"))
    );
}

#[test]
fn given_unknown_variable_when_expanding_then_input_unchanged() {
    assert_eq!(
        expand_env_vars("$REGIONLINK_SURELY_UNSET_VAR/x"),
        "$REGIONLINK_SURELY_UNSET_VAR/x"
    );
}
