//! CLI command tests against a throwaway data directory

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use regionlink::cli::args::Cli;
use regionlink::cli::commands::execute_command;
use regionlink::exitcode;

struct Workspace {
    temp: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("regionlink.toml");
        fs::write(
            &config,
            format!("data_dir = \"{}\"\n", temp.path().join("data").display()),
        )
        .unwrap();
        Self { temp, config }
    }

    fn run(&self, args: &[&str]) -> Result<(), i32> {
        let config = self.config.to_string_lossy().into_owned();
        let mut argv = vec!["regionlink", "--config", config.as_str()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).expect("valid arguments");
        execute_command(&cli).map_err(|e| e.exit_code())
    }

    fn stored(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.temp.path().join("data/regionData.json")).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}

#[test]
fn given_valid_add_when_executed_then_entry_persisted() {
    // Arrange
    let ws = Workspace::new();

    // Act
    ws.run(&["add", "Bandung", "https://bandung.go.id"]).unwrap();
    ws.run(&["add", "Garut", "http://garutkab.go.id"]).unwrap();

    // Assert
    let stored = ws.stored();
    let entries = stored.as_array().expect("stored as JSON array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "Bandung");
    assert_eq!(entries[1]["website"], "http://garutkab.go.id");
    assert!(entries[0]["id"].as_str().is_some());
}

#[test]
fn given_invalid_scheme_when_adding_then_data_error_and_nothing_stored() {
    let ws = Workspace::new();

    let result = ws.run(&["add", "Bandung", "ftp://x.com"]);

    assert_eq!(result, Err(exitcode::DATAERR));
    assert!(!ws.temp.path().join("data/regionData.json").exists());
}

#[test]
fn given_registered_region_when_listing_resolving_and_styling_then_succeeds() {
    let ws = Workspace::new();
    ws.run(&["add", "Tasikmalaya", "https://tasikgo.com"]).unwrap();

    assert!(ws.run(&["list"]).is_ok());
    assert!(ws.run(&["resolve", "TASIKMALAYA"]).is_ok());
    assert!(ws.run(&["style", "tasikmalaya"]).is_ok());
}

#[test]
fn given_render_without_boundary_when_executed_then_usage_error() {
    let ws = Workspace::new();

    assert_eq!(ws.run(&["render"]), Err(exitcode::USAGE));
}

#[test]
fn given_missing_boundary_file_when_rendering_then_no_data_rendered() {
    let ws = Workspace::new();
    let missing = ws.temp.path().join("missing.json");

    let result = ws.run(&["render", "--boundary", missing.to_str().unwrap()]);

    assert!(result.is_ok());
}

#[test]
fn given_broken_config_when_executing_then_config_exit_code() {
    let ws = Workspace::new();
    fs::write(&ws.config, "data_dir = [").unwrap();

    assert_eq!(ws.run(&["list"]), Err(exitcode::CONFIG));
}
