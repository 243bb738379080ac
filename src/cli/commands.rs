//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::services::{IntakeForm, MapStatus, RenderedFeature};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, MapSettings, Settings};
use crate::infrastructure::di::ServiceContainer;

/// Run the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(path.as_path()))?,
        None => Settings::load()?,
    };

    match command {
        Commands::Config { command } => cmd_config(command, &settings, cli.config.as_deref()),
        Commands::Completion { .. } => Ok(()),
        other => {
            let container = ServiceContainer::new(settings)?;
            match other {
                Commands::Add { region, website } => cmd_add(&container, region, website),
                Commands::List => cmd_list(&container),
                Commands::Resolve { label } => cmd_resolve(&container, label),
                Commands::Style { label } => cmd_style(&container, label),
                Commands::Render { boundary, hover } => {
                    cmd_render(&container, boundary.as_deref(), hover.as_deref())
                }
                Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
            }
        }
    }
}

#[instrument(skip(container))]
fn cmd_add(container: &ServiceContainer, region: &str, website: &str) -> CliResult<()> {
    let mut overlay = container.map_overlay();
    *overlay.form_mut() = IntakeForm::new(region, website);

    match overlay.submit() {
        Ok(entry) => {
            output::registered(&entry);
            if let Some(reason) = overlay.registry().persist_error() {
                output::warning(&format!("not saved, kept for this session only: {reason}"));
            }
            Ok(())
        }
        Err(e) => {
            output::rejected(e);
            Err(ApplicationError::from(e).into())
        }
    }
}

#[instrument(skip(container))]
fn cmd_list(container: &ServiceContainer) -> CliResult<()> {
    let registry = container.registry_service();
    let entries = registry.entries();
    if entries.is_empty() {
        output::header("No websites registered yet.");
        return Ok(());
    }
    output::header(&format!("{} registered websites", entries.len()));
    for entry in entries {
        output::entry(entry);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_resolve(container: &ServiceContainer, label: &str) -> CliResult<()> {
    let overlay = container.map_overlay();
    match overlay.resolve(label) {
        Some(entry) => output::entry(entry),
        None => output::data(&format!(
            "{label}: {}",
            container.settings.tooltip.unregistered_message
        )),
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_style(container: &ServiceContainer, label: &str) -> CliResult<()> {
    let overlay = container.map_overlay();
    output::data(&to_json(&overlay.style_for(label))?);
    Ok(())
}

#[derive(Debug, Serialize)]
struct RenderOutput<'a> {
    status: MapStatus,
    map: &'a MapSettings,
    features: Vec<RenderedFeature>,
}

#[instrument(skip(container))]
fn cmd_render(
    container: &ServiceContainer,
    boundary: Option<&Path>,
    hover: Option<&str>,
) -> CliResult<()> {
    let path: PathBuf = boundary
        .map(Path::to_path_buf)
        .or_else(|| container.settings.boundary_file.clone())
        .ok_or_else(|| {
            CliError::Usage("no boundary dataset: pass --boundary or set boundary_file".into())
        })?;
    debug!("boundary: {}", path.display());

    let mut overlay = container.map_overlay();
    overlay.on_boundary_loaded(container.boundary_service().load(&path));

    if let Some(label) = hover {
        let count = overlay.pointer_enter_label(label);
        debug!("hover '{label}': {count} features");
    }

    if overlay.status() == MapStatus::NoData {
        output::warning(&format!("no map data from {}", path.display()));
    }

    let rendered = RenderOutput {
        status: overlay.status(),
        map: &container.settings.map,
        features: overlay.render(),
    };
    output::data(&to_json(&rendered)?);
    Ok(())
}

fn cmd_config(
    command: &ConfigCommands,
    settings: &Settings,
    explicit: Option<&Path>,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::data(&settings.to_toml()?),
        ConfigCommands::Path => {
            let path = explicit
                .map(Path::to_path_buf)
                .or_else(global_config_path)
                .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
            let marker = if path.exists() { "" } else { " (not found)" };
            output::data(&format!("{}{marker}", path.display()));
        }
        ConfigCommands::Template => output::data(&Settings::template()),
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        ApplicationError::OperationFailed {
            context: "serialize output".into(),
            source: Box::new(e),
        }
        .into()
    })
}
