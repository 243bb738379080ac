//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/regionlink/regionlink.toml`
//! 3. Environment variables: `REGIONLINK_*` prefix (`__` separates sections)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::TooltipText;

/// Storage key of the registry slot.
pub const DEFAULT_STORAGE_KEY: &str = "regionData";

/// Boundary dataset property holding the region name (regency/city level).
pub const DEFAULT_LABEL_PROPERTY: &str = "NAME_2";

/// Parameters handed to the map renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapSettings {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    /// Tile URL template (`{s}`, `{z}`, `{x}`, `{y}` placeholders)
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center_lat: -2.5,
            center_lon: 118.0,
            zoom: 5,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            attribution: r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#.into(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, keep base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_dir: Option<PathBuf>,
    pub storage_key: Option<String>,
    pub boundary_file: Option<PathBuf>,
    pub label_property: Option<String>,
    pub tooltip: Option<TooltipText>,
    pub map: Option<MapSettings>,
}

/// Unified configuration for regionlink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the persisted registry (default: ~/.regionlink)
    pub data_dir: PathBuf,
    /// Key of the registry slot in the store
    pub storage_key: String,
    /// Boundary dataset used when `render` gets no `--boundary`
    pub boundary_file: Option<PathBuf>,
    /// Feature property carrying the region name
    pub label_property: String,
    /// Detail popup texts
    pub tooltip: TooltipText,
    /// Map view parameters
    pub map: MapSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: dirs_default_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            boundary_file: None,
            label_property: DEFAULT_LABEL_PROPERTY.into(),
            tooltip: TooltipText::default(),
            map: MapSettings::default(),
        }
    }
}

/// Get the default data directory (~/.regionlink).
fn dirs_default_data_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".regionlink"))
        .unwrap_or_else(|| PathBuf::from("~/.regionlink"))
}

/// Get the XDG config directory for regionlink.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "regionlink").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("regionlink.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Unknown variables leave the input untouched.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.data_dir.to_string_lossy().as_ref());
        self.data_dir = PathBuf::from(expanded);

        if let Some(boundary) = &self.boundary_file {
            let expanded = expand_env_vars(boundary.to_string_lossy().as_ref());
            self.boundary_file = Some(PathBuf::from(expanded));
        }
    }

    /// Overlay file settings onto self: specified fields win, sections
    /// replace as a whole.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_dir: overlay
                .data_dir
                .clone()
                .unwrap_or_else(|| self.data_dir.clone()),
            storage_key: overlay
                .storage_key
                .clone()
                .unwrap_or_else(|| self.storage_key.clone()),
            boundary_file: overlay
                .boundary_file
                .clone()
                .or_else(|| self.boundary_file.clone()),
            label_property: overlay
                .label_property
                .clone()
                .unwrap_or_else(|| self.label_property.clone()),
            tooltip: overlay
                .tooltip
                .clone()
                .unwrap_or_else(|| self.tooltip.clone()),
            map: overlay.map.clone().unwrap_or_else(|| self.map.clone()),
        }
    }

    /// Load settings with layered precedence from the global config location.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `config_path` as the config file layer.
    ///
    /// A missing file is not an error; an unreadable or invalid one is.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply REGIONLINK_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("REGIONLINK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("storage_key") {
            settings.storage_key = val;
        }
        if let Ok(val) = config.get_string("boundary_file") {
            settings.boundary_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("label_property") {
            settings.label_property = val;
        }
        if let Ok(val) = config.get_string("tooltip.link_text") {
            settings.tooltip.link_text = val;
        }
        if let Ok(val) = config.get_string("tooltip.unregistered_message") {
            settings.tooltip.unregistered_message = val;
        }
        if let Ok(val) = config.get::<f64>("map.center_lat") {
            settings.map.center_lat = val;
        }
        if let Ok(val) = config.get::<f64>("map.center_lon") {
            settings.map.center_lon = val;
        }
        if let Ok(val) = config.get::<u8>("map.zoom") {
            settings.map.zoom = val;
        }
        if let Ok(val) = config.get_string("map.tile_url") {
            settings.map.tile_url = val;
        }
        if let Ok(val) = config.get_string("map.attribution") {
            settings.map.attribution = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# regionlink configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/regionlink/regionlink.toml
#   Env:    REGIONLINK_* environment variables, e.g. REGIONLINK_TOOLTIP__LINK_TEXT
#
# A [tooltip] or [map] section replaces the defaults of that section as a whole.

# Directory holding the persisted registry
# data_dir = "~/.regionlink"

# Key of the registry slot (file <data_dir>/<storage_key>.json)
# storage_key = "regionData"

# GeoJSON boundary dataset used by `render` without --boundary
# boundary_file = "~/data/kabkota.json"

# Feature property holding the region name
# label_property = "NAME_2"

[tooltip]
# link_text = "Kunjungi Website"
# unregistered_message = "Belum ada website terdaftar untuk wilayah ini."

[map]
# center_lat = -2.5
# center_lon = 118.0
# zoom = 5
# tile_url = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
