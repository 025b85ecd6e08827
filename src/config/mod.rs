mod types;

pub use types::{
    default_palette, parse_hex_color, Config, DebugConfig, LayoutEntry, LayoutsConfig,
    TileConfig, ValidationIssue,
};

use std::path::{Path, PathBuf};

use crate::components::global_registry;
use crate::error::ConfigError;

impl Config {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }
}

/// Loads the config from `path`, or from [`get_config_path`] when `None`.
///
/// Never fails: read, parse and validation errors are logged and the defaults
/// are used instead.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    let config = if config_path.exists() {
        match Config::from_path(&config_path) {
            Ok(config) => {
                log::info!("Loaded config from {:?}", config_path);
                config
            }
            Err(e) => {
                log::error!("{}", e);
                Config::default()
            }
        }
    } else {
        log::info!("No config file found at {:?}, using defaults", config_path);
        Config::default()
    };

    // Validate configuration and report issues
    let issues = config.validate(&global_registry().names());
    let errors: Vec<_> = issues.iter().filter(|i| i.is_error).collect();
    let warnings: Vec<_> = issues.iter().filter(|i| !i.is_error).collect();

    for warning in &warnings {
        log::warn!("Config: {}", warning);
    }
    for error in &errors {
        log::error!("Config: {}", error);
    }

    if !issues.is_empty() {
        log::info!(
            "Config validation: {} error(s), {} warning(s)",
            errors.len(),
            warnings.len()
        );
    }

    if !errors.is_empty() {
        log::error!("Config has errors; falling back to defaults.");
        return Config::default();
    }

    config
}

pub fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tessel")
        .join("config.toml")
}
