use crate::error::{FlexverError, Result};
use crate::version::NumericCapabilities;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_HOME_DIR_NAME: &str = ".flexver";

pub const HOME_ENV: &str = "FLEXVER_HOME";
pub const BIG_INTEGER_ENV: &str = "FLEXVER_NUMERIC__BIG_INTEGER";
pub const COLOR_ENV: &str = "FLEXVER_OUTPUT__COLOR";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FlexverConfig {
    #[serde(default)]
    pub numeric: NumericConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericConfig {
    /// Whether digit runs past the 64-bit range may use arbitrary precision
    /// before falling back to doubles.
    #[serde(default = "default_true")]
    pub big_integer: bool,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self { big_integer: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

fn default_true() -> bool {
    true
}

/// Resolves the flexver home: `FLEXVER_HOME` if set, otherwise `~/.flexver`.
pub fn flexver_home() -> Result<PathBuf> {
    if let Ok(home) = env::var(HOME_ENV)
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    dirs::home_dir()
        .map(|home| home.join(DEFAULT_HOME_DIR_NAME))
        .ok_or_else(|| {
            FlexverError::ConfigError(format!(
                "Unable to determine home directory; set {HOME_ENV}"
            ))
        })
}

/// Loads the configuration from the resolved home and applies environment overrides.
pub fn new_flexver_config() -> Result<FlexverConfig> {
    let home = flexver_home()?;
    let mut config = FlexverConfig::load(&home)?;
    config.apply_env_overrides()?;
    Ok(config)
}

impl FlexverConfig {
    pub fn load(flexver_home: &Path) -> Result<Self> {
        let config_path = flexver_home.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            log::debug!("Config file not found at {config_path:?}, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: FlexverConfig = toml::from_str(&contents).map_err(|e| {
            FlexverError::ConfigFile(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        log::debug!("Loaded config from {config_path:?}");
        Ok(config)
    }

    pub fn save(&self, flexver_home: &Path) -> Result<()> {
        let config_path = flexver_home.join(CONFIG_FILE_NAME);

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| FlexverError::ConfigError(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, contents)?;
        log::debug!("Saved config to {config_path:?}");
        Ok(())
    }

    /// Applies `FLEXVER_NUMERIC__BIG_INTEGER` and `FLEXVER_OUTPUT__COLOR`.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(big_integer) = bool_from_env(BIG_INTEGER_ENV)? {
            log::debug!("{BIG_INTEGER_ENV} overrides numeric.big_integer = {big_integer}");
            self.numeric.big_integer = big_integer;
        }
        if let Some(color) = bool_from_env(COLOR_ENV)? {
            log::debug!("{COLOR_ENV} overrides output.color = {color}");
            self.output.color = color;
        }
        Ok(())
    }

    pub fn numeric_capabilities(&self) -> NumericCapabilities {
        NumericCapabilities {
            big_integer: self.numeric.big_integer,
        }
    }
}

fn bool_from_env(name: &str) -> Result<Option<bool>> {
    match env::var(name) {
        Ok(value) => parse_bool(&value)
            .map(Some)
            .ok_or_else(|| FlexverError::InvalidConfig(format!("{name}={value}"))),
        Err(_) => Ok(None),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
