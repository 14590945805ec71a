//! Configuration for backdrop.
//!
//! Settings live in `config.toml` under the platform config directory.
//! Every field has a default, so a partial file (or no file) works.

mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use backdrop_core::{AnimationSpeed, ColorTheme, Countdown, DEFAULT_NARROW_BREAKPOINT_COLS, EffectStyle};
use chrono::NaiveDateTime;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub use error::ConfigError;

/// Format of `countdown.target`.
pub const TARGET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub effect: EffectStyle,
    pub speed: AnimationSpeed,
    pub color_theme: ColorTheme,
    /// Fixed seed for reproducible layouts; random per run when unset.
    pub seed: Option<u64>,
    pub pointer: PointerConfig,
    pub countdown: CountdownConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            effect: EffectStyle::default(),
            speed: AnimationSpeed::default(),
            color_theme: ColorTheme::default(),
            seed: None,
            pointer: PointerConfig::default(),
            countdown: CountdownConfig::default(),
        }
    }
}

/// `[pointer]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Minimum spacing between pointer samples in milliseconds.
    pub throttle_ms: u64,
    /// Viewports narrower than this many columns count as touch devices.
    pub narrow_breakpoint_cols: u16,
    /// Always use the touch fallback.
    pub force_touch: bool,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 16,
            narrow_breakpoint_cols: DEFAULT_NARROW_BREAKPOINT_COLS,
            force_touch: false,
        }
    }
}

impl PointerConfig {
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

/// `[countdown]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    pub enabled: bool,
    /// Local date-time, `YYYY-MM-DDTHH:MM:SS`.
    pub target: String,
    pub label: String,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            target: "2025-09-06T09:00:00".to_string(),
            label: "IEEE DAIICT ML Summer School begins in".to_string(),
        }
    }
}

impl CountdownConfig {
    pub fn target(&self) -> Result<NaiveDateTime, ConfigError> {
        NaiveDateTime::parse_from_str(&self.target, TARGET_FORMAT).map_err(|e| {
            ConfigError::Invalid {
                field: "countdown.target",
                reason: format!("`{}` is not {TARGET_FORMAT}: {e}", self.target),
            }
        })
    }

    pub fn countdown(&self) -> Result<Countdown, ConfigError> {
        self.target().map(Countdown::new)
    }
}

impl Config {
    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pointer.throttle_ms > 1_000 {
            return Err(ConfigError::Invalid {
                field: "pointer.throttle_ms",
                reason: format!("{} exceeds 1000", self.pointer.throttle_ms),
            });
        }
        if self.pointer.narrow_breakpoint_cols > 1_000 {
            return Err(ConfigError::Invalid {
                field: "pointer.narrow_breakpoint_cols",
                reason: format!("{} exceeds 1000", self.pointer.narrow_breakpoint_cols),
            });
        }
        self.countdown.target()?;
        Ok(())
    }
}

/// Platform directories for backdrop.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "backdrop")
}

/// Path of the config file in the platform config directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    project_dirs()
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .ok_or(ConfigError::NoConfigDir)
}

/// Directory for the log file.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Load and validate a config file. A missing file yields the defaults.
pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::info!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    tracing::info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load the config from the platform default path.
pub fn load() -> Result<Config, ConfigError> {
    load_from_path(&config_path()?)
}

/// Write a config file, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("saved config to {}", path.display());
    Ok(())
}

/// Save to the platform default path.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    save_to_path(config, &config_path()?)
}
