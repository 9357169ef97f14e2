use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::constants::{
    DEFAULT_RATE, IDLE_TIMEOUT_MS, RATE_EPSILON, RATE_OPTIONS, SCRUB_DEBOUNCE_MS,
    SCRUB_MIN_STEP_SECS, SCRUB_STEP_DIVISOR, SKIP_INTERVAL_SECS,
};
use crate::overlay::InputMode;
use crate::utils::{OverlayError, OverlayResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OverlayConfig {
    #[serde(default)]
    pub input_mode: InputMode,

    #[serde(default)]
    pub scrub: ScrubConfig,

    #[serde(default)]
    pub visibility: VisibilityConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub bookmarks: BookmarksConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrubConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_step_divisor")]
    pub step_divisor: f64,

    #[serde(default = "default_min_step_secs")]
    pub min_step_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityConfig {
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,

    #[serde(default = "default_true")]
    pub start_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default = "default_skip_interval")]
    pub skip_interval_secs: f64,

    #[serde(default = "default_rate_options")]
    pub rate_options: Vec<f64>,

    #[serde(default = "default_rate")]
    pub default_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarksConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl OverlayConfig {
    /// Load from the user config directory, writing defaults when missing.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No overlay config found, using defaults");
            let config = OverlayConfig::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading overlay config from {:?}", path);
        let contents = fs::read_to_string(path).context("Failed to read config file")?;
        let config: OverlayConfig =
            toml::from_str(&contents).context("Failed to parse config file")?;
        config.validate().context("Invalid overlay config")?;
        info!("Overlay config loaded successfully");
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).context("Failed to write config file")?;

        debug!("Overlay config saved to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> OverlayResult<()> {
        if self.scrub.debounce_ms == 0 {
            return Err(OverlayError::InvalidConfig(
                "scrub.debounce_ms must be positive".to_string(),
            ));
        }
        if !(self.scrub.step_divisor.is_finite() && self.scrub.step_divisor > 0.0) {
            return Err(OverlayError::InvalidConfig(
                "scrub.step_divisor must be positive".to_string(),
            ));
        }
        if !(self.scrub.min_step_secs.is_finite() && self.scrub.min_step_secs > 0.0) {
            return Err(OverlayError::InvalidConfig(
                "scrub.min_step_secs must be positive".to_string(),
            ));
        }
        if self.visibility.idle_timeout_ms == 0 {
            return Err(OverlayError::InvalidConfig(
                "visibility.idle_timeout_ms must be positive".to_string(),
            ));
        }
        if self.playback.rate_options.is_empty() {
            return Err(OverlayError::EmptyRateOptions);
        }
        let default_rate = self.playback.default_rate;
        if !self
            .playback
            .rate_options
            .iter()
            .any(|rate| (rate - default_rate).abs() < RATE_EPSILON)
        {
            return Err(OverlayError::InvalidRate(default_rate));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.scrub.debounce_ms)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.visibility.idle_timeout_ms)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("playback-overlay").join("config.toml"))
    }
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            step_divisor: default_step_divisor(),
            min_step_secs: default_min_step_secs(),
        }
    }
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            idle_timeout_ms: default_idle_timeout_ms(),
            start_visible: default_true(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            skip_interval_secs: default_skip_interval(),
            rate_options: default_rate_options(),
            default_rate: default_rate(),
        }
    }
}

impl Default for BookmarksConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

// Default value functions
fn default_true() -> bool { true }
fn default_debounce_ms() -> u64 { SCRUB_DEBOUNCE_MS }
fn default_step_divisor() -> f64 { SCRUB_STEP_DIVISOR }
fn default_min_step_secs() -> f64 { SCRUB_MIN_STEP_SECS }
fn default_idle_timeout_ms() -> u64 { IDLE_TIMEOUT_MS }
fn default_skip_interval() -> f64 { SKIP_INTERVAL_SECS }
fn default_rate_options() -> Vec<f64> { RATE_OPTIONS.to_vec() }
fn default_rate() -> f64 { DEFAULT_RATE }
