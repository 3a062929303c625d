//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. Built-in defaults
//! 2. `config/default.toml`
//! 3. `config/user.toml` (user overrides)
//! 4. Environment variables (`WIRECUBE_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wirecube_core::RenderConfig;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "WIRECUBE_";

/// Largest overlay size accepted, in cells
pub const MAX_OVERLAY_EXTENT: i32 = i16::MAX as i32;

/// Largest per-frame overlay shift accepted, in NDC
pub const MAX_OVERLAY_STEP: f64 = 1.0;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Animation, overlay, glyphs and styles
    pub render: RenderConfig,
    /// Logging configuration
    pub log: LogConfig,
}

impl AppConfig {
    /// Load configuration from the `config` directory and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        for name in ["default.toml", "user.toml"] {
            let path = config_dir.join(name);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // WIRECUBE_RENDER__ANIMATION__FPS=30 -> render.animation.fps = 30
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: AppConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the renderer cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let animation = &self.render.animation;
        if animation.fps == 0 {
            return Err(ConfigError::invalid("render.animation.fps must be at least 1"));
        }
        if !animation.depth_offset.is_finite() {
            return Err(ConfigError::invalid(
                "render.animation.depth_offset must be a finite number",
            ));
        }
        if !animation.angle_step.is_finite() {
            return Err(ConfigError::invalid(
                "render.animation.angle_step must be a finite number",
            ));
        }
        let overlay = &self.render.overlay;
        if !(overlay.step > 0.0 && overlay.step <= MAX_OVERLAY_STEP) {
            return Err(ConfigError::invalid(
                "render.overlay.step must be greater than 0 and at most 1",
            ));
        }
        if !(0..=MAX_OVERLAY_EXTENT).contains(&overlay.extent) {
            return Err(ConfigError::invalid(
                "render.overlay.extent must be between 0 and 32767",
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// env_logger filter, e.g. "debug" or "wirecube_core=trace"
    pub level: String,
    /// Write logs here instead of stderr, which the alternate screen hides
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "error".to_string(),
            file: None,
        }
    }
}

/// Error type for configuration loading
#[derive(Debug)]
pub struct ConfigError {
    message: String,
    /// Set when the values parsed but were rejected
    invalid: bool,
}

impl ConfigError {
    fn invalid(message: &str) -> Self {
        ConfigError {
            message: message.to_string(),
            invalid: true,
        }
    }

    /// Whether the configuration was read but holds unusable values
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
            invalid: false,
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
