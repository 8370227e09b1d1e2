//! Tunables for one drawing surface, parsed from JSON or the environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::Deserialize;

use crate::consts::{
    ARTWORK_MARGIN, DEFAULT_BRUSH_SIZE, DEFAULT_TOLERANCE, MAX_ARTWORK_WIDTH, MAX_BRUSH_SIZE, MAX_SCALE,
    MIN_BRUSH_SIZE, MIN_SCALE,
};

/// Error returned when loading or validating a [`SurfaceConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse surface config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("scale bounds must satisfy 0 < min <= max, got {min}..{max}")]
    ScaleBounds { min: f64, max: f64 },
    #[error("history limit must be at least 1")]
    ZeroHistoryLimit,
}

/// Per-surface settings. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurfaceConfig {
    /// Per-channel flood-fill tolerance against the seed color.
    pub tolerance: u8,
    /// Smallest view scale reachable by pinch or zoom.
    pub min_scale: f64,
    /// Largest view scale reachable by pinch or zoom.
    pub max_scale: f64,
    /// Initial brush width in buffer pixels; clamped to the selectable range.
    pub brush_size: u32,
    /// Maximum retained snapshots; `None` keeps everything.
    pub history_limit: Option<usize>,
    /// Widest the artwork is scaled to when loaded.
    pub max_artwork_width: u32,
    /// Horizontal viewport space left around the artwork.
    pub artwork_margin: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            brush_size: DEFAULT_BRUSH_SIZE,
            history_limit: None,
            max_artwork_width: MAX_ARTWORK_WIDTH,
            artwork_margin: ARTWORK_MARGIN,
        }
    }
}

impl SurfaceConfig {
    /// Parse and validate a JSON config object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON or unknown fields, and
    /// the validation errors of [`SurfaceConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()
    }

    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `NURIE_FILL_TOLERANCE`: default 10
    /// - `NURIE_MIN_SCALE`: default 0.5
    /// - `NURIE_MAX_SCALE`: default 3.0
    /// - `NURIE_BRUSH_SIZE`: default 5
    /// - `NURIE_HISTORY_LIMIT`: unbounded when absent
    /// - `NURIE_MAX_ARTWORK_WIDTH`: default 800
    /// - `NURIE_ARTWORK_MARGIN`: default 40
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for a variable that does not parse,
    /// and the validation errors of [`SurfaceConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            tolerance: env_parse("NURIE_FILL_TOLERANCE")?.unwrap_or(defaults.tolerance),
            min_scale: env_parse("NURIE_MIN_SCALE")?.unwrap_or(defaults.min_scale),
            max_scale: env_parse("NURIE_MAX_SCALE")?.unwrap_or(defaults.max_scale),
            brush_size: env_parse("NURIE_BRUSH_SIZE")?.unwrap_or(defaults.brush_size),
            history_limit: env_parse("NURIE_HISTORY_LIMIT")?,
            max_artwork_width: env_parse("NURIE_MAX_ARTWORK_WIDTH")?.unwrap_or(defaults.max_artwork_width),
            artwork_margin: env_parse("NURIE_ARTWORK_MARGIN")?.unwrap_or(defaults.artwork_margin),
        };
        config.validate()
    }

    /// Check invariants and normalize the brush size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ScaleBounds`] unless `0 < min_scale <= max_scale`
    /// (both finite), and [`ConfigError::ZeroHistoryLimit`] for a limit of 0.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        let (min, max) = (self.min_scale, self.max_scale);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::ScaleBounds { min, max });
        }
        if self.history_limit == Some(0) {
            return Err(ConfigError::ZeroHistoryLimit);
        }
        self.brush_size = clamp_brush_size(self.brush_size);
        Ok(self)
    }
}

/// Clamp a brush width into the selectable range.
#[must_use]
pub fn clamp_brush_size(size: u32) -> u32 {
    size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
}

fn env_parse<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(ConfigError::InvalidEnv { key, value: raw }),
    }
}
