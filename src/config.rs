//! Editor configuration.
//!
//! Every section has defaults, so a config file only lists what it changes:
//!
//! ```json
//! { "render": { "time_ceiling": 4.0 }, "export": { "indent": 2 } }
//! ```
//!
//! Loading from JSON needs the `json` feature.

use std::ops::RangeInclusive;
#[cfg(feature = "json")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::export::ExportOptions;
use crate::render::RenderOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderOptions,
    pub export: ExportOptions,
    pub editor: EditorRanges,
}

impl Config {
    /// Parses and validates a JSON config.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file.
    #[cfg(feature = "json")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Checks that every range is finite and not inverted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.editor.validate()
    }
}

/// Slider ranges of the editor.
///
/// These bound what the UI offers, not what the model accepts: the model only
/// requires times to be non-negative and levels to lie in `0..=1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorRanges {
    /// Range for event times, durations and curve offsets, in seconds.
    pub time: RangeInclusive<f64>,
    /// Range for intensity, sharpness and curve values.
    pub unit: RangeInclusive<f32>,
}

impl Default for EditorRanges {
    fn default() -> Self {
        Self {
            time: 0.0..=2.0,
            unit: 0.0..=1.0,
        }
    }
}

impl EditorRanges {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("time", *self.time.start(), *self.time.end())?;
        check_range("unit", f64::from(*self.unit.start()), f64::from(*self.unit.end()))
    }

    /// Clamps `value` into the time range. Never panics, even on a range that
    /// failed [`validate`](Self::validate).
    pub fn clamp_time(&self, value: f64) -> f64 {
        value.max(*self.time.start()).min(*self.time.end())
    }

    pub fn clamp_unit(&self, value: f32) -> f32 {
        value.max(*self.unit.start()).min(*self.unit.end())
    }
}

fn check_range(range: &'static str, start: f64, end: f64) -> Result<(), ConfigError> {
    if start.is_finite() && end.is_finite() && start <= end {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { range, start, end })
    }
}
