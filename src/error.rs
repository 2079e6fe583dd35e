//! Error types for editing, rendering and playing haptic patterns.
//!
//! None of these are fatal to an editing session. A failed render or playback
//! never touches the pattern it was handed.

use thiserror::Error;

use crate::model::{CurveId, EventId};

/// Structural problem with a curve's control points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A curve needs at least two points to describe an interpolation.
    #[error("curve has {count} control point(s), at least 2 are required")]
    TooFewControlPoints { count: usize },

    /// Control points must be ascending by relative time.
    #[error("control point {index} is earlier than the point before it")]
    UnsortedControlPoints { index: usize },
}

/// Identifies which part of a pattern a render error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// Event at the given position in the pattern's event list.
    Event(usize),
    /// Curve at the given position in the pattern's curve list.
    Curve(usize),
    /// Control point `point` of curve `curve`.
    ControlPoint { curve: usize, point: usize },
}

impl std::fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderTarget::Event(index) => write!(f, "event {}", index),
            RenderTarget::Curve(index) => write!(f, "curve {}", index),
            RenderTarget::ControlPoint { curve, point } => {
                write!(f, "control point {} of curve {}", point, curve)
            }
        }
    }
}

/// Failure reported by the external haptic engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DeviceError {
    pub message: String,
}

impl DeviceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors produced while turning a pattern into an actuation timeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// A curve failed the structural re-check.
    #[error("curve {curve} is malformed: {source}")]
    Validation {
        curve: usize,
        #[source]
        source: ValidationError,
    },

    /// A field holds a value the engine would not accept.
    #[error("{target} has an invalid {field}: {value}")]
    InvalidValue {
        target: RenderTarget,
        field: &'static str,
        value: f64,
    },

    /// Something ends after the configured time ceiling.
    #[error("{target} ends at {end}s, past the {ceiling}s ceiling")]
    ExceedsTimeCeiling {
        target: RenderTarget,
        end: f64,
        ceiling: f64,
    },

    /// The engine refused the assembled timeline.
    #[error("engine rejected the timeline: {0}")]
    EngineRejected(#[source] DeviceError),
}

/// Errors produced while handing a timeline to the haptic engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// No haptic hardware, or the engine could not be created.
    #[error("haptic engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The engine was created but refused to start.
    #[error("failed to start haptic engine: {0}")]
    EngineStart(#[source] DeviceError),

    /// The engine accepted the timeline but the player did not start.
    #[error("failed to start pattern player: {0}")]
    PlayerStart(#[source] DeviceError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Rejected edit operations. The edited entity is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A curve must keep at least two control points.
    #[error("a curve must keep at least 2 control points")]
    ControlPointFloor,

    #[error("index {index} out of range for {len} element(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no event with id {0}")]
    UnknownEvent(EventId),

    #[error("no curve with id {0}")]
    UnknownCurve(CurveId),
}

/// Errors loading a [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid {range} range: {start}..={end}")]
    InvalidRange {
        range: &'static str,
        start: f64,
        end: f64,
    },
}

/// Errors loading a pattern from its JSON form.
#[cfg(feature = "json")]
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid pattern JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("curve {curve} is malformed: {source}")]
    Curve {
        curve: usize,
        #[source]
        source: ValidationError,
    },
}
