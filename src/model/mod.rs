//! The editable haptic pattern model.
//!
//! Patterns are built from events and parameter curves. Every mutating
//! operation keeps the model valid, so a pattern can be rendered or exported
//! at any point during editing.

mod curve;
mod event;
mod pattern;

pub use curve::{ControlPoint, CurveId, DisplayColor, HapticCurve, MIN_CONTROL_POINTS, ParameterId};
pub use event::{DEFAULT_CONTINUOUS_DURATION, EventId, EventKind, EventType, HapticEvent};
pub use pattern::HapticPattern;
