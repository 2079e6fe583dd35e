//! Haptic Playground - the core of a haptic pattern editor
//!
//! A pattern is a set of timed events (transient taps and continuous pulses)
//! plus parameter curves that modulate them over time. This crate holds the
//! editable model, renders it into the command timeline a haptic engine
//! plays, and exports it as text.
//!
//! ```
//! use haptic_playground::{HapticPattern, Session, SimulatedDevice, export, render};
//!
//! let mut pattern = HapticPattern::example();
//! let index = pattern.add_event();
//! let id = pattern.events()[index].id();
//! pattern.event_mut(id).unwrap().set_relative_time(0.8);
//!
//! let timeline = render(&pattern).unwrap();
//! assert_eq!(timeline.event_count(), 3);
//!
//! let mut session = Session::new(SimulatedDevice::new());
//! session.play_timeline(&timeline).unwrap();
//!
//! assert!(export(&pattern).starts_with("HapticPattern::new("));
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod player;
pub mod render;

// Re-export commonly used types at the crate root
pub use config::{Config, EditorRanges};
pub use error::{
    ConfigError, DeviceError, EditError, PlaybackError, RenderError, RenderTarget, ValidationError,
};
#[cfg(feature = "json")]
pub use error::ImportError;
pub use export::{ExportOptions, Exporter, export};
pub use model::{
    ControlPoint, CurveId, DisplayColor, EventId, EventKind, EventType, HapticCurve, HapticEvent,
    HapticPattern, ParameterId,
};
pub use player::{HapticDevice, HapticEngine, PatternPlayer, Session, SimulatedDevice};
pub use render::{ActuationTimeline, RenderOptions, Renderer, render};
