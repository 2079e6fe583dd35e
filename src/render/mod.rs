//! Rendering of patterns into engine-ready actuation timelines.

mod channel;
mod renderer;
mod timeline;

pub use channel::{DynamicParameter, EventParameter};
pub use renderer::{RenderOptions, Renderer, render, validate_control_points};
pub use timeline::{
    ActuationEvent, ActuationKind, ActuationTimeline, CurveControlPoint, EventParameterValue,
    ParameterCurveCommand,
};
