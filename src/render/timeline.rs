//! The engine-facing actuation timeline.
//!
//! These types mirror the structures a platform haptic engine accepts. They
//! carry no ids and no editor state, only what the actuator needs.

use super::channel::{DynamicParameter, EventParameter};

/// Whether an actuation is a tap or a sustained pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuationKind {
    Transient,
    Continuous,
}

/// A parameter value attached to an actuation event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventParameterValue {
    pub parameter: EventParameter,
    pub value: f32,
}

/// A single actuation command.
///
/// Transient commands always have a duration of 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ActuationEvent {
    pub kind: ActuationKind,
    pub parameters: [EventParameterValue; 2],
    pub relative_time: f64,
    pub duration: f64,
}

impl ActuationEvent {
    pub fn end_time(&self) -> f64 {
        self.relative_time + self.duration
    }

    /// Looks up the value sent for `parameter`.
    pub fn parameter(&self, parameter: EventParameter) -> Option<f32> {
        self.parameters
            .iter()
            .find(|p| p.parameter == parameter)
            .map(|p| p.value)
    }
}

/// One point of a parameter curve command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveControlPoint {
    pub relative_time: f64,
    pub value: f32,
}

/// A dynamic parameter modulation command.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterCurveCommand {
    pub parameter: DynamicParameter,
    pub control_points: Vec<CurveControlPoint>,
    pub relative_time: f64,
}

impl ParameterCurveCommand {
    pub fn end_time(&self) -> f64 {
        self.relative_time + self.control_points.last().map_or(0.0, |p| p.relative_time)
    }
}

/// A rendered pattern, ready to hand to a haptic engine.
///
/// Events and curve commands appear in the same order as in the source
/// pattern. Overlapping commands are kept as they are; combining them is up
/// to the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActuationTimeline {
    events: Vec<ActuationEvent>,
    curves: Vec<ParameterCurveCommand>,
}

impl ActuationTimeline {
    pub(crate) fn new(events: Vec<ActuationEvent>, curves: Vec<ParameterCurveCommand>) -> Self {
        Self { events, curves }
    }

    pub fn events(&self) -> &[ActuationEvent] {
        &self.events
    }

    pub fn curves(&self) -> &[ParameterCurveCommand] {
        &self.curves
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn curve_command_count(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.curves.is_empty()
    }

    /// Time at which the last command ends, in seconds.
    pub fn duration(&self) -> f64 {
        let events = self.events.iter().map(ActuationEvent::end_time);
        let curves = self.curves.iter().map(ParameterCurveCommand::end_time);
        events.chain(curves).fold(0.0, f64::max)
    }
}
