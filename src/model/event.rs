//! Discrete haptic events.
//!
//! An event is a single pulse placed on the pattern timeline. Transient events
//! are instantaneous taps; continuous events sustain their intensity and
//! sharpness for a duration.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Duration given to an event when it is switched to [`EventKind::Continuous`].
pub const DEFAULT_CONTINUOUS_DURATION: f64 = 0.1;

/// Stable identifier of an event, used for selection and deletion.
///
/// Ids never take part in ordering, rendering or export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Shape of an event, carrying the duration only where it is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Instantaneous tap
    Transient,
    /// Sustained pulse lasting `duration` seconds
    Continuous { duration: f64 },
}

impl EventType {
    /// Returns the payload-free kind of this event type.
    pub fn kind(&self) -> EventKind {
        match self {
            EventType::Transient => EventKind::Transient,
            EventType::Continuous { .. } => EventKind::Continuous,
        }
    }

    /// Returns the duration, or 0 for transient events.
    pub fn duration(&self) -> f64 {
        match self {
            EventType::Transient => 0.0,
            EventType::Continuous { duration } => *duration,
        }
    }
}

/// Event kind without its payload, as offered by the editor's type picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Transient,
    Continuous,
}

impl EventKind {
    pub const ALL: [EventKind; 2] = [EventKind::Transient, EventKind::Continuous];

    /// Human-readable label used by list rows and the picker.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Transient => "transient",
            EventKind::Continuous => "continuous",
        }
    }
}

/// A single haptic event.
///
/// Intensity and sharpness are kept in `[0, 1]`, times are kept non-negative.
/// There is no upper bound on times in the model; the editor's slider range
/// is a presentation constraint only.
///
/// # Examples
///
/// ```
/// use haptic_playground::{EventKind, EventType, HapticEvent};
///
/// let mut event = HapticEvent::new(0.2, 0.3, 0.3, EventType::Continuous { duration: 0.2 });
/// assert_eq!(event.end_time(), 0.5);
///
/// event.set_kind(EventKind::Transient);
/// assert_eq!(event.duration(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HapticEvent {
    id: EventId,
    intensity: f32,
    sharpness: f32,
    relative_time: f64,
    event_type: EventType,
}

impl HapticEvent {
    /// Creates a new event with a fresh id.
    ///
    /// # Arguments
    ///
    /// * `intensity` - Event strength, clamped to [0, 1]
    /// * `sharpness` - Event character, clamped to [0, 1]
    /// * `relative_time` - Start time in seconds, clamped to be non-negative
    /// * `event_type` - Transient, or continuous with a non-negative duration
    pub fn new(intensity: f32, sharpness: f32, relative_time: f64, event_type: EventType) -> Self {
        let event_type = match event_type {
            EventType::Transient => EventType::Transient,
            EventType::Continuous { duration } => EventType::Continuous {
                duration: non_negative(duration),
            },
        };
        Self {
            id: EventId::new(),
            intensity: unit(intensity),
            sharpness: unit(sharpness),
            relative_time: non_negative(relative_time),
            event_type,
        }
    }

    /// The event the editor appends when "Add event" is pressed.
    ///
    /// # Examples
    ///
    /// ```
    /// use haptic_playground::{EventType, HapticEvent};
    ///
    /// let event = HapticEvent::default_transient();
    /// assert_eq!(event.intensity(), 0.6);
    /// assert_eq!(event.sharpness(), 0.6);
    /// assert_eq!(event.relative_time(), 0.0);
    /// assert_eq!(event.event_type(), EventType::Transient);
    /// ```
    pub fn default_transient() -> Self {
        Self::new(0.6, 0.6, 0.0, EventType::Transient)
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn sharpness(&self) -> f32 {
        self.sharpness
    }

    pub fn relative_time(&self) -> f64 {
        self.relative_time
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn kind(&self) -> EventKind {
        self.event_type.kind()
    }

    /// Returns the duration of a continuous event, 0 for a transient one.
    pub fn duration(&self) -> f64 {
        self.event_type.duration()
    }

    /// Time at which the event stops actuating.
    pub fn end_time(&self) -> f64 {
        self.relative_time + self.duration()
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = unit(intensity);
    }

    pub fn set_sharpness(&mut self, sharpness: f32) {
        self.sharpness = unit(sharpness);
    }

    pub fn set_relative_time(&mut self, relative_time: f64) {
        self.relative_time = non_negative(relative_time);
    }

    /// Switches the event between transient and continuous.
    ///
    /// Switching to transient drops the duration. Switching to continuous
    /// always starts from [`DEFAULT_CONTINUOUS_DURATION`], never from a
    /// previously held duration. Selecting the current kind changes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use haptic_playground::{EventKind, EventType, HapticEvent};
    ///
    /// let mut event = HapticEvent::new(0.5, 0.5, 0.0, EventType::Continuous { duration: 1.5 });
    /// event.set_kind(EventKind::Transient);
    /// event.set_kind(EventKind::Continuous);
    /// assert_eq!(event.duration(), 0.1);
    /// ```
    pub fn set_kind(&mut self, kind: EventKind) {
        if self.kind() == kind {
            return;
        }
        self.event_type = match kind {
            EventKind::Transient => EventType::Transient,
            EventKind::Continuous => EventType::Continuous {
                duration: DEFAULT_CONTINUOUS_DURATION,
            },
        };
    }

    /// Sets the duration of a continuous event.
    ///
    /// Returns `false` without changing anything when the event is transient,
    /// since a transient event has no duration to edit.
    pub fn set_duration(&mut self, duration: f64) -> bool {
        match &mut self.event_type {
            EventType::Transient => false,
            EventType::Continuous { duration: current } => {
                *current = non_negative(duration);
                true
            }
        }
    }
}

// `clamp` keeps NaN and `max` keeps +inf; the renderer rejects both.
fn unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

fn non_negative(value: f64) -> f64 {
    value.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_ranges() {
        let event = HapticEvent::new(1.5, -0.2, -1.0, EventType::Continuous { duration: -3.0 });
        assert_eq!(event.intensity(), 1.0);
        assert_eq!(event.sharpness(), 0.0);
        assert_eq!(event.relative_time(), 0.0);
        assert_eq!(event.duration(), 0.0);
    }

    #[test]
    fn test_no_upper_bound_on_time() {
        let mut event = HapticEvent::default_transient();
        event.set_relative_time(12.5);
        assert_eq!(event.relative_time(), 12.5);
    }

    #[test]
    fn test_ids_are_distinct() {
        let a = HapticEvent::default_transient();
        let b = HapticEvent::default_transient();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_switch_to_transient_discards_duration() {
        let mut event = HapticEvent::new(0.2, 0.3, 0.3, EventType::Continuous { duration: 0.7 });
        event.set_kind(EventKind::Transient);
        assert_eq!(event.event_type(), EventType::Transient);
        assert_eq!(event.duration(), 0.0);
        assert_eq!(event.end_time(), 0.3);
    }

    #[test]
    fn test_switch_back_restores_default_duration() {
        let mut event = HapticEvent::new(0.2, 0.3, 0.3, EventType::Continuous { duration: 0.7 });
        event.set_kind(EventKind::Transient);
        event.set_kind(EventKind::Continuous);
        assert_eq!(
            event.event_type(),
            EventType::Continuous {
                duration: DEFAULT_CONTINUOUS_DURATION
            }
        );
    }

    #[test]
    fn test_same_kind_keeps_duration() {
        let mut event = HapticEvent::new(0.2, 0.3, 0.0, EventType::Continuous { duration: 0.7 });
        event.set_kind(EventKind::Continuous);
        assert_eq!(event.duration(), 0.7);
    }

    #[test]
    fn test_set_duration_ignored_for_transient() {
        let mut event = HapticEvent::default_transient();
        assert!(!event.set_duration(0.5));
        assert_eq!(event.event_type(), EventType::Transient);

        event.set_kind(EventKind::Continuous);
        assert!(event.set_duration(0.5));
        assert_eq!(event.duration(), 0.5);

        assert!(event.set_duration(-1.0));
        assert_eq!(event.duration(), 0.0);
    }

    #[test]
    fn test_setters_keep_identity() {
        let mut event = HapticEvent::default_transient();
        let id = event.id();
        event.set_intensity(0.1);
        event.set_sharpness(0.9);
        event.set_kind(EventKind::Continuous);
        assert_eq!(event.id(), id);
        assert_eq!(event.intensity(), 0.1);
        assert_eq!(event.sharpness(), 0.9);
    }

    #[test]
    fn test_kind_labels() {
        let labels: Vec<_> = EventKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels, vec!["transient", "continuous"]);
    }
}
