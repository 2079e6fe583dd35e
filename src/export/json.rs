//! JSON form of a pattern.
//!
//! Field order matches the literal export: `events` then `curves`. Ids are
//! not written and are regenerated on load. Loading goes through the model
//! constructors, so a document with an under-populated curve is refused and
//! unsorted control points come back sorted.

use serde::{Deserialize, Serialize};

use crate::error::ImportError;
use crate::model::{ControlPoint, EventType, HapticCurve, HapticEvent, HapticPattern, ParameterId};

#[derive(Debug, Serialize, Deserialize)]
struct PatternRecord {
    #[serde(default)]
    events: Vec<EventRecord>,
    #[serde(default)]
    curves: Vec<CurveRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct EventRecord {
    intensity: f32,
    sharpness: f32,
    relative_time: f64,
    #[serde(rename = "type")]
    event_type: EventType,
}

#[derive(Debug, Serialize, Deserialize)]
struct CurveRecord {
    parameter: ParameterId,
    control_points: Vec<ControlPoint>,
    time: f64,
}

impl From<&HapticPattern> for PatternRecord {
    fn from(pattern: &HapticPattern) -> Self {
        Self {
            events: pattern
                .events()
                .iter()
                .map(|event| EventRecord {
                    intensity: event.intensity(),
                    sharpness: event.sharpness(),
                    relative_time: event.relative_time(),
                    event_type: event.event_type(),
                })
                .collect(),
            curves: pattern
                .curves()
                .iter()
                .map(|curve| CurveRecord {
                    parameter: curve.parameter(),
                    control_points: curve.control_points().to_vec(),
                    time: curve.time(),
                })
                .collect(),
        }
    }
}

/// Serializes `pattern` as pretty-printed JSON.
///
/// # Examples
///
/// ```
/// use haptic_playground::HapticPattern;
/// use haptic_playground::export::{from_json, to_json};
///
/// let pattern = HapticPattern::example();
/// let json = to_json(&pattern).unwrap();
/// let loaded = from_json(&json).unwrap();
///
/// assert_eq!(loaded.events().len(), 2);
/// assert_eq!(loaded.curves()[0].control_points(), pattern.curves()[0].control_points());
/// ```
pub fn to_json(pattern: &HapticPattern) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&PatternRecord::from(pattern))
}

/// Loads a pattern from its JSON form.
pub fn from_json(json: &str) -> Result<HapticPattern, ImportError> {
    let record: PatternRecord = serde_json::from_str(json)?;

    let events = record
        .events
        .into_iter()
        .map(|e| HapticEvent::new(e.intensity, e.sharpness, e.relative_time, e.event_type))
        .collect();
    let curves = record
        .curves
        .into_iter()
        .enumerate()
        .map(|(index, c)| {
            HapticCurve::new(c.parameter, c.control_points, c.time)
                .map_err(|source| ImportError::Curve { curve: index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("loaded pattern from JSON");
    Ok(HapticPattern::new(events, curves))
}
