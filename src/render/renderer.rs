//! Pattern to actuation timeline translation.
//!
//! Rendering is a straight, order-preserving mapping: one actuation event per
//! pattern event and one curve command per pattern curve. Validation stops at
//! structural correctness; overlapping events or curves are passed through.

use serde::{Deserialize, Serialize};

use super::channel::{DynamicParameter, EventParameter};
use super::timeline::{
    ActuationEvent, ActuationKind, ActuationTimeline, CurveControlPoint, EventParameterValue,
    ParameterCurveCommand,
};
use crate::error::{RenderError, RenderTarget, ValidationError};
use crate::model::{
    ControlPoint, EventType, HapticCurve, HapticEvent, HapticPattern, MIN_CONTROL_POINTS,
};

/// Knobs for the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Latest time, in seconds, any command may end at. `None` means unbounded.
    pub time_ceiling: Option<f64>,
}

impl RenderOptions {
    pub fn with_time_ceiling(mut self, ceiling: f64) -> Self {
        self.time_ceiling = Some(ceiling);
        self
    }
}

/// Converts patterns into actuation timelines.
///
/// # Examples
///
/// ```
/// use haptic_playground::{EventType, HapticEvent, HapticPattern, Renderer};
///
/// let pattern = HapticPattern::new(
///     vec![
///         HapticEvent::new(0.4, 0.2, 0.0, EventType::Transient),
///         HapticEvent::new(0.2, 0.3, 0.3, EventType::Continuous { duration: 0.2 }),
///     ],
///     vec![],
/// );
///
/// let timeline = Renderer::new().render(&pattern).unwrap();
/// assert_eq!(timeline.event_count(), 2);
/// assert_eq!(timeline.events()[1].end_time(), 0.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders `pattern` into a timeline.
    ///
    /// # Errors
    ///
    /// Fails with the first problem found, checking events before curves,
    /// each in list order. The pattern itself is never modified.
    pub fn render(&self, pattern: &HapticPattern) -> Result<ActuationTimeline, RenderError> {
        let events = pattern
            .events()
            .iter()
            .enumerate()
            .map(|(index, event)| self.render_event(index, event))
            .collect::<Result<Vec<_>, _>>();
        let curves = pattern
            .curves()
            .iter()
            .enumerate()
            .map(|(index, curve)| self.render_curve(index, curve))
            .collect::<Result<Vec<_>, _>>();

        let (events, curves) = match (events, curves) {
            (Ok(events), Ok(curves)) => (events, curves),
            (Err(err), _) | (_, Err(err)) => {
                tracing::warn!(%err, "pattern rejected by renderer");
                return Err(err);
            }
        };

        let timeline = ActuationTimeline::new(events, curves);
        tracing::debug!(
            events = timeline.event_count(),
            curves = timeline.curve_command_count(),
            duration = timeline.duration(),
            "rendered pattern"
        );
        Ok(timeline)
    }

    fn render_event(
        &self,
        index: usize,
        event: &HapticEvent,
    ) -> Result<ActuationEvent, RenderError> {
        let target = RenderTarget::Event(index);
        let intensity = check_unit(target, "intensity", event.intensity())?;
        let sharpness = check_unit(target, "sharpness", event.sharpness())?;
        let relative_time = check_time(target, "relative time", event.relative_time())?;

        let (kind, duration) = match event.event_type() {
            EventType::Transient => (ActuationKind::Transient, 0.0),
            EventType::Continuous { duration } => (
                ActuationKind::Continuous,
                check_time(target, "duration", duration)?,
            ),
        };
        self.check_ceiling(target, relative_time + duration)?;

        Ok(ActuationEvent {
            kind,
            parameters: [
                EventParameterValue {
                    parameter: EventParameter::HapticIntensity,
                    value: intensity,
                },
                EventParameterValue {
                    parameter: EventParameter::HapticSharpness,
                    value: sharpness,
                },
            ],
            relative_time,
            duration,
        })
    }

    fn render_curve(
        &self,
        index: usize,
        curve: &HapticCurve,
    ) -> Result<ParameterCurveCommand, RenderError> {
        validate_control_points(curve.control_points())
            .map_err(|source| RenderError::Validation { curve: index, source })?;
        let relative_time = check_time(RenderTarget::Curve(index), "start time", curve.time())?;

        let control_points = curve
            .control_points()
            .iter()
            .enumerate()
            .map(|(point, p)| {
                let target = RenderTarget::ControlPoint { curve: index, point };
                Ok(CurveControlPoint {
                    relative_time: check_time(target, "relative time", p.relative_time)?,
                    value: check_finite(target, "value", p.value)?,
                })
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        let command = ParameterCurveCommand {
            parameter: DynamicParameter::from(curve.parameter()),
            control_points,
            relative_time,
        };
        self.check_ceiling(RenderTarget::Curve(index), command.end_time())?;
        Ok(command)
    }

    fn check_ceiling(&self, target: RenderTarget, end: f64) -> Result<(), RenderError> {
        match self.options.time_ceiling {
            Some(ceiling) if end > ceiling => Err(RenderError::ExceedsTimeCeiling {
                target,
                end,
                ceiling,
            }),
            _ => Ok(()),
        }
    }
}

/// Renders `pattern` with default options.
///
/// # Examples
///
/// ```
/// use haptic_playground::{render, HapticPattern};
///
/// let pattern = HapticPattern::example();
/// let timeline = render(&pattern).unwrap();
/// assert_eq!(timeline.event_count(), pattern.events().len());
/// assert_eq!(timeline.curve_command_count(), pattern.curves().len());
/// ```
pub fn render(pattern: &HapticPattern) -> Result<ActuationTimeline, RenderError> {
    Renderer::new().render(pattern)
}

/// Checks the structural invariants of a curve's control points.
///
/// The model already keeps these; the renderer re-checks them before anything
/// reaches the engine.
pub fn validate_control_points(points: &[ControlPoint]) -> Result<(), ValidationError> {
    if points.len() < MIN_CONTROL_POINTS {
        return Err(ValidationError::TooFewControlPoints {
            count: points.len(),
        });
    }
    match points
        .windows(2)
        .position(|pair| pair[1].relative_time < pair[0].relative_time)
    {
        Some(index) => Err(ValidationError::UnsortedControlPoints { index: index + 1 }),
        None => Ok(()),
    }
}

fn check_time(target: RenderTarget, field: &'static str, value: f64) -> Result<f64, RenderError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(RenderError::InvalidValue {
            target,
            field,
            value,
        })
    }
}

fn check_unit(target: RenderTarget, field: &'static str, value: f32) -> Result<f32, RenderError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(RenderError::InvalidValue {
            target,
            field,
            value: f64::from(value),
        })
    }
}

fn check_finite(target: RenderTarget, field: &'static str, value: f32) -> Result<f32, RenderError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RenderError::InvalidValue {
            target,
            field,
            value: f64::from(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParameterId;

    fn two_event_pattern() -> HapticPattern {
        HapticPattern::new(
            vec![
                HapticEvent::new(0.4, 0.2, 0.0, EventType::Transient),
                HapticEvent::new(0.2, 0.3, 0.3, EventType::Continuous { duration: 0.2 }),
            ],
            vec![],
        )
    }

    #[test]
    fn test_transient_and_continuous() {
        let timeline = render(&two_event_pattern()).unwrap();
        assert_eq!(timeline.event_count(), 2);
        assert_eq!(timeline.curve_command_count(), 0);

        let first = &timeline.events()[0];
        assert_eq!(first.kind, ActuationKind::Transient);
        assert_eq!(first.relative_time, 0.0);
        assert_eq!(first.duration, 0.0);
        assert_eq!(first.parameter(EventParameter::HapticIntensity), Some(0.4));
        assert_eq!(first.parameter(EventParameter::HapticSharpness), Some(0.2));

        let second = &timeline.events()[1];
        assert_eq!(second.kind, ActuationKind::Continuous);
        assert_eq!(second.relative_time, 0.3);
        assert_eq!(second.end_time(), 0.5);
    }

    #[test]
    fn test_zero_duration_continuous_is_legal() {
        let pattern = HapticPattern::new(
            vec![HapticEvent::new(0.5, 0.5, 0.1, EventType::Continuous { duration: 0.0 })],
            vec![],
        );
        let timeline = render(&pattern).unwrap();
        assert_eq!(timeline.events()[0].kind, ActuationKind::Continuous);
        assert_eq!(timeline.events()[0].duration, 0.0);
    }

    #[test]
    fn test_events_keep_pattern_order() {
        let pattern = HapticPattern::new(
            vec![
                HapticEvent::new(0.1, 0.1, 0.9, EventType::Transient),
                HapticEvent::new(0.1, 0.1, 0.1, EventType::Transient),
            ],
            vec![],
        );
        let timeline = render(&pattern).unwrap();
        let times: Vec<f64> = timeline.events().iter().map(|e| e.relative_time).collect();
        assert_eq!(times, vec![0.9, 0.1]);
    }

    #[test]
    fn test_curves_map_one_to_one() {
        let pattern = HapticPattern::example();
        let timeline = render(&pattern).unwrap();
        assert_eq!(timeline.curve_command_count(), 2);

        let intensity = &timeline.curves()[0];
        assert_eq!(intensity.parameter, DynamicParameter::IntensityControl);
        assert_eq!(intensity.relative_time, 0.0);
        let source = pattern.curves()[0].control_points();
        assert_eq!(intensity.control_points.len(), source.len());
        for (rendered, original) in intensity.control_points.iter().zip(source) {
            assert_eq!(rendered.relative_time, original.relative_time);
            assert_eq!(rendered.value, original.value);
        }

        assert_eq!(timeline.curves()[1].parameter, DynamicParameter::SharpnessControl);
    }

    #[test]
    fn test_overlaps_pass_through() {
        let a = HapticCurve::blank();
        let b = HapticCurve::blank();
        let pattern = HapticPattern::new(
            vec![
                HapticEvent::new(0.5, 0.5, 0.0, EventType::Continuous { duration: 1.0 }),
                HapticEvent::new(0.5, 0.5, 0.5, EventType::Continuous { duration: 1.0 }),
            ],
            vec![a, b],
        );
        let timeline = render(&pattern).unwrap();
        assert_eq!(timeline.event_count(), 2);
        assert_eq!(timeline.curve_command_count(), 2);
    }

    #[test]
    fn test_validate_control_points() {
        assert_eq!(
            validate_control_points(&[ControlPoint::new(0.0, 1.0)]),
            Err(ValidationError::TooFewControlPoints { count: 1 })
        );
        assert_eq!(
            validate_control_points(&[]),
            Err(ValidationError::TooFewControlPoints { count: 0 })
        );
        assert_eq!(
            validate_control_points(&[
                ControlPoint::new(0.0, 1.0),
                ControlPoint::new(0.5, 1.0),
                ControlPoint::new(0.2, 1.0),
            ]),
            Err(ValidationError::UnsortedControlPoints { index: 2 })
        );
        assert!(validate_control_points(HapticCurve::blank().control_points()).is_ok());
    }

    #[test]
    fn test_nan_intensity_rejected() {
        let mut event = HapticEvent::default_transient();
        event.set_intensity(f32::NAN);
        let pattern = HapticPattern::new(vec![event], vec![]);
        let err = render(&pattern).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidValue {
                target: RenderTarget::Event(0),
                field: "intensity",
                ..
            }
        ));
    }

    #[test]
    fn test_infinite_time_rejected() {
        let mut event = HapticEvent::default_transient();
        event.set_relative_time(f64::INFINITY);
        let pattern = HapticPattern::new(vec![HapticEvent::default_transient(), event], vec![]);
        let err = render(&pattern).unwrap_err();
        assert_eq!(
            err,
            RenderError::InvalidValue {
                target: RenderTarget::Event(1),
                field: "relative time",
                value: f64::INFINITY,
            }
        );
    }

    #[test]
    fn test_nan_curve_value_rejected() {
        let mut curve = HapticCurve::blank();
        curve.set_control_point_value(1, f32::NAN).unwrap();
        let pattern = HapticPattern::new(vec![], vec![curve]);
        let err = render(&pattern).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidValue {
                target: RenderTarget::ControlPoint { curve: 0, point: 1 },
                field: "value",
                ..
            }
        ));
    }

    #[test]
    fn test_unbounded_by_default() {
        let pattern = HapticPattern::new(
            vec![HapticEvent::new(0.5, 0.5, 120.0, EventType::Continuous { duration: 30.0 })],
            vec![],
        );
        assert!(render(&pattern).is_ok());
    }

    #[test]
    fn test_time_ceiling() {
        let renderer = Renderer::with_options(RenderOptions::default().with_time_ceiling(2.0));
        let pattern = HapticPattern::new(
            vec![HapticEvent::new(0.5, 0.5, 1.5, EventType::Continuous { duration: 1.0 })],
            vec![],
        );
        assert_eq!(
            renderer.render(&pattern).unwrap_err(),
            RenderError::ExceedsTimeCeiling {
                target: RenderTarget::Event(0),
                end: 2.5,
                ceiling: 2.0,
            }
        );

        let mut curve = HapticCurve::new(
            ParameterId::AttackTime,
            vec![ControlPoint::new(0.0, 0.0), ControlPoint::new(1.5, 1.0)],
            0.0,
        )
        .unwrap();
        curve.set_time(1.0);
        let pattern = HapticPattern::new(vec![], vec![curve]);
        assert!(matches!(
            renderer.render(&pattern),
            Err(RenderError::ExceedsTimeCeiling {
                target: RenderTarget::Curve(0),
                ..
            })
        ));
    }

    #[test]
    fn test_render_does_not_touch_pattern() {
        let mut event = HapticEvent::default_transient();
        event.set_sharpness(f32::NAN);
        let pattern = HapticPattern::new(vec![event], vec![HapticCurve::blank()]);
        let before = pattern.clone();
        assert!(render(&pattern).is_err());
        // NaN != NaN, so compare the parts that can be compared
        assert_eq!(pattern.curves(), before.curves());
        assert_eq!(pattern.events()[0].id(), before.events()[0].id());
    }
}
