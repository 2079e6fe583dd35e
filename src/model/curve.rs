//! Parameter curves.
//!
//! A curve modulates one dynamic parameter of the pattern over time. It is an
//! ordered list of control points; the engine interpolates linearly between
//! consecutive points.
//!
//! Two invariants hold after every operation on [`HapticCurve`]:
//! - control points are sorted ascending by relative time (stable, so points
//!   sharing a time keep their insertion order)
//! - there are at least two control points

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{EditError, ValidationError};

/// Minimum number of control points a curve can hold.
pub const MIN_CONTROL_POINTS: usize = 2;

/// Stable identifier of a curve, used by the editor for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurveId(Uuid);

impl CurveId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CurveId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The parameter a curve modulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterId {
    Intensity,
    Sharpness,
    AttackTime,
    DecayTime,
    ReleaseTime,
}

impl ParameterId {
    pub const ALL: [ParameterId; 5] = [
        ParameterId::Intensity,
        ParameterId::Sharpness,
        ParameterId::AttackTime,
        ParameterId::DecayTime,
        ParameterId::ReleaseTime,
    ];

    /// Human-readable label shown in the parameter picker.
    ///
    /// # Examples
    ///
    /// ```
    /// use haptic_playground::ParameterId;
    ///
    /// assert_eq!(ParameterId::AttackTime.label(), "attack time");
    /// ```
    pub fn label(&self) -> &'static str {
        match self {
            ParameterId::Intensity => "intensity",
            ParameterId::Sharpness => "sharpness",
            ParameterId::AttackTime => "attack time",
            ParameterId::DecayTime => "decay time",
            ParameterId::ReleaseTime => "release time",
        }
    }

    /// Color the editor uses to draw curves of this parameter.
    pub fn color(&self) -> DisplayColor {
        match self {
            ParameterId::Intensity => DisplayColor::Red,
            ParameterId::Sharpness => DisplayColor::Blue,
            ParameterId::AttackTime => DisplayColor::Green,
            ParameterId::DecayTime => DisplayColor::Yellow,
            ParameterId::ReleaseTime => DisplayColor::Purple,
        }
    }

    /// Variant name as written in source code.
    pub fn case_name(&self) -> &'static str {
        match self {
            ParameterId::Intensity => "Intensity",
            ParameterId::Sharpness => "Sharpness",
            ParameterId::AttackTime => "AttackTime",
            ParameterId::DecayTime => "DecayTime",
            ParameterId::ReleaseTime => "ReleaseTime",
        }
    }
}

/// Presentation color attached to each [`ParameterId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl DisplayColor {
    /// sRGB components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            DisplayColor::Red => (255, 59, 48),
            DisplayColor::Blue => (0, 122, 255),
            DisplayColor::Green => (52, 199, 89),
            DisplayColor::Yellow => (255, 204, 0),
            DisplayColor::Purple => (175, 82, 222),
        }
    }
}

/// One (time, value) sample of a curve.
///
/// `relative_time` is measured from the curve's own start time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub relative_time: f64,
    pub value: f32,
}

impl ControlPoint {
    pub fn new(relative_time: f64, value: f32) -> Self {
        Self {
            relative_time,
            value,
        }
    }

    fn sanitized(self) -> Self {
        Self {
            relative_time: point_time(self.relative_time),
            ..self
        }
    }
}

/// Negative, `-0.0` and NaN times all become `0.0`, so equal times compare
/// equal in the sort.
fn point_time(relative_time: f64) -> f64 {
    if relative_time > 0.0 { relative_time } else { 0.0 }
}

/// A time-varying modulation of one dynamic parameter.
///
/// # Examples
///
/// ```
/// use haptic_playground::{ControlPoint, HapticCurve, ParameterId};
///
/// let mut curve = HapticCurve::blank();
/// assert_eq!(curve.parameter(), ParameterId::Intensity);
///
/// // New points land at the head and are sorted into place
/// curve.insert_control_point();
/// assert_eq!(
///     curve.control_points(),
///     &[
///         ControlPoint::new(0.0, 0.0),
///         ControlPoint::new(0.0, 1.0),
///         ControlPoint::new(1.0, 1.0),
///     ]
/// );
///
/// // A curve never drops below two points
/// curve.remove_control_point(0).unwrap();
/// assert!(curve.remove_control_point(0).is_err());
/// assert_eq!(curve.point_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HapticCurve {
    id: CurveId,
    parameter: ParameterId,
    control_points: Vec<ControlPoint>,
    time: f64,
}

impl HapticCurve {
    /// Creates a curve from its control points, sorting them by time.
    ///
    /// Negative or NaN point times are clamped to 0.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TooFewControlPoints`] when fewer than two
    /// points are given.
    ///
    /// # Examples
    ///
    /// ```
    /// use haptic_playground::{ControlPoint, HapticCurve, ParameterId};
    ///
    /// let curve = HapticCurve::new(
    ///     ParameterId::Sharpness,
    ///     vec![ControlPoint::new(0.4, 0.0), ControlPoint::new(0.0, 0.3)],
    ///     0.0,
    /// )
    /// .unwrap();
    /// assert_eq!(curve.control_points()[0].relative_time, 0.0);
    ///
    /// assert!(HapticCurve::new(ParameterId::Sharpness, vec![], 0.0).is_err());
    /// ```
    pub fn new(
        parameter: ParameterId,
        control_points: Vec<ControlPoint>,
        time: f64,
    ) -> Result<Self, ValidationError> {
        if control_points.len() < MIN_CONTROL_POINTS {
            return Err(ValidationError::TooFewControlPoints {
                count: control_points.len(),
            });
        }
        let mut curve = Self {
            id: CurveId::new(),
            parameter,
            control_points: control_points
                .into_iter()
                .map(ControlPoint::sanitized)
                .collect(),
            time: time.max(0.0),
        };
        curve.resort(0);
        Ok(curve)
    }

    /// Creates a curve from a fixed-size list of points.
    ///
    /// The two-point floor is checked at compile time, so this cannot fail.
    /// Exported pattern literals use this constructor.
    ///
    /// # Examples
    ///
    /// ```
    /// use haptic_playground::{ControlPoint, HapticCurve, ParameterId};
    ///
    /// let curve = HapticCurve::from_array(
    ///     ParameterId::ReleaseTime,
    ///     [ControlPoint::new(0.0, 0.2), ControlPoint::new(0.5, 0.8)],
    ///     0.25,
    /// );
    /// assert_eq!(curve.end_time(), 0.75);
    /// ```
    pub fn from_array<const N: usize>(
        parameter: ParameterId,
        control_points: [ControlPoint; N],
        time: f64,
    ) -> Self {
        const { assert!(N >= MIN_CONTROL_POINTS, "a curve needs at least 2 control points") };
        let mut curve = Self {
            id: CurveId::new(),
            parameter,
            control_points: control_points.map(ControlPoint::sanitized).to_vec(),
            time: time.max(0.0),
        };
        curve.resort(0);
        curve
    }

    /// The curve the editor adds by default: full intensity for one second.
    pub fn blank() -> Self {
        Self {
            id: CurveId::new(),
            parameter: ParameterId::Intensity,
            control_points: vec![ControlPoint::new(0.0, 1.0), ControlPoint::new(1.0, 1.0)],
            time: 0.0,
        }
    }

    pub fn id(&self) -> CurveId {
        self.id
    }

    pub fn parameter(&self) -> ParameterId {
        self.parameter
    }

    /// Start offset of the curve on the pattern timeline, in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Control points in ascending time order.
    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }

    pub fn point_count(&self) -> usize {
        self.control_points.len()
    }

    /// Whether a point can be removed without breaking the two-point floor.
    pub fn can_remove_control_point(&self) -> bool {
        self.control_points.len() > MIN_CONTROL_POINTS
    }

    pub fn set_parameter(&mut self, parameter: ParameterId) {
        self.parameter = parameter;
    }

    pub fn set_time(&mut self, time: f64) {
        self.time = time.max(0.0);
    }

    /// Inserts a `(0, 0)` point at the head of the list and sorts it into place.
    ///
    /// Returns the index of the new point.
    pub fn insert_control_point(&mut self) -> usize {
        self.control_points.insert(0, ControlPoint::new(0.0, 0.0));
        self.resort(0)
    }

    /// Removes the point at `index`.
    ///
    /// # Errors
    ///
    /// - [`EditError::IndexOutOfRange`] if there is no such point
    /// - [`EditError::ControlPointFloor`] if only two points remain
    pub fn remove_control_point(&mut self, index: usize) -> Result<ControlPoint, EditError> {
        let len = self.control_points.len();
        if index >= len {
            return Err(EditError::IndexOutOfRange { index, len });
        }
        if !self.can_remove_control_point() {
            tracing::debug!(curve = %self.id, index, "control point removal rejected at floor");
            return Err(EditError::ControlPointFloor);
        }
        Ok(self.control_points.remove(index))
    }

    /// Replaces the point at `index` and re-sorts.
    ///
    /// Negative times are clamped to 0. Returns the point's index after sorting.
    pub fn set_control_point(
        &mut self,
        index: usize,
        relative_time: f64,
        value: f32,
    ) -> Result<usize, EditError> {
        let point = self.point_mut(index)?;
        point.relative_time = point_time(relative_time);
        point.value = value;
        Ok(self.resort(index))
    }

    /// Moves the point at `index` in time and re-sorts.
    pub fn set_control_point_time(
        &mut self,
        index: usize,
        relative_time: f64,
    ) -> Result<usize, EditError> {
        let point = self.point_mut(index)?;
        point.relative_time = point_time(relative_time);
        Ok(self.resort(index))
    }

    /// Changes the value of the point at `index`. Order is unaffected.
    pub fn set_control_point_value(&mut self, index: usize, value: f32) -> Result<(), EditError> {
        self.point_mut(index)?.value = value;
        Ok(())
    }

    /// Pattern time of the first control point.
    pub fn start_time(&self) -> f64 {
        self.time + self.control_points.first().map_or(0.0, |p| p.relative_time)
    }

    /// Pattern time of the last control point.
    pub fn end_time(&self) -> f64 {
        self.time + self.control_points.last().map_or(0.0, |p| p.relative_time)
    }

    /// Samples the curve at pattern time `t` by linear interpolation.
    ///
    /// The first and last values are held outside the curve's span.
    ///
    /// # Examples
    ///
    /// ```
    /// use haptic_playground::{ControlPoint, HapticCurve, ParameterId};
    ///
    /// let curve = HapticCurve::new(
    ///     ParameterId::Intensity,
    ///     vec![ControlPoint::new(0.0, 0.0), ControlPoint::new(1.0, 1.0)],
    ///     0.5,
    /// )
    /// .unwrap();
    /// assert_eq!(curve.value_at(0.0), 0.0);
    /// assert_eq!(curve.value_at(1.0), 0.5);
    /// assert_eq!(curve.value_at(3.0), 1.0);
    /// ```
    pub fn value_at(&self, t: f64) -> f32 {
        let local = t - self.time;
        let (Some(first), Some(last)) = (self.control_points.first(), self.control_points.last())
        else {
            return 0.0;
        };
        if local <= first.relative_time {
            return first.value;
        }
        if local >= last.relative_time {
            return last.value;
        }
        for pair in self.control_points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if local >= a.relative_time && local <= b.relative_time {
                let span = b.relative_time - a.relative_time;
                if span <= 0.0 {
                    return b.value;
                }
                let progress = ((local - a.relative_time) / span) as f32;
                return a.value + (b.value - a.value) * progress;
            }
        }
        last.value
    }

    fn point_mut(&mut self, index: usize) -> Result<&mut ControlPoint, EditError> {
        let len = self.control_points.len();
        self.control_points
            .get_mut(index)
            .ok_or(EditError::IndexOutOfRange { index, len })
    }

    /// Stable sort by time. Returns the new position of the point that was at `tracked`.
    fn resort(&mut self, tracked: usize) -> usize {
        let mut order: Vec<usize> = (0..self.control_points.len()).collect();
        order.sort_by(|&a, &b| {
            self.control_points[a]
                .relative_time
                .total_cmp(&self.control_points[b].relative_time)
        });
        let new_index = order.iter().position(|&i| i == tracked).unwrap_or(tracked);
        self.control_points = order.iter().map(|&i| self.control_points[i]).collect();
        new_index
    }
}
