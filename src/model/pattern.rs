//! Haptic patterns.
//!
//! A `HapticPattern` holds two independent streams: discrete events and
//! parameter curves. Nothing links an event to a curve; they only meet when
//! the renderer places both on the same timeline.

use super::curve::{ControlPoint, CurveId, HapticCurve, ParameterId};
use super::event::{EventId, EventType, HapticEvent};
use crate::error::EditError;

/// A playable haptic pattern.
///
/// Events keep insertion order, not time order. Removal is by id (or by list
/// position, as the editor's swipe-to-delete does) so that ids stay stable
/// across edits.
///
/// # Examples
///
/// ```
/// use haptic_playground::{EventKind, HapticPattern};
///
/// let mut pattern = HapticPattern::default();
///
/// // "Add event" appends a default transient and selects it
/// let selected = pattern.add_event();
/// let id = pattern.events()[selected].id();
///
/// pattern.event_mut(id).unwrap().set_kind(EventKind::Continuous);
/// assert_eq!(pattern.duration(), 0.1);
///
/// pattern.remove_event(id).unwrap();
/// assert!(pattern.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HapticPattern {
    events: Vec<HapticEvent>,
    curves: Vec<HapticCurve>,
}

impl HapticPattern {
    pub fn new(events: Vec<HapticEvent>, curves: Vec<HapticCurve>) -> Self {
        Self { events, curves }
    }

    /// The pattern the editor opens with: two overlapping continuous events
    /// shaped by an intensity curve and a sharpness curve.
    pub fn example() -> Self {
        Self::new(
            vec![
                HapticEvent::new(0.5, 0.5, 0.0, EventType::Continuous { duration: 0.15 }),
                HapticEvent::new(0.6, 0.4, 0.2, EventType::Continuous { duration: 0.45 }),
            ],
            vec![
                HapticCurve::from_array(
                    ParameterId::Intensity,
                    [
                        ControlPoint::new(0.0, 0.5),
                        ControlPoint::new(0.2, 0.0),
                        ControlPoint::new(0.25, 0.25),
                        ControlPoint::new(0.35, 0.4),
                        ControlPoint::new(0.45, 0.25),
                        ControlPoint::new(0.65, 0.0),
                    ],
                    0.0,
                ),
                HapticCurve::from_array(
                    ParameterId::Sharpness,
                    [
                        ControlPoint::new(0.0, 0.3),
                        ControlPoint::new(0.2, 0.4),
                        ControlPoint::new(0.4, 0.0),
                    ],
                    0.0,
                ),
            ],
        )
    }

    pub fn events(&self) -> &[HapticEvent] {
        &self.events
    }

    pub fn curves(&self) -> &[HapticCurve] {
        &self.curves
    }

    /// Returns true if the pattern has neither events nor curves.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.curves.is_empty()
    }

    /// Appends a [`HapticEvent::default_transient`] and returns its index.
    pub fn add_event(&mut self) -> usize {
        self.events.push(HapticEvent::default_transient());
        self.events.len() - 1
    }

    /// Appends an event and returns its id.
    pub fn push_event(&mut self, event: HapticEvent) -> EventId {
        let id = event.id();
        self.events.push(event);
        id
    }

    pub fn event_index(&self, id: EventId) -> Option<usize> {
        self.events.iter().position(|e| e.id() == id)
    }

    pub fn event(&self, id: EventId) -> Option<&HapticEvent> {
        self.events.iter().find(|e| e.id() == id)
    }

    pub fn event_mut(&mut self, id: EventId) -> Option<&mut HapticEvent> {
        self.events.iter_mut().find(|e| e.id() == id)
    }

    /// Removes the event with the given id.
    pub fn remove_event(&mut self, id: EventId) -> Result<HapticEvent, EditError> {
        let index = self.event_index(id).ok_or(EditError::UnknownEvent(id))?;
        Ok(self.events.remove(index))
    }

    /// Removes the events at the given list positions.
    ///
    /// Positions refer to the list before any removal. Duplicates and
    /// positions past the end are ignored. Removed events are returned in
    /// list order.
    ///
    /// # Examples
    ///
    /// ```
    /// use haptic_playground::HapticPattern;
    ///
    /// let mut pattern = HapticPattern::default();
    /// for _ in 0..4 {
    ///     pattern.add_event();
    /// }
    /// let removed = pattern.remove_events_at([3, 1, 9]);
    /// assert_eq!(removed.len(), 2);
    /// assert_eq!(pattern.events().len(), 2);
    /// ```
    pub fn remove_events_at(
        &mut self,
        offsets: impl IntoIterator<Item = usize>,
    ) -> Vec<HapticEvent> {
        let mut offsets: Vec<usize> = offsets
            .into_iter()
            .filter(|&i| i < self.events.len())
            .collect();
        offsets.sort_unstable();
        offsets.dedup();

        let mut removed: Vec<HapticEvent> = offsets
            .iter()
            .rev()
            .map(|&i| self.events.remove(i))
            .collect();
        removed.reverse();
        removed
    }

    /// Appends a [`HapticCurve::blank`] and returns its index.
    pub fn add_curve(&mut self) -> usize {
        self.curves.push(HapticCurve::blank());
        self.curves.len() - 1
    }

    /// Appends a curve and returns its id.
    pub fn push_curve(&mut self, curve: HapticCurve) -> CurveId {
        let id = curve.id();
        self.curves.push(curve);
        id
    }

    pub fn curve_index(&self, id: CurveId) -> Option<usize> {
        self.curves.iter().position(|c| c.id() == id)
    }

    pub fn curve(&self, id: CurveId) -> Option<&HapticCurve> {
        self.curves.iter().find(|c| c.id() == id)
    }

    /// Mutable access to a curve. Curve operations keep their own invariants.
    pub fn curve_mut(&mut self, id: CurveId) -> Option<&mut HapticCurve> {
        self.curves.iter_mut().find(|c| c.id() == id)
    }

    pub fn remove_curve(&mut self, id: CurveId) -> Result<HapticCurve, EditError> {
        let index = self.curve_index(id).ok_or(EditError::UnknownCurve(id))?;
        Ok(self.curves.remove(index))
    }

    /// Time at which the last event or curve ends, in seconds.
    pub fn duration(&self) -> f64 {
        let events = self.events.iter().map(HapticEvent::end_time);
        let curves = self.curves.iter().map(HapticCurve::end_time);
        events.chain(curves).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventKind;

    #[test]
    fn test_default_is_empty() {
        let pattern = HapticPattern::default();
        assert!(pattern.is_empty());
        assert_eq!(pattern.duration(), 0.0);
    }

    #[test]
    fn test_example_pattern() {
        let pattern = HapticPattern::example();
        assert_eq!(pattern.events().len(), 2);
        assert_eq!(pattern.curves().len(), 2);
        assert_eq!(pattern.curves()[0].point_count(), 6);
        assert_eq!(pattern.curves()[1].parameter(), ParameterId::Sharpness);
        assert_eq!(pattern.duration(), 0.65);
    }

    #[test]
    fn test_add_event_returns_selection() {
        let mut pattern = HapticPattern::default();
        assert_eq!(pattern.add_event(), 0);
        assert_eq!(pattern.add_event(), 1);
        assert_eq!(pattern.events()[1].event_type(), EventType::Transient);
    }

    #[test]
    fn test_events_keep_insertion_order() {
        let mut pattern = HapticPattern::default();
        let late = pattern.push_event(HapticEvent::new(0.1, 0.1, 1.0, EventType::Transient));
        let early = pattern.push_event(HapticEvent::new(0.1, 0.1, 0.0, EventType::Transient));
        assert_eq!(pattern.event_index(late), Some(0));
        assert_eq!(pattern.event_index(early), Some(1));
    }

    #[test]
    fn test_edit_event_by_id() {
        let mut pattern = HapticPattern::default();
        let id = pattern.push_event(HapticEvent::default_transient());
        let event = pattern.event_mut(id).unwrap();
        event.set_kind(EventKind::Continuous);
        event.set_duration(0.4);
        assert_eq!(pattern.event(id).unwrap().duration(), 0.4);
    }

    #[test]
    fn test_remove_unknown_event() {
        let mut pattern = HapticPattern::example();
        let stranger = HapticEvent::default_transient().id();
        assert_eq!(
            pattern.remove_event(stranger),
            Err(EditError::UnknownEvent(stranger))
        );
        assert_eq!(pattern.events().len(), 2);
    }

    #[test]
    fn test_remove_events_at_offsets() {
        let mut pattern = HapticPattern::default();
        let ids: Vec<_> = (0..5)
            .map(|i| pattern.push_event(HapticEvent::new(0.5, 0.5, i as f64, EventType::Transient)))
            .collect();

        let removed = pattern.remove_events_at([4, 0, 2, 2]);
        let removed_ids: Vec<_> = removed.iter().map(|e| e.id()).collect();
        assert_eq!(removed_ids, vec![ids[0], ids[2], ids[4]]);

        let left: Vec<_> = pattern.events().iter().map(|e| e.id()).collect();
        assert_eq!(left, vec![ids[1], ids[3]]);
    }

    #[test]
    fn test_curves_by_id() {
        let mut pattern = HapticPattern::default();
        let index = pattern.add_curve();
        let id = pattern.curves()[index].id();

        let curve = pattern.curve_mut(id).unwrap();
        curve.set_parameter(ParameterId::DecayTime);
        curve.insert_control_point();
        assert_eq!(pattern.curve(id).unwrap().point_count(), 3);

        let removed = pattern.remove_curve(id).unwrap();
        assert_eq!(removed.parameter(), ParameterId::DecayTime);
        assert_eq!(pattern.remove_curve(id), Err(EditError::UnknownCurve(id)));
    }

    #[test]
    fn test_duration_covers_events_and_curves() {
        let mut pattern = HapticPattern::default();
        let event = HapticEvent::new(0.5, 0.5, 0.3, EventType::Continuous { duration: 0.2 });
        pattern.push_event(event);
        assert_eq!(pattern.duration(), 0.5);

        let mut curve = HapticCurve::blank();
        curve.set_time(0.25);
        pattern.push_curve(curve);
        assert_eq!(pattern.duration(), 1.25);
    }
}
