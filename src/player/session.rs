//! Editor playback session.

use super::{HapticDevice, HapticEngine, PatternPlayer};
use crate::error::{PlaybackError, RenderError};
use crate::model::HapticPattern;
use crate::render::{ActuationTimeline, Renderer};

/// Lazily created engine. Creation is attempted once; a failure sticks.
enum EngineSlot<E> {
    Pending,
    Ready(E),
    Failed(String),
}

/// Drives a [`HapticDevice`] for the lifetime of one editing session.
///
/// The session owns the engine and creates it on first use. It only ever
/// reads patterns, so a failed playback leaves the edited pattern intact.
///
/// # Examples
///
/// ```
/// use haptic_playground::{HapticPattern, Session, SimulatedDevice};
///
/// let mut session = Session::new(SimulatedDevice::new());
/// session.play(&HapticPattern::example()).unwrap();
/// session.play(&HapticPattern::example()).unwrap();
///
/// assert_eq!(session.device().engines_created(), 1);
/// assert_eq!(session.device().started_timelines().len(), 2);
/// ```
pub struct Session<D: HapticDevice> {
    device: D,
    engine: EngineSlot<D::Engine>,
    renderer: Renderer,
}

impl<D: HapticDevice> Session<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            engine: EngineSlot::Pending,
            renderer: Renderer::new(),
        }
    }

    /// Uses `renderer` for [`play`](Self::play) and [`try_play`](Self::try_play).
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Whether the engine has been created successfully.
    pub fn is_prepared(&self) -> bool {
        matches!(self.engine, EngineSlot::Ready(_))
    }

    /// Checks capability and creates the engine if this is the first call.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::EngineUnavailable`] if the device has no haptics, or
    /// if engine creation failed now or on an earlier call.
    pub fn prepare(&mut self) -> Result<&mut D::Engine, PlaybackError> {
        if !self.device.supports_haptics() {
            return Err(PlaybackError::EngineUnavailable(
                "device does not support haptics".to_string(),
            ));
        }

        if let EngineSlot::Pending = self.engine {
            self.engine = match self.device.create_engine() {
                Ok(engine) => {
                    tracing::info!("haptic engine created");
                    EngineSlot::Ready(engine)
                }
                Err(err) => {
                    tracing::warn!(%err, "failed to create haptic engine");
                    EngineSlot::Failed(err.message)
                }
            };
        }

        match &mut self.engine {
            EngineSlot::Ready(engine) => Ok(engine),
            EngineSlot::Failed(reason) => Err(PlaybackError::EngineUnavailable(reason.clone())),
            EngineSlot::Pending => Err(PlaybackError::EngineUnavailable(
                "engine was not created".to_string(),
            )),
        }
    }

    /// Plays an already rendered timeline from its start.
    pub fn play_timeline(&mut self, timeline: &ActuationTimeline) -> Result<(), PlaybackError> {
        let engine = self.prepare()?;
        let mut player = engine
            .make_player(timeline)
            .map_err(|err| PlaybackError::from(RenderError::EngineRejected(err)))?;
        engine.start().map_err(PlaybackError::EngineStart)?;
        player.start(0.0).map_err(PlaybackError::PlayerStart)?;

        tracing::debug!(
            events = timeline.event_count(),
            curves = timeline.curve_command_count(),
            "playback started"
        );
        Ok(())
    }

    /// Renders `pattern` and plays it.
    pub fn play(&mut self, pattern: &HapticPattern) -> Result<(), PlaybackError> {
        let timeline = self.renderer.render(pattern)?;
        self.play_timeline(&timeline)
    }

    /// Like [`play`](Self::play), but failures are logged and swallowed.
    ///
    /// Returns whether playback started. This is what the editor's "Try"
    /// buttons call.
    pub fn try_play(&mut self, pattern: &HapticPattern) -> bool {
        match self.play(pattern) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, "haptic playback failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{FailureStage, SimulatedDevice};

    #[test]
    fn test_engine_created_lazily_once() {
        let mut session = Session::new(SimulatedDevice::new());
        assert!(!session.is_prepared());
        assert_eq!(session.device().engines_created(), 0);

        assert!(session.try_play(&HapticPattern::example()));
        assert!(session.try_play(&HapticPattern::default()));
        assert!(session.is_prepared());
        assert_eq!(session.device().engines_created(), 1);
        assert_eq!(session.device().engine_starts(), 2);
    }

    #[test]
    fn test_no_capability() {
        let mut session = Session::new(SimulatedDevice::failing_at(FailureStage::Capability));
        let err = session.play(&HapticPattern::example()).unwrap_err();
        assert!(matches!(err, PlaybackError::EngineUnavailable(_)));
        assert_eq!(session.device().engines_created(), 0);
    }

    #[test]
    fn test_failed_creation_is_not_retried() {
        let mut session = Session::new(SimulatedDevice::failing_at(FailureStage::EngineCreation));
        assert!(!session.try_play(&HapticPattern::example()));
        assert!(!session.try_play(&HapticPattern::example()));
        assert_eq!(session.device().engine_creation_attempts(), 1);
        assert!(matches!(
            session.prepare(),
            Err(PlaybackError::EngineUnavailable(_))
        ));
    }

    #[test]
    fn test_each_stage_maps_to_its_error() {
        let pattern = HapticPattern::example();

        let mut session = Session::new(SimulatedDevice::failing_at(FailureStage::Rejection));
        assert!(matches!(
            session.play(&pattern),
            Err(PlaybackError::Render(RenderError::EngineRejected(_)))
        ));

        let mut session = Session::new(SimulatedDevice::failing_at(FailureStage::EngineStart));
        assert!(matches!(
            session.play(&pattern),
            Err(PlaybackError::EngineStart(_))
        ));

        let mut session = Session::new(SimulatedDevice::failing_at(FailureStage::PlayerStart));
        assert!(matches!(
            session.play(&pattern),
            Err(PlaybackError::PlayerStart(_))
        ));
        assert!(session.device().started_timelines().is_empty());
    }
}
