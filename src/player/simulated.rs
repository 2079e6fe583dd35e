//! In-memory haptic device for tests, demos and headless editing.

use std::cell::RefCell;
use std::rc::Rc;

use super::{HapticDevice, HapticEngine, PatternPlayer};
use crate::error::DeviceError;
use crate::render::ActuationTimeline;

/// The playback step a [`SimulatedDevice`] should fail at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// The device reports no haptics support.
    Capability,
    EngineCreation,
    /// The engine refuses to build a player.
    Rejection,
    EngineStart,
    PlayerStart,
}

#[derive(Debug, Default)]
struct Activity {
    creation_attempts: usize,
    engines_created: usize,
    engine_starts: usize,
    started: Vec<ActuationTimeline>,
}

type SharedActivity = Rc<RefCell<Activity>>;

/// A device that records what it is asked to play.
///
/// Engines and players created from the device share its activity log, so the
/// device can be inspected after it has been moved into a session.
#[derive(Debug, Clone, Default)]
pub struct SimulatedDevice {
    failure: Option<FailureStage>,
    activity: SharedActivity,
}

impl SimulatedDevice {
    /// A device on which every step succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(stage: FailureStage) -> Self {
        Self {
            failure: Some(stage),
            activity: SharedActivity::default(),
        }
    }

    pub fn failure(&self) -> Option<FailureStage> {
        self.failure
    }

    pub fn engine_creation_attempts(&self) -> usize {
        self.activity.borrow().creation_attempts
    }

    pub fn engines_created(&self) -> usize {
        self.activity.borrow().engines_created
    }

    pub fn engine_starts(&self) -> usize {
        self.activity.borrow().engine_starts
    }

    /// Timelines whose players started, oldest first.
    pub fn started_timelines(&self) -> Vec<ActuationTimeline> {
        self.activity.borrow().started.clone()
    }

    fn fails_at(&self, stage: FailureStage) -> bool {
        self.failure == Some(stage)
    }
}

impl HapticDevice for SimulatedDevice {
    type Engine = SimulatedEngine;

    fn supports_haptics(&self) -> bool {
        !self.fails_at(FailureStage::Capability)
    }

    fn create_engine(&self) -> Result<SimulatedEngine, DeviceError> {
        self.activity.borrow_mut().creation_attempts += 1;
        if self.fails_at(FailureStage::EngineCreation) {
            return Err(DeviceError::new("simulated engine creation failure"));
        }
        self.activity.borrow_mut().engines_created += 1;
        Ok(SimulatedEngine {
            failure: self.failure,
            activity: Rc::clone(&self.activity),
        })
    }
}

#[derive(Debug)]
pub struct SimulatedEngine {
    failure: Option<FailureStage>,
    activity: SharedActivity,
}

impl HapticEngine for SimulatedEngine {
    type Player = SimulatedPlayer;

    fn make_player(
        &mut self,
        timeline: &ActuationTimeline,
    ) -> Result<SimulatedPlayer, DeviceError> {
        if self.failure == Some(FailureStage::Rejection) {
            return Err(DeviceError::new("simulated engine rejected the timeline"));
        }
        Ok(SimulatedPlayer {
            timeline: timeline.clone(),
            fail_on_start: self.failure == Some(FailureStage::PlayerStart),
            activity: Rc::clone(&self.activity),
        })
    }

    fn start(&mut self) -> Result<(), DeviceError> {
        if self.failure == Some(FailureStage::EngineStart) {
            return Err(DeviceError::new("simulated engine start failure"));
        }
        self.activity.borrow_mut().engine_starts += 1;
        Ok(())
    }
}

#[derive(Debug)]
pub struct SimulatedPlayer {
    timeline: ActuationTimeline,
    fail_on_start: bool,
    activity: SharedActivity,
}

impl SimulatedPlayer {
    pub fn timeline(&self) -> &ActuationTimeline {
        &self.timeline
    }
}

impl PatternPlayer for SimulatedPlayer {
    fn start(&mut self, at_time: f64) -> Result<(), DeviceError> {
        if self.fail_on_start {
            return Err(DeviceError::new("simulated player start failure"));
        }
        tracing::debug!(
            at_time,
            duration = self.timeline.duration(),
            "simulated playback"
        );
        self.activity
            .borrow_mut()
            .started
            .push(self.timeline.clone());
        Ok(())
    }
}
