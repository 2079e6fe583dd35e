//! Playback boundary.
//!
//! The crate does not drive hardware. A platform integration implements the
//! three traits below on top of its haptic engine, and a [`Session`] drives
//! them with rendered timelines.
//!
//! The expected call order for one playback is:
//!
//! 1. [`HapticDevice::supports_haptics`]
//! 2. [`HapticDevice::create_engine`], once per session
//! 3. [`HapticEngine::make_player`] with the timeline
//! 4. [`HapticEngine::start`]
//! 5. [`PatternPlayer::start`] at time 0
//!
//! There is no stop call: once started, a playback belongs to the engine.

mod session;
mod simulated;

pub use session::Session;
pub use simulated::{FailureStage, SimulatedDevice, SimulatedEngine, SimulatedPlayer};

use crate::error::DeviceError;
use crate::render::ActuationTimeline;

/// The haptic hardware of the host.
pub trait HapticDevice {
    type Engine: HapticEngine;

    /// Whether the hardware can play haptics at all.
    fn supports_haptics(&self) -> bool;

    /// Creates the engine. Called at most once per session.
    fn create_engine(&self) -> Result<Self::Engine, DeviceError>;
}

/// A running haptic engine.
pub trait HapticEngine {
    type Player: PatternPlayer;

    /// Builds a player for `timeline`. An error means the engine refused the
    /// timeline's structure.
    fn make_player(&mut self, timeline: &ActuationTimeline) -> Result<Self::Player, DeviceError>;

    /// Starts (or keeps running) the engine.
    fn start(&mut self) -> Result<(), DeviceError>;
}

/// A prepared playback of one timeline.
pub trait PatternPlayer {
    /// Starts playback at `at_time` seconds on the engine clock.
    fn start(&mut self, at_time: f64) -> Result<(), DeviceError>;
}
