//! Device control channels.
//!
//! The haptic engine addresses parameters through its own identifiers, which
//! differ between per-event parameters and dynamic (curve) parameters.

use crate::model::ParameterId;

/// Per-event parameter carried by every actuation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventParameter {
    HapticIntensity,
    HapticSharpness,
}

/// Dynamic parameter channel driven by a parameter curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DynamicParameter {
    IntensityControl,
    SharpnessControl,
    AttackTimeControl,
    DecayTimeControl,
    ReleaseTimeControl,
}

impl From<ParameterId> for DynamicParameter {
    /// Every parameter kind has exactly one channel, and no two kinds share one.
    fn from(parameter: ParameterId) -> Self {
        match parameter {
            ParameterId::Intensity => DynamicParameter::IntensityControl,
            ParameterId::Sharpness => DynamicParameter::SharpnessControl,
            ParameterId::AttackTime => DynamicParameter::AttackTimeControl,
            ParameterId::DecayTime => DynamicParameter::DecayTimeControl,
            ParameterId::ReleaseTime => DynamicParameter::ReleaseTimeControl,
        }
    }
}
