//! Tunable constants of the navigation state machine.

use crate::error::NavError;
use crate::pose::CameraPose;
use glam::Vec3;
use std::time::Duration;

/// How a reset returns the camera to the resting pose once the annotation
/// has been cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetStyle {
    /// Place the camera on the resting pose at the next frame boundary.
    #[default]
    Snap,
    /// Ease back to the resting pose like any other transition.
    Ease,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationTuning {
    /// Fraction of the remaining distance covered per frame.
    pub damping: f32,
    /// A transition ends once the camera is closer than this to its target.
    pub convergence_tolerance: f32,
    /// Slide-local pose used when no hotspot is active.
    pub resting_pose: CameraPose,
    /// Radius of the invisible sphere used to hit-test each hotspot.
    pub pick_radius: f32,
    /// Frames a single leg may run before the camera is placed on its target.
    pub max_frames_per_leg: u32,
    /// Steps shorter than this end the leg early.
    pub min_step: f32,
    /// Quiet period after the last resize before the camera is re-homed.
    pub resize_debounce: Duration,
    pub reset_style: ResetStyle,
}

impl Default for NavigationTuning {
    fn default() -> Self {
        Self {
            damping: 0.1,
            convergence_tolerance: 0.1,
            resting_pose: CameraPose::new(Vec3::new(3.0, 5.0, 20.0), Vec3::ZERO),
            pick_radius: 1.0,
            max_frames_per_leg: 1_000,
            min_step: 1e-5,
            resize_debounce: Duration::from_millis(200),
            reset_style: ResetStyle::Snap,
        }
    }
}

impl NavigationTuning {
    /// Rejects values that would stall, overshoot or never converge.
    pub fn validate(&self) -> Result<(), NavError> {
        let invalid = |name, value| Err(NavError::InvalidTuning { name, value });

        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return invalid("damping", self.damping);
        }
        if !(self.convergence_tolerance.is_finite() && self.convergence_tolerance > 0.0) {
            return invalid("convergence tolerance", self.convergence_tolerance);
        }
        if !(self.pick_radius.is_finite() && self.pick_radius > 0.0) {
            return invalid("pick radius", self.pick_radius);
        }
        if !(self.min_step.is_finite() && self.min_step >= 0.0) {
            return invalid("min step", self.min_step);
        }
        if self.max_frames_per_leg == 0 {
            return invalid("max frames per leg", 0.0);
        }
        if !self.resting_pose.is_finite() {
            return invalid("resting pose", f32::NAN);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(NavigationTuning::default().validate(), Ok(()));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let bad = [
            NavigationTuning { damping: 0.0, ..Default::default() },
            NavigationTuning { damping: 1.5, ..Default::default() },
            NavigationTuning { damping: f32::NAN, ..Default::default() },
            NavigationTuning { convergence_tolerance: 0.0, ..Default::default() },
            NavigationTuning { pick_radius: -1.0, ..Default::default() },
            NavigationTuning { min_step: f32::INFINITY, ..Default::default() },
            NavigationTuning { max_frames_per_leg: 0, ..Default::default() },
        ];
        for tuning in bad {
            assert!(
                matches!(tuning.validate(), Err(NavError::InvalidTuning { .. })),
                "{:?} accepted",
                tuning
            );
        }
    }

    #[test]
    fn full_damping_is_allowed() {
        let tuning = NavigationTuning { damping: 1.0, ..Default::default() };
        assert!(tuning.validate().is_ok());
    }
}
