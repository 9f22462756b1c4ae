//! Multi-leg dolly between slides.
//!
//! A slide change is not a single interpolation. The camera pulls back to a
//! wide framing of the slide it is leaving, dollies laterally past the target
//! slide at an elevated offset, then settles on the target's resting pose.
//! The legs are plain poses; the active controller eases through them in
//! order, so cancelling a sequence is just replacing the list.

use crate::pose::CameraPose;
use glam::Vec3;
use std::ops::RangeInclusive;

/// Accepted range for the gap between slide panels.
pub const SLIDE_GAP_RANGE: RangeInclusive<f32> = 0.0..=10.0;
/// Accepted range for the pull-back distance during a dolly.
pub const DOLLY_DISTANCE_RANGE: RangeInclusive<f32> = 0.0..=50.0;

/// Height of the pull-back framing above the slide plane.
const PULL_BACK_HEIGHT: f32 = 3.0;
/// Height of the lateral pass.
const PASS_HEIGHT: f32 = 1.0;

/// Gallery geometry driving the dolly legs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DollyParams {
    /// World-space width of one slide panel.
    pub viewport_width: f32,
    pub slide_gap: f32,
    pub dolly_distance: f32,
}

impl DollyParams {
    pub fn new(viewport_width: f32) -> Self {
        Self {
            viewport_width,
            slide_gap: 1.0,
            dolly_distance: 20.0,
        }
    }

    /// Distance between the origins of neighbouring slides.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.viewport_width + self.slide_gap
    }

    /// World X of a slide's layout origin.
    #[inline]
    pub fn slide_x(&self, index: usize) -> f32 {
        index as f32 * self.pitch()
    }
}

/// The three legs of one slide change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DollyPlan {
    pub pull_back: CameraPose,
    pub pass: CameraPose,
    pub settle: CameraPose,
}

impl DollyPlan {
    /// Plans the move from slide `from` to slide `to`. `resting` is the
    /// slide-local resting pose; it is placed on the target slide for the
    /// final leg.
    pub fn slide_change(from: usize, to: usize, params: &DollyParams, resting: CameraPose) -> Self {
        let from_x = params.slide_x(from);
        let to_x = params.slide_x(to);

        // Overshoot by one pitch in the direction of travel.
        let past_x = if to >= from {
            to_x + params.pitch()
        } else {
            to_x - params.pitch()
        };

        Self {
            pull_back: CameraPose::new(
                Vec3::new(from_x, PULL_BACK_HEIGHT, params.dolly_distance),
                Vec3::new(from_x, 0.0, 0.0),
            ),
            pass: CameraPose::new(
                Vec3::new(past_x, PASS_HEIGHT, params.dolly_distance),
                Vec3::new(to_x, 0.0, 0.0),
            ),
            settle: resting.translated(Vec3::new(to_x, 0.0, 0.0)),
        }
    }

    pub fn legs(&self) -> [CameraPose; 3] {
        [self.pull_back, self.pass, self.settle]
    }
}

impl IntoIterator for DollyPlan {
    type Item = CameraPose;
    type IntoIter = std::array::IntoIter<CameraPose, 3>;

    fn into_iter(self) -> Self::IntoIter {
        self.legs().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resting() -> CameraPose {
        CameraPose::new(Vec3::new(3.0, 5.0, 20.0), Vec3::ZERO)
    }

    #[test]
    fn forward_plan_overshoots_to_the_right() {
        let params = DollyParams::new(10.0);
        let plan = DollyPlan::slide_change(0, 2, &params, resting());

        assert_eq!(plan.pull_back.position, Vec3::new(0.0, 3.0, 20.0));
        assert_eq!(plan.pull_back.look_at, Vec3::ZERO);
        assert_eq!(plan.pass.position, Vec3::new(33.0, 1.0, 20.0));
        assert_eq!(plan.pass.look_at, Vec3::new(22.0, 0.0, 0.0));
        assert_eq!(plan.settle.position, Vec3::new(25.0, 5.0, 20.0));
        assert_eq!(plan.settle.look_at, Vec3::new(22.0, 0.0, 0.0));
    }

    #[test]
    fn backward_plan_overshoots_to_the_left() {
        let params = DollyParams::new(10.0);
        let plan = DollyPlan::slide_change(2, 1, &params, resting());
        assert_eq!(plan.pass.position.x, 0.0);
        assert_eq!(plan.settle.look_at.x, 11.0);
    }

    #[test]
    fn legs_follow_tunables() {
        let params = DollyParams {
            viewport_width: 8.0,
            slide_gap: 4.0,
            dolly_distance: 35.0,
        };
        let plan = DollyPlan::slide_change(1, 2, &params, resting());
        assert_eq!(plan.pull_back.position, Vec3::new(12.0, 3.0, 35.0));
        assert_eq!(plan.pass.position.z, 35.0);
    }
}
