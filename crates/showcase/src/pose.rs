//! Camera pose and viewport value types.

use glam::Vec3;

/// Where the camera sits and what it looks at, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    #[inline]
    pub const fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Shifts both the position and the look-at point by `offset`.
    #[inline]
    pub fn translated(self, offset: Vec3) -> Self {
        Self {
            position: self.position + offset,
            look_at: self.look_at + offset,
        }
    }

    /// Distance between the two camera positions. Look-at is ignored because
    /// only position is eased.
    #[inline]
    pub fn distance_to(&self, other: &CameraPose) -> f32 {
        self.position.distance(other.position)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.look_at.is_finite()
    }
}

/// World-space extent of the visible area at the resting framing distance.
///
/// The renderer owns the projection and reports this on every resize; the
/// gallery uses the width to space slides apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_moves_both_points() {
        let pose = CameraPose::new(Vec3::new(3.0, 5.0, 20.0), Vec3::ZERO);
        let moved = pose.translated(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(moved.position, Vec3::new(13.0, 5.0, 20.0));
        assert_eq!(moved.look_at, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn distance_ignores_look_at() {
        let a = CameraPose::new(Vec3::ZERO, Vec3::X);
        let b = CameraPose::new(Vec3::new(0.0, 3.0, 4.0), Vec3::NEG_X);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn zero_or_nan_viewport_is_invalid() {
        assert!(Viewport::new(16.0, 9.0).is_valid());
        assert!(!Viewport::new(0.0, 9.0).is_valid());
        assert!(!Viewport::new(f32::NAN, 9.0).is_valid());
    }
}
