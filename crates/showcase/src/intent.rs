//! The shared camera intent: the single value through which the active slide
//! tells the rendered camera where to go, or that it should reset.
//!
//! Only the [`Showcase`](crate::Showcase) can hand out an [`IntentWriter`], and
//! it only does so for the slide that currently owns the camera. Inactive
//! slides therefore have no way to write the intent.

use crate::pose::CameraPose;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntent {
    pose: CameraPose,
    reset_requested: bool,
    /// Slide that wrote the intent last.
    owner: Option<usize>,
}

impl CameraIntent {
    pub fn new(pose: CameraPose) -> Self {
        Self {
            pose,
            reset_requested: false,
            owner: None,
        }
    }

    /// Most recently requested camera pose.
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn reset_requested(&self) -> bool {
        self.reset_requested
    }

    pub fn owner(&self) -> Option<usize> {
        self.owner
    }

    pub(crate) fn writer(&mut self, slide: usize) -> IntentWriter<'_> {
        IntentWriter {
            slide,
            intent: self,
        }
    }
}

/// Write access to the [`CameraIntent`] on behalf of one slide.
#[derive(Debug)]
pub struct IntentWriter<'a> {
    slide: usize,
    intent: &'a mut CameraIntent,
}

impl IntentWriter<'_> {
    pub fn slide(&self) -> usize {
        self.slide
    }

    pub(crate) fn publish(&mut self, pose: CameraPose) {
        self.intent.pose = pose;
        self.intent.reset_requested = false;
        self.intent.owner = Some(self.slide);
    }

    pub(crate) fn request_reset(&mut self) {
        self.intent.reset_requested = true;
        self.intent.owner = Some(self.slide);
    }

    pub(crate) fn complete_reset(&mut self, resting: CameraPose) {
        self.intent.pose = resting;
        self.intent.reset_requested = false;
        self.intent.owner = Some(self.slide);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn last_writer_wins() {
        let mut intent = CameraIntent::new(CameraPose::new(Vec3::Z, Vec3::ZERO));
        intent.writer(0).publish(CameraPose::new(Vec3::X, Vec3::ZERO));
        intent.writer(2).publish(CameraPose::new(Vec3::Y, Vec3::ZERO));

        assert_eq!(intent.owner(), Some(2));
        assert_eq!(intent.pose().position, Vec3::Y);
    }

    #[test]
    fn reset_flag_is_cleared_on_completion() {
        let resting = CameraPose::new(Vec3::new(3.0, 5.0, 20.0), Vec3::ZERO);
        let mut intent = CameraIntent::new(resting);

        intent.writer(1).request_reset();
        assert!(intent.reset_requested());

        intent.writer(1).complete_reset(resting);
        assert!(!intent.reset_requested());
        assert_eq!(intent.pose(), resting);
    }
}
