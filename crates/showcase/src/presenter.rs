//! Annotation presenter: turns the active controller's annotation into a
//! world-anchored card description for the renderer.

use crate::content::Annotation;
use crate::transition::TransitionController;
use glam::{Quat, Vec3};

/// Camera distance at which a card is drawn at its natural size.
pub const CARD_DISTANCE_FACTOR: f32 = 10.0;

/// A card to draw this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationCard<'a> {
    pub hotspot_id: &'a str,
    pub annotation: &'a Annotation,
    /// Anchor in world coordinates.
    pub anchor: Vec3,
    pub rotation: Option<Vec3>,
}

impl<'a> AnnotationCard<'a> {
    /// Card for the controller's active annotation, or `None` when nothing
    /// should be shown.
    pub fn for_controller(controller: &'a TransitionController) -> Option<Self> {
        let annotation = controller.active_annotation()?;
        let hotspot_id = controller.state().active_hotspot.as_deref()?;
        Some(Self {
            hotspot_id,
            annotation,
            anchor: controller.origin() + annotation.anchor_position,
            rotation: annotation.anchor_rotation,
        })
    }

    /// Scale to draw the card at when viewed from `camera_position`, so that
    /// it shrinks with distance like an object in the scene.
    pub fn scale_from(&self, camera_position: Vec3) -> f32 {
        let distance = camera_position.distance(self.anchor).max(f32::EPSILON);
        (CARD_DISTANCE_FACTOR / distance).min(CARD_DISTANCE_FACTOR)
    }

    /// Direction the card's front faces. The rotation is applied X, then Y,
    /// then Z on the card's local +Z; an unrotated card faces +Z.
    pub fn normal(&self) -> Vec3 {
        let Some(r) = self.rotation else {
            return Vec3::Z;
        };
        Quat::from_rotation_x(r.x) * Quat::from_rotation_y(r.y) * Quat::from_rotation_z(r.z) * Vec3::Z
    }

    /// Whether a viewer at `camera_position` sees the card's front.
    pub fn faces(&self, camera_position: Vec3) -> bool {
        self.normal().dot(camera_position - self.anchor) >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_falls_off_with_distance() {
        let annotation = Annotation {
            title: "T".into(),
            body: String::new(),
            image_ref: String::new(),
            link_ref: String::new(),
            link_label: String::new(),
            anchor_position: Vec3::ZERO,
            anchor_rotation: None,
        };
        let card = AnnotationCard {
            hotspot_id: "h",
            annotation: &annotation,
            anchor: Vec3::ZERO,
            rotation: None,
        };
        assert!((card.scale_from(Vec3::new(0.0, 0.0, 10.0)) - 1.0).abs() < 1e-6);
        assert!((card.scale_from(Vec3::new(0.0, 0.0, 20.0)) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn rotation_turns_the_card_around() {
        let annotation = Annotation {
            title: "T".into(),
            body: String::new(),
            image_ref: String::new(),
            link_ref: String::new(),
            link_label: String::new(),
            anchor_position: Vec3::ZERO,
            anchor_rotation: Some(Vec3::new(0.0, std::f32::consts::PI, 0.0)),
        };
        let mut card = AnnotationCard {
            hotspot_id: "h",
            annotation: &annotation,
            anchor: Vec3::ZERO,
            rotation: annotation.anchor_rotation,
        };
        assert!(card.normal().distance(Vec3::NEG_Z) < 1e-5);
        assert!(card.faces(Vec3::new(0.0, 0.0, -5.0)));
        assert!(!card.faces(Vec3::new(0.0, 0.0, 5.0)));

        card.rotation = None;
        assert_eq!(card.normal(), Vec3::Z);
    }
}
