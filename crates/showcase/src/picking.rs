//! Pointer hit-testing against hotspot pick spheres.

use crate::content::{Hotspot, HotspotRegistry};
use glam::Vec3;

/// A world-space ray with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray; `direction` is normalized. Returns `None` for a zero or
    /// non-finite direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        origin.is_finite().then_some(Self { origin, direction })
    }

    /// Point at parameter `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Nearest non-negative hit distance with a sphere, if any.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_d = disc.sqrt();
        let near = -b - sqrt_d;
        let far = -b + sqrt_d;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            // Origin inside the sphere.
            Some(0.0)
        } else {
            None
        }
    }
}

/// Closest hotspot whose pick sphere the ray hits. Hotspot positions are
/// slide-local and shifted by `origin`.
pub fn pick_hotspot<'a>(
    ray: &Ray,
    hotspots: &'a HotspotRegistry,
    origin: Vec3,
    radius: f32,
) -> Option<&'a Hotspot> {
    hotspots
        .iter()
        .filter_map(|h| {
            ray.intersect_sphere(origin + h.world_position, radius)
                .map(|t| (t, h))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, h)| h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Catalog;

    #[test]
    fn sphere_hit_and_miss() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z).unwrap();
        let t = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
        // Behind the origin.
        assert!(ray.intersect_sphere(Vec3::new(0.0, 0.0, 20.0), 1.0).is_none());
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
    }

    #[test]
    fn picks_nearest_hotspot() {
        let catalog = Catalog::builtin();
        let hotspots = &catalog.slides()[0].hotspots;
        // From the glass hotspot's camera position, straight at the glass.
        let from = Vec3::new(2.0, 3.0, 4.0);
        let ray = Ray::new(from, Vec3::new(3.7, 1.0, 3.3) - from).unwrap();
        let hit = pick_hotspot(&ray, hotspots, Vec3::ZERO, 1.0).unwrap();
        assert_eq!(hit.id, "model-t-glass");
    }

    #[test]
    fn origin_shift_applies() {
        let catalog = Catalog::builtin();
        let hotspots = &catalog.slides()[0].hotspots;
        let ray = Ray::new(Vec3::new(3.7, 1.0, 30.0), Vec3::NEG_Z).unwrap();
        assert!(pick_hotspot(&ray, hotspots, Vec3::ZERO, 1.0).is_some());
        assert!(pick_hotspot(&ray, hotspots, Vec3::new(100.0, 0.0, 0.0), 1.0).is_none());
    }
}
