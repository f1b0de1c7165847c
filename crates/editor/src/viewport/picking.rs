//! Ray queries against the scene's collider set.

use glam::Vec3;
use shared::InstanceId;

use crate::state::registry::ObjectRegistry;

/// A ray in world space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Point at the given distance along the ray.
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Collision layer of a collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Regular object geometry.
    Default = 0,
    /// The ground plane.
    Ground = 1,
    /// Invisible selection volumes owned by scene objects.
    Selection = 2,
}

/// Bit mask over [`Layer`] values used to filter ray queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerMask(u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Mask containing a single layer.
    pub fn only(layer: Layer) -> Self {
        LayerMask(1 << layer as u32)
    }

    /// The inverse mask: every layer except the given one.
    pub fn all_except(layer: Layer) -> Self {
        LayerMask(!(1 << layer as u32))
    }

    pub fn contains(&self, layer: Layer) -> bool {
        self.0 & (1 << layer as u32) != 0
    }
}

/// Sphere collider attached to a scene object.
#[derive(Debug, Clone, Copy)]
pub struct Collider {
    pub layer: Layer,
    /// Center of the sphere relative to the owning object's position.
    pub center_offset: Vec3,
    pub radius: f32,
    /// Disabled colliders are skipped by every query.
    pub enabled: bool,
}

/// Result of a ray query.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
    /// The object whose collider was hit, or `None` for the ground plane.
    pub instance_id: Option<InstanceId>,
}

/// Ray/sphere intersection. Returns the distance to the nearest hit in
/// front of the origin, or `None`.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - ray.origin;
    let projected = to_center.dot(ray.direction);
    let closest_sq = to_center.length_squared() - projected * projected;
    let radius_sq = radius * radius;

    if closest_sq > radius_sq {
        return None;
    }

    let half_chord = (radius_sq - closest_sq).sqrt();
    let near = projected - half_chord;
    let far = projected + half_chord;

    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        // Origin is inside the sphere.
        Some(far)
    } else {
        None
    }
}

/// Ray/plane intersection. Returns `None` when the ray is near-parallel to
/// the plane or the plane lies behind the origin.
pub fn ray_plane(ray: &Ray, point: Vec3, normal: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-6;

    let denom = normal.dot(ray.direction);
    if denom.abs() < EPSILON {
        return None;
    }

    let distance = (point - ray.origin).dot(normal) / denom;
    if distance >= 0.0 {
        Some(distance)
    } else {
        None
    }
}

/// Find the nearest collider hit by the ray, honoring the layer mask.
///
/// The ground plane (y = 0) participates through [`Layer::Ground`]; object
/// colliders resolve to their owning instance ID.
pub fn raycast_nearest(
    ray: &Ray,
    max_distance: f32,
    mask: LayerMask,
    objects: &ObjectRegistry,
) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;

    if mask.contains(Layer::Ground) {
        if let Some(distance) = ray_plane(ray, Vec3::ZERO, Vec3::Y) {
            if distance <= max_distance {
                best = Some(RayHit {
                    point: ray.point_at(distance),
                    distance,
                    instance_id: None,
                });
            }
        }
    }

    for object in objects.iter() {
        for collider in &object.colliders {
            if !collider.enabled || !mask.contains(collider.layer) {
                continue;
            }

            let center = object.position + collider.center_offset;
            if let Some(distance) = ray_sphere(ray, center, collider.radius) {
                if distance <= max_distance
                    && best.as_ref().is_none_or(|b| distance < b.distance)
                {
                    best = Some(RayHit {
                        point: ray.point_at(distance),
                        distance,
                        instance_id: Some(object.instance_id),
                    });
                }
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::registry::SceneObject;

    fn down_ray(x: f32, z: f32) -> Ray {
        Ray {
            origin: Vec3::new(x, 10.0, z),
            direction: Vec3::NEG_Y,
        }
    }

    #[test]
    fn test_ray_sphere_hit() {
        let ray = down_ray(0.0, 0.0);
        let distance = ray_sphere(&ray, Vec3::new(0.0, 1.0, 0.0), 1.0).unwrap();
        assert!((distance - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_sphere_miss() {
        let ray = down_ray(5.0, 0.0);
        assert!(ray_sphere(&ray, Vec3::new(0.0, 1.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn test_ray_sphere_behind_origin() {
        let ray = Ray {
            origin: Vec3::new(0.0, 10.0, 0.0),
            direction: Vec3::Y,
        };
        assert!(ray_sphere(&ray, Vec3::new(0.0, 1.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn test_ray_plane_parallel_is_none() {
        let ray = Ray {
            origin: Vec3::new(0.0, 5.0, 0.0),
            direction: Vec3::X,
        };
        assert!(ray_plane(&ray, Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn test_raycast_hits_ground() {
        let objects = ObjectRegistry::default();
        let hit = raycast_nearest(&down_ray(3.0, -2.0), 100.0, LayerMask::ALL, &objects).unwrap();
        assert!(hit.instance_id.is_none());
        assert!((hit.point - Vec3::new(3.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_raycast_prefers_nearer_object_over_ground() {
        let mut objects = ObjectRegistry::default();
        objects.add(SceneObject::new(0, 7, 1.0));

        let hit = raycast_nearest(&down_ray(0.0, 0.0), 100.0, LayerMask::ALL, &objects).unwrap();
        assert_eq!(hit.instance_id, Some(7));
    }

    #[test]
    fn test_raycast_mask_excludes_selection_volumes() {
        let mut objects = ObjectRegistry::default();
        let mut object = SceneObject::new(0, 7, 1.0);
        // Leave only the selection volume enabled.
        for collider in &mut object.colliders {
            collider.enabled = collider.layer == Layer::Selection;
        }
        objects.add(object);

        let mask = LayerMask::all_except(Layer::Selection);
        let hit = raycast_nearest(&down_ray(0.0, 0.0), 100.0, mask, &objects).unwrap();
        // Only the ground remains visible to this mask.
        assert!(hit.instance_id.is_none());

        let hit = raycast_nearest(
            &down_ray(0.0, 0.0),
            100.0,
            LayerMask::only(Layer::Selection),
            &objects,
        )
        .unwrap();
        assert_eq!(hit.instance_id, Some(7));
    }

    #[test]
    fn test_raycast_skips_disabled_colliders() {
        let mut objects = ObjectRegistry::default();
        let mut object = SceneObject::new(0, 1, 1.0);
        for collider in &mut object.colliders {
            collider.enabled = false;
        }
        objects.add(object);

        let mask = LayerMask::only(Layer::Selection);
        assert!(raycast_nearest(&down_ray(0.0, 0.0), 100.0, mask, &objects).is_none());
    }
}
