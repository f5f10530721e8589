//! Ray picking utilities
//!
//! Ray tests used for hit testing the object subtree and for casting rays
//! against tracked planes.

use glam::Vec3;

use arview_core::BoundingBox;

/// Ray-plane intersection test.
///
/// # Arguments
///
/// * `ray_origin` - The starting point of the ray.
/// * `ray_dir` - The direction of the ray (should be normalized).
/// * `plane_point` - Any point on the plane.
/// * `plane_normal` - The plane normal.
///
/// # Returns
///
/// * `Some(t)` - The ray parameter at the intersection point. The hit point
///   is `ray_origin + t * ray_dir`.
/// * `None` - If the ray is parallel to the plane or the plane is behind
///   the ray origin.
pub fn ray_plane_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<f32> {
    let denom = ray_dir.dot(plane_normal);

    // Ray is nearly parallel to the plane
    if denom.abs() < 1e-6 {
        return None;
    }

    let t = (plane_point - ray_origin).dot(plane_normal) / denom;

    // Intersection is behind the ray origin
    if t < 0.0 {
        return None;
    }

    Some(t)
}

/// Ray-box intersection test.
///
/// # Algorithm
///
/// Slab method: the box is the intersection of three axis-aligned slabs.
/// For each axis the ray enters and leaves the slab at
///
/// ```text
/// t = (slab_min - origin) / dir,  t = (slab_max - origin) / dir
/// ```
///
/// The ray hits the box if the latest entry is no later than the earliest
/// exit. Axes where the ray is parallel to the slab only pass if the origin
/// already lies within it.
///
/// # Returns
///
/// * `Some(t)` - The ray parameter where the ray enters the box, or `0.0`
///   if the origin is inside it.
/// * `None` - If the ray misses the box or the box is behind the origin.
pub fn ray_aabb_intersection(ray_origin: Vec3, ray_dir: Vec3, bbox: &BoundingBox) -> Option<f32> {
    if !bbox.is_valid() {
        return None;
    }

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray_origin[axis];
        let dir = ray_dir[axis];
        let (min, max) = (bbox.min[axis], bbox.max[axis]);

        if dir.abs() < 1e-9 {
            if origin < min || origin > max {
                return None;
            }
            continue;
        }

        let t1 = (min - origin) / dir;
        let t2 = (max - origin) / dir;
        t_enter = t_enter.max(t1.min(t2));
        t_exit = t_exit.min(t1.max(t2));
    }

    if t_enter > t_exit || t_exit < 0.0 {
        return None;
    }

    Some(t_enter.max(0.0))
}
