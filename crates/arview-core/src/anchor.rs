//! Plane anchors reported by the AR session

use glam::{Mat3, Mat4, Vec3};
use uuid::Uuid;

/// Orientation class of a detected plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneAlignment {
    /// Floors, tables and other upward-facing surfaces
    Horizontal,
    /// Walls and other upright surfaces
    Vertical,
}

impl PlaneAlignment {
    /// Axis in object space about which user rotation is applied.
    ///
    /// Horizontal placements spin about `y`. Vertical placements spin about
    /// `z`, which becomes the wall normal once the object is tipped onto the
    /// wall.
    pub fn rotation_axis(self) -> Vec3 {
        match self {
            PlaneAlignment::Horizontal => Vec3::Y,
            PlaneAlignment::Vertical => Vec3::Z,
        }
    }
}

/// Value snapshot of a plane anchor copied out of a session event.
///
/// The session owns the anchor's lifetime; the engine only keeps copies.
/// The plane lies in the anchor's local `xz` plane with its normal along
/// local `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneAnchor {
    pub id: Uuid,
    pub alignment: PlaneAlignment,
    /// Anchor pose in world space
    pub transform: Mat4,
    /// Center of the detected extent, in anchor space
    pub center: Vec3,
    /// Width (x) and length (z) of the detected extent, in anchor space
    pub extent: Vec3,
}

impl PlaneAnchor {
    /// Create an anchor snapshot with a fresh identifier
    pub fn new(alignment: PlaneAlignment, transform: Mat4, extent: Vec3) -> Self {
        Self {
            id: Uuid::new_v4(),
            alignment,
            transform,
            center: Vec3::ZERO,
            extent,
        }
    }

    /// World-space origin of the anchor
    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    /// World-space plane normal
    pub fn normal(&self) -> Vec3 {
        self.transform.transform_vector3(Vec3::Y).normalize()
    }

    /// Rotational part of the pose with the translation stripped
    pub fn orientation(&self) -> Mat4 {
        Mat4::from_mat3(Mat3::from_mat4(self.transform))
    }
}

/// A single ray/plane intersection reported by the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Snapshot of the anchor whose plane was hit
    pub anchor: PlaneAnchor,
    /// World transform of the hit; translation is the hit point
    pub world_transform: Mat4,
}

impl RaycastHit {
    pub fn anchor_id(&self) -> Uuid {
        self.anchor.id
    }

    pub fn alignment(&self) -> PlaneAlignment {
        self.anchor.alignment
    }

    /// World-space hit point
    pub fn point(&self) -> Vec3 {
        self.world_transform.w_axis.truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_strips_translation() {
        let rotation = Mat4::from_rotation_y(0.5);
        let anchor = PlaneAnchor::new(
            PlaneAlignment::Horizontal,
            Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)) * rotation,
            Vec3::new(1.0, 0.0, 1.0),
        );
        assert_eq!(anchor.position(), Vec3::new(1.0, 2.0, 3.0));
        assert!(anchor.orientation().abs_diff_eq(rotation, 1e-6));
    }

    #[test]
    fn test_wall_normal() {
        // A wall facing +z: anchor y axis rotated onto world z
        let anchor = PlaneAnchor::new(
            PlaneAlignment::Vertical,
            Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2),
            Vec3::ONE,
        );
        assert!(anchor.normal().abs_diff_eq(Vec3::Z, 1e-6));
    }
}
