//! World transform composition for an anchored object.

use std::time::Duration;

use glam::{Mat4, Vec3};

use crate::anchor::PlaneAlignment;
use crate::bounds::BoundingBox;
use crate::placement::PlacementState;
use crate::scene::TransformAnimation;

/// Builds the anchored world transform of the object subtree
#[derive(Debug, Clone)]
pub struct TransformComposer {
    animation: Duration,
}

impl TransformComposer {
    /// `animation` is the duration of the linear tween used when applying
    /// composed transforms.
    pub fn new(animation: Duration) -> Self {
        Self { animation }
    }

    /// Animation to use when applying a composed transform
    pub fn animation(&self) -> TransformAnimation {
        TransformAnimation::linear(self.animation)
    }

    /// Compose the world transform from the placement and the object's local
    /// bounding box. Returns `None` while unattached.
    ///
    /// The result is, applied right to left:
    ///
    /// ```text
    /// T(anchor point) * R(anchor) * [Rx(-90°)] * R(normal, rotation) * S(scale) * T(pivot)
    /// ```
    ///
    /// The pivot translation rests the object on a floor by its base center,
    /// or flush against a wall by its back face center.
    pub fn compose(&self, placement: &PlacementState, bounds: &BoundingBox) -> Option<Mat4> {
        let anchor = placement.current_anchor()?;
        let point = placement.world_anchor_point()?;

        let mid = bounds.center();
        let pivot = match anchor.alignment {
            PlaneAlignment::Horizontal => Vec3::new(-mid.x, -bounds.min.y, -mid.z),
            PlaneAlignment::Vertical => Vec3::new(-mid.x, -mid.y, -bounds.min.z),
        };

        let mut transform = Mat4::from_translation(pivot);
        transform = Mat4::from_scale(Vec3::splat(placement.cumulative_scale)) * transform;
        transform = Mat4::from_axis_angle(
            anchor.alignment.rotation_axis(),
            placement.cumulative_rotation,
        ) * transform;

        if anchor.alignment == PlaneAlignment::Vertical {
            // Tip the object's up axis onto the wall normal
            transform = Mat4::from_axis_angle(Vec3::X, -std::f32::consts::FRAC_PI_2) * transform;
        }

        transform = anchor.orientation() * transform;
        Some(Mat4::from_translation(point) * transform)
    }
}

/// Scale that fits an object within `preferred_max_world_size`.
///
/// Objects larger than the bound are shrunk to fit; smaller ones keep their
/// native size.
pub fn default_scale(bounds: &BoundingBox, preferred_max_world_size: f32) -> f32 {
    let max_dim = bounds.max_dimension();
    if !max_dim.is_finite() || max_dim <= 0.0 {
        return 1.0;
    }
    (preferred_max_world_size / max_dim).min(1.0)
}

/// Whether a scale change moved into the band around native scale.
///
/// Edge-triggered: true only when `old` was outside `tolerance` of 1.0 and
/// `new` is inside it.
pub fn scale_detent_crossed(old: f32, new: f32, tolerance: f32) -> bool {
    (1.0 - old).abs() > tolerance && (1.0 - new).abs() <= tolerance
}
