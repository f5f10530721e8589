//! Axis-aligned bounding boxes for object subtrees.

use glam::{Mat3, Mat4, Vec3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner of the bounding box.
    pub min: Vec3,
    /// Maximum corner of the bounding box.
    pub max: Vec3,
}

impl BoundingBox {
    /// Creates a new bounding box from min and max points.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates an empty (inverted) bounding box.
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    /// Creates a zero-volume box at the origin, reported for subtrees without geometry.
    pub fn zero() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO)
    }

    /// Creates a bounding box that contains all given points.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points
            .into_iter()
            .fold(Self::empty(), |bbox, point| bbox.expand_to_include(point))
    }

    /// Returns the midpoint of the bounding box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the size (full extents) of the bounding box.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns the largest of the three extents.
    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }

    /// Returns the bounding sphere as `(center, radius)`.
    pub fn bounding_sphere(&self) -> (Vec3, f32) {
        (self.center(), (self.size() * 0.5).length())
    }

    /// Returns the union of two bounding boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns a new bounding box expanded to include the given point.
    pub fn expand_to_include(&self, point: Vec3) -> BoundingBox {
        BoundingBox {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Transforms the bounding box by an affine matrix.
    ///
    /// Uses Arvo's method ("Transforming Axis-Aligned Bounding Boxes",
    /// Graphics Gems I): each output extent is the translation plus the sum of
    /// the smaller/larger products of the matrix entries with the input
    /// extents, which avoids transforming all eight corners.
    pub fn transform(&self, transform: &Mat4) -> BoundingBox {
        if !self.is_valid() {
            return *self;
        }

        let translation = transform.w_axis.truncate();
        let linear = Mat3::from_mat4(*transform);
        let mut min = translation;
        let mut max = translation;

        for i in 0..3 {
            for j in 0..3 {
                // column-major: linear.col(j)[i] is row i, column j
                let m = linear.col(j)[i];
                let a = m * self.min[j];
                let b = m * self.max[j];
                min[i] += a.min(b);
                max[i] += a.max(b);
            }
        }

        BoundingBox { min, max }
    }

    /// Returns true if the bounding box is valid (non-empty).
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
