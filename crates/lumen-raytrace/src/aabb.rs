//! Axis-aligned bounding box and the ray pre-test used to cull meshes.

use lumen_math::Point3;

use crate::Ray;

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Tight box around a set of points. Empty input gives [`Aabb3::empty`].
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.include_point(p);
        }
        aabb
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// True if no point has been included.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Test whether the ray crosses any of the six faces at `t >= 0`.
    ///
    /// Each face is intersected as a plane and the hit point is checked
    /// against the face extent on the two other axes, widened by `slack`.
    /// A ray starting inside the box always leaves through some face, so it
    /// is never rejected. Faces parallel to the ray produce a non-finite
    /// parameter and are skipped.
    pub fn intersect_faces(&self, ray: &Ray, slack: f64) -> bool {
        if self.is_empty() {
            return false;
        }

        for axis in 0..3 {
            for plane in [self.min[axis], self.max[axis]] {
                let t = (plane - ray.origin[axis]) / ray.direction[axis];
                if !t.is_finite() || t < 0.0 {
                    continue;
                }

                let p = ray.at(t);
                let inside = (0..3)
                    .filter(|&i| i != axis)
                    .all(|i| p[i] >= self.min[i] - slack && p[i] <= self.max[i] + slack);
                if inside {
                    return true;
                }
            }
        }
        false
    }
}
