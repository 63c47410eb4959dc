//! Ray representation and the shared intersection result.

use lumen_math::{Dir3, Point3, Vec3};

/// A ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Unit direction of the ray.
    pub direction: Dir3,
}

impl Ray {
    /// Create a new ray from origin and direction.
    ///
    /// The direction will be normalized.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: Dir3::new_normalize(direction),
        }
    }

    /// Ray from `origin` through the point `to`.
    pub fn through(origin: Point3, to: Point3) -> Self {
        Self::new(origin, to - origin)
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction.as_ref()
    }
}

/// Result of a ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Parameter along the ray where intersection occurs.
    pub t: f64,
    /// 3D intersection point.
    pub point: Point3,
    /// Unit surface normal at the intersection.
    pub normal: Vec3,
}

impl RayHit {
    /// Create a new ray hit.
    pub fn new(t: f64, point: Point3, normal: Vec3) -> Self {
        Self { t, point, normal }
    }

    /// Keep whichever of `self` and `other` lies nearer along the ray.
    ///
    /// On a tie `other` wins, so folding hits in order keeps the first one.
    #[inline]
    pub fn nearest(self, other: Option<RayHit>) -> RayHit {
        match other {
            Some(o) if o.t <= self.t => o,
            _ => self,
        }
    }
}
