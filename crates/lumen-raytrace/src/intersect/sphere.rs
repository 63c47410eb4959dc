//! Ray-sphere intersection (quadratic equation).

use lumen_math::{Point3, Tolerance};
use serde::{Deserialize, Serialize};

use super::Intersect;
use crate::error::PrimitiveError;
use crate::quadratic::solve_quadratic_with;
use crate::{Ray, RayHit};

/// Sphere given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SphereDesc", into = "SphereDesc")]
pub struct Sphere {
    center: Point3,
    radius: f64,
    tolerance: Tolerance,
}

#[derive(Serialize, Deserialize)]
struct SphereDesc {
    center: Point3,
    radius: f64,
    #[serde(default)]
    tolerance: Tolerance,
}

impl Sphere {
    /// Create a sphere.
    ///
    /// `radius` must be positive and finite; this is only checked in debug
    /// builds. Use [`Sphere::try_new`] for unvalidated input.
    pub fn new(center: Point3, radius: f64) -> Self {
        debug_assert!(radius > 0.0 && radius.is_finite());
        Self {
            center,
            radius,
            tolerance: Tolerance::DEFAULT,
        }
    }

    /// Create a sphere, rejecting a non-positive or non-finite radius.
    pub fn try_new(center: Point3, radius: f64) -> Result<Self, PrimitiveError> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(PrimitiveError::InvalidRadius(radius));
        }
        Ok(Self::new(center, radius))
    }

    /// Replace the thresholds used by the quadratic solve.
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Center point.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Thresholds used by the quadratic solve.
    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }
}

impl TryFrom<SphereDesc> for Sphere {
    type Error = PrimitiveError;

    fn try_from(desc: SphereDesc) -> Result<Self, Self::Error> {
        Ok(Sphere::try_new(desc.center, desc.radius)?.with_tolerance(desc.tolerance))
    }
}

impl From<Sphere> for SphereDesc {
    fn from(sphere: Sphere) -> Self {
        SphereDesc {
            center: sphere.center,
            radius: sphere.radius,
            tolerance: sphere.tolerance,
        }
    }
}

impl Intersect for Sphere {
    /// The normal always points away from the center, also for rays that
    /// start inside the sphere.
    fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        let oc = ray.origin - self.center;
        let d = ray.direction.as_ref();

        // Quadratic: |oc + t*d|^2 = r^2
        let a = d.dot(d);
        let b = 2.0 * oc.dot(d);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let t = solve_quadratic_with(a, b, c, &self.tolerance).smallest_positive()?;
        let point = ray.at(t);
        let normal = (point - self.center) / self.radius;
        Some(RayHit::new(t, point, normal))
    }
}
