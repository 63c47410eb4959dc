#![warn(missing_docs)]

//! Math types for the lumen intersection kernel.
//!
//! Thin wrappers around nalgebra providing the types shared by every
//! primitive: points, vectors, unit directions, and the numeric tolerances
//! used by the intersection routines.

use nalgebra::{Unit, Vector3};
use serde::{Deserialize, Serialize};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Component of `v` perpendicular to the unit vector `axis`.
#[inline]
pub fn reject_from_axis(v: &Vec3, axis: &Dir3) -> Vec3 {
    v - v.dot(axis.as_ref()) * axis.as_ref()
}

/// Interior angle between two edge vectors sharing a common start point.
///
/// The cosine is clamped to `[-1, 1]` before `acos` so rounding on nearly
/// collinear edges never produces NaN. Returns `0.0` if either edge has zero
/// length.
pub fn angle_between(a: &Vec3, b: &Vec3) -> f64 {
    match (a.try_normalize(0.0), b.try_normalize(0.0)) {
        (Some(a), Some(b)) => a.dot(&b).clamp(-1.0, 1.0).acos(),
        _ => 0.0,
    }
}

/// Tolerances for the numeric thresholds of the intersection routines.
///
/// Can be deserialized from a scene descriptor; missing fields fall back to
/// [`Tolerance::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Below this magnitude a quadratic's leading coefficient is treated as zero.
    pub quadratic: f64,
    /// Relative band around zero in which a discriminant counts as a tangent hit.
    ///
    /// Scaled by `b² + |4ac|`, so it should stay within a few ulps: a wider
    /// band turns distant near misses into hits off the surface.
    pub discriminant: f64,
    /// Symmetric band around zero in which a triangle determinant is rejected.
    ///
    /// Absolute: the determinant grows with triangle area, so this must be
    /// scaled to the mesh. Triangles with edges much shorter than
    /// `sqrt(determinant)` are otherwise never hit.
    pub determinant: f64,
    /// Slack allowed on negative barycentric coordinates at triangle edges.
    pub barycentric: f64,
    /// Widening of each bounding-box face when testing the hit point.
    pub box_face: f64,
}

impl Tolerance {
    /// Default tolerances (strict barycentric containment, `1e-4` determinant and box slack).
    pub const DEFAULT: Self = Self {
        quadratic: 1e-12,
        discriminant: 8.0 * f64::EPSILON,
        determinant: 1e-4,
        barycentric: 0.0,
        box_face: 1e-4,
    };

    /// Check if a determinant is too close to zero to divide by.
    #[inline]
    pub fn is_degenerate_determinant(&self, det: f64) -> bool {
        det.abs() < self.determinant
    }

    /// Check if a discriminant is zero relative to the magnitude of its terms.
    #[inline]
    pub fn is_zero_discriminant(&self, disc: f64, scale: f64) -> bool {
        disc.abs() <= self.discriminant * scale
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
