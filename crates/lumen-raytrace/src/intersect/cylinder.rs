//! Ray-cylinder intersection (quadratic equation).
//!
//! The cylinder is an open tube: the infinite quadric around the axis line,
//! clipped to the axial range `(-height/2, height/2)` around the center.
//! End caps are not part of the surface.

use lumen_math::{reject_from_axis, Dir3, Point3, Tolerance, Vec3};
use serde::{Deserialize, Serialize};

use super::Intersect;
use crate::error::PrimitiveError;
use crate::quadratic::solve_quadratic_with;
use crate::{Ray, RayHit};

/// Finite open cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CylinderDesc", into = "CylinderDesc")]
pub struct Cylinder {
    center: Point3,
    axis: Dir3,
    radius: f64,
    height: f64,
    tolerance: Tolerance,
}

#[derive(Serialize, Deserialize)]
struct CylinderDesc {
    center: Point3,
    axis: Vec3,
    radius: f64,
    height: f64,
    #[serde(default)]
    tolerance: Tolerance,
}

impl Cylinder {
    /// Create a cylinder centered on the midpoint of its axis segment.
    ///
    /// `radius` and `height` must be positive; this is only checked in
    /// debug builds. Use [`Cylinder::try_new`] for unvalidated input.
    pub fn new(center: Point3, axis: Dir3, radius: f64, height: f64) -> Self {
        debug_assert!(radius > 0.0 && radius.is_finite());
        debug_assert!(height > 0.0 && height.is_finite());
        Self {
            center,
            axis,
            radius,
            height,
            tolerance: Tolerance::DEFAULT,
        }
    }

    /// Create a cylinder from an arbitrary-length axis, validating every parameter.
    pub fn try_new(center: Point3, axis: Vec3, radius: f64, height: f64) -> Result<Self, PrimitiveError> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(PrimitiveError::InvalidRadius(radius));
        }
        if !(height > 0.0 && height.is_finite()) {
            return Err(PrimitiveError::InvalidHeight(height));
        }
        let axis = Dir3::try_new(axis, 1e-12)
            .filter(|a| a.iter().all(|c| c.is_finite()))
            .ok_or(PrimitiveError::DegenerateAxis)?;
        Ok(Self::new(center, axis, radius, height))
    }

    /// Replace the thresholds used by the quadratic solve.
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Midpoint of the axis segment.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Unit axis direction.
    pub fn axis(&self) -> Dir3 {
        self.axis
    }

    /// Radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Length of the axis segment.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Thresholds used by the quadratic solve.
    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    /// Signed distance of `point` from the center, measured along the axis.
    #[inline]
    fn axial_offset(&self, point: &Point3) -> f64 {
        (point - self.center).dot(self.axis.as_ref())
    }
}

impl TryFrom<CylinderDesc> for Cylinder {
    type Error = PrimitiveError;

    fn try_from(desc: CylinderDesc) -> Result<Self, Self::Error> {
        Ok(Cylinder::try_new(desc.center, desc.axis, desc.radius, desc.height)?
            .with_tolerance(desc.tolerance))
    }
}

impl From<Cylinder> for CylinderDesc {
    fn from(cylinder: Cylinder) -> Self {
        CylinderDesc {
            center: cylinder.center,
            axis: cylinder.axis.into_inner(),
            radius: cylinder.radius,
            height: cylinder.height,
            tolerance: cylinder.tolerance,
        }
    }
}

impl Intersect for Cylinder {
    fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        let oc = ray.origin - self.center;

        // Project ray direction and origin-center onto the plane perpendicular to axis
        let d_perp = reject_from_axis(ray.direction.as_ref(), &self.axis);
        let oc_perp = reject_from_axis(&oc, &self.axis);

        // |oc_perp + t*d_perp|^2 = r^2
        let a = d_perp.dot(&d_perp);
        let b = 2.0 * oc_perp.dot(&d_perp);
        let c = oc_perp.dot(&oc_perp) - self.radius * self.radius;

        let half_height = 0.5 * self.height;
        let t = solve_quadratic_with(a, b, c, &self.tolerance)
            .iter()
            .filter(|&t| t > 0.0 && self.axial_offset(&ray.at(t)).abs() < half_height)
            .reduce(f64::min)?;

        let point = ray.at(t);
        let normal = reject_from_axis(&(point - self.center), &self.axis).normalize();
        Some(RayHit::new(t, point, normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn z_cylinder() -> Cylinder {
        // Radius 1, spanning z in (-1, 1)
        Cylinder::new(Point3::origin(), Dir3::new_normalize(Vec3::z()), 1.0, 2.0)
    }

    #[test]
    fn test_ray_cylinder_perpendicular() {
        let cyl = z_cylinder();
        let ray = Ray::new(
            Point3::new(-5.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        );
        let hit = cyl.intersect(&ray).unwrap();
        assert_abs_diff_eq!(hit.t, 4.0, epsilon = 1e-10);
        assert_abs_diff_eq!(hit.point, Point3::new(-1.0, 0.0, 0.0), epsilon = 1e-10);
        assert_abs_diff_eq!(hit.normal, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-10);
    }

    #[test]
    fn test_outside_height_misses_and_inside_hits() {
        let cyl = z_cylinder();
        // Crosses the infinite quadric above the top rim
        let above = Ray::new(Point3::new(-5.0, 0.0, 3.0), Vec3::x());
        assert!(cyl.intersect(&above).is_none());

        // Same ray shifted into the axial range
        let inside = Ray::new(Point3::new(-5.0, 0.0, 0.5), Vec3::x());
        let hit = cyl.intersect(&inside).unwrap();
        assert_abs_diff_eq!(hit.t, 4.0, epsilon = 1e-10);
        assert!((hit.point.z - 0.5).abs() < 1e-10);
        assert!(hit.normal.z.abs() < 1e-12);
    }

    #[test]
    fn test_hit_through_open_end() {
        let cyl = z_cylinder();
        // Enters the quadric at z = 1.1 (above the rim), exits at z = 0.1 on the far wall
        let dir = Vec3::new(1.0, 0.0, -0.5);
        let ray = Ray::new(Point3::new(-2.0, 0.0, 1.6), dir);
        let hit = cyl.intersect(&ray).unwrap();
        assert!((hit.t - 3.0 * dir.norm()).abs() < 1e-9);
        assert_abs_diff_eq!(hit.point, Point3::new(1.0, 0.0, 0.1), epsilon = 1e-9);
        // Outward normal, facing away from the ray
        assert_abs_diff_eq!(hit.normal, Vec3::x(), epsilon = 1e-9);
    }

    #[test]
    fn test_rim_is_excluded() {
        let cyl = z_cylinder();
        // Would hit exactly at z = 1
        let ray = Ray::new(Point3::new(-5.0, 0.0, 1.0), Vec3::x());
        assert!(cyl.intersect(&ray).is_none());
    }

    #[test]
    fn test_ray_cylinder_miss() {
        let cyl = z_cylinder();
        let ray = Ray::new(
            Point3::new(-10.0, 10.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        );
        assert!(cyl.intersect(&ray).is_none());
    }

    #[test]
    fn test_distant_near_miss() {
        let cyl = z_cylinder();
        for (dist, offset) in [(1e6, 10.0), (1e4, 1.005)] {
            let ray = Ray::new(Point3::new(-dist, offset, 0.0), Vec3::x());
            assert!(cyl.intersect(&ray).is_none(), "dist={dist} offset={offset}");
        }

        let ray = Ray::new(Point3::new(-1e6, 0.5, 0.0), Vec3::x());
        let hit = cyl.intersect(&ray).unwrap();
        let dist = reject_from_axis(&(hit.point - cyl.center()), &cyl.axis()).norm();
        assert!((dist - cyl.radius()).abs() < 1e-6);
    }

    #[test]
    fn test_custom_discriminant_tolerance() {
        let ray = Ray::new(Point3::new(-10.0, 1.0 + 1e-9, 0.0), Vec3::x());
        assert!(z_cylinder().intersect(&ray).is_none());

        let tolerance = Tolerance {
            discriminant: 1e-10,
            ..Tolerance::DEFAULT
        };
        let hit = z_cylinder()
            .with_tolerance(tolerance)
            .intersect(&ray)
            .expect("grazing ray counts as tangent");
        assert_abs_diff_eq!(hit.t, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ray_cylinder_parallel_axis() {
        let cyl = z_cylinder();
        // Ray parallel to axis, inside the tube
        let ray = Ray::new(
            Point3::new(0.5, 0.0, -10.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        assert!(cyl.intersect(&ray).is_none());
    }

    #[test]
    fn test_ray_from_inside() {
        let cyl = z_cylinder();
        let ray = Ray::new(Point3::origin(), Vec3::y());
        let hit = cyl.intersect(&ray).unwrap();
        assert_abs_diff_eq!(hit.t, 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(hit.normal, Vec3::y(), epsilon = 1e-10);
    }

    #[test]
    fn test_oblique_axis() {
        let axis = Vec3::new(1.0, 1.0, 0.0);
        let cyl = Cylinder::try_new(Point3::new(1.0, 2.0, 3.0), axis, 0.5, 4.0).unwrap();
        // (0, 0, 1) is perpendicular to the axis
        let ray = Ray::new(Point3::new(1.0, 2.0, 8.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = cyl.intersect(&ray).unwrap();
        assert_abs_diff_eq!(hit.t, 4.5, epsilon = 1e-10);
        assert_abs_diff_eq!(hit.normal, Vec3::z(), epsilon = 1e-10);

        // Offset along the axis beyond half the height
        let shift = 2.5 * axis.normalize();
        let ray = Ray::new(Point3::new(1.0, 2.0, 8.0) + shift, Vec3::new(0.0, 0.0, -1.0));
        assert!(cyl.intersect(&ray).is_none());
    }

    #[test]
    fn test_normals_are_unit_length() {
        let cyl = Cylinder::try_new(Point3::new(0.3, -0.2, 0.1), Vec3::new(0.2, 1.0, -0.4), 1.7, 6.0)
            .unwrap();
        let origins = [
            Point3::new(8.0, 0.0, 0.0),
            Point3::new(-4.0, 1.0, 6.0),
            Point3::new(0.5, -2.0, -9.0),
        ];
        for origin in origins {
            let ray = Ray::through(origin, cyl.center());
            let hit = cyl.intersect(&ray).expect("ray aimed at the center must hit the wall");
            assert!((hit.normal.norm() - 1.0).abs() < 1e-6);
            assert!(hit.normal.dot(cyl.axis().as_ref()).abs() < 1e-9);
            let dist = reject_from_axis(&(hit.point - cyl.center()), &cyl.axis()).norm();
            assert!((dist - cyl.radius()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_try_new_validation() {
        let o = Point3::origin();
        assert_eq!(
            Cylinder::try_new(o, Vec3::z(), 0.0, 1.0),
            Err(PrimitiveError::InvalidRadius(0.0))
        );
        assert_eq!(
            Cylinder::try_new(o, Vec3::z(), 1.0, -1.0),
            Err(PrimitiveError::InvalidHeight(-1.0))
        );
        assert_eq!(
            Cylinder::try_new(o, Vec3::zeros(), 1.0, 1.0),
            Err(PrimitiveError::DegenerateAxis)
        );
        let cyl = Cylinder::try_new(o, Vec3::new(0.0, 0.0, 3.0), 1.0, 1.0).unwrap();
        assert!((cyl.axis().into_inner() - Vec3::z()).norm() < 1e-12);
    }

    #[test]
    fn test_deserialize_normalizes_axis() {
        let cyl: Cylinder = serde_json::from_str(
            r#"{ "center": [0.0, 0.0, 0.0], "axis": [0.0, 2.0, 0.0], "radius": 1.0, "height": 3.0 }"#,
        )
        .unwrap();
        assert!((cyl.axis().into_inner() - Vec3::y()).norm() < 1e-12);
        assert_eq!(cyl.height(), 3.0);
    }
}
