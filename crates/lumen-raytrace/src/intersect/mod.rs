//! Ray-primitive intersection.
//!
//! Every primitive answers the same query: the nearest forward hit of a ray,
//! or `None`. [`Primitive`] wraps the concrete kinds so callers can hold a
//! heterogeneous list and dispatch without trait objects.

mod cylinder;
mod sphere;

pub use cylinder::Cylinder;
pub use sphere::Sphere;

use crate::mesh::Mesh;
use crate::{Ray, RayHit};

/// Something a ray can hit.
pub trait Intersect {
    /// Nearest intersection in front of the ray origin, if any.
    fn intersect(&self, ray: &Ray) -> Option<RayHit>;
}

/// Any primitive supported by the kernel.
#[derive(Debug, Clone)]
pub enum Primitive {
    /// Implicit sphere.
    Sphere(Sphere),
    /// Open finite cylinder.
    Cylinder(Cylinder),
    /// Triangle mesh with a bounding box.
    Mesh(Mesh),
}

impl Intersect for Primitive {
    fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        match self {
            Primitive::Sphere(sphere) => sphere.intersect(ray),
            Primitive::Cylinder(cylinder) => cylinder.intersect(ray),
            Primitive::Mesh(mesh) => mesh.intersect(ray),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Cylinder> for Primitive {
    fn from(cylinder: Cylinder) -> Self {
        Primitive::Cylinder(cylinder)
    }
}

impl From<Mesh> for Primitive {
    fn from(mesh: Mesh) -> Self {
        Primitive::Mesh(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::ShadingMode;
    use lumen_math::{Dir3, Point3, Vec3};

    fn ray_down(x: f64, y: f64) -> Ray {
        Ray::new(Point3::new(x, y, 10.0), Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_dispatch_matches_concrete_primitive() {
        let sphere = Sphere::new(Point3::origin(), 1.0);
        let cylinder = Cylinder::new(Point3::origin(), Dir3::new_normalize(Vec3::x()), 1.0, 4.0);
        let mesh = Mesh::new(
            vec![
                Point3::new(-1.0, -1.0, 0.0),
                Point3::new(1.0, -1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
            ShadingMode::Flat,
        )
        .unwrap();

        let ray = ray_down(0.0, 0.0);
        let direct = [
            sphere.intersect(&ray).unwrap().t,
            cylinder.intersect(&ray).unwrap().t,
            mesh.intersect(&ray).unwrap().t,
        ];
        let primitives: Vec<Primitive> = vec![sphere.into(), cylinder.into(), mesh.into()];
        for (primitive, expected) in primitives.iter().zip(direct) {
            let hit = primitive.intersect(&ray).unwrap();
            assert!((hit.t - expected).abs() < 1e-12);
        }
        assert!((direct[0] - 9.0).abs() < 1e-10);
        assert!((direct[1] - 9.0).abs() < 1e-10);
        assert!((direct[2] - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_dispatch_miss() {
        let primitive = Primitive::from(Sphere::new(Point3::origin(), 1.0));
        assert!(primitive.intersect(&ray_down(5.0, 5.0)).is_none());
    }
}
