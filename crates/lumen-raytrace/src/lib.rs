#![warn(missing_docs)]

//! Ray-primitive intersection for the lumen renderer.
//!
//! This crate answers one question for every primitive it knows: where does
//! a ray first hit it? Spheres and finite cylinders are intersected
//! analytically; triangle meshes are culled by their bounding box and then
//! scanned triangle by triangle.
//!
//! # Architecture
//!
//! - [`Ray`] - Ray representation with origin and unit direction
//! - [`RayHit`] - Intersection result: parameter, point and unit normal
//! - [`quadratic`] - Real roots of quadratics, shared by the implicit surfaces
//! - [`intersect`] - The [`Intersect`] trait, [`Sphere`], [`Cylinder`] and [`Primitive`] dispatch
//! - [`mesh`] - Triangle meshes with flat or Phong normals
//! - [`aabb`] - Bounding box and its ray pre-test
//! - [`object`] - Primitives paired with materials, nearest-hit search
//!
//! # Example
//!
//! ```ignore
//! use lumen_math::{Point3, Vec3};
//! use lumen_raytrace::{Intersect, Ray, Sphere};
//!
//! let sphere = Sphere::new(Point3::origin(), 1.0);
//! let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
//!
//! if let Some(hit) = sphere.intersect(&ray) {
//!     assert!((hit.t - 4.0).abs() < 1e-12);
//! }
//! ```

mod ray;
pub mod aabb;
pub mod error;
pub mod intersect;
pub mod mesh;
pub mod object;
pub mod quadratic;

pub use aabb::Aabb3;
pub use error::{MeshError, PrimitiveError};
pub use intersect::{Cylinder, Intersect, Primitive, Sphere};
pub use mesh::{Mesh, ShadingMode, Triangle, Vertex};
pub use object::{closest_hit, SceneObject};
pub use ray::{Ray, RayHit};
