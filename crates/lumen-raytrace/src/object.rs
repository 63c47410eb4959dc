//! Primitives paired with caller-defined material data.

use crate::intersect::{Intersect, Primitive};
use crate::{Ray, RayHit};

/// A primitive together with an opaque material handle.
///
/// The kernel never looks at `material`; it is handed back with the hit so
/// the shading code knows what was struck.
#[derive(Debug, Clone)]
pub struct SceneObject<M> {
    /// Geometry.
    pub primitive: Primitive,
    /// Material handle, passed through untouched.
    pub material: M,
}

impl<M> SceneObject<M> {
    /// Pair a primitive with its material.
    pub fn new(primitive: impl Into<Primitive>, material: M) -> Self {
        Self {
            primitive: primitive.into(),
            material,
        }
    }
}

impl<M> Intersect for SceneObject<M> {
    fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        self.primitive.intersect(ray)
    }
}

/// Nearest hit over a set of objects, with the object that was hit.
pub fn closest_hit<'a, M>(objects: &'a [SceneObject<M>], ray: &Ray) -> Option<(&'a SceneObject<M>, RayHit)> {
    let mut closest: Option<(&SceneObject<M>, RayHit)> = None;
    let mut closest_t = f64::INFINITY;

    for object in objects {
        if let Some(hit) = object.intersect(ray) {
            if hit.t < closest_t {
                closest_t = hit.t;
                closest = Some((object, hit));
            }
        }
    }

    closest
}
