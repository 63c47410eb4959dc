//! Face normals and angle-weighted vertex normals.

use lumen_math::{angle_between, Point3, Vec3};

use super::{Triangle, Vertex};

/// Unit normal of the triangle `(p0, p1, p2)`, oriented by `(p1-p0) × (p2-p0)`.
///
/// Returns `None` for a zero-area triangle.
pub fn face_normal(p0: &Point3, p1: &Point3, p2: &Point3) -> Option<Vec3> {
    (p1 - p0).cross(&(p2 - p0)).try_normalize(0.0)
}

/// Interior angle of the triangle at each of its three corners.
///
/// These are the weights with which a face normal contributes to the
/// normals of its vertices. For a non-degenerate triangle they sum to π.
pub fn angle_weights(p0: &Point3, p1: &Point3, p2: &Point3) -> [f64; 3] {
    [
        angle_between(&(p1 - p0), &(p2 - p0)),
        angle_between(&(p2 - p1), &(p0 - p1)),
        angle_between(&(p0 - p2), &(p1 - p2)),
    ]
}

/// Fill in face normals, then accumulate angle-weighted vertex normals.
///
/// Degenerate triangles keep a zero normal and contribute nothing. Returns
/// the number of degenerate triangles.
pub(super) fn compute_normals(vertices: &mut [Vertex], triangles: &mut [Triangle]) -> usize {
    let mut degenerate = 0;

    for tri in triangles.iter_mut() {
        let [p0, p1, p2] = tri.indices.map(|i| vertices[i as usize].position);
        match face_normal(&p0, &p1, &p2) {
            Some(n) => tri.normal = n,
            None => {
                tri.normal = Vec3::zeros();
                degenerate += 1;
            }
        }
    }

    for v in vertices.iter_mut() {
        v.normal = Vec3::zeros();
    }

    for tri in triangles.iter() {
        if tri.normal == Vec3::zeros() {
            continue;
        }
        let [p0, p1, p2] = tri.indices.map(|i| vertices[i as usize].position);
        let weights = angle_weights(&p0, &p1, &p2);
        for (&i, w) in tri.indices.iter().zip(weights) {
            vertices[i as usize].normal += w * tri.normal;
        }
    }

    for v in vertices.iter_mut() {
        v.normal = v.normal.try_normalize(0.0).unwrap_or_else(Vec3::zeros);
    }

    degenerate
}
