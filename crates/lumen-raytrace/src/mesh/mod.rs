//! Triangle meshes with a bounding box for fast rejection.
//!
//! A [`Mesh`] is built once from loaded vertex positions and index triples.
//! Construction validates the indices, computes face and angle-weighted
//! vertex normals, and fits the bounding box. After that the mesh is
//! immutable and can be queried from any number of threads.

mod normals;

pub use normals::{angle_weights, face_normal};

use std::fmt;
use std::str::FromStr;

use lumen_math::{Point3, Tolerance, Vec3};
use serde::{Deserialize, Serialize};

use crate::aabb::Aabb3;
use crate::error::{MeshError, PrimitiveError, Result};
use crate::intersect::Intersect;
use crate::{Ray, RayHit};

/// Which normal a triangle hit reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShadingMode {
    /// The triangle's face normal.
    #[default]
    Flat,
    /// Vertex normals interpolated with the barycentric coordinates of the hit.
    Phong,
}

impl FromStr for ShadingMode {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "FLAT" => Ok(ShadingMode::Flat),
            "PHONG" => Ok(ShadingMode::Phong),
            other => Err(PrimitiveError::UnknownShadingMode(other.to_string())),
        }
    }
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadingMode::Flat => f.write_str("FLAT"),
            ShadingMode::Phong => f.write_str("PHONG"),
        }
    }
}

/// Mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position.
    pub position: Point3,
    /// Angle-weighted average of the incident face normals.
    pub normal: Vec3,
}

/// Mesh triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertex indices; their order defines the face orientation.
    pub indices: [u32; 3],
    /// Unit face normal, or zero for a degenerate triangle.
    pub normal: Vec3,
}

/// Triangle soup with per-vertex normals and a bounding box.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
    shading: ShadingMode,
    bounds: Aabb3,
    tolerance: Tolerance,
}

impl Mesh {
    /// Build a mesh from vertex positions and triangle index triples.
    ///
    /// Fails if any index is out of range or any coordinate is not finite.
    pub fn new(positions: Vec<Point3>, indices: Vec<[u32; 3]>, shading: ShadingMode) -> Result<Self> {
        if let Some(vertex) = positions.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(MeshError::NonFiniteVertex { vertex });
        }
        for (triangle, tri) in indices.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= positions.len()) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count: positions.len(),
                });
            }
        }

        let mut vertices: Vec<Vertex> = positions
            .into_iter()
            .map(|position| Vertex {
                position,
                normal: Vec3::zeros(),
            })
            .collect();
        let mut triangles: Vec<Triangle> = indices
            .into_iter()
            .map(|indices| Triangle {
                indices,
                normal: Vec3::zeros(),
            })
            .collect();

        let degenerate = normals::compute_normals(&mut vertices, &mut triangles);
        if degenerate > 0 {
            tracing::warn!(
                degenerate = degenerate,
                triangles = triangles.len(),
                "Mesh contains zero-area triangles; they will never be hit"
            );
        }

        let bounds = Aabb3::from_points(vertices.iter().map(|v| &v.position));

        tracing::debug!(
            vertices = vertices.len(),
            triangles = triangles.len(),
            shading = %shading,
            "Built mesh"
        );

        Ok(Self {
            vertices,
            triangles,
            shading,
            bounds,
            tolerance: Tolerance::DEFAULT,
        })
    }

    /// Replace the numeric thresholds used by the intersection tests.
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Vertices, including their computed normals.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Triangles, including their face normals.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Shading mode.
    pub fn shading_mode(&self) -> ShadingMode {
        self.shading
    }

    /// Tight bounding box of all vertex positions.
    pub fn bounding_box(&self) -> &Aabb3 {
        &self.bounds
    }

    /// Thresholds used by the intersection tests.
    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    /// Conservative test of the ray against the mesh's bounding box.
    ///
    /// Returns `false` only when the ray misses the box.
    pub fn intersect_bounding_box(&self, ray: &Ray) -> bool {
        self.bounds.intersect_faces(ray, self.tolerance.box_face)
    }

    /// Intersect the ray with a single triangle of this mesh.
    ///
    /// Solves `origin + t·d = α·p0 + β·p1 + (1-α-β)·p2` with Cramer's rule.
    /// The determinant is rejected inside a symmetric band around zero so
    /// both windings are hit. The band is absolute and the determinant scales
    /// with triangle area, so finely tessellated meshes need a smaller
    /// [`Tolerance::determinant`].
    pub fn intersect_triangle(&self, triangle: &Triangle, ray: &Ray) -> Option<RayHit> {
        let [v0, v1, v2] = triangle.indices.map(|i| &self.vertices[i as usize]);
        let tol = &self.tolerance;

        //                        |α|
        // [p2-p0  p2-p1  d]  ·   |β|  =  p2 - o
        //                        |t|
        let col0 = v2.position - v0.position;
        let col1 = v2.position - v1.position;
        let d = ray.direction.as_ref();
        let rhs = v2.position - ray.origin;

        let n = col0.cross(&col1);
        let det = n.dot(d);
        if tol.is_degenerate_determinant(det) {
            return None;
        }

        let alpha = rhs.cross(&col1).dot(d) / det;
        let beta = col0.cross(&rhs).dot(d) / det;
        let gamma = 1.0 - alpha - beta;
        let t = n.dot(&rhs) / det;

        let min_weight = -tol.barycentric;
        if alpha < min_weight || beta < min_weight || gamma < min_weight || t < 0.0 {
            return None;
        }

        let normal = match self.shading {
            ShadingMode::Flat => triangle.normal,
            ShadingMode::Phong => (alpha * v0.normal + beta * v1.normal + gamma * v2.normal)
                .try_normalize(0.0)
                .unwrap_or(triangle.normal),
        };
        Some(RayHit::new(t, ray.at(t), normal))
    }
}

impl Intersect for Mesh {
    /// Exhaustive scan over all triangles after the bounding box test,
    /// keeping the nearest hit.
    fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        if !self.intersect_bounding_box(ray) {
            return None;
        }

        self.triangles
            .iter()
            .filter_map(|tri| self.intersect_triangle(tri, ray))
            .fold(None, |best, hit| Some(hit.nearest(best)))
    }
}
