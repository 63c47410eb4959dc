//! Error types for primitive and mesh construction.
//!
//! Intersection queries never fail; these errors only arise while building
//! primitives from loader or scene-descriptor input.

use thiserror::Error;

/// Errors from building a sphere, cylinder or shading mode from descriptor data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrimitiveError {
    /// Radius is not a finite positive number.
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// Cylinder height is not a finite positive number.
    #[error("height must be positive and finite, got {0}")]
    InvalidHeight(f64),

    /// Cylinder axis has zero length or non-finite components.
    #[error("cylinder axis cannot be normalized")]
    DegenerateAxis,

    /// Shading mode string is neither `FLAT` nor `PHONG`.
    #[error("invalid shading mode {0:?}, expected FLAT or PHONG")]
    UnknownShadingMode(String),
}

/// Errors from building a mesh out of loaded vertex and triangle data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Index of the offending triangle.
        triangle: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A vertex position has a NaN or infinite coordinate.
    #[error("vertex {vertex} has a non-finite coordinate")]
    NonFiniteVertex {
        /// Index of the offending vertex.
        vertex: usize,
    },
}

/// Result type for mesh construction.
pub type Result<T> = std::result::Result<T, MeshError>;
