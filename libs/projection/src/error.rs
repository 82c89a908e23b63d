//! # Error Types
//!
//! Errors raised while building projections or collecting fragments.
//!
//! Non-finite projected points are not errors here: they propagate as NaN or
//! infinity and the rasterizer skips the affected fragments.

use glam::Vec3;
use thiserror::Error;

/// Errors that can occur in the projection pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// A polygon needs at least three vertices to be drawn.
    #[error("Polygon needs at least {min} vertices, got {count}")]
    DegeneratePolygon {
        /// Number of vertices supplied
        count: usize,
        /// Minimum accepted
        min: usize,
    },

    /// Look-at inputs do not define an orientation.
    #[error("Cannot look from {eye} towards {target} with up {up}")]
    DegenerateLookAt {
        /// Camera position
        eye: Vec3,
        /// Point looked at
        target: Vec3,
        /// Up hint
        up: Vec3,
    },

    /// A transform chain has no inverse.
    #[error("Transform is not invertible")]
    SingularTransform,

    /// Reading polygons out of a mesh failed.
    #[error("Mesh error: {0}")]
    Mesh(#[from] halfedge_mesh::MeshError),
}

/// Result type for projection operations
pub type ProjectionResult<T> = Result<T, ProjectionError>;
