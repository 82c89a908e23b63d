//! Core half-edge records for the arena mesh.
//!
//! Records reference each other through typed ids rather than pointers. An
//! id's numeric value is the slot of its record in the owning arena, and
//! every record also stores its own id so that validation can detect
//! records moved out of place.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub u32);

        impl $name {
            /// Arena slot addressed by this id.
            #[inline]
            #[must_use]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Unique identifier for vertices
    VertexId,
    "v"
);
arena_id!(
    /// Unique identifier for half-edges
    HalfEdgeId,
    "h"
);
arena_id!(
    /// Unique identifier for faces
    FaceId,
    "f"
);
arena_id!(
    /// Unique identifier for undirected winged edges
    EdgeId,
    "e"
);

/// Kind of arena record, used when reporting id problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Vertex arena
    Vertex,
    /// Half-edge arena
    HalfEdge,
    /// Face arena
    Face,
    /// Winged edge arena
    Edge,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Vertex => f.write_str("vertex"),
            EntityKind::HalfEdge => f.write_str("half-edge"),
            EntityKind::Face => f.write_str("face"),
            EntityKind::Edge => f.write_str("edge"),
        }
    }
}

/// Vertex data structure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Own id
    pub id: VertexId,
    /// Position in 3D space
    pub position: Vec3,
    /// A half-edge leaving this vertex
    pub half_edge: HalfEdgeId,
}

/// Half-edge data structure
///
/// `vertex` is the destination of the half-edge. The origin is the
/// destination of the preceding half-edge in the face loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalfEdge {
    /// Own id
    pub id: HalfEdgeId,
    /// Vertex this half-edge points to
    pub vertex: VertexId,
    /// Next half-edge around the owning face
    pub next: HalfEdgeId,
    /// Opposite half-edge on the neighbouring face, if any
    pub twin: Option<HalfEdgeId>,
    /// Face this half-edge bounds
    pub face: FaceId,
}

impl HalfEdge {
    /// Returns true when no neighbouring face shares this edge.
    #[inline]
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.twin.is_none()
    }
}

/// Face data structure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Own id
    pub id: FaceId,
    /// Entry half-edge of the face loop
    pub half_edge: HalfEdgeId,
}

#[cfg(test)]
mod tests;
