//! # Error Types
//!
//! Errors raised while building or querying a half-edge mesh, and the
//! topology issues reported by validation.
//!
//! ## Error Policy
//!
//! - Face insertion is all-or-nothing: a rejected face leaves the mesh untouched
//! - Validation never panics on corrupted records, it reports them
//! - Errors carry the ids and positions needed to locate the problem

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::half_edge::{EdgeId, EntityKind, FaceId, HalfEdgeId, VertexId};

// =============================================================================
// MESH ERRORS
// =============================================================================

/// Errors that can occur while building or querying a mesh.
///
/// ## Example
///
/// ```rust
/// use glam::Vec3;
/// use halfedge_mesh::{HalfEdgeMesh, MeshError};
///
/// let mut mesh = HalfEdgeMesh::new();
/// match mesh.insert_face(&[Vec3::ZERO, Vec3::X]) {
///     Err(MeshError::TooFewVertices { count, .. }) => assert_eq!(count, 2),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// A face needs at least three corners.
    #[error("Face needs at least {min} vertices, got {count}")]
    TooFewVertices {
        /// Number of positions supplied
        count: usize,
        /// Minimum accepted
        min: usize,
    },

    /// A position has a NaN or infinite component.
    #[error("Position {index} is not finite: {position}")]
    NonFinitePosition {
        /// Index into the supplied positions
        index: usize,
        /// Offending position
        position: Vec3,
    },

    /// Two consecutive positions (including last to first) coincide.
    #[error("Zero-length edge between positions {from} and {to}")]
    DegenerateEdge {
        /// Index of the edge origin
        from: usize,
        /// Index of the edge destination
        to: usize,
    },

    /// The directed edge is already used, by this mesh or earlier in the same face.
    #[error("Directed edge {origin} -> {destination} already exists{}", existing_suffix(.existing))]
    DuplicateHalfEdge {
        /// Edge origin
        origin: Vec3,
        /// Edge destination
        destination: Vec3,
        /// Existing half-edge, `None` when repeated within the new face
        existing: Option<HalfEdgeId>,
    },

    /// The 32-bit id space of an arena is exhausted.
    #[error("Mesh {0} arena is full")]
    IndexOverflow(EntityKind),

    /// Vertex id out of range.
    #[error("Invalid vertex reference: {0}")]
    InvalidVertex(VertexId),

    /// Half-edge id out of range.
    #[error("Invalid half-edge reference: {0}")]
    InvalidHalfEdge(HalfEdgeId),

    /// Face id out of range.
    #[error("Invalid face reference: {0}")]
    InvalidFace(FaceId),

    /// Winged edge id out of range.
    #[error("Invalid edge reference: {0}")]
    InvalidEdge(EdgeId),

    /// Walking a face loop did not return to its start.
    #[error("Face loop through {0} does not close")]
    UnclosedLoop(HalfEdgeId),

    /// Compact mesh face references a vertex outside the vertex range.
    #[error("Face {face} references vertex {vertex} but only {vertex_count} vertices exist")]
    ConnectivityOutOfRange {
        /// Face index
        face: usize,
        /// Offending vertex index
        vertex: u32,
        /// Declared vertex count
        vertex_count: usize,
    },

    /// More than two faces share an undirected edge, or two faces share a directed one.
    #[error("Edge {origin} -> {destination} is not manifold")]
    NonManifoldEdge {
        /// Edge origin vertex index
        origin: u32,
        /// Edge destination vertex index
        destination: u32,
    },

    /// A border vertex with more than one outgoing border half-edge.
    #[error("Vertex {0} is not manifold")]
    NonManifoldVertex(u32),

    /// A vertex used by no face.
    #[error("Vertex {0} is not used by any face")]
    IsolatedVertex(u32),

    /// The mesh failed validation.
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),
}

fn existing_suffix(existing: &Option<HalfEdgeId>) -> String {
    existing.map(|id| format!(" as {id}")).unwrap_or_default()
}

/// Result type for mesh operations
pub type MeshResult<T> = Result<T, MeshError>;

// =============================================================================
// TOPOLOGY ERRORS
// =============================================================================

/// Topology issue found by mesh validation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopologyError {
    /// Two records of one arena share an id.
    #[error("Duplicate {kind} id {id}")]
    DuplicateId {
        /// Arena
        kind: EntityKind,
        /// Repeated id
        id: u32,
    },

    /// A record's id does not match its arena slot.
    #[error("{kind} id {id} stored in slot {slot}")]
    MisplacedId {
        /// Arena
        kind: EntityKind,
        /// Stored id
        id: u32,
        /// Actual slot
        slot: usize,
    },

    /// A face's entry half-edge does not exist.
    #[error("Face {face} enters through missing half-edge {half_edge}")]
    MissingEntryHalfEdge {
        /// Face
        face: FaceId,
        /// Missing entry
        half_edge: HalfEdgeId,
    },

    /// A half-edge points at a missing vertex.
    #[error("Half-edge {half_edge} points at missing vertex {vertex}")]
    DanglingVertex {
        /// Half-edge
        half_edge: HalfEdgeId,
        /// Missing vertex
        vertex: VertexId,
    },

    /// A half-edge's `next` does not exist.
    #[error("Half-edge {half_edge} continues to missing half-edge {next}")]
    DanglingNext {
        /// Half-edge
        half_edge: HalfEdgeId,
        /// Missing successor
        next: HalfEdgeId,
    },

    /// A face loop does not come back to its entry within the half-edge count.
    #[error("Face {face} loop does not close after {steps} steps")]
    OpenLoop {
        /// Face
        face: FaceId,
        /// Steps walked before giving up
        steps: usize,
    },

    /// A face loop has fewer than three half-edges.
    #[error("Face {face} loop has only {length} half-edges")]
    ShortLoop {
        /// Face
        face: FaceId,
        /// Loop length
        length: usize,
    },

    /// A half-edge appears in the loops of two faces.
    #[error("Half-edge {half_edge} is shared by faces {first} and {second}")]
    SharedHalfEdge {
        /// Half-edge
        half_edge: HalfEdgeId,
        /// First owner
        first: FaceId,
        /// Second owner
        second: FaceId,
    },

    /// A half-edge names a different face than the loop it sits in.
    #[error("Half-edge {half_edge} sits in face {expected} but names face {found}")]
    FaceMismatch {
        /// Half-edge
        half_edge: HalfEdgeId,
        /// Face whose loop contains it
        expected: FaceId,
        /// Face it names
        found: FaceId,
    },

    /// A half-edge belongs to no face loop.
    #[error("Half-edge {0} is not part of any face loop")]
    OrphanedHalfEdge(HalfEdgeId),

    /// A twin link points at a missing half-edge.
    #[error("Half-edge {half_edge} has missing twin {twin}")]
    DanglingTwin {
        /// Half-edge
        half_edge: HalfEdgeId,
        /// Missing twin
        twin: HalfEdgeId,
    },

    /// A twin link is not returned by the twin.
    #[error("Half-edge {half_edge} twins {twin} but {twin} twins {back:?}")]
    AsymmetricTwin {
        /// Half-edge
        half_edge: HalfEdgeId,
        /// Its twin
        twin: HalfEdgeId,
        /// The twin's own link
        back: Option<HalfEdgeId>,
    },

    /// Twins do not run between the same endpoints in opposite directions.
    #[error("Half-edges {half_edge} and {twin} are twins with unmatched endpoints")]
    TwinEndpointMismatch {
        /// Half-edge
        half_edge: HalfEdgeId,
        /// Its twin
        twin: HalfEdgeId,
    },

    /// A vertex's half-edge is missing or does not leave the vertex.
    #[error("Vertex {vertex} names half-edge {half_edge} which does not leave it")]
    VertexHalfEdgeMismatch {
        /// Vertex
        vertex: VertexId,
        /// Named half-edge
        half_edge: HalfEdgeId,
    },
}
