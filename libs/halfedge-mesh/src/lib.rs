//! # Half-Edge Mesh
//!
//! Index-based half-edge mesh built incrementally from polygon soup.
//!
//! Every vertex, half-edge and face lives in a flat arena and is addressed by
//! a typed id equal to its slot. Faces are inserted as ordered point loops;
//! shared edges between faces are paired as twins automatically.
//!
//! [`CompactHalfEdgeMesh`] stores the same topology as flat index arrays, and
//! [`WingedEdgeMesh`] stores each undirected edge once with its four wings.
//!
//! ## Example
//!
//! ```rust
//! use glam::Vec3;
//! use halfedge_mesh::HalfEdgeMesh;
//!
//! let mut mesh = HalfEdgeMesh::new();
//! mesh.insert_face(&[Vec3::ZERO, Vec3::X, Vec3::Y]).unwrap();
//! mesh.insert_face(&[Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y]).unwrap();
//!
//! assert_eq!(mesh.half_edge_count(), 6);
//! assert!(mesh.validate().is_ok());
//! assert_eq!(mesh.boundary_half_edges().count(), 4);
//! ```

pub mod compact;
pub mod config;
pub mod core;
pub mod error;
pub mod mesh;
pub mod winged;

pub use compact::{CompactHalfEdge, CompactHalfEdgeMesh};
pub use config::{MeshConfig, MeshConfigError, TwinMatching};
pub use core::half_edge::{EdgeId, Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId};
pub use error::{MeshError, MeshResult, TopologyError};
pub use mesh::validation::ValidationReport;
pub use mesh::HalfEdgeMesh;
pub use winged::{WingedEdge, WingedEdgeMesh, WingedFace, WingedVertex};
