//! # Winged-Edge Mesh
//!
//! Baumgart-style winged-edge representation built from polygon soup.
//!
//! Each undirected edge is stored once, oriented the way the first face that
//! used it walks it. That face is the edge's left face; a later face walking
//! the edge the other way becomes its right face. For each side the edge
//! keeps two wings: the edge after it (`*_clockwise`) and the edge before it
//! (`*_counter_clockwise`) in that face's loop.
//!
//! Unlike [`crate::HalfEdgeMesh`], corners are welded: positions that map to
//! the same key under the configured [`crate::TwinMatching`] share one vertex.
//!
//! ## Example
//!
//! ```rust
//! use glam::Vec3;
//! use halfedge_mesh::WingedEdgeMesh;
//!
//! let mut mesh = WingedEdgeMesh::new();
//! mesh.add_face(&[Vec3::ZERO, Vec3::X, Vec3::Y]).unwrap();
//! mesh.add_face(&[Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y]).unwrap();
//!
//! assert_eq!(mesh.vertex_count(), 4);
//! assert_eq!(mesh.edge_count(), 5);
//! assert_eq!(mesh.boundary_edges().count(), 4);
//! ```

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use config::constants::MIN_POLYGON_VERTICES;

use crate::config::MeshConfig;
use crate::core::half_edge::{EdgeId, EntityKind, FaceId, VertexId};
use crate::error::{MeshError, MeshResult};
use crate::mesh::next_id;
use crate::mesh::segment::PointKey;

// =============================================================================
// RECORDS
// =============================================================================

/// Winged-edge vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WingedVertex {
    /// Own id
    pub id: VertexId,
    /// Position of the first corner welded into this vertex
    pub position: Vec3,
    /// An edge incident to this vertex
    pub edge: EdgeId,
}

/// Undirected edge with its two faces and four wings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WingedEdge {
    /// Own id
    pub id: EdgeId,
    /// Start of the edge as walked by the left face
    pub origin: VertexId,
    /// End of the edge as walked by the left face
    pub destination: VertexId,
    /// Face walking the edge from `origin` to `destination`
    pub face_left: FaceId,
    /// Face walking the edge from `destination` to `origin`, if any
    pub face_right: Option<FaceId>,
    /// Edge after this one around the left face
    pub left_clockwise: EdgeId,
    /// Edge before this one around the left face
    pub left_counter_clockwise: EdgeId,
    /// Edge after this one around the right face
    pub right_clockwise: Option<EdgeId>,
    /// Edge before this one around the right face
    pub right_counter_clockwise: Option<EdgeId>,
}

impl WingedEdge {
    /// Returns true when only one face uses this edge.
    #[inline]
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.face_right.is_none()
    }

    /// Edge after this one around `face`, or `None` if `face` is not a side.
    #[must_use]
    pub fn successor(&self, face: FaceId) -> Option<EdgeId> {
        if self.face_left == face {
            Some(self.left_clockwise)
        } else if self.face_right == Some(face) {
            self.right_clockwise
        } else {
            None
        }
    }

    /// Edge before this one around `face`, or `None` if `face` is not a side.
    #[must_use]
    pub fn predecessor(&self, face: FaceId) -> Option<EdgeId> {
        if self.face_left == face {
            Some(self.left_counter_clockwise)
        } else if self.face_right == Some(face) {
            self.right_counter_clockwise
        } else {
            None
        }
    }

    /// Vertex `face` leaves from when walking this edge.
    #[must_use]
    pub fn start_in(&self, face: FaceId) -> Option<VertexId> {
        if self.face_left == face {
            Some(self.origin)
        } else if self.face_right == Some(face) {
            Some(self.destination)
        } else {
            None
        }
    }

    /// The face on the other side from `face`.
    #[must_use]
    pub fn opposite_face(&self, face: FaceId) -> Option<FaceId> {
        if self.face_left == face {
            self.face_right
        } else if self.face_right == Some(face) {
            Some(self.face_left)
        } else {
            None
        }
    }
}

/// Winged-edge face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WingedFace {
    /// Own id
    pub id: FaceId,
    /// Edge the face loop starts at
    pub edge: EdgeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

// =============================================================================
// MESH
// =============================================================================

/// Winged-edge mesh with welded vertices and shared edges.
#[derive(Debug, Clone, Default)]
pub struct WingedEdgeMesh {
    vertices: Vec<WingedVertex>,
    edges: Vec<WingedEdge>,
    faces: Vec<WingedFace>,
    points: HashMap<PointKey, VertexId>,
    directed: HashMap<(VertexId, VertexId), EdgeId>,
    config: MeshConfig,
}

impl WingedEdgeMesh {
    /// Creates an empty mesh welding only identical positions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh using the given configuration.
    #[must_use]
    pub fn with_config(config: MeshConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Builds a mesh from polygons, failing on the first rejected one.
    pub fn from_polygons<P>(polygons: impl IntoIterator<Item = P>) -> MeshResult<Self>
    where
        P: AsRef<[Vec3]>,
    {
        let mut mesh = Self::new();
        for polygon in polygons {
            mesh.add_face(polygon.as_ref())?;
        }
        Ok(mesh)
    }

    /// Returns the configuration this mesh was built with.
    #[must_use]
    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Adds one face from its corner positions in walking order.
    ///
    /// Corners are welded onto existing vertices. Each side is either a new
    /// edge, with this face on its left, or the reverse of an existing
    /// boundary edge, which takes this face on its right.
    ///
    /// Rejects, without touching the mesh, a face with fewer than three
    /// corners, a non-finite corner, a zero-length side, a side the mesh
    /// already walks in the same direction, or a side whose edge already
    /// has two faces.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use halfedge_mesh::{EdgeId, WingedEdgeMesh};
    ///
    /// let mut mesh = WingedEdgeMesh::new();
    /// let face = mesh.add_face(&[Vec3::ZERO, Vec3::X, Vec3::Y]).unwrap();
    /// let edge = mesh.edge(EdgeId(0)).unwrap();
    /// assert_eq!(edge.face_left, face);
    /// assert_eq!(edge.left_clockwise, EdgeId(1));
    /// assert_eq!(edge.left_counter_clockwise, EdgeId(2));
    /// ```
    pub fn add_face(&mut self, positions: &[Vec3]) -> MeshResult<FaceId> {
        let count = positions.len();
        if count < MIN_POLYGON_VERTICES {
            return Err(MeshError::TooFewVertices {
                count,
                min: MIN_POLYGON_VERTICES,
            });
        }
        if let Some((index, &position)) = positions.iter().enumerate().find(|(_, p)| !p.is_finite())
        {
            return Err(MeshError::NonFinitePosition { index, position });
        }

        let matching = self.config.twin_matching;
        let keys: Vec<PointKey> = positions.iter().map(|&p| matching.key(p)).collect();
        let following = |i: usize| (i + 1) % count;
        if let Some(from) = (0..count).find(|&i| keys[i] == keys[following(i)]) {
            return Err(MeshError::DegenerateEdge {
                from,
                to: following(from),
            });
        }

        let vertex_base = self.vertices.len();
        let mut fresh: Vec<PointKey> = Vec::new();
        let corners: Vec<VertexId> = keys
            .iter()
            .map(|key| match self.points.get(key) {
                Some(&vertex) => vertex,
                None => {
                    let slot = fresh.iter().position(|k| k == key).unwrap_or_else(|| {
                        fresh.push(*key);
                        fresh.len() - 1
                    });
                    VertexId((vertex_base + slot) as u32)
                }
            })
            .collect();

        let edge_base = self.edges.len();
        let mut created = 0;
        let mut walked: Vec<(VertexId, VertexId)> = Vec::with_capacity(count);
        let mut sides: Vec<(EdgeId, Side)> = Vec::with_capacity(count);
        for i in 0..count {
            let (origin, destination) = (corners[i], corners[following(i)]);
            if walked.contains(&(origin, destination))
                || self.directed.contains_key(&(origin, destination))
            {
                return Err(MeshError::DuplicateHalfEdge {
                    origin: positions[i],
                    destination: positions[following(i)],
                    existing: None,
                });
            }
            let non_manifold = MeshError::NonManifoldEdge {
                origin: origin.0,
                destination: destination.0,
            };
            if walked.contains(&(destination, origin)) {
                return Err(non_manifold);
            }
            walked.push((origin, destination));

            match self.directed.get(&(destination, origin)) {
                Some(&edge) if !self.edges[edge.index()].is_boundary() => return Err(non_manifold),
                Some(&edge) => sides.push((edge, Side::Right)),
                None => {
                    sides.push((EdgeId((edge_base + created) as u32), Side::Left));
                    created += 1;
                }
            }
        }

        let face = FaceId(next_id(self.faces.len(), 1, EntityKind::Face)?);
        next_id(vertex_base, fresh.len(), EntityKind::Vertex)?;
        next_id(edge_base, created, EntityKind::Edge)?;

        // Nothing below can fail.
        let mut joined = 0;
        for i in 0..count {
            let (edge, side) = sides[i];
            let successor = sides[following(i)].0;
            let predecessor = sides[(i + count - 1) % count].0;
            let (origin, destination) = (corners[i], corners[following(i)]);

            if origin.index() == self.vertices.len() {
                self.vertices.push(WingedVertex {
                    id: origin,
                    position: positions[i],
                    edge,
                });
                self.points.insert(keys[i], origin);
            }

            match side {
                Side::Left => {
                    self.edges.push(WingedEdge {
                        id: edge,
                        origin,
                        destination,
                        face_left: face,
                        face_right: None,
                        left_clockwise: successor,
                        left_counter_clockwise: predecessor,
                        right_clockwise: None,
                        right_counter_clockwise: None,
                    });
                    self.directed.insert((origin, destination), edge);
                }
                Side::Right => {
                    let record = &mut self.edges[edge.index()];
                    record.face_right = Some(face);
                    record.right_clockwise = Some(successor);
                    record.right_counter_clockwise = Some(predecessor);
                    joined += 1;
                }
            }
        }
        self.faces.push(WingedFace {
            id: face,
            edge: sides[0].0,
        });

        tracing::debug!(%face, corners = count, shared = joined, "added winged face");
        Ok(face)
    }

    /// Adds several faces in order, stopping at the first rejected one.
    pub fn add_faces<P>(&mut self, polygons: impl IntoIterator<Item = P>) -> MeshResult<Vec<FaceId>>
    where
        P: AsRef<[Vec3]>,
    {
        polygons
            .into_iter()
            .map(|polygon| self.add_face(polygon.as_ref()))
            .collect()
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Gets a vertex by ID
    pub fn vertex(&self, id: VertexId) -> MeshResult<&WingedVertex> {
        self.vertices
            .get(id.index())
            .ok_or(MeshError::InvalidVertex(id))
    }

    /// Gets an edge by ID
    pub fn edge(&self, id: EdgeId) -> MeshResult<&WingedEdge> {
        self.edges.get(id.index()).ok_or(MeshError::InvalidEdge(id))
    }

    /// Gets a face by ID
    pub fn face(&self, id: FaceId) -> MeshResult<&WingedFace> {
        self.faces.get(id.index()).ok_or(MeshError::InvalidFace(id))
    }

    /// All vertices in id order
    #[must_use]
    pub fn vertices(&self) -> &[WingedVertex] {
        &self.vertices
    }

    /// All edges in id order
    #[must_use]
    pub fn edges(&self) -> &[WingedEdge] {
        &self.edges
    }

    /// All faces in id order
    #[must_use]
    pub fn faces(&self) -> &[WingedFace] {
        &self.faces
    }

    /// Returns the number of vertices
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of faces
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    // =========================================================================
    // TRAVERSAL
    // =========================================================================

    /// Edges around `face` in walking order, starting at its entry edge.
    pub fn face_edges(&self, id: FaceId) -> MeshResult<FaceEdges<'_>> {
        let face = self.face(id)?;
        Ok(FaceEdges {
            mesh: self,
            face: id,
            start: face.edge,
            current: Some(face.edge),
            remaining: self.edges.len(),
        })
    }

    /// Corner vertices of `face` in walking order.
    pub fn face_vertices(&self, id: FaceId) -> MeshResult<Vec<VertexId>> {
        Ok(self
            .face_edges(id)?
            .filter_map(|edge| edge.start_in(id))
            .collect())
    }

    /// Corner positions of `face` in walking order.
    pub fn polygon(&self, id: FaceId) -> MeshResult<Vec<Vec3>> {
        self.face_vertices(id)?
            .into_iter()
            .map(|vertex| self.vertex(vertex).map(|v| v.position))
            .collect()
    }

    /// Faces sharing an edge with `face`, once per shared edge.
    pub fn adjacent_faces(&self, id: FaceId) -> MeshResult<Vec<FaceId>> {
        Ok(self
            .face_edges(id)?
            .filter_map(|edge| edge.opposite_face(id))
            .collect())
    }

    /// Edges used by a single face.
    pub fn boundary_edges(&self) -> impl Iterator<Item = &WingedEdge> + '_ {
        self.edges.iter().filter(|edge| edge.is_boundary())
    }

    /// Returns true when every face has exactly three edges.
    #[must_use]
    pub fn is_all_triangles(&self) -> bool {
        self.faces.iter().all(|face| {
            self.face_edges(face.id)
                .map(|edges| edges.count() == 3)
                .unwrap_or(false)
        })
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Returns true when the mesh is a closed, consistently winged surface.
    ///
    /// Every edge must join two distinct vertices, have a face on both sides
    /// with both wings set, and reference only existing records. Every face
    /// loop must close, with each wing agreeing with its neighbour's.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let edges_valid = self.edges.iter().enumerate().all(|(slot, edge)| {
            edge.id.index() == slot
                && edge.origin != edge.destination
                && edge.origin.index() < self.vertices.len()
                && edge.destination.index() < self.vertices.len()
                && edge.face_right.is_some()
                && [
                    Some(edge.left_clockwise),
                    Some(edge.left_counter_clockwise),
                    edge.right_clockwise,
                    edge.right_counter_clockwise,
                ]
                .into_iter()
                .all(|wing| wing.is_some_and(|w| w.index() < self.edges.len()))
        });
        if !edges_valid {
            return false;
        }
        self.faces
            .iter()
            .enumerate()
            .all(|(slot, face)| face.id.index() == slot && self.loop_closes(face))
    }

    fn loop_closes(&self, face: &WingedFace) -> bool {
        let mut current = face.edge;
        for _ in 0..self.edges.len() {
            let Some(successor) = self.edges.get(current.index()).and_then(|e| e.successor(face.id))
            else {
                return false;
            };
            let back = self
                .edges
                .get(successor.index())
                .and_then(|e| e.predecessor(face.id));
            if back != Some(current) {
                return false;
            }
            if successor == face.edge {
                return true;
            }
            current = successor;
        }
        tracing::warn!(face = %face.id, "winged face loop did not close");
        false
    }
}

// =============================================================================
// TRAVERSAL
// =============================================================================

/// Iterator over the edges of one winged face.
///
/// Stops after at most `edge_count` steps, so corrupted wings cannot loop
/// forever.
#[derive(Debug, Clone)]
pub struct FaceEdges<'a> {
    mesh: &'a WingedEdgeMesh,
    face: FaceId,
    start: EdgeId,
    current: Option<EdgeId>,
    remaining: usize,
}

impl<'a> Iterator for FaceEdges<'a> {
    type Item = &'a WingedEdge;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        if self.remaining == 0 {
            tracing::warn!(face = %self.face, "winged face loop did not close, truncating");
            return None;
        }
        self.remaining -= 1;

        let Ok(edge) = self.mesh.edge(current) else {
            tracing::warn!(face = %self.face, edge = %current, "winged face loop hit a missing edge");
            return None;
        };
        match edge.successor(self.face) {
            Some(successor) if successor != self.start => self.current = Some(successor),
            Some(_) => {}
            None => {
                tracing::warn!(face = %self.face, edge = %current, "edge does not border the face");
                return None;
            }
        }
        Some(edge)
    }
}
