//! # Half-Edge Mesh
//!
//! Arena-backed half-edge mesh built one polygon at a time.
//!
//! ## Conventions
//!
//! For a face inserted from positions `p[0..n]`:
//!
//! - half-edge `i` runs from `p[i-1]` to `p[i]` (wrapping), so its `vertex`
//!   is the destination `p[i]`
//! - the face enters through half-edge `0`, so walking the loop reproduces
//!   the input order
//! - each face gets its own `n` vertices; shared corners are not merged,
//!   only shared edges are linked through `twin`

use glam::Vec3;

use config::constants::MIN_POLYGON_VERTICES;

use crate::config::MeshConfig;
use crate::core::half_edge::{EntityKind, Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId};
use crate::error::{MeshError, MeshResult};

pub(crate) mod segment;
pub mod traversal;
pub mod validation;

use segment::{SegmentIndex, SegmentKey};
pub use traversal::FaceLoop;

// =============================================================================
// MESH
// =============================================================================

/// Main half-edge mesh data structure
#[derive(Debug, Clone, Default)]
pub struct HalfEdgeMesh {
    vertices: Vec<Vertex>,
    half_edges: Vec<HalfEdge>,
    faces: Vec<Face>,
    segments: SegmentIndex,
    config: MeshConfig,
}

impl HalfEdgeMesh {
    /// Creates a new empty mesh with exact twin matching.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh using the given configuration.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use halfedge_mesh::{HalfEdgeMesh, MeshConfig};
    ///
    /// let mut mesh = HalfEdgeMesh::with_config(MeshConfig::welded(1.0e-3).unwrap());
    /// mesh.insert_face(&[Vec3::ZERO, Vec3::X, Vec3::Y]).unwrap();
    /// mesh.insert_face(&[Vec3::new(1.0001, 0.0, 0.0), Vec3::ONE, Vec3::Y]).unwrap();
    /// assert_eq!(mesh.boundary_half_edges().count(), 4);
    /// ```
    #[must_use]
    pub fn with_config(config: MeshConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Builds a mesh from a list of polygons, stopping at the first rejected one.
    pub fn from_polygons<P>(polygons: impl IntoIterator<Item = P>) -> MeshResult<Self>
    where
        P: AsRef<[Vec3]>,
    {
        let mut mesh = Self::new();
        mesh.insert_faces(polygons)?;
        Ok(mesh)
    }

    /// Assembles a mesh from raw records without checking them.
    ///
    /// Use [`HalfEdgeMesh::validate`] or [`HalfEdgeMesh::diagnose`] afterwards
    /// to inspect the result. Twin lookup for later insertions is rebuilt
    /// from every face loop that closes.
    #[must_use]
    pub fn from_parts(
        vertices: Vec<Vertex>,
        half_edges: Vec<HalfEdge>,
        faces: Vec<Face>,
        config: MeshConfig,
    ) -> Self {
        let mut mesh = Self {
            vertices,
            half_edges,
            faces,
            segments: SegmentIndex::default(),
            config,
        };
        mesh.rebuild_segments();
        mesh
    }

    /// Returns the configuration this mesh was built with.
    #[must_use]
    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    // =========================================================================
    // INSERTION
    // =========================================================================

    /// Appends one face given its corners in loop order.
    ///
    /// Every half-edge whose reversed segment is already present gets linked
    /// to it as twins. The face is rejected, leaving the mesh untouched, when
    /// it has fewer than three corners, a non-finite corner, a zero-length
    /// edge, or a directed edge that already exists.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use halfedge_mesh::{HalfEdgeId, HalfEdgeMesh};
    ///
    /// let mut mesh = HalfEdgeMesh::new();
    /// let face = mesh.insert_face(&[Vec3::ZERO, Vec3::X, Vec3::Y]).unwrap();
    /// let entry = mesh.face(face).unwrap().half_edge;
    /// assert_eq!(entry, HalfEdgeId(0));
    /// assert_eq!(mesh.destination(entry).unwrap().position, Vec3::ZERO);
    /// ```
    pub fn insert_face(&mut self, positions: &[Vec3]) -> MeshResult<FaceId> {
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
        let keys: Vec<_> = positions.iter().map(|&p| matching.key(p)).collect();
        let previous = |i: usize| (i + count - 1) % count;

        let mut segments = Vec::with_capacity(count);
        for i in 0..count {
            let from = previous(i);
            if keys[from] == keys[i] {
                return Err(MeshError::DegenerateEdge { from, to: i });
            }
            let segment = SegmentKey::new(keys[from], keys[i]);
            let existing = self.segments.get(&segment);
            if existing.is_some() || segments.contains(&segment) {
                return Err(MeshError::DuplicateHalfEdge {
                    origin: positions[from],
                    destination: positions[i],
                    existing,
                });
            }
            segments.push(segment);
        }

        let face = FaceId(next_id(self.faces.len(), 1, EntityKind::Face)?);
        let first_vertex = next_id(self.vertices.len(), count, EntityKind::Vertex)?;
        let first_half_edge = next_id(self.half_edges.len(), count, EntityKind::HalfEdge)?;

        // Nothing below can fail.
        let half_edge_at = |i: usize| HalfEdgeId(first_half_edge + (i % count) as u32);
        for (i, &position) in positions.iter().enumerate() {
            let vertex = VertexId(first_vertex + i as u32);
            self.vertices.push(Vertex {
                id: vertex,
                position,
                half_edge: half_edge_at(i + 1),
            });
            self.half_edges.push(HalfEdge {
                id: half_edge_at(i),
                vertex,
                next: half_edge_at(i + 1),
                twin: None,
                face,
            });
        }
        self.faces.push(Face {
            id: face,
            half_edge: half_edge_at(0),
        });

        let mut linked = 0;
        for (i, segment) in segments.into_iter().enumerate() {
            let id = half_edge_at(i);
            if let Some(twin) = self.segments.get(&segment.reversed()) {
                if self.half_edges[twin.index()].twin.is_none() {
                    self.half_edges[twin.index()].twin = Some(id);
                    self.half_edges[id.index()].twin = Some(twin);
                    linked += 1;
                }
            }
            self.segments.insert(segment, id);
        }

        tracing::debug!(%face, corners = count, twins = linked, "inserted face");
        Ok(face)
    }

    /// Inserts several faces in order, stopping at the first rejected one.
    ///
    /// Faces inserted before the failure remain in the mesh.
    pub fn insert_faces<P>(&mut self, polygons: impl IntoIterator<Item = P>) -> MeshResult<Vec<FaceId>>
    where
        P: AsRef<[Vec3]>,
    {
        polygons
            .into_iter()
            .map(|polygon| self.insert_face(polygon.as_ref()))
            .collect()
    }

    fn rebuild_segments(&mut self) {
        self.segments.clear();
        let matching = self.config.twin_matching;
        let mut entries = Vec::new();
        for face in &self.faces {
            let Ok(loop_edges) = self.face_half_edges(face.id) else {
                continue;
            };
            let loop_edges: Vec<&HalfEdge> = loop_edges.collect();
            let closes = loop_edges
                .last()
                .is_some_and(|last| last.next == face.half_edge);
            if !closes {
                continue;
            }
            for (i, half_edge) in loop_edges.iter().enumerate() {
                let previous = loop_edges[(i + loop_edges.len() - 1) % loop_edges.len()];
                let (Ok(origin), Ok(destination)) =
                    (self.vertex(previous.vertex), self.vertex(half_edge.vertex))
                else {
                    continue;
                };
                let segment =
                    SegmentKey::new(matching.key(origin.position), matching.key(destination.position));
                entries.push((segment, half_edge.id));
            }
        }
        for (segment, id) in entries {
            self.segments.insert(segment, id);
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Gets a vertex by ID
    pub fn vertex(&self, id: VertexId) -> MeshResult<&Vertex> {
        self.vertices
            .get(id.index())
            .ok_or(MeshError::InvalidVertex(id))
    }

    /// Gets a half-edge by ID
    pub fn half_edge(&self, id: HalfEdgeId) -> MeshResult<&HalfEdge> {
        self.half_edges
            .get(id.index())
            .ok_or(MeshError::InvalidHalfEdge(id))
    }

    /// Gets a face by ID
    pub fn face(&self, id: FaceId) -> MeshResult<&Face> {
        self.faces.get(id.index()).ok_or(MeshError::InvalidFace(id))
    }

    /// All vertices in id order
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All half-edges in id order
    #[must_use]
    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    /// All faces in id order
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Returns the number of vertices
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of half-edges
    #[must_use]
    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    /// Returns the number of faces
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true when the mesh has no faces
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Vertex a half-edge points to.
    pub fn destination(&self, id: HalfEdgeId) -> MeshResult<&Vertex> {
        let half_edge = self.half_edge(id)?;
        self.vertex(half_edge.vertex)
    }

    /// Half-edge preceding `id` in its face loop.
    pub fn previous(&self, id: HalfEdgeId) -> MeshResult<HalfEdgeId> {
        let start = self.half_edge(id)?;
        let mut current = start.next;
        for _ in 0..self.half_edges.len() {
            let half_edge = self.half_edge(current)?;
            if half_edge.next == id {
                return Ok(current);
            }
            current = half_edge.next;
        }
        Err(MeshError::UnclosedLoop(id))
    }

    /// Vertex a half-edge leaves from.
    pub fn origin(&self, id: HalfEdgeId) -> MeshResult<&Vertex> {
        let previous = self.previous(id)?;
        self.destination(previous)
    }

    /// Iterates the half-edges of a face starting at its entry.
    pub fn face_half_edges(&self, id: FaceId) -> MeshResult<FaceLoop<'_>> {
        let face = self.face(id)?;
        Ok(FaceLoop::new(self, id, face.half_edge))
    }

    /// Corner vertex ids of one face in loop order.
    pub fn face_vertices(&self, id: FaceId) -> MeshResult<Vec<VertexId>> {
        Ok(self
            .face_half_edges(id)?
            .map(|half_edge| half_edge.vertex)
            .collect())
    }

    /// Corner positions of one face in loop order.
    pub fn polygon(&self, id: FaceId) -> MeshResult<Vec<Vec3>> {
        self.face_half_edges(id)?
            .map(|half_edge| self.vertex(half_edge.vertex).map(|v| v.position))
            .collect()
    }

    /// Corner positions of every face, in face id order.
    ///
    /// For a mesh built by [`HalfEdgeMesh::insert_face`] each polygon equals
    /// the positions that were inserted. Loops that do not close, or that
    /// reference missing vertices, are truncated at the problem.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use halfedge_mesh::HalfEdgeMesh;
    ///
    /// let square = [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y];
    /// let mesh = HalfEdgeMesh::from_polygons([square]).unwrap();
    /// assert_eq!(mesh.polygons().next().unwrap(), square.to_vec());
    /// ```
    pub fn polygons(&self) -> impl Iterator<Item = Vec<Vec3>> + '_ {
        self.faces.iter().map(move |face| {
            FaceLoop::new(self, face.id, face.half_edge)
                .map_while(|half_edge| self.vertex(half_edge.vertex).ok())
                .map(|vertex| vertex.position)
                .collect()
        })
    }

    /// Half-edges with no twin.
    pub fn boundary_half_edges(&self) -> impl Iterator<Item = &HalfEdge> + '_ {
        self.half_edges.iter().filter(|he| he.is_boundary())
    }

    /// Checks if the mesh is closed (no boundary edges)
    #[must_use]
    pub fn is_closed(&self) -> bool {
        !self.half_edges.is_empty() && self.half_edges.iter().all(|he| he.twin.is_some())
    }
}

/// First id of a block of `count` new records, if it fits in `u32`.
pub(crate) fn next_id(len: usize, count: usize, kind: EntityKind) -> MeshResult<u32> {
    len.checked_add(count)
        .and_then(|end| u32::try_from(end).ok())
        .map(|_| len as u32)
        .ok_or(MeshError::IndexOverflow(kind))
}
