//! Topology validation for half-edge meshes.
//!
//! Checks run in a fixed order, each assuming the previous ones passed:
//!
//! 1. face ids are unique and match their slots
//! 2. half-edge and vertex ids are unique and match their slots
//! 3. every face's entry half-edge exists, and half-edge references resolve
//! 4. every face loop closes within the half-edge count
//! 5. the loops partition the half-edges and agree with `face`
//! 6. twin links are symmetric
//! 7. twins connect the same endpoints in opposite directions
//! 8. every vertex's half-edge leaves that vertex

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::half_edge::{EntityKind, FaceId, HalfEdgeId, VertexId};
use crate::error::TopologyError;
use crate::mesh::HalfEdgeMesh;

// =============================================================================
// REPORT
// =============================================================================

/// Every topology issue found in one pass over a mesh.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use halfedge_mesh::HalfEdgeMesh;
///
/// let mesh = HalfEdgeMesh::from_polygons([[Vec3::ZERO, Vec3::X, Vec3::Y]]).unwrap();
/// let report = mesh.diagnose();
/// assert!(report.is_valid());
/// assert_eq!(report.to_string(), "mesh is valid");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Issues in the order they were detected
    pub issues: Vec<TopologyError>,
}

impl ValidationReport {
    /// Returns true when no issue was found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return f.write_str("mesh is valid");
        }
        write!(f, "{} topology issue(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

impl HalfEdgeMesh {
    /// Checks the mesh invariants, returning the first violation.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use halfedge_mesh::HalfEdgeMesh;
    ///
    /// let mesh = HalfEdgeMesh::from_polygons([[Vec3::ZERO, Vec3::X, Vec3::Y]]).unwrap();
    /// assert!(mesh.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), TopologyError> {
        let mut sink = Sink::fail_fast();
        let _ = Validator::new(self).run(&mut sink);
        match sink.issues.into_iter().next() {
            Some(issue) => Err(issue),
            None => Ok(()),
        }
    }

    /// Runs every check and collects all violations.
    #[must_use]
    pub fn diagnose(&self) -> ValidationReport {
        let mut sink = Sink::exhaustive();
        let _ = Validator::new(self).run(&mut sink);
        if !sink.issues.is_empty() {
            tracing::debug!(issues = sink.issues.len(), "mesh failed validation");
        }
        ValidationReport {
            issues: sink.issues,
        }
    }

    /// Returns true when [`HalfEdgeMesh::validate`] succeeds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Signals that a fail-fast run should stop.
struct Stop;

struct Sink {
    fail_fast: bool,
    issues: Vec<TopologyError>,
}

impl Sink {
    fn fail_fast() -> Self {
        Self {
            fail_fast: true,
            issues: Vec::new(),
        }
    }

    fn exhaustive() -> Self {
        Self {
            fail_fast: false,
            issues: Vec::new(),
        }
    }

    fn report(&mut self, issue: TopologyError) -> Result<(), Stop> {
        self.issues.push(issue);
        if self.fail_fast {
            Err(Stop)
        } else {
            Ok(())
        }
    }
}

/// A face loop walked during validation.
struct WalkedLoop {
    face: FaceId,
    half_edges: Vec<HalfEdgeId>,
    closed: bool,
}

struct Validator<'a> {
    mesh: &'a HalfEdgeMesh,
    loops: Vec<WalkedLoop>,
    /// Origin vertex of each half-edge, known for half-edges on closed loops
    origins: Vec<Option<VertexId>>,
}

impl<'a> Validator<'a> {
    fn new(mesh: &'a HalfEdgeMesh) -> Self {
        Self {
            mesh,
            loops: Vec::new(),
            origins: vec![None; mesh.half_edges.len()],
        }
    }

    fn run(&mut self, sink: &mut Sink) -> Result<(), Stop> {
        self.check_face_ids(sink)?;
        self.check_half_edge_ids(sink)?;
        self.check_references(sink)?;
        self.check_loops_close(sink)?;
        self.check_partition(sink)?;
        self.check_twin_symmetry(sink)?;
        self.check_twin_endpoints(sink)?;
        self.check_vertex_half_edges(sink)
    }

    fn check_face_ids(&self, sink: &mut Sink) -> Result<(), Stop> {
        let ids = self.mesh.faces.iter().map(|face| face.id.0);
        check_ids(EntityKind::Face, ids, sink)
    }

    fn check_half_edge_ids(&self, sink: &mut Sink) -> Result<(), Stop> {
        let ids = self.mesh.half_edges.iter().map(|he| he.id.0);
        check_ids(EntityKind::HalfEdge, ids, sink)?;
        let ids = self.mesh.vertices.iter().map(|vertex| vertex.id.0);
        check_ids(EntityKind::Vertex, ids, sink)
    }

    fn check_references(&self, sink: &mut Sink) -> Result<(), Stop> {
        let half_edge_count = self.mesh.half_edges.len();
        for face in &self.mesh.faces {
            if face.half_edge.index() >= half_edge_count {
                sink.report(TopologyError::MissingEntryHalfEdge {
                    face: face.id,
                    half_edge: face.half_edge,
                })?;
            }
        }
        for half_edge in &self.mesh.half_edges {
            if half_edge.vertex.index() >= self.mesh.vertices.len() {
                sink.report(TopologyError::DanglingVertex {
                    half_edge: half_edge.id,
                    vertex: half_edge.vertex,
                })?;
            }
            if half_edge.next.index() >= half_edge_count {
                sink.report(TopologyError::DanglingNext {
                    half_edge: half_edge.id,
                    next: half_edge.next,
                })?;
            }
        }
        Ok(())
    }

    fn check_loops_close(&mut self, sink: &mut Sink) -> Result<(), Stop> {
        let half_edges = &self.mesh.half_edges;
        for face in &self.mesh.faces {
            let Some(entry) = half_edges.get(face.half_edge.index()) else {
                continue;
            };
            let mut walked = vec![entry.id];
            let mut current = entry;
            let mut closed = false;
            while walked.len() <= half_edges.len() {
                let Some(next) = half_edges.get(current.next.index()) else {
                    break;
                };
                if next.id == entry.id {
                    closed = true;
                    break;
                }
                walked.push(next.id);
                current = next;
            }

            if closed && walked.len() < 3 {
                sink.report(TopologyError::ShortLoop {
                    face: face.id,
                    length: walked.len(),
                })?;
            } else if !closed && half_edges.get(current.next.index()).is_some() {
                sink.report(TopologyError::OpenLoop {
                    face: face.id,
                    steps: walked.len(),
                })?;
            }
            self.loops.push(WalkedLoop {
                face: face.id,
                half_edges: walked,
                closed,
            });
        }
        Ok(())
    }

    fn check_partition(&mut self, sink: &mut Sink) -> Result<(), Stop> {
        let half_edges = &self.mesh.half_edges;
        let mut owners: Vec<Option<FaceId>> = vec![None; half_edges.len()];

        for walked in &self.loops {
            let mut seen = HashSet::new();
            for &id in &walked.half_edges {
                // Open loops revisit their tail cycle
                if !seen.insert(id) {
                    continue;
                }
                match owners[id.index()] {
                    Some(first) => sink.report(TopologyError::SharedHalfEdge {
                        half_edge: id,
                        first,
                        second: walked.face,
                    })?,
                    None => owners[id.index()] = Some(walked.face),
                }
                let found = half_edges[id.index()].face;
                if found != walked.face {
                    sink.report(TopologyError::FaceMismatch {
                        half_edge: id,
                        expected: walked.face,
                        found,
                    })?;
                }
            }

            if walked.closed {
                let len = walked.half_edges.len();
                for (i, &id) in walked.half_edges.iter().enumerate() {
                    let previous = walked.half_edges[(i + len - 1) % len];
                    self.origins[id.index()] = Some(half_edges[previous.index()].vertex);
                }
            }
        }

        for (slot, owner) in owners.iter().enumerate() {
            if owner.is_none() {
                sink.report(TopologyError::OrphanedHalfEdge(half_edges[slot].id))?;
            }
        }
        Ok(())
    }

    fn check_twin_symmetry(&self, sink: &mut Sink) -> Result<(), Stop> {
        let half_edges = &self.mesh.half_edges;
        for half_edge in half_edges {
            let Some(twin) = half_edge.twin else {
                continue;
            };
            match half_edges.get(twin.index()) {
                None => sink.report(TopologyError::DanglingTwin {
                    half_edge: half_edge.id,
                    twin,
                })?,
                Some(other) if other.twin != Some(half_edge.id) => {
                    sink.report(TopologyError::AsymmetricTwin {
                        half_edge: half_edge.id,
                        twin,
                        back: other.twin,
                    })?;
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn check_twin_endpoints(&self, sink: &mut Sink) -> Result<(), Stop> {
        let matching = self.mesh.config.twin_matching;
        let position = |id: VertexId| self.mesh.vertices.get(id.index()).map(|v| v.position);

        for half_edge in &self.mesh.half_edges {
            let Some(twin) = half_edge.twin.and_then(|t| self.mesh.half_edges.get(t.index())) else {
                continue;
            };
            // Report each pair once
            if twin.id < half_edge.id {
                continue;
            }
            let (Some(origin), Some(twin_origin)) =
                (self.origins[half_edge.id.index()], self.origins[twin.id.index()])
            else {
                continue;
            };
            let ends = (
                position(origin),
                position(half_edge.vertex),
                position(twin_origin),
                position(twin.vertex),
            );
            let (Some(a), Some(b), Some(c), Some(d)) = ends else {
                continue;
            };
            if !(matching.same_point(a, d) && matching.same_point(b, c)) {
                sink.report(TopologyError::TwinEndpointMismatch {
                    half_edge: half_edge.id,
                    twin: twin.id,
                })?;
            }
        }
        Ok(())
    }

    fn check_vertex_half_edges(&self, sink: &mut Sink) -> Result<(), Stop> {
        for vertex in &self.mesh.vertices {
            let leaves = self
                .origins
                .get(vertex.half_edge.index())
                .copied()
                .flatten()
                .is_some_and(|origin| origin == vertex.id);
            if !leaves {
                sink.report(TopologyError::VertexHalfEdgeMismatch {
                    vertex: vertex.id,
                    half_edge: vertex.half_edge,
                })?;
            }
        }
        Ok(())
    }
}

fn check_ids(
    kind: EntityKind,
    ids: impl Iterator<Item = u32>,
    sink: &mut Sink,
) -> Result<(), Stop> {
    let mut seen = HashSet::new();
    for (slot, id) in ids.enumerate() {
        if !seen.insert(id) {
            sink.report(TopologyError::DuplicateId { kind, id })?;
        } else if id as usize != slot {
            sink.report(TopologyError::MisplacedId { kind, id, slot })?;
        }
    }
    Ok(())
}
