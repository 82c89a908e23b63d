//! # Compact Half-Edge Mesh
//!
//! Array-based half-edge mesh after Alumbaugh & Jiao, "Compact array-based
//! mesh data structures" (IMR 2005), with zero-based indices.
//!
//! Only topology is stored. Interior half-edges are implicit in the element
//! connectivity: half-edge `(f, i)` runs from corner `i` of face `f` to
//! corner `i + 1`. Border half-edges are explicit and run opposite the
//! interior half-edge they pair with.
//!
//! ## Arrays
//!
//! - `ec`: corner vertices of every face
//! - `v2e`: one half-edge leaving each vertex, a border one if it exists
//! - `e2e`: opposite of every interior half-edge
//! - `b2e`: opposite of every border half-edge

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use config::constants::MIN_POLYGON_VERTICES;

use crate::error::{MeshError, MeshResult};

/// Half-edge handle in a [`CompactHalfEdgeMesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompactHalfEdge {
    /// The `local`-th half-edge of `face`
    Interior {
        /// Face index
        face: u32,
        /// Corner index within the face
        local: u32,
    },
    /// Border half-edge with the given index
    Border(u32),
}

impl CompactHalfEdge {
    /// Shorthand for an interior half-edge.
    #[must_use]
    pub fn interior(face: u32, local: u32) -> Self {
        CompactHalfEdge::Interior { face, local }
    }
}

/// Compact array-based half-edge mesh.
///
/// # Examples
/// ```
/// use halfedge_mesh::{CompactHalfEdge, CompactHalfEdgeMesh};
///
/// // Two triangles sharing the edge 1-2
/// let mesh = CompactHalfEdgeMesh::from_connectivity(vec![vec![0, 1, 2], vec![2, 1, 3]], 4).unwrap();
/// let shared = CompactHalfEdge::interior(0, 1);
/// assert_eq!(mesh.opposite(shared), Some(CompactHalfEdge::interior(1, 0)));
/// assert_eq!(mesh.border_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactHalfEdgeMesh {
    ec: Vec<Vec<u32>>,
    v2e: Vec<CompactHalfEdge>,
    e2e: Vec<Vec<CompactHalfEdge>>,
    b2e: Vec<CompactHalfEdge>,
    /// Origin and destination vertex of each border half-edge
    border_ends: Vec<(u32, u32)>,
    border_next: Vec<u32>,
    border_previous: Vec<u32>,
}

impl CompactHalfEdgeMesh {
    /// Builds the mesh from per-face vertex lists.
    ///
    /// Border half-edges are numbered in the order their interior partners
    /// appear when scanning faces and corners in order.
    pub fn from_connectivity(ec: Vec<Vec<u32>>, vertex_count: usize) -> MeshResult<Self> {
        let mut directed: HashMap<(u32, u32), CompactHalfEdge> = HashMap::new();
        for (face, corners) in ec.iter().enumerate() {
            let m = corners.len();
            if m < MIN_POLYGON_VERTICES {
                return Err(MeshError::TooFewVertices {
                    count: m,
                    min: MIN_POLYGON_VERTICES,
                });
            }
            if let Some(&vertex) = corners.iter().find(|&&v| v as usize >= vertex_count) {
                return Err(MeshError::ConnectivityOutOfRange {
                    face,
                    vertex,
                    vertex_count,
                });
            }
            for local in 0..m {
                let (origin, destination) = (corners[local], corners[(local + 1) % m]);
                if origin == destination {
                    return Err(MeshError::DegenerateEdge {
                        from: local,
                        to: (local + 1) % m,
                    });
                }
                let he = CompactHalfEdge::interior(face as u32, local as u32);
                if directed.insert((origin, destination), he).is_some() {
                    return Err(MeshError::NonManifoldEdge {
                        origin,
                        destination,
                    });
                }
            }
        }

        let mut e2e = Vec::with_capacity(ec.len());
        let mut b2e = Vec::new();
        let mut border_ends = Vec::new();
        for (face, corners) in ec.iter().enumerate() {
            let m = corners.len();
            let row = (0..m)
                .map(|local| {
                    let (origin, destination) = (corners[local], corners[(local + 1) % m]);
                    directed
                        .get(&(destination, origin))
                        .copied()
                        .unwrap_or_else(|| {
                            let border = b2e.len() as u32;
                            b2e.push(CompactHalfEdge::interior(face as u32, local as u32));
                            border_ends.push((destination, origin));
                            CompactHalfEdge::Border(border)
                        })
                })
                .collect();
            e2e.push(row);
        }

        let mut border_from: HashMap<u32, u32> = HashMap::new();
        for (border, &(origin, _)) in border_ends.iter().enumerate() {
            if border_from.insert(origin, border as u32).is_some() {
                return Err(MeshError::NonManifoldVertex(origin));
            }
        }
        let mut border_next = Vec::with_capacity(border_ends.len());
        let mut border_previous = vec![0; border_ends.len()];
        for (border, &(_, destination)) in border_ends.iter().enumerate() {
            let next = *border_from
                .get(&destination)
                .ok_or(MeshError::NonManifoldVertex(destination))?;
            border_next.push(next);
            border_previous[next as usize] = border as u32;
        }

        let mut v2e: Vec<Option<CompactHalfEdge>> = vec![None; vertex_count];
        for (&origin, &border) in &border_from {
            v2e[origin as usize] = Some(CompactHalfEdge::Border(border));
        }
        for (face, corners) in ec.iter().enumerate() {
            for (local, &vertex) in corners.iter().enumerate() {
                v2e[vertex as usize]
                    .get_or_insert(CompactHalfEdge::interior(face as u32, local as u32));
            }
        }
        let v2e = v2e
            .into_iter()
            .enumerate()
            .map(|(vertex, he)| he.ok_or(MeshError::IsolatedVertex(vertex as u32)))
            .collect::<MeshResult<Vec<_>>>()?;

        tracing::debug!(
            faces = ec.len(),
            vertices = vertex_count,
            borders = b2e.len(),
            "built compact half-edge mesh"
        );
        Ok(Self {
            ec,
            v2e,
            e2e,
            b2e,
            border_ends,
            border_next,
            border_previous,
        })
    }

    // =========================================================================
    // ARRAYS
    // =========================================================================

    /// Element connectivity.
    #[must_use]
    pub fn connectivity(&self) -> &[Vec<u32>] {
        &self.ec
    }

    /// Vertex to half-edge table.
    #[must_use]
    pub fn v2e(&self) -> &[CompactHalfEdge] {
        &self.v2e
    }

    /// Opposite of each interior half-edge.
    #[must_use]
    pub fn e2e(&self) -> &[Vec<CompactHalfEdge>] {
        &self.e2e
    }

    /// Opposite of each border half-edge.
    #[must_use]
    pub fn b2e(&self) -> &[CompactHalfEdge] {
        &self.b2e
    }

    /// Number of faces
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.ec.len()
    }

    /// Number of vertices
    #[must_use]
    pub fn total_vertex_count(&self) -> usize {
        self.v2e.len()
    }

    /// Number of border half-edges
    #[must_use]
    pub fn border_count(&self) -> usize {
        self.b2e.len()
    }

    // =========================================================================
    // INCIDENCE
    // =========================================================================

    /// The `local`-th half-edge of `face`.
    #[must_use]
    pub fn half_edge(&self, face: u32, local: u32) -> Option<CompactHalfEdge> {
        self.vertex(face, local)
            .map(|_| CompactHalfEdge::interior(face, local))
    }

    /// Number of corners of `face`.
    #[must_use]
    pub fn vertex_count(&self, face: u32) -> Option<usize> {
        self.ec.get(face as usize).map(Vec::len)
    }

    /// The `local`-th corner of `face`.
    #[must_use]
    pub fn vertex(&self, face: u32, local: u32) -> Option<u32> {
        self.ec.get(face as usize)?.get(local as usize).copied()
    }

    /// Vertex a half-edge leaves.
    #[must_use]
    pub fn origin(&self, he: CompactHalfEdge) -> Option<u32> {
        match he {
            CompactHalfEdge::Interior { face, local } => self.vertex(face, local),
            CompactHalfEdge::Border(b) => self.border_ends.get(b as usize).map(|&(o, _)| o),
        }
    }

    /// Vertex a half-edge points to.
    #[must_use]
    pub fn destination(&self, he: CompactHalfEdge) -> Option<u32> {
        match he {
            CompactHalfEdge::Interior { .. } => self.next(he).and_then(|n| self.origin(n)),
            CompactHalfEdge::Border(b) => self.border_ends.get(b as usize).map(|&(_, d)| d),
        }
    }

    /// Face of an interior half-edge; `None` for border half-edges.
    #[must_use]
    pub fn face(&self, he: CompactHalfEdge) -> Option<u32> {
        match he {
            CompactHalfEdge::Interior { face, .. } => Some(face),
            CompactHalfEdge::Border(_) => None,
        }
    }

    /// A half-edge leaving `vertex`.
    #[must_use]
    pub fn half_edge_of_vertex(&self, vertex: u32) -> Option<CompactHalfEdge> {
        self.v2e.get(vertex as usize).copied()
    }

    // =========================================================================
    // ADJACENCY
    // =========================================================================

    /// Half-edge running the other way along the same edge.
    #[must_use]
    pub fn opposite(&self, he: CompactHalfEdge) -> Option<CompactHalfEdge> {
        match he {
            CompactHalfEdge::Interior { face, local } => self
                .e2e
                .get(face as usize)?
                .get(local as usize)
                .copied(),
            CompactHalfEdge::Border(b) => self.b2e.get(b as usize).copied(),
        }
    }

    /// Next half-edge around the face, or along the boundary.
    #[must_use]
    pub fn next(&self, he: CompactHalfEdge) -> Option<CompactHalfEdge> {
        match he {
            CompactHalfEdge::Interior { face, local } => {
                let m = self.vertex_count(face)? as u32;
                (local < m).then(|| CompactHalfEdge::interior(face, (local + 1) % m))
            }
            CompactHalfEdge::Border(b) => self
                .border_next
                .get(b as usize)
                .map(|&n| CompactHalfEdge::Border(n)),
        }
    }

    /// Previous half-edge around the face, or along the boundary.
    #[must_use]
    pub fn previous(&self, he: CompactHalfEdge) -> Option<CompactHalfEdge> {
        match he {
            CompactHalfEdge::Interior { face, local } => {
                let m = self.vertex_count(face)? as u32;
                (local < m).then(|| CompactHalfEdge::interior(face, (local + m - 1) % m))
            }
            CompactHalfEdge::Border(b) => self
                .border_previous
                .get(b as usize)
                .map(|&p| CompactHalfEdge::Border(p)),
        }
    }

    // =========================================================================
    // BOUNDARY CLASSIFICATION
    // =========================================================================

    /// Returns true for border half-edges.
    #[must_use]
    pub fn is_border(&self, he: CompactHalfEdge) -> bool {
        matches!(he, CompactHalfEdge::Border(_))
    }

    /// Returns true when `vertex` lies on the boundary.
    #[must_use]
    pub fn is_border_vertex(&self, vertex: u32) -> bool {
        self.half_edge_of_vertex(vertex)
            .is_some_and(|he| self.is_border(he))
    }
}
