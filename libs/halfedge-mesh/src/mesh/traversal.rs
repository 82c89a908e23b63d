//! Bounded iterators over face loops.

use crate::core::half_edge::{FaceId, HalfEdge, HalfEdgeId};
use crate::mesh::HalfEdgeMesh;

/// Iterator over the half-edges of one face, starting at its entry.
///
/// Stops after at most `half_edge_count` steps, so a corrupted `next` chain
/// cannot loop forever.
#[derive(Debug, Clone)]
pub struct FaceLoop<'a> {
    mesh: &'a HalfEdgeMesh,
    face: FaceId,
    start: HalfEdgeId,
    current: Option<HalfEdgeId>,
    remaining: usize,
}

impl<'a> FaceLoop<'a> {
    pub(crate) fn new(mesh: &'a HalfEdgeMesh, face: FaceId, start: HalfEdgeId) -> Self {
        Self {
            mesh,
            face,
            start,
            current: Some(start),
            remaining: mesh.half_edge_count(),
        }
    }
}

impl<'a> Iterator for FaceLoop<'a> {
    type Item = &'a HalfEdge;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        if self.remaining == 0 {
            tracing::warn!(face = %self.face, "face loop did not close, truncating");
            return None;
        }
        self.remaining -= 1;

        let Ok(half_edge) = self.mesh.half_edge(current) else {
            tracing::warn!(face = %self.face, half_edge = %current, "face loop hit a missing half-edge");
            return None;
        };
        if half_edge.next != self.start {
            self.current = Some(half_edge.next);
        }
        Some(half_edge)
    }
}
