//! Tests for the arena record types.

use super::*;

/// Test ids map to their arena slot
#[test]
fn test_id_index_is_slot() {
    assert_eq!(VertexId(7).index(), 7);
    assert_eq!(HalfEdgeId(0).index(), 0);
    assert_eq!(FaceId(u32::MAX).index(), u32::MAX as usize);
}

/// Test ids render with a short kind prefix
#[test]
fn test_id_display() {
    assert_eq!(VertexId(3).to_string(), "v3");
    assert_eq!(HalfEdgeId(12).to_string(), "h12");
    assert_eq!(FaceId(0).to_string(), "f0");
    assert_eq!(EdgeId(5).to_string(), "e5");
    assert_eq!(EntityKind::HalfEdge.to_string(), "half-edge");
    assert_eq!(EntityKind::Edge.to_string(), "edge");
}

/// Test ids order by numeric value
#[test]
fn test_id_ordering() {
    let mut ids = vec![FaceId(2), FaceId(0), FaceId(1)];
    ids.sort();
    assert_eq!(ids, vec![FaceId(0), FaceId(1), FaceId(2)]);
}

/// Test boundary detection follows the twin link
#[test]
fn test_half_edge_boundary_flag() {
    let mut he = HalfEdge {
        id: HalfEdgeId(0),
        vertex: VertexId(1),
        next: HalfEdgeId(1),
        twin: None,
        face: FaceId(0),
    };
    assert!(he.is_boundary());
    he.twin = Some(HalfEdgeId(4));
    assert!(!he.is_boundary());
}
