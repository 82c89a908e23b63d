//! Directed segment keys used to pair twin half-edges.

use std::collections::HashMap;

use glam::Vec3;

use crate::config::TwinMatching;
use crate::core::half_edge::HalfEdgeId;

/// Hashable stand-in for an endpoint position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct PointKey([i64; 3]);

impl TwinMatching {
    /// Maps a position to the key used for equality under this policy.
    pub(crate) fn key(&self, position: Vec3) -> PointKey {
        match *self {
            TwinMatching::Exact => PointKey(position.to_array().map(|c| {
                // -0.0 and 0.0 must hash alike
                let c = if c == 0.0 { 0.0 } else { c };
                i64::from(c.to_bits())
            })),
            TwinMatching::Quantized { tolerance } => PointKey(
                position
                    .to_array()
                    .map(|c| (f64::from(c) / f64::from(tolerance)).round() as i64),
            ),
        }
    }

    /// Returns true when both positions map to the same key.
    pub(crate) fn same_point(&self, a: Vec3, b: Vec3) -> bool {
        self.key(a) == self.key(b)
    }
}

/// Directed segment between two endpoint keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SegmentKey {
    pub origin: PointKey,
    pub destination: PointKey,
}

impl SegmentKey {
    pub fn new(origin: PointKey, destination: PointKey) -> Self {
        Self {
            origin,
            destination,
        }
    }

    pub fn reversed(self) -> Self {
        Self::new(self.destination, self.origin)
    }
}

/// Lookup from directed segment to the half-edge that covers it.
#[derive(Debug, Clone, Default)]
pub(crate) struct SegmentIndex {
    segments: HashMap<SegmentKey, HalfEdgeId>,
}

impl SegmentIndex {
    pub fn get(&self, segment: &SegmentKey) -> Option<HalfEdgeId> {
        self.segments.get(segment).copied()
    }

    pub fn insert(&mut self, segment: SegmentKey, half_edge: HalfEdgeId) {
        self.segments.insert(segment, half_edge);
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }
}
