//! # Depth Sorter
//!
//! Computes camera-space depths for a point buffer and radix sorts the
//! point indices by them.
//!
//! The depth of a point `p` is the z component of `camera⁻¹ · model · (p, 1)`.
//! No perspective divide is applied.

use glam::{Mat4, Vec3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SortConfig;
use crate::error::{SortError, SortResult};
use crate::radix::{float_sort_key, radix_sort, RadixSortable};

/// A point index paired with its depth.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndexedDistance {
    /// Position of the point in the input buffer
    pub index: u32,
    /// Camera-space z of the point
    pub distance: f32,
}

impl RadixSortable for IndexedDistance {
    #[inline]
    fn key(&self, shift: u32) -> usize {
        ((float_sort_key(self.distance) >> shift) & 0xFF) as usize
    }
}

/// Direction of the depth ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Smallest z first. With a right-handed camera looking down -z this is
    /// farthest first.
    #[default]
    Ascending,
    /// Largest z first.
    Descending,
}

impl SortOrder {
    fn sign(self) -> f32 {
        match self {
            SortOrder::Ascending => 1.0,
            SortOrder::Descending => -1.0,
        }
    }
}

/// Reusable depth sorter sized for a fixed number of points.
///
/// # Examples
/// ```
/// use depth_sort::{DepthSorter, SortOrder};
/// use glam::{Mat4, Vec3};
///
/// let mut sorter = DepthSorter::new(4).unwrap();
/// let points = [Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0)];
/// let mut output = Vec::new();
/// sorter
///     .sort(&points, Mat4::IDENTITY, Mat4::IDENTITY, SortOrder::Descending, &mut output)
///     .unwrap();
/// assert_eq!(output[0].index, 0);
/// assert_eq!(output[0].distance, 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct DepthSorter {
    temporary: Vec<IndexedDistance>,
    config: SortConfig,
}

impl DepthSorter {
    /// Creates a sorter able to handle up to `capacity` points.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::ZeroCapacity`] for a zero capacity and
    /// [`SortError::CapacityExceeded`] when indices would not fit in a `u32`.
    pub fn new(capacity: usize) -> SortResult<Self> {
        Self::with_config(capacity, SortConfig::default())
    }

    /// Creates a sorter with an explicit configuration.
    pub fn with_config(capacity: usize, config: SortConfig) -> SortResult<Self> {
        if capacity == 0 {
            return Err(SortError::ZeroCapacity);
        }
        let max_points = u32::MAX as usize;
        if capacity > max_points {
            return Err(SortError::CapacityExceeded {
                count: capacity,
                capacity: max_points,
            });
        }
        Ok(Self {
            temporary: vec![IndexedDistance::default(); capacity],
            config,
        })
    }

    /// Number of points this sorter holds buffers for.
    pub fn capacity(&self) -> usize {
        self.temporary.len()
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Sorts the indices of `points` by depth into `output`.
    ///
    /// `output` is cleared and ends with exactly `points.len()` entries.
    /// Equal depths keep their input order in both directions, and the
    /// reported distances are always the true camera-space z.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::CapacityExceeded`] when there are more points
    /// than the sorter's capacity. `output` is left empty in that case.
    pub fn sort(
        &mut self,
        points: &[Vec3],
        camera: Mat4,
        model: Mat4,
        order: SortOrder,
        output: &mut Vec<IndexedDistance>,
    ) -> SortResult<()> {
        output.clear();
        let count = points.len();
        if count > self.capacity() {
            return Err(SortError::CapacityExceeded {
                count,
                capacity: self.capacity(),
            });
        }

        let model_view = camera.inverse() * model;
        let sign = order.sign();
        output.resize(count, IndexedDistance::default());
        let depth = |(index, (slot, point)): (usize, (&mut IndexedDistance, &Vec3))| {
            *slot = IndexedDistance {
                index: index as u32,
                distance: sign * (model_view * point.extend(1.0)).z,
            };
        };
        if self.config.is_parallel(count) {
            output
                .par_iter_mut()
                .zip(points.par_iter())
                .enumerate()
                .for_each(depth);
        } else {
            output.iter_mut().zip(points.iter()).enumerate().for_each(depth);
        }

        radix_sort(output, &mut self.temporary)?;

        if order == SortOrder::Descending {
            for entry in output.iter_mut() {
                entry.distance = -entry.distance;
            }
        }
        tracing::trace!(count, ?order, "depth sort finished");
        Ok(())
    }
}

/// Sorts `points` once with a sorter sized for exactly this call.
///
/// # Examples
/// ```
/// use depth_sort::{sort_once, SortOrder};
/// use glam::Mat4;
///
/// let sorted = sort_once(&[], Mat4::IDENTITY, Mat4::IDENTITY, SortOrder::Ascending).unwrap();
/// assert!(sorted.is_empty());
/// ```
pub fn sort_once(
    points: &[Vec3],
    camera: Mat4,
    model: Mat4,
    order: SortOrder,
) -> SortResult<Vec<IndexedDistance>> {
    let mut output = Vec::with_capacity(points.len());
    if points.is_empty() {
        return Ok(output);
    }
    let mut sorter = DepthSorter::new(points.len())?;
    sorter.sort(points, camera, model, order, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests;
