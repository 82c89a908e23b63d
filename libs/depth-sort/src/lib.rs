//! # Depth Sort
//!
//! Sorts point indices by their depth along the camera's view axis.
//!
//! [`DepthSorter`] transforms every point by `camera⁻¹ · model`, keys it on
//! the resulting z and runs a four-pass radix sort. Equal depths keep their
//! input order. [`AsyncSortManager`] runs the same sort on a background
//! worker, coalescing bursts of requests so only the newest one is served.
//!
//! ## Example
//!
//! ```rust
//! use depth_sort::{sort_once, SortOrder};
//! use glam::{Mat4, Vec3};
//!
//! let points = [Vec3::Z * 3.0, Vec3::Z, Vec3::Z * 2.0];
//! let sorted = sort_once(&points, Mat4::IDENTITY, Mat4::IDENTITY, SortOrder::Ascending).unwrap();
//! let order: Vec<u32> = sorted.iter().map(|entry| entry.index).collect();
//! assert_eq!(order, vec![1, 2, 0]);
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod radix;
pub mod sorter;

pub use config::SortConfig;
pub use error::{SortError, SortResult};
pub use manager::{AsyncSortManager, SortRequest, SortedIndices};
pub use radix::{float_sort_key, radix_sort, RadixSortable};
pub use sorter::{sort_once, DepthSorter, IndexedDistance, SortOrder};
