//! # Config Crate
//!
//! Centralized configuration constants for the mesh topology, projection and
//! depth-sort kernel. Every tunable number lives here so the library crates
//! stay free of literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{GlobalConfig, MIN_POLYGON_VERTICES, SORT_THROTTLE_INTERVAL};
//!
//! // A face needs at least a triangle's worth of corners
//! let corners = [[0.0_f32; 3]; 3];
//! assert!(corners.len() >= MIN_POLYGON_VERTICES);
//!
//! // The default configuration uses exact twin matching and ~30 Hz sorting
//! let cfg = GlobalConfig::default();
//! assert!(cfg.weld_tolerance.is_none());
//! assert_eq!(cfg.sort_interval, SORT_THROTTLE_INTERVAL);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated Snapshots**: Runtime overrides go through [`constants::GlobalConfig::new`]
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
