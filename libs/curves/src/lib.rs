//! # Curves
//!
//! Fits smooth cubic Bézier splines through 2D points using Hobby's
//! algorithm in the form given by Jackowski.
//!
//! ## Example
//!
//! ```rust
//! use curves::hobby;
//! use glam::DVec2;
//!
//! let knots = [DVec2::ZERO, DVec2::new(1.0, 1.0), DVec2::new(2.0, 0.0)];
//! let spline = hobby(&knots, 0.0).unwrap();
//! assert_eq!(spline.len(), 3 * knots.len() - 2);
//! assert_eq!(spline[3], knots[1]);
//! ```

pub mod error;
pub mod hobby;
pub mod thomas;

pub use error::{CurveError, CurveResult};
pub use hobby::{hobby, hobby_default, rho};
pub use thomas::thomas;
