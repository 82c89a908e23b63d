//! # Projection
//!
//! World-to-screen projection for polygon rendering.
//!
//! A [`Projection3D`] holds three transforms applied in order: view
//! (world to camera), projection (camera to clip) and clip (clip to screen).
//! Screen points are the clip-space x and y after the perspective divide.
//!
//! ## Example
//!
//! ```rust
//! use glam::{Vec2, Vec3};
//! use projection::Projection3D;
//!
//! let projection = Projection3D::new(Vec2::new(640.0, 480.0));
//! let screen = projection.project(Vec3::new(0.25, -0.5, 3.0));
//! assert_eq!(screen, Vec2::new(0.25, -0.5));
//! ```

pub mod camera;
pub mod error;
pub mod projection3d;
pub mod projections;
pub mod rasterizer;

pub use camera::{look_at, viewport, Camera};
pub use error::{ProjectionError, ProjectionResult};
pub use projection3d::Projection3D;
pub use projections::{OrthographicProjection, PerspectiveProjection, Projection, ProjectionKind};
pub use rasterizer::{Paint, RasterOptions, Rasterizer, ScreenPolygon};
