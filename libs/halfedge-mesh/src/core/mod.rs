//! Core records shared by the mesh representations.

pub mod half_edge;

pub use half_edge::*;
