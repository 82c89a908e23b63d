//! Camera lenses: how camera space maps to clip space.
//!
//! Perspective and orthographic matrices follow the right-handed OpenGL
//! convention (camera looks down -Z, clip z in [-w, w]).

use glam::{Mat4, Vec2};
use serde::{Deserialize, Serialize};

use config::constants::{DEFAULT_FOVY_DEGREES, DEFAULT_Z_FAR, DEFAULT_Z_NEAR};

// =============================================================================
// PERSPECTIVE
// =============================================================================

/// Symmetric perspective frustum.
///
/// # Examples
/// ```
/// use projection::PerspectiveProjection;
/// let lens = PerspectiveProjection::default();
/// assert_eq!(lens.fovy_radians, std::f32::consts::FRAC_PI_2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveProjection {
    /// Vertical field of view in radians
    pub fovy_radians: f32,
    /// Near clip distance
    pub z_near: f32,
    /// Far clip distance
    pub z_far: f32,
}

impl PerspectiveProjection {
    /// Projection matrix for a viewport of `view_size`, aspect = width / height.
    #[must_use]
    pub fn matrix(&self, view_size: Vec2) -> Mat4 {
        let aspect = view_size.x / view_size.y;
        Mat4::perspective_rh_gl(self.fovy_radians, aspect, self.z_near, self.z_far)
    }
}

impl Default for PerspectiveProjection {
    fn default() -> Self {
        Self {
            fovy_radians: DEFAULT_FOVY_DEGREES.to_radians(),
            z_near: DEFAULT_Z_NEAR,
            z_far: DEFAULT_Z_FAR,
        }
    }
}

// =============================================================================
// ORTHOGRAPHIC
// =============================================================================

/// Axis-aligned orthographic box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrthographicProjection {
    /// Left plane
    pub left: f32,
    /// Right plane
    pub right: f32,
    /// Bottom plane
    pub bottom: f32,
    /// Top plane
    pub top: f32,
    /// Near plane
    pub near: f32,
    /// Far plane
    pub far: f32,
}

impl OrthographicProjection {
    /// Projection matrix; independent of the viewport size.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::orthographic_rh_gl(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}

impl Default for OrthographicProjection {
    /// The unit box, `[-1, 1]` on every axis.
    fn default() -> Self {
        Self {
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
            near: -1.0,
            far: 1.0,
        }
    }
}

// =============================================================================
// PROJECTION
// =============================================================================

/// Discriminant of [`Projection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectionKind {
    /// Explicit matrix
    Matrix,
    /// Perspective frustum
    Perspective,
    /// Orthographic box
    Orthographic,
}

impl ProjectionKind {
    /// Every kind, in declaration order.
    pub const ALL: [ProjectionKind; 3] = [
        ProjectionKind::Matrix,
        ProjectionKind::Perspective,
        ProjectionKind::Orthographic,
    ];
}

/// A camera lens.
///
/// # Examples
/// ```
/// use glam::{Mat4, Vec2};
/// use projection::{Projection, ProjectionKind};
///
/// let mut lens = Projection::default();
/// assert_eq!(lens.kind(), ProjectionKind::Perspective);
///
/// lens.set_kind(ProjectionKind::Matrix);
/// assert_eq!(lens.matrix(Vec2::new(800.0, 600.0)), Mat4::IDENTITY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// Explicit projection matrix
    Matrix(Mat4),
    /// Perspective frustum
    Perspective(PerspectiveProjection),
    /// Orthographic box
    Orthographic(OrthographicProjection),
}

impl Projection {
    /// Projection matrix for a viewport of `view_size`.
    #[must_use]
    pub fn matrix(&self, view_size: Vec2) -> Mat4 {
        match self {
            Projection::Matrix(matrix) => *matrix,
            Projection::Perspective(lens) => lens.matrix(view_size),
            Projection::Orthographic(lens) => lens.matrix(),
        }
    }

    /// Which kind of lens this is.
    #[must_use]
    pub fn kind(&self) -> ProjectionKind {
        match self {
            Projection::Matrix(_) => ProjectionKind::Matrix,
            Projection::Perspective(_) => ProjectionKind::Perspective,
            Projection::Orthographic(_) => ProjectionKind::Orthographic,
        }
    }

    /// Switches to another kind of lens with its default parameters.
    ///
    /// Setting the current kind keeps the existing parameters.
    pub fn set_kind(&mut self, kind: ProjectionKind) {
        if kind == self.kind() {
            return;
        }
        *self = Self::with_defaults(kind);
    }

    /// A lens of the given kind with default parameters.
    #[must_use]
    pub fn with_defaults(kind: ProjectionKind) -> Self {
        match kind {
            ProjectionKind::Matrix => Projection::Matrix(Mat4::IDENTITY),
            ProjectionKind::Perspective => Projection::Perspective(PerspectiveProjection::default()),
            ProjectionKind::Orthographic => {
                Projection::Orthographic(OrthographicProjection::default())
            }
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Perspective(PerspectiveProjection::default())
    }
}

#[cfg(test)]
mod tests;
