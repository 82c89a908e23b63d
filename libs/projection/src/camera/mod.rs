//! Camera placement helpers.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, ProjectionResult};
use crate::projections::Projection;

/// A camera: where it sits in the world and how it sees.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use projection::Camera;
///
/// let camera = Camera::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y).unwrap();
/// let eye_space = camera.view_matrix().transform_point3(Vec3::ZERO);
/// assert!((eye_space.z + 5.0).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    /// World-from-camera transform
    pub transform: Mat4,
    /// Lens
    pub projection: Projection,
}

impl Camera {
    /// Creates a camera with the given world transform and lens.
    #[must_use]
    pub fn new(transform: Mat4, projection: Projection) -> Self {
        Self {
            transform,
            projection,
        }
    }

    /// Camera at `eye` looking at `target` with the default lens.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> ProjectionResult<Self> {
        Ok(Self::new(look_at(eye, target, up)?, Projection::default()))
    }

    /// Camera-from-world transform.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.transform.inverse()
    }

    /// Lens matrix for a viewport of `view_size`.
    #[must_use]
    pub fn projection_matrix(&self, view_size: Vec2) -> Mat4 {
        self.projection.matrix(view_size)
    }

    /// Camera position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }
}

/// World-from-camera transform placing a camera at `eye` facing `target`.
///
/// The camera looks down its local -Z with local +Y as close to `up` as
/// possible. Fails when `eye == target` or the view direction is parallel
/// to `up`.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use projection::look_at;
///
/// let transform = look_at(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y).unwrap();
/// assert_eq!(transform.w_axis.truncate(), Vec3::new(0.0, 0.0, 3.0));
/// assert!(look_at(Vec3::Y, Vec3::ZERO, Vec3::Y).is_err());
/// ```
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> ProjectionResult<Mat4> {
    let degenerate = || ProjectionError::DegenerateLookAt { eye, target, up };
    let forward = (target - eye).try_normalize().ok_or_else(degenerate)?;
    let side = forward.cross(up).try_normalize().ok_or_else(degenerate)?;
    let up = side.cross(forward);

    Ok(Mat4::from_cols(
        side.extend(0.0),
        up.extend(0.0),
        (-forward).extend(0.0),
        eye.extend(1.0),
    ))
}

/// Maps normalized device coordinates onto a pixel rectangle.
///
/// x and y in `[-1, 1]` land in `[origin, origin + size]`; z in `[-1, 1]`
/// lands in `[0, depth]`.
///
/// # Examples
/// ```
/// use glam::{Vec2, Vec3};
/// use projection::viewport;
///
/// let m = viewport(Vec2::ZERO, Vec2::new(640.0, 480.0), 1.0);
/// assert_eq!(m.transform_point3(Vec3::new(-1.0, 1.0, -1.0)), Vec3::new(0.0, 480.0, 0.0));
/// ```
#[must_use]
pub fn viewport(origin: Vec2, size: Vec2, depth: f32) -> Mat4 {
    let half = Vec3::new(size.x / 2.0, size.y / 2.0, depth / 2.0);
    Mat4::from_translation(Vec3::new(origin.x, origin.y, 0.0) + half) * Mat4::from_scale(half)
}

#[cfg(test)]
mod tests;
