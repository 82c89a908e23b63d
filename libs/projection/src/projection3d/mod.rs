//! # Projection3D
//!
//! The view, projection and clip transform stack.
//!
//! `clip · projection · view` is applied to `(p, 1)`; screen coordinates are
//! the resulting x and y divided by w. The stack performs no clipping, so
//! points on or behind the camera plane yield infinite or NaN screen
//! coordinates. Callers filter those (see [`crate::Rasterizer`]).

use glam::{Mat4, Vec2, Vec3, Vec4, Vec4Swizzles};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::{ProjectionError, ProjectionResult};

/// World-to-screen transform stack for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection3D {
    /// Viewport size in pixels
    pub size: Vec2,
    /// World to camera
    pub view_transform: Mat4,
    /// Camera to clip
    pub projection_transform: Mat4,
    /// Clip to screen
    pub clip_transform: Mat4,
}

impl Projection3D {
    /// Identity transforms for a viewport of `size`.
    #[must_use]
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            view_transform: Mat4::IDENTITY,
            projection_transform: Mat4::IDENTITY,
            clip_transform: Mat4::IDENTITY,
        }
    }

    /// Stack for viewing through `camera` into a viewport of `size`.
    ///
    /// The clip transform scales by half the viewport, putting the screen
    /// origin at the viewport centre.
    ///
    /// # Examples
    /// ```
    /// use glam::{Vec2, Vec3};
    /// use projection::{Camera, Projection3D};
    ///
    /// let camera = Camera::look_at(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO, Vec3::Y).unwrap();
    /// let projection = Projection3D::for_camera(&camera, Vec2::new(200.0, 200.0));
    /// let centre = projection.project(Vec3::ZERO);
    /// assert!(centre.length() < 1e-4);
    /// ```
    #[must_use]
    pub fn for_camera(camera: &Camera, size: Vec2) -> Self {
        Self {
            size,
            view_transform: camera.view_matrix(),
            projection_transform: camera.projection_matrix(size),
            clip_transform: Mat4::from_scale(Vec3::new(size.x / 2.0, size.y / 2.0, 1.0)),
        }
    }

    /// Combined `clip · projection · view` matrix.
    #[must_use]
    pub fn world_to_clip(&self) -> Mat4 {
        self.clip_transform * self.projection_transform * self.view_transform
    }

    /// Homogeneous clip-space position of a world point.
    #[must_use]
    pub fn world_space_to_clip_space(&self, point: Vec3) -> Vec4 {
        self.world_to_clip() * point.extend(1.0)
    }

    /// Screen position of a world point.
    ///
    /// Not finite when the point lies on the camera plane.
    #[must_use]
    pub fn world_space_to_screen_space(&self, point: Vec3) -> Vec2 {
        let clip = self.world_space_to_clip_space(point);
        clip.xy() / clip.w
    }

    /// Alias for [`Projection3D::world_space_to_screen_space`].
    #[inline]
    #[must_use]
    pub fn project(&self, point: Vec3) -> Vec2 {
        self.world_space_to_screen_space(point)
    }

    /// Screen position plus normalized depth (`z / w`) of a world point.
    #[must_use]
    pub fn world_space_to_ndc(&self, point: Vec3) -> Vec3 {
        let clip = self.world_space_to_clip_space(point);
        clip.xyz() / clip.w
    }

    /// Returns true when the clip-space z of `point` is not negative.
    #[must_use]
    pub fn is_visible(&self, point: Vec3) -> bool {
        self.world_space_to_clip_space(point).z >= 0.0
    }

    /// World point that projects to `screen` at normalized depth `z`.
    ///
    /// Inverse of [`Projection3D::world_space_to_ndc`].
    ///
    /// # Examples
    /// ```
    /// use glam::{Vec2, Vec3};
    /// use projection::{look_at, Camera, PerspectiveProjection, Projection, Projection3D};
    ///
    /// let lens = PerspectiveProjection { fovy_radians: 1.0, z_near: 1.0, z_far: 20.0 };
    /// let transform = look_at(Vec3::new(1.0, 2.0, 6.0), Vec3::ZERO, Vec3::Y).unwrap();
    /// let camera = Camera::new(transform, Projection::Perspective(lens));
    /// let projection = Projection3D::for_camera(&camera, Vec2::new(320.0, 240.0));
    /// let p = Vec3::new(0.5, -0.5, 1.0);
    /// let ndc = projection.world_space_to_ndc(p);
    /// let back = projection.unproject(ndc.truncate(), ndc.z).unwrap();
    /// assert!((back - p).length() < 1e-3);
    /// ```
    pub fn unproject(&self, screen: Vec2, z: f32) -> ProjectionResult<Vec3> {
        let matrix = self.world_to_clip();
        let determinant = matrix.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            return Err(ProjectionError::SingularTransform);
        }
        let world = matrix.inverse() * Vec4::new(screen.x, screen.y, z, 1.0);
        Ok(world.xyz() / world.w)
    }
}

impl Default for Projection3D {
    fn default() -> Self {
        Self::new(Vec2::ONE)
    }
}

#[cfg(test)]
mod tests;
