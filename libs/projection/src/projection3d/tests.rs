//! Tests for the transform stack.

use approx::assert_relative_eq;

use super::*;
use crate::projections::{OrthographicProjection, PerspectiveProjection, Projection};

/// Test identity transforms pass x and y through at w = 1
#[test]
fn test_identity_pass_through() {
    let projection = Projection3D::new(Vec2::new(100.0, 100.0));
    for point in [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.5, -2.0, 7.0),
        Vec3::new(-300.0, 42.0, -1.0),
    ] {
        assert_eq!(projection.project(point), point.truncate());
        assert_eq!(projection.world_space_to_clip_space(point).w, 1.0);
    }
}

/// Test the three transforms apply view first, clip last
#[test]
fn test_transform_order() {
    let mut projection = Projection3D::new(Vec2::ONE);
    projection.view_transform = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
    projection.projection_transform = Mat4::from_scale(Vec3::splat(2.0));
    projection.clip_transform = Mat4::from_translation(Vec3::new(0.0, 10.0, 0.0));

    // ((0,0,0) + (1,0,0)) * 2 + (0,10,0)
    assert_eq!(projection.project(Vec3::ZERO), Vec2::new(2.0, 10.0));
}

/// Test the perspective divide
#[test]
fn test_perspective_divide() {
    let mut projection = Projection3D::new(Vec2::ONE);
    projection.projection_transform = Mat4::from_cols(
        Vec4::X,
        Vec4::Y,
        Vec4::Z,
        Vec4::new(0.0, 0.0, 0.0, 2.0),
    );
    assert_eq!(projection.project(Vec3::new(4.0, 6.0, 0.0)), Vec2::new(2.0, 3.0));
}

/// Test points on the camera plane produce non-finite screen coordinates
#[test]
fn test_camera_plane_is_not_finite() {
    let camera = Camera::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y).unwrap();
    let projection = Projection3D::for_camera(&camera, Vec2::new(100.0, 100.0));
    let screen = projection.project(Vec3::new(1.0, 0.0, 5.0));
    assert!(!screen.is_finite());
}

/// Test visibility follows the sign of clip-space z
#[test]
fn test_is_visible() {
    let projection = Projection3D::new(Vec2::ONE);
    assert!(projection.is_visible(Vec3::new(0.0, 0.0, 0.0)));
    assert!(projection.is_visible(Vec3::new(0.0, 0.0, 1.0)));
    assert!(!projection.is_visible(Vec3::new(0.0, 0.0, -0.5)));
}

/// Test for_camera centres the screen and scales by half the viewport
#[test]
fn test_for_camera_orthographic_scale() {
    let camera = Camera::new(
        Mat4::IDENTITY,
        Projection::Orthographic(OrthographicProjection::default()),
    );
    let projection = Projection3D::for_camera(&camera, Vec2::new(400.0, 200.0));
    let screen = projection.project(Vec3::new(1.0, 1.0, 0.0));
    assert_relative_eq!(screen.x, 200.0);
    assert_relative_eq!(screen.y, 100.0);
}

/// Test unproject inverts the full chain
#[test]
fn test_unproject_round_trip() {
    let lens = PerspectiveProjection {
        fovy_radians: 1.2,
        z_near: 1.0,
        z_far: 30.0,
    };
    let transform = crate::camera::look_at(Vec3::new(-3.0, 2.0, 8.0), Vec3::new(0.0, 1.0, 0.0), Vec3::Y).unwrap();
    let camera = Camera::new(transform, Projection::Perspective(lens));
    let projection = Projection3D::for_camera(&camera, Vec2::new(640.0, 480.0));
    for point in [Vec3::ZERO, Vec3::new(1.0, 2.0, -1.0), Vec3::new(-0.5, 0.25, 2.0)] {
        let ndc = projection.world_space_to_ndc(point);
        let back = projection.unproject(ndc.truncate(), ndc.z).unwrap();
        assert_relative_eq!(back.x, point.x, epsilon = 1e-3);
        assert_relative_eq!(back.y, point.y, epsilon = 1e-3);
        assert_relative_eq!(back.z, point.z, epsilon = 1e-3);
    }
}

/// Test unproject reports singular stacks
#[test]
fn test_unproject_singular() {
    let mut projection = Projection3D::new(Vec2::ONE);
    projection.clip_transform = Mat4::ZERO;
    assert_eq!(
        projection.unproject(Vec2::ZERO, 0.0),
        Err(ProjectionError::SingularTransform)
    );
}
