//! Tests for camera placement.

use approx::assert_relative_eq;

use super::*;

/// Test look_at builds an orthonormal frame facing the target
#[test]
fn test_look_at_frame() {
    let eye = Vec3::new(3.0, 4.0, 5.0);
    let transform = look_at(eye, Vec3::ZERO, Vec3::Y).unwrap();

    let forward = -transform.z_axis.truncate();
    assert_relative_eq!(forward.dot((-eye).normalize()), 1.0, epsilon = 1e-5);
    assert_relative_eq!(transform.x_axis.truncate().length(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(transform.y_axis.truncate().length(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(transform.x_axis.truncate().dot(transform.y_axis.truncate()), 0.0, epsilon = 1e-5);
    assert!(transform.y_axis.y > 0.0);
}

/// Test the view matrix puts the target on the camera's -Z axis
#[test]
fn test_view_matrix_targets_minus_z() {
    let camera = Camera::look_at(Vec3::new(2.0, 0.0, 0.0), Vec3::ZERO, Vec3::Y).unwrap();
    let target = camera.view_matrix().transform_point3(Vec3::ZERO);
    assert_relative_eq!(target.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(target.y, 0.0, epsilon = 1e-5);
    assert_relative_eq!(target.z, -2.0, epsilon = 1e-5);
    assert_eq!(camera.position(), Vec3::new(2.0, 0.0, 0.0));
}

/// Test degenerate look-at inputs are rejected
#[test]
fn test_look_at_degenerate() {
    assert!(matches!(
        look_at(Vec3::ONE, Vec3::ONE, Vec3::Y),
        Err(ProjectionError::DegenerateLookAt { .. })
    ));
    assert!(look_at(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::Y).is_err());
}

/// Test viewport maps the NDC cube corners to the pixel rectangle
#[test]
fn test_viewport_corners() {
    let m = viewport(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0), 2.0);
    assert_eq!(m.transform_point3(Vec3::splat(-1.0)), Vec3::new(10.0, 20.0, 0.0));
    assert_eq!(m.transform_point3(Vec3::ONE), Vec3::new(110.0, 70.0, 2.0));
    assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(60.0, 45.0, 1.0));
}

/// Test the default camera sits at the origin with a perspective lens
#[test]
fn test_default_camera() {
    let camera = Camera::default();
    assert_eq!(camera.view_matrix(), Mat4::IDENTITY);
    assert_eq!(camera.projection, Projection::default());
}

/// Test the free helper and the camera constructor agree on argument order
#[test]
fn test_look_at_argument_order_matches_camera() {
    let eye = Vec3::new(1.0, 2.0, 6.0);
    let target = Vec3::new(0.0, 1.0, 0.0);
    let camera = Camera::look_at(eye, target, Vec3::Y).unwrap();
    assert_eq!(camera.transform, look_at(eye, target, Vec3::Y).unwrap());
    assert_eq!(camera.position(), eye);
}
