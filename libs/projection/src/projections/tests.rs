//! Tests for lens matrices and kind switching.

use approx::assert_relative_eq;
use glam::{Vec3, Vec4};

use super::*;

/// Test switching kinds resets parameters to defaults
#[test]
fn test_set_kind_resets_defaults() {
    let mut lens = Projection::Perspective(PerspectiveProjection {
        fovy_radians: 0.3,
        z_near: 2.0,
        z_far: 5.0,
    });

    lens.set_kind(ProjectionKind::Orthographic);
    assert_eq!(lens, Projection::Orthographic(OrthographicProjection::default()));

    lens.set_kind(ProjectionKind::Perspective);
    assert_eq!(
        lens,
        Projection::Perspective(PerspectiveProjection {
            fovy_radians: std::f32::consts::FRAC_PI_2,
            z_near: 0.01,
            z_far: 1000.0,
        })
    );

    lens.set_kind(ProjectionKind::Matrix);
    assert_eq!(lens, Projection::Matrix(Mat4::IDENTITY));
}

/// Test setting the current kind keeps custom parameters
#[test]
fn test_set_same_kind_is_noop() {
    let custom = Projection::Orthographic(OrthographicProjection {
        left: -4.0,
        right: 4.0,
        bottom: -3.0,
        top: 3.0,
        near: 0.1,
        far: 10.0,
    });
    let mut lens = custom;
    lens.set_kind(ProjectionKind::Orthographic);
    assert_eq!(lens, custom);
}

/// Test kind() round-trips through with_defaults for every kind
#[test]
fn test_kind_matches_defaults() {
    for kind in ProjectionKind::ALL {
        assert_eq!(Projection::with_defaults(kind).kind(), kind);
    }
}

/// Test the perspective matrix maps near and far planes to clip depth -1 and 1
#[test]
fn test_perspective_depth_range() {
    let lens = PerspectiveProjection {
        fovy_radians: 1.0,
        z_near: 1.0,
        z_far: 10.0,
    };
    let matrix = lens.matrix(Vec2::new(200.0, 100.0));

    let near = matrix * Vec4::new(0.0, 0.0, -1.0, 1.0);
    let far = matrix * Vec4::new(0.0, 0.0, -10.0, 1.0);
    assert_relative_eq!(near.z / near.w, -1.0, epsilon = 1e-5);
    assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-5);
}

/// Test the perspective matrix divides x by the aspect ratio
#[test]
fn test_perspective_aspect() {
    let lens = PerspectiveProjection::default();
    let matrix = lens.matrix(Vec2::new(200.0, 100.0));
    // 90 degree fovy: y scale is 1
    assert_relative_eq!(matrix.y_axis.y, 1.0, epsilon = 1e-6);
    assert_relative_eq!(matrix.x_axis.x, 0.5, epsilon = 1e-6);
}

/// Test the default orthographic box keeps x and y and flips z
#[test]
fn test_orthographic_unit_box() {
    let matrix = Projection::with_defaults(ProjectionKind::Orthographic).matrix(Vec2::ONE);
    let p = matrix.transform_point3(Vec3::new(0.5, -0.25, 0.75));
    assert_relative_eq!(p.x, 0.5);
    assert_relative_eq!(p.y, -0.25);
    assert_relative_eq!(p.z, -0.75);
}
