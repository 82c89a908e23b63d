use glam::{Mat4, Vec2, Vec3};
use halfedge_mesh::HalfEdgeMesh;
use projection::{Camera, Projection3D, RasterOptions, Rasterizer};

fn cube() -> HalfEdgeMesh {
    let p = |x: f32, y: f32, z: f32| Vec3::new(x, y, z) - Vec3::splat(0.5);
    HalfEdgeMesh::from_polygons([
        [p(0., 0., 0.), p(0., 1., 0.), p(1., 1., 0.), p(1., 0., 0.)],
        [p(0., 0., 1.), p(1., 0., 1.), p(1., 1., 1.), p(0., 1., 1.)],
        [p(0., 0., 0.), p(1., 0., 0.), p(1., 0., 1.), p(0., 0., 1.)],
        [p(0., 1., 0.), p(0., 1., 1.), p(1., 1., 1.), p(1., 1., 0.)],
        [p(0., 0., 0.), p(0., 0., 1.), p(0., 1., 1.), p(0., 1., 0.)],
        [p(1., 0., 0.), p(1., 1., 0.), p(1., 1., 1.), p(1., 0., 1.)],
    ])
    .unwrap()
}

#[test]
fn identity_stack_passes_points_through() {
    let projection = Projection3D {
        size: Vec2::new(1024.0, 768.0),
        view_transform: Mat4::IDENTITY,
        projection_transform: Mat4::IDENTITY,
        clip_transform: Mat4::IDENTITY,
    };
    let mesh = cube();
    for polygon in mesh.polygons() {
        for point in polygon {
            assert_eq!(projection.world_space_to_screen_space(point), point.truncate());
        }
    }
}

#[test]
fn cube_seen_head_on_shows_one_face() {
    let camera = Camera::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y).unwrap();
    let projection = Projection3D::for_camera(&camera, Vec2::new(400.0, 400.0));
    let mut rasterizer = Rasterizer::new(projection, RasterOptions::default());
    assert_eq!(rasterizer.fill_mesh(&cube(), ()).unwrap(), 6);

    let drawn = rasterizer.rasterize();
    assert_eq!(drawn.len(), 1);
    assert_eq!(drawn[0].model_space_normal, Vec3::Z);
    assert!(drawn[0].contains(Vec2::ZERO));
}

#[test]
fn cube_seen_from_corner_shows_three_faces() {
    let camera = Camera::look_at(Vec3::splat(4.0), Vec3::ZERO, Vec3::Y).unwrap();
    let projection = Projection3D::for_camera(&camera, Vec2::new(400.0, 300.0));
    let mut rasterizer = Rasterizer::new(projection, RasterOptions::default());
    rasterizer.fill_mesh(&cube(), ()).unwrap();

    let drawn = rasterizer.rasterize();
    assert_eq!(drawn.len(), 3);
    for polygon in &drawn {
        assert!(!polygon.back_facing);
        assert!(polygon.points.iter().all(|p| p.is_finite()));
    }

    let top_centre = projection.project(Vec3::new(0.0, 0.0, 0.5));
    let hit = rasterizer.hit_test(top_centre).unwrap();
    assert_eq!(hit.model_space_normal, Vec3::Z);
}
