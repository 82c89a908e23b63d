use super::*;
use approx::assert_relative_eq;

fn points_at_depths(depths: &[f32]) -> Vec<Vec3> {
    depths.iter().map(|&z| Vec3::new(0.0, 0.0, z)).collect()
}

fn indices(output: &[IndexedDistance]) -> Vec<u32> {
    output.iter().map(|entry| entry.index).collect()
}

fn sort(points: &[Vec3], order: SortOrder) -> Vec<IndexedDistance> {
    let mut sorter = DepthSorter::new(points.len().max(1)).unwrap();
    let mut output = Vec::new();
    sorter
        .sort(points, Mat4::IDENTITY, Mat4::IDENTITY, order, &mut output)
        .unwrap();
    output
}

#[test]
fn five_point_ascending_sort() {
    let points = points_at_depths(&[3.0, 1.0, 4.0, 1.0, 5.0]);
    let output = sort(&points, SortOrder::Ascending);

    let distances: Vec<f32> = output.iter().map(|entry| entry.distance).collect();
    assert_eq!(distances, vec![1.0, 1.0, 3.0, 4.0, 5.0]);
    assert_eq!(indices(&output), vec![1, 3, 0, 2, 4]);
}

#[test]
fn descending_sort_reports_true_distances() {
    let points = points_at_depths(&[3.0, 1.0, 4.0, 1.0, 5.0]);
    let output = sort(&points, SortOrder::Descending);

    let distances: Vec<f32> = output.iter().map(|entry| entry.distance).collect();
    assert_eq!(distances, vec![5.0, 4.0, 3.0, 1.0, 1.0]);
    // Ties keep input order in this direction too.
    assert_eq!(indices(&output), vec![4, 2, 0, 1, 3]);
}

#[test]
fn negative_depths_sort_below_positive() {
    let points = points_at_depths(&[2.0, -3.0, 0.0, -0.5]);
    let output = sort(&points, SortOrder::Ascending);
    assert_eq!(indices(&output), vec![1, 3, 2, 0]);
}

#[test]
fn signed_zeros_tie() {
    let points = points_at_depths(&[0.0, -0.0, 0.0]);
    let output = sort(&points, SortOrder::Ascending);
    assert_eq!(indices(&output), vec![0, 1, 2]);
}

#[test]
fn depth_is_measured_in_camera_space() {
    // Camera at z = 10 looking down -z; model lifts everything by 2.
    let camera = Mat4::from_translation(Vec3::new(0.0, 0.0, 10.0));
    let model = Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0));
    let points = points_at_depths(&[0.0, 5.0]);

    let mut sorter = DepthSorter::new(2).unwrap();
    let mut output = Vec::new();
    sorter
        .sort(&points, camera, model, SortOrder::Ascending, &mut output)
        .unwrap();

    assert_eq!(indices(&output), vec![0, 1]);
    assert_relative_eq!(output[0].distance, -8.0);
    assert_relative_eq!(output[1].distance, -3.0);
}

#[test]
fn matches_reference_stable_sort() {
    let mut rng = fastrand::Rng::with_seed(11);
    let points: Vec<Vec3> = (0..500)
        .map(|_| Vec3::new(rng.f32(), rng.f32(), (rng.i32(-20..20) as f32) * 0.5))
        .collect();
    let output = sort(&points, SortOrder::Ascending);

    let mut expected: Vec<u32> = (0..points.len() as u32).collect();
    expected.sort_by(|&a, &b| points[a as usize].z.total_cmp(&points[b as usize].z));
    assert_eq!(indices(&output), expected);
}

#[test]
fn repeated_sorts_are_identical() {
    let mut rng = fastrand::Rng::with_seed(3);
    let points: Vec<Vec3> = (0..300)
        .map(|_| Vec3::new(0.0, 0.0, rng.i32(-5..5) as f32))
        .collect();

    let mut sorter = DepthSorter::new(points.len()).unwrap();
    let mut first = Vec::new();
    let mut second = Vec::new();
    sorter
        .sort(&points, Mat4::IDENTITY, Mat4::IDENTITY, SortOrder::Ascending, &mut first)
        .unwrap();
    sorter
        .sort(&points, Mat4::IDENTITY, Mat4::IDENTITY, SortOrder::Ascending, &mut second)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn parallel_and_sequential_paths_agree() {
    let mut rng = fastrand::Rng::with_seed(5);
    let points: Vec<Vec3> = (0..1_000)
        .map(|_| Vec3::new(rng.f32(), rng.f32(), rng.f32() * 100.0 - 50.0))
        .collect();
    let camera = Mat4::from_rotation_y(0.3) * Mat4::from_translation(Vec3::new(1.0, 2.0, 30.0));

    let mut sequential = DepthSorter::new(points.len()).unwrap();
    let mut parallel = DepthSorter::with_config(
        points.len(),
        SortConfig {
            parallel_depth_threshold: 0,
            ..SortConfig::default()
        },
    )
    .unwrap();

    let mut a = Vec::new();
    let mut b = Vec::new();
    sequential
        .sort(&points, camera, Mat4::IDENTITY, SortOrder::Descending, &mut a)
        .unwrap();
    parallel
        .sort(&points, camera, Mat4::IDENTITY, SortOrder::Descending, &mut b)
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn zero_capacity_is_rejected() {
    assert_eq!(DepthSorter::new(0).unwrap_err(), SortError::ZeroCapacity);
}

#[test]
fn too_many_points_is_an_error() {
    let mut sorter = DepthSorter::new(2).unwrap();
    let mut output = vec![IndexedDistance::default(); 5];
    let points = points_at_depths(&[1.0, 2.0, 3.0]);
    let result = sorter.sort(
        &points,
        Mat4::IDENTITY,
        Mat4::IDENTITY,
        SortOrder::Ascending,
        &mut output,
    );
    assert_eq!(
        result,
        Err(SortError::CapacityExceeded {
            count: 3,
            capacity: 2
        })
    );
    assert!(output.is_empty());
}

#[test]
fn empty_and_single_point_sorts() {
    let mut sorter = DepthSorter::new(4).unwrap();
    let mut output = vec![IndexedDistance::default(); 3];
    sorter
        .sort(&[], Mat4::IDENTITY, Mat4::IDENTITY, SortOrder::Ascending, &mut output)
        .unwrap();
    assert!(output.is_empty());

    sorter
        .sort(
            &[Vec3::new(1.0, 2.0, 7.0)],
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            SortOrder::Descending,
            &mut output,
        )
        .unwrap();
    assert_eq!(
        output,
        vec![IndexedDistance {
            index: 0,
            distance: 7.0
        }]
    );
}

#[test]
fn sort_once_sizes_its_own_sorter() {
    let points = points_at_depths(&[2.0, 1.0]);
    let output = sort_once(&points, Mat4::IDENTITY, Mat4::IDENTITY, SortOrder::Ascending).unwrap();
    assert_eq!(indices(&output), vec![1, 0]);
}
