//! Background sort worker behaviour: coalescing, deduplication, shutdown.

use std::sync::Arc;
use std::time::Duration;

use depth_sort::{AsyncSortManager, SortConfig, SortError, SortOrder};
use glam::{Mat4, Vec3};
use tokio::time::{sleep, timeout, Instant};

const WAIT: Duration = Duration::from_secs(5);
const SETTLE: Duration = Duration::from_millis(100);

fn fast_config() -> SortConfig {
    SortConfig {
        sort_interval: Duration::from_millis(1),
        ..SortConfig::default()
    }
}

fn spawn(depths: &[f32]) -> AsyncSortManager {
    let points: Arc<[Vec3]> = depths.iter().map(|&z| Vec3::new(0.0, 0.0, z)).collect();
    AsyncSortManager::spawn(points, depths.len(), SortOrder::Ascending, fast_config()).unwrap()
}

fn shifted(z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, z))
}

#[tokio::test]
async fn publishes_sorted_indices() {
    let manager = spawn(&[3.0, 1.0, 4.0, 1.0, 5.0]);
    let mut results = manager.subscribe();

    manager.request_sort(Mat4::IDENTITY, Mat4::IDENTITY, 5).unwrap();
    timeout(WAIT, results.changed()).await.unwrap().unwrap();

    let sorted = manager.latest().unwrap();
    assert_eq!(sorted.request.count, 5);
    let order: Vec<u32> = sorted.indices.iter().map(|entry| entry.index).collect();
    assert_eq!(order, vec![1, 3, 0, 2, 4]);
}

#[tokio::test]
async fn sorts_a_prefix_of_the_buffer() {
    let manager = spawn(&[3.0, 1.0, 4.0, 1.0, 5.0]);
    let mut results = manager.subscribe();

    manager.request_sort(Mat4::IDENTITY, Mat4::IDENTITY, 3).unwrap();
    timeout(WAIT, results.changed()).await.unwrap().unwrap();

    let sorted = manager.latest().unwrap();
    let order: Vec<u32> = sorted.indices.iter().map(|entry| entry.index).collect();
    assert_eq!(order, vec![1, 0, 2]);
}

#[tokio::test]
async fn burst_of_requests_serves_only_the_newest() {
    let manager = spawn(&[1.0, 2.0, 3.0]);
    let mut results = manager.subscribe();

    // The current-thread runtime does not poll the worker until we await.
    manager.request_sort(shifted(1.0), Mat4::IDENTITY, 3).unwrap();
    manager.request_sort(shifted(2.0), Mat4::IDENTITY, 3).unwrap();
    manager.request_sort(shifted(3.0), Mat4::IDENTITY, 3).unwrap();

    timeout(WAIT, results.changed()).await.unwrap().unwrap();
    let sorted = results.borrow_and_update().clone().unwrap();
    assert_eq!(sorted.request.camera, shifted(3.0));

    sleep(SETTLE).await;
    assert!(!results.has_changed().unwrap());
}

#[tokio::test]
async fn identical_request_is_not_sorted_twice() {
    let manager = spawn(&[1.0, 2.0]);
    let mut results = manager.subscribe();

    manager.request_sort(Mat4::IDENTITY, Mat4::IDENTITY, 2).unwrap();
    timeout(WAIT, results.changed()).await.unwrap().unwrap();
    results.borrow_and_update();

    manager.request_sort(Mat4::IDENTITY, Mat4::IDENTITY, 2).unwrap();
    sleep(SETTLE).await;
    assert!(!results.has_changed().unwrap());

    manager.request_sort(shifted(4.0), Mat4::IDENTITY, 2).unwrap();
    timeout(WAIT, results.changed()).await.unwrap().unwrap();
    assert_eq!(manager.latest().unwrap().request.camera, shifted(4.0));
}

#[tokio::test]
async fn empty_and_oversized_requests_are_skipped() {
    let manager = spawn(&[1.0, 2.0]);
    let results = manager.subscribe();

    manager.request_sort(Mat4::IDENTITY, Mat4::IDENTITY, 0).unwrap();
    sleep(SETTLE).await;
    manager.request_sort(Mat4::IDENTITY, Mat4::IDENTITY, 3).unwrap();
    sleep(SETTLE).await;

    assert!(!results.has_changed().unwrap());
    assert!(manager.latest().is_none());
    assert!(manager.is_running());
}

#[tokio::test]
async fn shutdown_rejects_new_requests() {
    let mut manager = spawn(&[1.0]);
    assert!(manager.is_running());

    manager.shutdown();
    assert!(!manager.is_running());
    assert_eq!(
        manager.request_sort(Mat4::IDENTITY, Mat4::IDENTITY, 1),
        Err(SortError::WorkerStopped)
    );
}

#[tokio::test]
async fn dropping_the_manager_closes_the_result_channel() {
    let manager = spawn(&[1.0]);
    let mut results = manager.subscribe();
    drop(manager);

    assert!(timeout(WAIT, results.changed()).await.unwrap().is_err());
}

#[tokio::test]
async fn consecutive_sorts_respect_the_interval() {
    let interval = Duration::from_millis(200);
    let points: Arc<[Vec3]> = vec![Vec3::ZERO, Vec3::Z].into();
    let config = SortConfig {
        sort_interval: interval,
        ..SortConfig::default()
    };
    let manager = AsyncSortManager::spawn(points, 2, SortOrder::Ascending, config).unwrap();
    let mut results = manager.subscribe();

    manager.request_sort(shifted(1.0), Mat4::IDENTITY, 2).unwrap();
    timeout(WAIT, results.changed()).await.unwrap().unwrap();

    // Arrive after the worker has been idle past its next tick.
    sleep(Duration::from_millis(390)).await;
    manager.request_sort(shifted(2.0), Mat4::IDENTITY, 2).unwrap();
    timeout(WAIT, results.changed()).await.unwrap().unwrap();
    let second = Instant::now();

    manager.request_sort(shifted(3.0), Mat4::IDENTITY, 2).unwrap();
    timeout(WAIT, results.changed()).await.unwrap().unwrap();
    let gap = second.elapsed();

    assert_eq!(manager.latest().unwrap().request.camera, shifted(3.0));
    assert!(gap >= interval * 3 / 4, "sorts only {gap:?} apart");
}
