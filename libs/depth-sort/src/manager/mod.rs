//! # Async Sort Manager
//!
//! Background depth sorting for a fixed point buffer.
//!
//! Requests go into a single-slot `watch` channel, so a burst of camera
//! updates collapses into the newest one. The worker wakes on a change,
//! waits for the throttle interval, drops requests identical to the last
//! completed one, and runs the sort on tokio's blocking pool. Results are
//! published on a second `watch` channel; only the newest is retained.
//!
//! Cancellation takes effect between requests. A sort already running on a
//! blocking thread finishes, and its result is discarded.

use std::sync::Arc;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::SortConfig;
use crate::error::{SortError, SortResult};
use crate::sorter::{DepthSorter, IndexedDistance, SortOrder};

/// Camera state a sort is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SortRequest {
    /// Camera world transform
    pub camera: Mat4,
    /// Model transform applied to every point
    pub model: Mat4,
    /// Number of leading points to sort
    pub count: usize,
}

/// Indices sorted for a specific request.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedIndices {
    /// The request these indices answer
    pub request: SortRequest,
    /// Sorted point indices with their depths
    pub indices: Vec<IndexedDistance>,
}

type Latest = Option<Arc<SortedIndices>>;

/// Owns a background task that keeps a point buffer depth sorted.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use depth_sort::{AsyncSortManager, SortConfig, SortOrder};
/// use glam::{Mat4, Vec3};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let points: Arc<[Vec3]> = vec![Vec3::Z, Vec3::ZERO].into();
/// let manager = AsyncSortManager::spawn(points, 2, SortOrder::Ascending, SortConfig::default()).unwrap();
/// let mut results = manager.subscribe();
/// manager.request_sort(Mat4::IDENTITY, Mat4::IDENTITY, 2).unwrap();
/// results.changed().await.unwrap();
/// let sorted = manager.latest().unwrap();
/// assert_eq!(sorted.indices[0].index, 1);
/// # });
/// ```
#[derive(Debug)]
pub struct AsyncSortManager {
    requests: watch::Sender<Option<SortRequest>>,
    results: watch::Receiver<Latest>,
    worker: Option<JoinHandle<()>>,
}

impl AsyncSortManager {
    /// Starts the worker on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::NoRuntime`] outside a tokio runtime and
    /// [`SortError::ZeroCapacity`] for a zero capacity.
    pub fn spawn(
        points: Arc<[Vec3]>,
        capacity: usize,
        order: SortOrder,
        config: SortConfig,
    ) -> SortResult<Self> {
        let handle = Handle::try_current().map_err(|_| SortError::NoRuntime)?;
        let sorter = DepthSorter::with_config(capacity, config)?;
        let (requests, request_rx) = watch::channel(None);
        let (result_tx, results) = watch::channel(None);

        let worker = Worker {
            points,
            sorter: Some(sorter),
            order,
            last_completed: None,
        };
        let task = handle.spawn(worker.run(request_rx, result_tx, config));
        tracing::debug!(capacity, ?order, "depth sort worker started");

        Ok(Self {
            requests,
            results,
            worker: Some(task),
        })
    }

    /// Queues a sort, replacing any request that has not started yet.
    ///
    /// Never blocks.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::WorkerStopped`] after [`shutdown`](Self::shutdown)
    /// or if the worker has exited.
    pub fn request_sort(&self, camera: Mat4, model: Mat4, count: usize) -> SortResult<()> {
        if !self.is_running() {
            return Err(SortError::WorkerStopped);
        }
        self.requests
            .send(Some(SortRequest {
                camera,
                model,
                count,
            }))
            .map_err(|_| SortError::WorkerStopped)
    }

    /// Returns a receiver that is notified whenever a new result lands.
    pub fn subscribe(&self) -> watch::Receiver<Latest> {
        self.results.clone()
    }

    /// Returns the newest published result, if any.
    pub fn latest(&self) -> Latest {
        self.results.borrow().clone()
    }

    /// Returns `true` while the worker task is alive.
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Stops the worker. Later requests fail with
    /// [`SortError::WorkerStopped`].
    pub fn shutdown(&mut self) {
        if let Some(task) = self.worker.take() {
            task.abort();
            tracing::debug!("depth sort worker stopped");
        }
    }
}

impl Drop for AsyncSortManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct Worker {
    points: Arc<[Vec3]>,
    sorter: Option<DepthSorter>,
    order: SortOrder,
    last_completed: Option<SortRequest>,
}

impl Worker {
    async fn run(
        mut self,
        mut requests: watch::Receiver<Option<SortRequest>>,
        results: watch::Sender<Latest>,
        config: SortConfig,
    ) {
        let mut throttle = tokio::time::interval(config.sort_interval);
        // Delay restarts the period from the late tick, so two sorts never
        // start closer than one interval even after an idle gap.
        throttle.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while requests.changed().await.is_ok() {
            throttle.tick().await;
            let Some(request) = *requests.borrow_and_update() else {
                continue;
            };
            if !self.accepts(&request) {
                continue;
            }
            let Some(sorter) = self.sorter.take() else {
                break;
            };

            let points = Arc::clone(&self.points);
            let order = self.order;
            let job = tokio::task::spawn_blocking(move || {
                let mut sorter = sorter;
                let mut indices = Vec::with_capacity(request.count);
                let result = sorter.sort(
                    &points[..request.count],
                    request.camera,
                    request.model,
                    order,
                    &mut indices,
                );
                (sorter, result.map(|()| indices))
            });

            let (sorter, result) = match job.await {
                Ok(finished) => finished,
                Err(error) => {
                    tracing::error!(%error, "depth sort task failed");
                    break;
                }
            };
            self.sorter = Some(sorter);

            match result {
                Ok(indices) => {
                    self.last_completed = Some(request);
                    results.send_replace(Some(Arc::new(SortedIndices { request, indices })));
                }
                Err(error) => tracing::error!(%error, "depth sort failed"),
            }
        }
        tracing::debug!("depth sort worker exiting");
    }

    fn accepts(&self, request: &SortRequest) -> bool {
        if request.count == 0 || self.last_completed.as_ref() == Some(request) {
            return false;
        }
        let available = self.points.len();
        if request.count > available {
            let error = SortError::PointCountExceeded {
                count: request.count,
                available,
            };
            tracing::error!(%error, "skipping sort request");
            return false;
        }
        let capacity = self.sorter.as_ref().map_or(0, DepthSorter::capacity);
        if request.count > capacity {
            let error = SortError::CapacityExceeded {
                count: request.count,
                capacity,
            };
            tracing::error!(%error, "skipping sort request");
            return false;
        }
        true
    }
}
