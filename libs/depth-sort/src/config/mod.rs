//! Sort-level configuration building on the shared `config` crate.

use std::time::Duration;

use config::constants::GlobalConfig;

/// Depth sort configuration wrapper.
///
/// # Examples
/// ```
/// use depth_sort::SortConfig;
/// let cfg = SortConfig::default();
/// assert_eq!(cfg.sort_interval.as_millis(), 33);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortConfig {
    /// Minimum delay between two background sorts.
    pub sort_interval: Duration,
    /// Point count above which depths are computed with rayon.
    pub parallel_depth_threshold: usize,
}

impl SortConfig {
    /// Returns `true` when `count` points should be transformed in parallel.
    ///
    /// # Examples
    /// ```
    /// use depth_sort::SortConfig;
    /// let cfg = SortConfig::default();
    /// assert!(!cfg.is_parallel(10));
    /// ```
    pub fn is_parallel(&self, count: usize) -> bool {
        count > self.parallel_depth_threshold
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        GlobalConfig::default().into()
    }
}

impl From<GlobalConfig> for SortConfig {
    fn from(global: GlobalConfig) -> Self {
        Self {
            sort_interval: global.sort_interval,
            parallel_depth_threshold: global.parallel_depth_threshold,
        }
    }
}
