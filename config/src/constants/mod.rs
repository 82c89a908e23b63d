//! Centralized configuration values shared across the kernel crates.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;
use std::time::Duration;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for single-precision geometry comparisons.
///
/// # Examples
/// ```
/// use config::constants::EPSILON;
/// assert!(EPSILON < 1.0e-3);
/// ```
pub const EPSILON: f32 = 1.0e-5;

// =============================================================================
// MESH CONSTANTS
// =============================================================================

/// Minimum number of corners a face may have.
///
/// # Examples
/// ```
/// use config::constants::MIN_POLYGON_VERTICES;
/// assert_eq!(MIN_POLYGON_VERTICES, 3);
/// ```
pub const MIN_POLYGON_VERTICES: usize = 3;

// =============================================================================
// RADIX SORT CONSTANTS
// =============================================================================

/// Number of key bits consumed by one counting-sort pass.
///
/// # Examples
/// ```
/// use config::constants::{RADIX_BITS_PER_PASS, RADIX_PASS_COUNT};
/// assert_eq!(RADIX_BITS_PER_PASS * RADIX_PASS_COUNT, 32);
/// ```
pub const RADIX_BITS_PER_PASS: u32 = 8;

/// Number of histogram buckets per pass (`2^RADIX_BITS_PER_PASS`).
///
/// # Examples
/// ```
/// use config::constants::{RADIX_BITS_PER_PASS, RADIX_BUCKET_COUNT};
/// assert_eq!(RADIX_BUCKET_COUNT, 1 << RADIX_BITS_PER_PASS);
/// ```
pub const RADIX_BUCKET_COUNT: usize = 1 << RADIX_BITS_PER_PASS;

/// Number of passes needed to cover a 32-bit key.
///
/// An even count means the final pass lands back in the caller's buffer.
///
/// # Examples
/// ```
/// use config::constants::RADIX_PASS_COUNT;
/// assert_eq!(RADIX_PASS_COUNT % 2, 0);
/// ```
pub const RADIX_PASS_COUNT: u32 = 4;

/// Point count above which camera-space depths are computed in parallel.
///
/// # Examples
/// ```
/// use config::constants::PARALLEL_DEPTH_THRESHOLD;
/// let points = 100_000;
/// assert!(points > PARALLEL_DEPTH_THRESHOLD);
/// ```
pub const PARALLEL_DEPTH_THRESHOLD: usize = 16_384;

/// Minimum delay between two background sorts (~30 Hz).
///
/// # Examples
/// ```
/// use config::constants::SORT_THROTTLE_INTERVAL;
/// assert_eq!(SORT_THROTTLE_INTERVAL.as_millis(), 33);
/// ```
pub const SORT_THROTTLE_INTERVAL: Duration = Duration::from_millis(33);

// =============================================================================
// CAMERA CONSTANTS
// =============================================================================

/// Vertical field of view applied when switching to a perspective projection.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_FOVY_DEGREES;
/// assert_eq!(DEFAULT_FOVY_DEGREES.to_radians(), std::f32::consts::FRAC_PI_2);
/// ```
pub const DEFAULT_FOVY_DEGREES: f32 = 90.0;

/// Near clip distance applied when switching to a perspective projection.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_Z_FAR, DEFAULT_Z_NEAR};
/// assert!(DEFAULT_Z_NEAR > 0.0 && DEFAULT_Z_NEAR < DEFAULT_Z_FAR);
/// ```
pub const DEFAULT_Z_NEAR: f32 = 0.01;

/// Far clip distance applied when switching to a perspective projection.
pub const DEFAULT_Z_FAR: f32 = 1000.0;

// =============================================================================
// CURVE CONSTANTS
// =============================================================================

/// Default end-point curl for Hobby spline fitting.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_HOBBY_OMEGA;
/// assert!((0.0..=1.0).contains(&DEFAULT_HOBBY_OMEGA));
/// ```
pub const DEFAULT_HOBBY_OMEGA: f64 = 0.0;

// =============================================================================
// GLOBAL CONFIG
// =============================================================================

/// Immutable snapshot of global configuration settings that can be shared
/// between crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.weld_tolerance.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Grid size used to weld nearly coincident endpoints when linking twins.
    ///
    /// `None` keeps exact float matching.
    pub weld_tolerance: Option<f32>,
    /// Minimum delay between two background depth sorts.
    pub sort_interval: Duration,
    /// Point count above which depths are computed in parallel.
    pub parallel_depth_threshold: usize,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// values.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(Some(1.0e-4), Duration::from_millis(16), 1024).expect("valid config");
    /// assert_eq!(cfg.parallel_depth_threshold, 1024);
    /// ```
    pub fn new(
        weld_tolerance: Option<f32>,
        sort_interval: Duration,
        parallel_depth_threshold: usize,
    ) -> Result<Self, ConfigError> {
        if let Some(tolerance) = weld_tolerance {
            if !(tolerance.is_finite() && tolerance > 0.0) {
                return Err(ConfigError::InvalidTolerance(tolerance));
            }
        }
        if sort_interval.is_zero() {
            return Err(ConfigError::InvalidSortInterval(sort_interval));
        }
        Ok(Self {
            weld_tolerance,
            sort_interval,
            parallel_depth_threshold,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            weld_tolerance: None,
            sort_interval: SORT_THROTTLE_INTERVAL,
            parallel_depth_threshold: PARALLEL_DEPTH_THRESHOLD,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the weld tolerance is zero, negative or not finite.
    InvalidTolerance(f32),
    /// Raised when the sort interval is zero.
    InvalidSortInterval(Duration),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "weld tolerance must be positive and finite: {value}")
            }
            ConfigError::InvalidSortInterval(value) => {
                write!(f, "sort interval must be non-zero: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f32 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-7));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}
