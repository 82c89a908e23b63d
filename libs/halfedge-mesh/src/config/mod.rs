//! Mesh-level configuration building on the shared `config` crate.
//!
//! Decides how endpoint positions are compared when pairing twins.

use config::constants::{
    ConfigError, GlobalConfig, PARALLEL_DEPTH_THRESHOLD, SORT_THROTTLE_INTERVAL,
};

/// How two endpoint positions are judged equal when linking twins.
///
/// # Examples
/// ```
/// use halfedge_mesh::TwinMatching;
/// assert_eq!(TwinMatching::default(), TwinMatching::Exact);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TwinMatching {
    /// Bitwise float equality, with `-0.0` treated as `0.0`.
    #[default]
    Exact,
    /// Positions snapped to a grid of the given cell size.
    ///
    /// Points that straddle a cell boundary may still fail to weld.
    Quantized {
        /// Grid cell size
        tolerance: f32,
    },
}

/// Half-edge mesh configuration wrapper.
///
/// # Examples
/// ```
/// use halfedge_mesh::{MeshConfig, TwinMatching};
/// let cfg = MeshConfig::default();
/// assert_eq!(cfg.twin_matching, TwinMatching::Exact);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeshConfig {
    /// Endpoint comparison used for twin linking and validation.
    pub twin_matching: TwinMatching,
}

impl MeshConfig {
    /// Creates a configuration welding endpoints within `tolerance`.
    ///
    /// # Examples
    /// ```
    /// use halfedge_mesh::{MeshConfig, TwinMatching};
    /// let cfg = MeshConfig::welded(1.0e-4).unwrap();
    /// assert_eq!(cfg.twin_matching, TwinMatching::Quantized { tolerance: 1.0e-4 });
    /// assert!(MeshConfig::welded(-1.0).is_err());
    /// ```
    pub fn welded(tolerance: f32) -> Result<Self, MeshConfigError> {
        GlobalConfig::new(Some(tolerance), SORT_THROTTLE_INTERVAL, PARALLEL_DEPTH_THRESHOLD)
            .map(Self::from)
            .map_err(MeshConfigError)
    }
}

impl From<GlobalConfig> for MeshConfig {
    fn from(global: GlobalConfig) -> Self {
        let twin_matching = match global.weld_tolerance {
            Some(tolerance) => TwinMatching::Quantized { tolerance },
            None => TwinMatching::Exact,
        };
        Self { twin_matching }
    }
}

/// Error wrapper for invalid mesh configuration.
#[derive(Debug, PartialEq)]
pub struct MeshConfigError(pub ConfigError);

impl std::fmt::Display for MeshConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for MeshConfigError {}

#[cfg(test)]
mod tests;
