//! Tests covering mesh configuration behavior.

use super::*;

#[test]
fn default_is_exact() {
    let cfg = MeshConfig::default();
    assert_eq!(cfg.twin_matching, TwinMatching::Exact);
}

#[test]
fn global_tolerance_selects_quantized_matching() {
    let global = GlobalConfig::new(Some(0.5), ::config::constants::SORT_THROTTLE_INTERVAL, 1).unwrap();
    let cfg = MeshConfig::from(global);
    assert_eq!(cfg.twin_matching, TwinMatching::Quantized { tolerance: 0.5 });
}

#[test]
fn welded_validates_tolerance() {
    let err = MeshConfig::welded(0.0).unwrap_err();
    assert_eq!(err, MeshConfigError(ConfigError::InvalidTolerance(0.0)));
    assert!(MeshConfig::welded(f32::INFINITY).is_err());
}

#[test]
fn welded_accepts_positive_tolerance() {
    let cfg = MeshConfig::welded(1.0e-3).unwrap();
    assert_eq!(cfg.twin_matching, TwinMatching::Quantized { tolerance: 1.0e-3 });
}
