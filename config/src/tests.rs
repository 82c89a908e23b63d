//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_approx_equal_within_epsilon() {
    let small_diff = EPSILON / 2.0;
    assert!(approx_equal(1.0, 1.0 + small_diff));
    assert!(approx_equal(1.0, 1.0 - small_diff));
}

#[test]
fn test_approx_equal_outside_epsilon() {
    let large_diff = EPSILON * 4.0;
    assert!(!approx_equal(1.0, 1.0 + large_diff));
}

// =============================================================================
// RADIX TESTS
// =============================================================================

#[test]
fn test_radix_passes_cover_32_bit_keys() {
    assert_eq!(RADIX_BITS_PER_PASS * RADIX_PASS_COUNT, u32::BITS);
}

#[test]
fn test_radix_pass_count_is_even() {
    // Even pass count leaves the sorted data in the caller's buffer
    assert_eq!(RADIX_PASS_COUNT % 2, 0);
}

#[test]
fn test_bucket_count_matches_bits() {
    assert_eq!(RADIX_BUCKET_COUNT, 256);
}

// =============================================================================
// CAMERA TESTS
// =============================================================================

#[test]
fn test_default_clip_range_is_ordered() {
    assert!(DEFAULT_Z_NEAR > 0.0);
    assert!(DEFAULT_Z_FAR > DEFAULT_Z_NEAR);
}

#[test]
fn test_default_fovy_is_right_angle() {
    assert_eq!(DEFAULT_FOVY_DEGREES, 90.0);
}

// =============================================================================
// THROTTLE TESTS
// =============================================================================

#[test]
fn test_sort_throttle_is_roughly_30hz() {
    let hz = 1.0 / SORT_THROTTLE_INTERVAL.as_secs_f64();
    assert!((29.0..=31.0).contains(&hz));
}
