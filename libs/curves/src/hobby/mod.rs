//! # Hobby Splines
//!
//! Hobby's algorithm picks Bézier handles so that the spline through a list
//! of knots has pleasing, near-circular bends. The handle angles come from a
//! tridiagonal system over the chord turning angles (Jackowski, formula 38)
//! and the handle lengths from the [`rho`] velocity function.

use config::constants::DEFAULT_HOBBY_OMEGA;
use glam::DVec2;

use crate::error::{CurveError, CurveResult};
use crate::thomas::thomas;

/// Fewest knots a spline can be fitted through.
const MIN_SPLINE_POINTS: usize = 2;

/// Fits a cubic Bézier spline through `points`.
///
/// `omega` is the end-point curl in `[0, 1]`: `0` gives the gentlest ends,
/// `1` makes the end segments follow circular arcs.
///
/// The result has `3n - 2` points for `n` knots: every knot, with the two
/// control points of the segment leaving it in between. Knot `i` sits at
/// index `3 * i`.
///
/// # Errors
///
/// - [`CurveError::TooFewPoints`] for fewer than two knots
/// - [`CurveError::InvalidOmega`] when `omega` is outside `[0, 1]`
/// - [`CurveError::ZeroLengthChord`] when successive knots coincide or a
///   knot is not finite
///
/// # Examples
/// ```
/// use curves::hobby;
/// use glam::DVec2;
///
/// let spline = hobby(&[DVec2::ZERO, DVec2::new(3.0, 0.0)], 0.0).unwrap();
/// assert_eq!(spline[1], DVec2::new(1.0, 0.0));
/// assert_eq!(spline[2], DVec2::new(2.0, 0.0));
/// ```
pub fn hobby(points: &[DVec2], omega: f64) -> CurveResult<Vec<DVec2>> {
    if points.len() < MIN_SPLINE_POINTS {
        return Err(CurveError::TooFewPoints {
            count: points.len(),
            min: MIN_SPLINE_POINTS,
        });
    }
    if !(0.0..=1.0).contains(&omega) {
        return Err(CurveError::InvalidOmega(omega));
    }

    // Knots are P[0] ..= P[n].
    let n = points.len() - 1;
    let chords: Vec<DVec2> = points.windows(2).map(|pair| pair[1] - pair[0]).collect();
    let lengths: Vec<f64> = chords.iter().map(|chord| chord.length()).collect();
    if let Some(index) = lengths
        .iter()
        .position(|&length| !(length > 0.0 && length.is_finite()))
    {
        return Err(CurveError::ZeroLengthChord { index });
    }

    // gamma[0] is unused and gamma[n] is zero.
    let mut gamma = vec![0.0; n + 1];
    for i in 1..n {
        gamma[i] = turning_angle(chords[i - 1], chords[i]);
    }

    let alpha = if n == 1 {
        // A lone chord has no turning angles, so the right-hand side is zero
        // and the system is singular at omega = 1.
        vec![0.0; 2]
    } else {
        solve_alpha(&gamma, &lengths, omega)?
    };
    let beta: Vec<f64> = (0..n).map(|i| -gamma[i + 1] - alpha[i + 1]).collect();

    let mut spline = Vec::with_capacity(3 * n + 1);
    for i in 0..n {
        let direction = chords[i] / lengths[i];
        let leaving = rho(alpha[i], beta[i]) * lengths[i] / 3.0;
        let arriving = rho(beta[i], alpha[i]) * lengths[i] / 3.0;

        spline.push(points[i]);
        spline.push(points[i] + DVec2::from_angle(alpha[i]).rotate(direction) * leaving);
        spline.push(points[i + 1] - DVec2::from_angle(-beta[i]).rotate(direction) * arriving);
    }
    spline.push(points[n]);
    Ok(spline)
}

/// [`hobby`] with the default end-point curl.
pub fn hobby_default(points: &[DVec2]) -> CurveResult<Vec<DVec2>> {
    hobby(points, DEFAULT_HOBBY_OMEGA)
}

/// Handle length velocity function (Jackowski, formula 28).
///
/// Returns the handle length as a multiple of a third of the chord length,
/// given the handle angle `alpha` at this end and `beta` at the other.
///
/// # Examples
/// ```
/// use curves::rho;
/// assert_eq!(rho(0.0, 0.0), 1.0);
/// ```
pub fn rho(alpha: f64, beta: f64) -> f64 {
    let c = 2.0 / 3.0;
    2.0 / (1.0 + c * beta.cos() + (1.0 - c) * alpha.cos())
}

/// Signed angle turning from `from` to `to`, in `(-π, π]`.
fn turning_angle(from: DVec2, to: DVec2) -> f64 {
    from.perp_dot(to).atan2(from.dot(to))
}

fn solve_alpha(gamma: &[f64], lengths: &[f64], omega: f64) -> CurveResult<Vec<f64>> {
    let n = lengths.len();
    let end_diagonal = 2.0 + omega;
    let end_coupling = 2.0 * omega + 1.0;

    let mut a = vec![0.0; n + 1];
    let mut b = vec![0.0; n + 1];
    let mut c = vec![0.0; n + 1];
    let mut d = vec![0.0; n + 1];

    b[0] = end_diagonal;
    c[0] = end_coupling;
    d[0] = -end_coupling * gamma[1];

    for i in 1..n {
        let (before, after) = (lengths[i - 1], lengths[i]);
        a[i] = 1.0 / before;
        b[i] = (2.0 * before + 2.0 * after) / (before * after);
        c[i] = 1.0 / after;
        d[i] = -(2.0 * gamma[i] * after + gamma[i + 1] * before) / (before * after);
    }

    a[n] = end_coupling;
    b[n] = end_diagonal;

    thomas(&a, &b, &c, &d)
}
