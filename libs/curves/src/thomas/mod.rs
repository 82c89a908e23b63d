//! Thomas algorithm for tridiagonal linear systems.

use crate::error::{CurveError, CurveResult};

/// Solves a tridiagonal system in O(n).
///
/// `a` is the sub-diagonal, `b` the main diagonal, `c` the super-diagonal
/// and `d` the right-hand side. All four slices have the same length; `a[0]`
/// and `c[n - 1]` lie outside the matrix and are ignored.
///
/// No pivoting is done, so the system should be diagonally dominant or
/// otherwise safe for plain elimination.
///
/// # Errors
///
/// [`CurveError::LengthMismatch`] when the slices differ in length and
/// [`CurveError::ZeroPivot`] when elimination divides by zero.
///
/// # Examples
/// ```
/// use curves::thomas;
///
/// // [2 1 0] [1]   [4]
/// // [1 2 1] [2] = [8]
/// // [0 1 2] [3]   [8]
/// let x = thomas(&[0.0, 1.0, 1.0], &[2.0; 3], &[1.0, 1.0, 0.0], &[4.0, 8.0, 8.0]).unwrap();
/// assert!((x[2] - 3.0).abs() < 1e-12);
/// ```
pub fn thomas(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> CurveResult<Vec<f64>> {
    let n = b.len();
    if let Some(found) = [a.len(), c.len(), d.len()].into_iter().find(|&len| len != n) {
        return Err(CurveError::LengthMismatch { expected: n, found });
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    // Forward sweep: eliminate the sub-diagonal row by row.
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];
    for row in 0..n {
        let (sub, above_c, above_d) = match row {
            0 => (0.0, 0.0, 0.0),
            _ => (a[row], c_prime[row - 1], d_prime[row - 1]),
        };
        let pivot = b[row] - above_c * sub;
        if pivot == 0.0 {
            return Err(CurveError::ZeroPivot { row });
        }
        c_prime[row] = if row + 1 < n { c[row] / pivot } else { 0.0 };
        d_prime[row] = (d[row] - above_d * sub) / pivot;
    }

    // Back substitution.
    let mut x = d_prime;
    for row in (0..n - 1).rev() {
        x[row] -= c_prime[row] * x[row + 1];
    }
    Ok(x)
}
