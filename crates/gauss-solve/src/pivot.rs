//! Partial pivoting shared by the decomposition and the solvers.

use crate::{LinalgError, LuParams};

/// Check that a buffer holds exactly `expected` elements.
pub(crate) fn check_len(
    name: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), LinalgError> {
    if expected != actual {
        return Err(LinalgError::BufferSizeMismatch {
            name,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate the dimension and the length of a row-major `n x n` buffer.
pub(crate) fn check_square(n: usize, a: &[f64]) -> Result<(), LinalgError> {
    check_square_len("matrix", n, a.len())
}

/// Same as [`check_square`] for a buffer reported under `name`.
pub(crate) fn check_square_len(
    name: &'static str,
    n: usize,
    actual: usize,
) -> Result<(), LinalgError> {
    if n == 0 {
        return Err(LinalgError::InvalidDimension(n));
    }
    // an overflowing n can never match a real buffer
    let expected = n.checked_mul(n).unwrap_or(usize::MAX);
    check_len(name, expected, actual)
}

/// Largest magnitude stored in the matrix.
///
/// Fails on the first NaN or infinity when `params.check_finite` is set.
pub(crate) fn matrix_scale(n: usize, a: &[f64], params: &LuParams) -> Result<f64, LinalgError> {
    let mut scale = 0.0f64;
    for (idx, v) in a.iter().enumerate() {
        if params.check_finite && !v.is_finite() {
            return Err(LinalgError::NonFinite {
                row: idx / n,
                col: idx % n,
            });
        }
        scale = scale.max(v.abs());
    }
    Ok(scale)
}

/// Fail on the first NaN or infinity of a right-hand side.
pub(crate) fn check_finite_vector(b: &[f64], params: &LuParams) -> Result<(), LinalgError> {
    if !params.check_finite {
        return Ok(());
    }
    match b.iter().position(|v| !v.is_finite()) {
        Some(row) => Err(LinalgError::NonFinite { row, col: 0 }),
        None => Ok(()),
    }
}

/// Select the row in `k..n` holding the largest magnitude in column `k`.
///
/// Ties keep the topmost row. Returns the row index and the pivot magnitude.
pub(crate) fn select_pivot(n: usize, a: &[f64], k: usize) -> (usize, f64) {
    let mut piv = k;
    let mut max_val = a[k * n + k].abs();
    for r in (k + 1)..n {
        let v = a[r * n + k].abs();
        if v > max_val {
            max_val = v;
            piv = r;
        }
    }
    (piv, max_val)
}

/// Exchange two full rows of a row-major `n x n` buffer.
pub(crate) fn swap_rows(n: usize, a: &mut [f64], r: usize, k: usize) {
    if r == k {
        return;
    }
    let (lo, hi) = if r < k { (r, k) } else { (k, r) };
    let (head, tail) = a.split_at_mut(hi * n);
    head[lo * n..(lo + 1) * n].swap_with_slice(&mut tail[..n]);
}

/// Magnitude at or below which a pivot of an `n x n` matrix is numerically zero.
///
/// Elimination leaves rounding noise of about `n * eps * scale` in place of
/// an exact zero, so rank-deficient inputs are caught by this floor even when
/// `params.singular_tol` is zero.
pub(crate) fn singular_floor(n: usize, scale: f64, params: &LuParams) -> f64 {
    params.singular_tol.max(n as f64 * f64::EPSILON * scale)
}

/// Classify a pivot magnitude against the tolerances in `params`.
///
/// `scale` is the largest magnitude of the input matrix.
pub(crate) fn check_pivot(
    n: usize,
    column: usize,
    pivot: f64,
    scale: f64,
    params: &LuParams,
) -> Result<(), LinalgError> {
    // written negated so that a NaN pivot is rejected too
    if !(pivot > singular_floor(n, scale, params)) {
        return Err(LinalgError::SingularMatrix { column });
    }

    let threshold = params.ill_conditioned_tol * scale;
    if pivot < threshold {
        if params.strict {
            return Err(LinalgError::IllConditioned {
                column,
                pivot,
                threshold,
            });
        }
        log::warn!(
            "Ill-conditioned pivot {:e} in column {} (threshold {:e})",
            pivot,
            column,
            threshold
        );
    }

    Ok(())
}

/// Store the multipliers of column `k` below the diagonal and update the trailing rows.
pub(crate) fn eliminate_below(n: usize, a: &mut [f64], k: usize) {
    let (head, tail) = a.split_at_mut((k + 1) * n);
    let pivot_row = &head[k * n..];
    let diag = pivot_row[k];

    for row in tail.chunks_exact_mut(n) {
        let m = row[k] / diag;
        row[k] = m;
        if m == 0.0 {
            continue;
        }
        for (x, &u) in row[k + 1..].iter_mut().zip(&pivot_row[k + 1..]) {
            *x -= m * u;
        }
    }
}
