use faer::linalg::matmul::matmul as faer_matmul;

use crate::error::LinalgError;
use crate::pivot::{check_len, check_square, check_square_len};

/// Check whether `p` is a bijection on `0..p.len()`.
///
/// Example:
///
/// ```
/// use gauss_solve::ops::is_permutation;
///
/// assert!(is_permutation(&[1, 2, 0]));
/// assert!(!is_permutation(&[1, 1, 0]));
/// ```
pub fn is_permutation(p: &[usize]) -> bool {
    let mut seen = vec![false; p.len()];
    for &i in p {
        match seen.get_mut(i) {
            Some(s) if !*s => *s = true,
            _ => return false,
        }
    }
    true
}

/// Build the row-major permutation matrix of `p`.
///
/// Row `i` of the result is the unit row vector `e_{p[i]}`, so that
/// multiplying it by `A` reorders the rows of `A` as [`apply_permutation`] does.
pub fn permutation_matrix(p: &[usize]) -> Result<Vec<f64>, LinalgError> {
    if p.is_empty() {
        return Err(LinalgError::InvalidDimension(0));
    }
    if !is_permutation(p) {
        return Err(LinalgError::InvalidPermutation(p.to_vec()));
    }
    Ok(permutation_rows(p))
}

/// Permutation matrix of a `p` already known to be a valid permutation.
pub(crate) fn permutation_rows(p: &[usize]) -> Vec<f64> {
    let n = p.len();
    let mut m = vec![0.0; n * n];
    for (i, &pi) in p.iter().enumerate() {
        m[i * n + pi] = 1.0;
    }
    m
}

/// Reorder the rows of a row-major `n x n` matrix so that row `i` is `a[p[i]]`.
pub fn apply_permutation(n: usize, p: &[usize], a: &[f64]) -> Result<Vec<f64>, LinalgError> {
    check_square(n, a)?;
    check_len("permutation", n, p.len())?;
    if !is_permutation(p) {
        return Err(LinalgError::InvalidPermutation(p.to_vec()));
    }

    let mut out = Vec::with_capacity(n * n);
    for &pi in p {
        out.extend_from_slice(&a[pi * n..(pi + 1) * n]);
    }
    Ok(out)
}

/// Multiply two row-major `n x n` matrices, `out = a * b`.
///
/// PRECONDITION: `out` is a pre-allocated buffer of `n * n` elements.
///
/// Example:
///
/// ```
/// use gauss_solve::ops::matmul;
///
/// let a = [1.0, 2.0, 3.0, 4.0];
/// let b = [0.0, 1.0, 1.0, 0.0];
/// let mut out = [0.0; 4];
/// matmul(2, &a, &b, &mut out).unwrap();
/// assert_eq!(out, [2.0, 1.0, 4.0, 3.0]);
/// ```
pub fn matmul(n: usize, a: &[f64], b: &[f64], out: &mut [f64]) -> Result<(), LinalgError> {
    check_square_len("lhs", n, a.len())?;
    check_square_len("rhs", n, b.len())?;
    check_square_len("out", n, out.len())?;

    let lhs = faer::mat::from_row_major_slice(a, n, n);
    let rhs = faer::mat::from_row_major_slice(b, n, n);

    // a row-major buffer read column-major is the transpose: out^T = b^T * a^T
    let mut dst = faer::mat::from_column_major_slice_mut(out, n, n);
    faer_matmul(
        &mut dst,
        rhs.transpose(),
        lhs.transpose(),
        None,
        1.0,
        faer::Parallelism::None,
    );

    Ok(())
}

/// Multiply a row-major `n x n` matrix by a vector, `out = a * x`.
///
/// PRECONDITION: `out` is a pre-allocated buffer of `n` elements.
pub fn matvec(n: usize, a: &[f64], x: &[f64], out: &mut [f64]) -> Result<(), LinalgError> {
    check_square(n, a)?;
    check_len("vector", n, x.len())?;
    check_len("out", n, out.len())?;

    let lhs = faer::mat::from_row_major_slice(a, n, n);
    let rhs = faer::mat::from_column_major_slice(x, n, 1);
    let mut dst = faer::mat::from_column_major_slice_mut(out, n, 1);
    faer_matmul(&mut dst, lhs, rhs, None, 1.0, faer::Parallelism::None);

    Ok(())
}

/// Euclidean norm of the residual `a * x - b`.
///
/// Example:
///
/// ```
/// use gauss_solve::ops::residual_norm;
///
/// let a = [2.0, 3.0, -1.0, 4.0, 1.0, 2.0, -2.0, 7.0, 2.0];
/// let x = [1.3, 0.8, 0.0];
/// let b = [5.0, 6.0, 3.0];
/// assert!(residual_norm(3, &a, &x, &b).unwrap() < 1e-12);
/// ```
pub fn residual_norm(n: usize, a: &[f64], x: &[f64], b: &[f64]) -> Result<f64, LinalgError> {
    check_square(n, a)?;
    check_len("rhs", n, b.len())?;
    let mut ax = vec![0.0; n];
    matvec(n, a, x, &mut ax)?;
    Ok(ax
        .iter()
        .zip(b.iter())
        .map(|(v, w)| (v - w).powi(2))
        .sum::<f64>()
        .sqrt())
}
