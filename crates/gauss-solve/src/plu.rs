use crate::error::LinalgError;
use crate::params::LuParams;
use crate::pivot::{
    check_len, check_pivot, check_square, eliminate_below, matrix_scale, select_pivot, swap_rows,
};

/// Compute the PLU decomposition of a square matrix in place.
///
/// On success `a` holds `L` strictly below the diagonal (its unit diagonal is
/// implied and not stored) and `U` on and above it, and `p` holds the row
/// permutation so that `A[p[i]]` is row `i` of `L * U` for the original `A`.
///
/// # Arguments
///
/// * `n` - The matrix dimension.
/// * `a` - The row-major `n x n` matrix, overwritten with the packed factors.
/// * `p` - A buffer of `n` elements receiving the permutation.
///
/// # Errors
///
/// Dimension and buffer errors are returned before any buffer is touched.
/// A column whose best pivot is numerically zero (see [`LuParams`]) returns
/// [`LinalgError::SingularMatrix`].
///
/// # Example
///
/// ```
/// use gauss_solve::plu;
///
/// let mut a = [2.0, 3.0, -1.0, 4.0, 1.0, 2.0, -2.0, 7.0, 2.0];
/// let mut p = [0; 3];
/// plu(3, &mut a, &mut p).unwrap();
/// assert_eq!(p, [1, 2, 0]);
/// assert_eq!(a[0], 4.0);
/// ```
pub fn plu(n: usize, a: &mut [f64], p: &mut [usize]) -> Result<(), LinalgError> {
    plu_with_params(n, a, p, &LuParams::default())
}

/// Compute the PLU decomposition of a square matrix in place with custom tolerances.
///
/// See [`plu`] for the layout of the result and [`LuParams`] for the
/// meaning of each tolerance.
pub fn plu_with_params(
    n: usize,
    a: &mut [f64],
    p: &mut [usize],
    params: &LuParams,
) -> Result<(), LinalgError> {
    check_square(n, a)?;
    check_len("permutation", n, p.len())?;
    let scale = matrix_scale(n, a, params)?;

    p.iter_mut().enumerate().for_each(|(i, pi)| *pi = i);

    for k in 0..n {
        let (piv, pivot) = select_pivot(n, a, k);
        if piv != k {
            log::debug!("plu: swapping rows {} and {}", k, piv);
            swap_rows(n, a, piv, k);
            p.swap(piv, k);
        }
        check_pivot(n, k, pivot, scale, params)?;
        eliminate_below(n, a, k);
    }

    Ok(())
}

/// Compute the LU decomposition of a square matrix in place without row exchanges.
///
/// The packed layout is the same as [`plu`] with an identity permutation.
///
/// # Errors
///
/// Returns [`LinalgError::ZeroPivot`] when a diagonal entry becomes exactly
/// zero: the matrix is either singular or needs pivoting.
///
/// # Example
///
/// ```
/// use gauss_solve::lu_no_pivot;
///
/// let mut a = [4.0, 3.0, 6.0, 3.0];
/// lu_no_pivot(2, &mut a).unwrap();
/// assert_eq!(a, [4.0, 3.0, 1.5, -1.5]);
/// ```
pub fn lu_no_pivot(n: usize, a: &mut [f64]) -> Result<(), LinalgError> {
    check_square(n, a)?;
    matrix_scale(n, a, &LuParams::default())?;

    for k in 0..n {
        if a[k * n + k] == 0.0 {
            return Err(LinalgError::ZeroPivot { column: k });
        }
        eliminate_below(n, a, k);
    }

    Ok(())
}

/// Extract the unit lower triangular factor from a packed decomposition.
pub fn unpack_l(n: usize, lu: &[f64]) -> Result<Vec<f64>, LinalgError> {
    check_square(n, lu)?;
    Ok(lower_factor(n, lu))
}

/// Extract the upper triangular factor from a packed decomposition.
pub fn unpack_u(n: usize, lu: &[f64]) -> Result<Vec<f64>, LinalgError> {
    check_square(n, lu)?;
    Ok(upper_factor(n, lu))
}

pub(crate) fn lower_factor(n: usize, lu: &[f64]) -> Vec<f64> {
    let mut l = vec![0.0; n * n];
    for i in 0..n {
        l[i * n..i * n + i].copy_from_slice(&lu[i * n..i * n + i]);
        l[i * n + i] = 1.0;
    }
    l
}

pub(crate) fn upper_factor(n: usize, lu: &[f64]) -> Vec<f64> {
    let mut u = vec![0.0; n * n];
    for i in 0..n {
        u[i * n + i..(i + 1) * n].copy_from_slice(&lu[i * n + i..(i + 1) * n]);
    }
    u
}
