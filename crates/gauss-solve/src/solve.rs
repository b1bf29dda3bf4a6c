use crate::error::LinalgError;
use crate::ops::is_permutation;
use crate::params::LuParams;
use crate::pivot::{
    check_finite_vector, check_len, check_pivot, check_square, eliminate_below, matrix_scale,
    select_pivot, swap_rows,
};

/// Solve the linear system `A * x = b` in place using Gaussian elimination.
///
/// Forward elimination with partial pivoting is fused with the update of `b`,
/// followed by back-substitution. On success `b` holds the solution `x`.
///
/// # Arguments
///
/// * `n` - The system dimension.
/// * `a` - The row-major `n x n` matrix. It is consumed: on return it holds the
///   eliminated system and must be discarded by the caller.
/// * `b` - The right-hand side of `n` elements, overwritten with the solution.
///
/// # Errors
///
/// Dimension, buffer and non-finite input errors are returned before any
/// buffer is touched. A column whose best pivot is numerically zero
/// (see [`LuParams`]) returns [`LinalgError::SingularMatrix`].
///
/// # Example
///
/// ```
/// use gauss_solve::solve_in_place;
///
/// let mut a = [5.0];
/// let mut b = [10.0];
/// solve_in_place(1, &mut a, &mut b).unwrap();
/// assert_eq!(b, [2.0]);
/// ```
pub fn solve_in_place(n: usize, a: &mut [f64], b: &mut [f64]) -> Result<(), LinalgError> {
    solve_in_place_with_params(n, a, b, &LuParams::default())
}

/// Solve the linear system `A * x = b` in place with custom tolerances.
///
/// See [`solve_in_place`].
pub fn solve_in_place_with_params(
    n: usize,
    a: &mut [f64],
    b: &mut [f64],
    params: &LuParams,
) -> Result<(), LinalgError> {
    check_square(n, a)?;
    check_len("rhs", n, b.len())?;
    let scale = matrix_scale(n, a, params)?;
    check_finite_vector(b, params)?;

    for k in 0..n {
        let (piv, pivot) = select_pivot(n, a, k);
        if piv != k {
            log::debug!("solve: swapping rows {} and {}", k, piv);
            swap_rows(n, a, piv, k);
            b.swap(piv, k);
        }
        check_pivot(n, k, pivot, scale, params)?;
        eliminate_below(n, a, k);

        // replay the row updates on the right-hand side
        let bk = b[k];
        for i in (k + 1)..n {
            b[i] -= a[i * n + k] * bk;
        }
    }

    back_substitute(n, a, b);

    Ok(())
}

/// Solve `A * x = b` in place reusing the output of [`crate::plu`].
///
/// Applies the permutation to `b`, then forward-substitutes with the unit
/// lower triangular factor and back-substitutes with the upper one.
///
/// # Arguments
///
/// * `n` - The system dimension.
/// * `lu` - The packed factors written by [`crate::plu`].
/// * `p` - The permutation written by [`crate::plu`].
/// * `b` - The right-hand side, overwritten with the solution.
///
/// # Errors
///
/// Buffer errors, an invalid permutation or a zero on the diagonal of `U` are
/// reported before `b` is touched.
///
/// # Example
///
/// ```
/// use gauss_solve::{lu_solve_in_place, plu};
///
/// let mut lu = [4.0, 3.0, 6.0, 3.0];
/// let mut p = [0; 2];
/// plu(2, &mut lu, &mut p).unwrap();
///
/// let mut b = [10.0, 12.0];
/// lu_solve_in_place(2, &lu, &p, &mut b).unwrap();
/// assert!((b[0] - 1.0).abs() < 1e-12);
/// assert!((b[1] - 2.0).abs() < 1e-12);
/// ```
pub fn lu_solve_in_place(
    n: usize,
    lu: &[f64],
    p: &[usize],
    b: &mut [f64],
) -> Result<(), LinalgError> {
    check_square(n, lu)?;
    check_len("permutation", n, p.len())?;
    check_len("rhs", n, b.len())?;
    if !is_permutation(p) {
        return Err(LinalgError::InvalidPermutation(p.to_vec()));
    }
    if let Some(column) = (0..n).find(|&i| lu[i * n + i] == 0.0) {
        return Err(LinalgError::SingularMatrix { column });
    }

    let permuted: Vec<f64> = p.iter().map(|&i| b[i]).collect();
    b.copy_from_slice(&permuted);

    forward_substitute_unit(n, lu, b);
    back_substitute(n, lu, b);

    Ok(())
}

// Solve L * y = b in place, L unit lower triangular stored below the diagonal.
fn forward_substitute_unit(n: usize, lu: &[f64], b: &mut [f64]) {
    for i in 1..n {
        let row = &lu[i * n..i * n + i];
        let sum: f64 = row.iter().zip(&b[..i]).map(|(l, y)| l * y).sum();
        b[i] -= sum;
    }
}

// Solve U * x = y in place, U stored on and above the diagonal.
fn back_substitute(n: usize, u: &[f64], b: &mut [f64]) {
    for i in (0..n).rev() {
        let row = &u[i * n..(i + 1) * n];
        let sum: f64 = row[i + 1..]
            .iter()
            .zip(&b[i + 1..])
            .map(|(uij, xj)| uij * xj)
            .sum();
        b[i] = (b[i] - sum) / row[i];
    }
}
