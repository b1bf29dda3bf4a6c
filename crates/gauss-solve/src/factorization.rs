use serde::{Deserialize, Serialize};

use crate::error::LinalgError;
use crate::ops::{is_permutation, permutation_rows};
use crate::params::LuParams;
use crate::pivot::{check_len, check_square};
use crate::plu::{lower_factor, plu_with_params, upper_factor};
use crate::solve::lu_solve_in_place;

/// LU factorization with partial pivoting that owns its factors.
///
/// Unlike the in-place routines this type keeps the packed factors and the
/// permutation together so they can be reused for several right-hand sides.
///
/// # Example
///
/// ```
/// use gauss_solve::LuFactorization;
///
/// let lu = LuFactorization::from_rows(&[
///     vec![2.0, 3.0, -1.0],
///     vec![4.0, 1.0, 2.0],
///     vec![-2.0, 7.0, 2.0],
/// ])
/// .unwrap();
///
/// let x = lu.solve(&[5.0, 6.0, 3.0]).unwrap();
/// assert!((x[0] - 1.3).abs() < 1e-12);
/// assert!((lu.determinant() + 90.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawLuFactorization")]
pub struct LuFactorization {
    n: usize,
    // L strictly below the diagonal, U on and above it
    lu: Vec<f64>,
    perm: Vec<usize>,
}

/// Serialized form, validated before it becomes a [`LuFactorization`].
#[derive(Deserialize)]
struct RawLuFactorization {
    n: usize,
    lu: Vec<f64>,
    perm: Vec<usize>,
}

impl TryFrom<RawLuFactorization> for LuFactorization {
    type Error = LinalgError;

    fn try_from(raw: RawLuFactorization) -> Result<Self, Self::Error> {
        let RawLuFactorization { n, lu, perm } = raw;
        check_square(n, &lu)?;
        check_len("permutation", n, perm.len())?;
        if !is_permutation(&perm) {
            return Err(LinalgError::InvalidPermutation(perm));
        }
        Ok(Self { n, lu, perm })
    }
}

impl LuFactorization {
    /// Factorize a row-major `n x n` matrix with the default tolerances.
    pub fn new(n: usize, a: Vec<f64>) -> Result<Self, LinalgError> {
        Self::with_params(n, a, &LuParams::default())
    }

    /// Factorize a row-major `n x n` matrix with custom tolerances.
    pub fn with_params(n: usize, mut a: Vec<f64>, params: &LuParams) -> Result<Self, LinalgError> {
        check_square(n, &a)?;
        let mut perm = vec![0; n];
        plu_with_params(n, &mut a, &mut perm, params)?;
        log::debug!("LU factorization of a {}x{} matrix: P = {:?}", n, n, perm);
        Ok(Self { n, lu: a, perm })
    }

    /// Factorize a matrix given as a list of rows.
    ///
    /// # Errors
    ///
    /// Every row must have as many elements as there are rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, LinalgError> {
        let n = rows.len();
        if n == 0 {
            return Err(LinalgError::InvalidDimension(n));
        }
        let mut a = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(LinalgError::BufferSizeMismatch {
                    name: "row",
                    expected: n,
                    actual: row.len(),
                });
            }
            a.extend_from_slice(row);
        }
        Self::new(n, a)
    }

    /// The matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.n
    }

    /// The packed factors in the layout written by [`crate::plu`].
    pub fn packed(&self) -> &[f64] {
        &self.lu
    }

    /// The row permutation: row `i` of `L * U` is row `permutation()[i]` of `A`.
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    /// The unit lower triangular factor as a dense row-major matrix.
    pub fn l(&self) -> Vec<f64> {
        lower_factor(self.n, &self.lu)
    }

    /// The upper triangular factor as a dense row-major matrix.
    pub fn u(&self) -> Vec<f64> {
        upper_factor(self.n, &self.lu)
    }

    /// The permutation as a dense row-major matrix `P` with `P * A = L * U`.
    pub fn permutation_matrix(&self) -> Vec<f64> {
        permutation_rows(&self.perm)
    }

    /// Sign of the permutation, `1.0` for an even number of row exchanges and `-1.0` otherwise.
    pub fn permutation_sign(&self) -> f64 {
        let mut visited = vec![false; self.n];
        let mut cycles = 0;
        for start in 0..self.n {
            if visited[start] {
                continue;
            }
            cycles += 1;
            let mut i = start;
            while !visited[i] {
                visited[i] = true;
                i = self.perm[i];
            }
        }
        if (self.n - cycles) % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }

    /// Determinant of the factorized matrix.
    pub fn determinant(&self) -> f64 {
        let n = self.n;
        let diag: f64 = (0..n).map(|i| self.lu[i * n + i]).product();
        self.permutation_sign() * diag
    }

    /// Solve `A * x = b` and return `x`.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>, LinalgError> {
        let mut x = b.to_vec();
        self.solve_in_place(&mut x)?;
        Ok(x)
    }

    /// Solve `A * x = b` overwriting `b` with `x`.
    pub fn solve_in_place(&self, b: &mut [f64]) -> Result<(), LinalgError> {
        lu_solve_in_place(self.n, &self.lu, &self.perm, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{apply_permutation, matmul};
    use approx::assert_relative_eq;

    fn worked_example() -> Vec<Vec<f64>> {
        vec![
            vec![2.0, 3.0, -1.0],
            vec![4.0, 1.0, 2.0],
            vec![-2.0, 7.0, 2.0],
        ]
    }

    #[test]
    fn test_factorization_reconstructs_input() -> Result<(), LinalgError> {
        let rows = worked_example();
        let a: Vec<f64> = rows.concat();
        let lu = LuFactorization::from_rows(&rows)?;

        let mut l_u = vec![0.0; 9];
        matmul(3, &lu.l(), &lu.u(), &mut l_u)?;
        let pa = apply_permutation(3, lu.permutation(), &a)?;
        for (&v, &e) in l_u.iter().zip(pa.iter()) {
            assert_relative_eq!(v, e, epsilon = 1e-12);
        }

        let mut pm_a = vec![0.0; 9];
        matmul(3, &lu.permutation_matrix(), &a, &mut pm_a)?;
        assert_eq!(pm_a, pa);
        Ok(())
    }

    #[test]
    fn test_determinant() -> Result<(), LinalgError> {
        let lu = LuFactorization::from_rows(&worked_example())?;
        assert_eq!(lu.permutation(), &[1, 2, 0]);
        assert_eq!(lu.permutation_sign(), 1.0);
        assert_relative_eq!(lu.determinant(), -90.0, epsilon = 1e-12);

        // a single exchange flips the sign
        let lu = LuFactorization::new(2, vec![0.0, 1.0, 1.0, 0.0])?;
        assert_eq!(lu.permutation_sign(), -1.0);
        assert_relative_eq!(lu.determinant(), -1.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_solve_many_rhs() -> Result<(), LinalgError> {
        let lu = LuFactorization::from_rows(&worked_example())?;
        assert_eq!(lu.dim(), 3);

        let x = lu.solve(&[5.0, 6.0, 3.0])?;
        assert_relative_eq!(x[0], 1.3, epsilon = 1e-12);
        assert_relative_eq!(x[1], 0.8, epsilon = 1e-12);
        assert_relative_eq!(x[2], 0.0, epsilon = 1e-12);

        let mut b = [5.0, 12.0, 18.0];
        lu.solve_in_place(&mut b)?;
        assert_relative_eq!(b[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(b[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(b[2], 3.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_from_rows_errors() {
        let res = LuFactorization::from_rows(&[]);
        assert!(matches!(res, Err(LinalgError::InvalidDimension(0))));

        let res = LuFactorization::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(
            res,
            Err(LinalgError::BufferSizeMismatch {
                name: "row",
                expected: 2,
                actual: 1,
            })
        ));

        let res = LuFactorization::from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]]);
        assert!(matches!(
            res,
            Err(LinalgError::SingularMatrix { column: 1 })
        ));
    }

    #[test]
    fn test_new_huge_dimension() {
        let res = LuFactorization::new(usize::MAX, vec![]);
        assert_eq!(
            res.map(|lu| lu.dim()),
            Err(LinalgError::BufferSizeMismatch {
                name: "matrix",
                expected: usize::MAX,
                actual: 0,
            })
        );
    }

    #[test]
    fn test_json_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        let lu = LuFactorization::from_rows(&worked_example())?;
        let json = serde_json::to_string(&lu)?;
        let back: LuFactorization = serde_json::from_str(&json)?;
        assert_eq!(back.permutation(), lu.permutation());
        assert_eq!(back.packed(), lu.packed());
        assert_relative_eq!(back.determinant(), -90.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_json_rejects_inconsistent_factors() {
        // lu too short for n
        let res =
            serde_json::from_str::<LuFactorization>(r#"{"n":3,"lu":[1.0,2.0],"perm":[2,0,1]}"#);
        assert!(res.is_err());

        // perm of the wrong length
        let res = serde_json::from_str::<LuFactorization>(r#"{"n":1,"lu":[1.0],"perm":[0,1]}"#);
        assert!(res.is_err());

        // perm out of range
        let res = serde_json::from_str::<LuFactorization>(
            r#"{"n":2,"lu":[1.0,0.0,0.0,1.0],"perm":[5,0]}"#,
        );
        let err = res.map(|lu| lu.dim()).err().map(|e| e.to_string());
        assert!(err.as_ref().is_some_and(|e| e.contains("[5, 0]")), "{err:?}");

        // n of zero
        let res = serde_json::from_str::<LuFactorization>(r#"{"n":0,"lu":[],"perm":[]}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_solve_rhs_mismatch() -> Result<(), LinalgError> {
        let lu = LuFactorization::from_rows(&worked_example())?;
        let res = lu.solve(&[1.0, 2.0]);
        assert!(matches!(
            res,
            Err(LinalgError::BufferSizeMismatch { name: "rhs", .. })
        ));
        Ok(())
    }
}
