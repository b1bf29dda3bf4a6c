use thiserror::Error;

/// An error type for the decomposition and solver routines.
#[derive(Error, Debug, PartialEq)]
pub enum LinalgError {
    /// The matrix dimension must be at least one.
    #[error("Invalid dimension. The matrix dimension must be at least 1, got {0}.")]
    InvalidDimension(usize),

    /// A buffer does not hold the number of elements implied by the dimension.
    #[error("Buffer size mismatch for {name}: expected {expected} elements, got {actual}")]
    BufferSizeMismatch {
        /// Label of the offending buffer.
        name: &'static str,
        /// Number of elements implied by the dimension.
        expected: usize,
        /// Number of elements actually provided.
        actual: usize,
    },

    /// Every candidate pivot of a column is numerically zero.
    #[error("Matrix is singular: no pivot above the rounding floor in column {column}")]
    SingularMatrix {
        /// Column in which the elimination stopped.
        column: usize,
    },

    /// The pivot is nonzero but small relative to the matrix scale.
    #[error("Matrix is ill-conditioned: pivot {pivot:e} in column {column} is below {threshold:e}")]
    IllConditioned {
        /// Column of the offending pivot.
        column: usize,
        /// Magnitude of the selected pivot.
        pivot: f64,
        /// Magnitude below which a pivot is considered ill-conditioned.
        threshold: f64,
    },

    /// Elimination without row exchanges hit a zero diagonal entry.
    #[error("Zero pivot in column {column}: the matrix is singular or requires pivoting")]
    ZeroPivot {
        /// Column of the zero diagonal entry.
        column: usize,
    },

    /// The input holds NaN or an infinity.
    #[error("Non-finite value at ({row}, {col})")]
    NonFinite {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        col: usize,
    },

    /// A permutation vector is not a bijection on `0..n`.
    #[error("Invalid permutation vector: {0:?}")]
    InvalidPermutation(Vec<usize>),
}
