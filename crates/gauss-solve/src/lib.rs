#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Matrices are square, row-major and stored in flat `f64` slices of length
//! `n * n`, so that `a[i * n + j]` is the entry at row `i` and column `j`.
//! The in-place routines never allocate: they borrow the caller's buffers
//! and report numerical failures through [`LinalgError`].

/// Error types for the decomposition and solver routines.
pub mod error;

/// Owned LU factorization that can be reused for several right-hand sides.
pub mod factorization;

/// Dense matrix helpers used to check and unpack factorizations.
pub mod ops;

/// Numeric tolerances and policies shared by all routines.
pub mod params;

/// In-place PLU decomposition.
pub mod plu;

/// In-place Gaussian elimination solvers.
pub mod solve;

mod pivot;

pub use error::LinalgError;
pub use factorization::LuFactorization;
pub use params::LuParams;
pub use plu::{lu_no_pivot, plu, plu_with_params};
pub use solve::{lu_solve_in_place, solve_in_place, solve_in_place_with_params};
