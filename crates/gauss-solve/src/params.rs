use serde::{Deserialize, Serialize};

/// Numeric tolerances and policies used while selecting pivots.
///
/// A pivot is classified against the largest magnitude found in the input
/// matrix (its `scale`):
///
/// * `|pivot| <= max(singular_tol, n * f64::EPSILON * scale)` is a hard failure
///   ([`crate::LinalgError::SingularMatrix`]). The relative term absorbs the
///   rounding noise that elimination leaves in place of an exact zero.
/// * `|pivot| < ill_conditioned_tol * scale` is reported with `log::warn!`, and
///   becomes [`crate::LinalgError::IllConditioned`] when `strict` is set.
///
/// # Example
///
/// ```
/// use gauss_solve::LuParams;
///
/// let params = LuParams {
///     strict: true,
///     ..Default::default()
/// };
/// assert_eq!(params.singular_tol, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LuParams {
    /// Absolute magnitude at or below which a pivot is treated as zero.
    ///
    /// Only takes effect above the relative floor `n * f64::EPSILON * scale`.
    pub singular_tol: f64,
    /// Pivot magnitude, relative to the matrix scale, below which the system is ill-conditioned.
    pub ill_conditioned_tol: f64,
    /// Reject ill-conditioned pivots instead of only logging them.
    pub strict: bool,
    /// Reject NaN and infinite inputs before touching any buffer.
    pub check_finite: bool,
}

impl Default for LuParams {
    fn default() -> Self {
        Self {
            singular_tol: 0.0,
            ill_conditioned_tol: 1e-12,
            strict: false,
            check_finite: true,
        }
    }
}
