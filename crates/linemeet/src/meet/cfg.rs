//! Tolerances for the line-meeting solve.

/// Solver configuration (tolerances and the SVD iteration cap).
///
/// Defaults are fixed for normal use; tests tighten or loosen them explicitly.
#[derive(Clone, Copy, Debug)]
pub struct MeetCfg {
    /// Singular values of the KKT matrix at or below this count as zero.
    pub eps_rank: f64,
    /// Allowed constraint residual, scaled by `1 + max |start component|`.
    pub eps_residual: f64,
    /// Convergence threshold passed to the SVD.
    pub eps_svd: f64,
    /// SVD iteration cap; `0` means unbounded.
    pub max_svd_iter: usize,
}

impl Default for MeetCfg {
    fn default() -> Self {
        Self {
            eps_rank: 1e-10,
            eps_residual: 1e-8,
            eps_svd: f64::EPSILON,
            max_svd_iter: 10_000,
        }
    }
}
