//! Line meeting: minimal perpendicular displacements through one common point.
//!
//! Purpose
//! - Given N lines in 3D, find for each line a displacement within the plane
//!   perpendicular to it such that all displaced lines pass through a single
//!   point, minimizing the sum of squared displacement lengths.
//!
//! Pipeline
//! - `params`: fixed layout `(line, kind) ↦ 3·line + kind` for the 3N unknowns
//!   (extension, movement along `n0`, movement along `n1`).
//! - `constraint`: normal frames per line, then 3 equality records per
//!   adjacent pair (k, k+1), one per axis. Adjacent chaining is enough since
//!   equality is transitive; all-pairs would only add redundant rows.
//! - `solve`: exact KKT solve of the convex QP with feasibility verification,
//!   then decoding into movement vectors and the common point.
//!
//! Assumptions
//! - Extensions are free (not in the objective).
//! - The common point is read off line 0; every other line lands on it up to
//!   the residual tolerance.
//!
//! Code cross-refs: `crate::geom3::{Line3, NormalFrame, normal_frame}`.

mod cfg;
mod constraint;
mod params;
mod solve;

pub use cfg::MeetCfg;
pub use constraint::{Constraint, Problem, Term};
pub use params::{LineParams, ParamKind, ParamLayout};
pub use solve::{solve, solve_with_cfg, Meeting};

use thiserror::Error;

use crate::geom3::GeomError;

/// Errors raised by the line-meeting solve. No partial results are returned.
#[derive(Debug, Error, PartialEq)]
pub enum SolveError {
    #[error("no lines to intersect")]
    EmptyInput,
    #[error(transparent)]
    Geometry(#[from] GeomError),
    #[error("kkt decomposition failed: {0}")]
    Decomposition(&'static str),
    #[error("non-finite values in kkt system or solution")]
    NonFinite,
    #[error("solution violates constraints: residual {residual:e} > tol {tol:e}")]
    Infeasible { residual: f64, tol: f64 },
}
