//! Equality-constrained least squares via the KKT system, plus decoding.
//!
//! minimize `Σ_k m_k0² + m_k1²`  s.t.  `A x = b`
//!
//! Stationarity of the Lagrangian gives the symmetric system
//! `[H Aᵀ; A 0] [x; λ] = [0; b]` with `H = 2·diag(0, 1, 1, 0, 1, 1, …)`.
//! The problem is convex, so any solution of this system is the global
//! optimum. We solve it with an SVD (least-norm on rank deficiency, e.g.
//! parallel neighbours whose extensions are not unique) and then verify
//! feasibility explicitly before decoding.

use nalgebra::{DMatrix, DVector};

use crate::geom3::{Line3, NormalFrame, Vec3};

use super::cfg::MeetCfg;
use super::constraint::Problem;
use super::params::{LineParams, ParamLayout};
use super::SolveError;

/// Output of one solve.
#[derive(Clone, Debug, PartialEq)]
pub struct Meeting {
    /// Common point of all displaced lines.
    pub point: Vec3,
    /// Per-line perpendicular displacement, input order.
    pub movements: Vec<Vec3>,
    /// Per-line solved unknowns, input order.
    pub params: Vec<LineParams>,
    /// `Σ |movement|²` at the optimum.
    pub objective: f64,
    /// Largest constraint residual at the optimum.
    pub max_residual: f64,
}

impl Meeting {
    /// `start_k + d_k · e_k + movement_k` for every line; all ≈ `point`.
    pub fn landing_points(&self, lines: &[Line3]) -> Vec<Vec3> {
        lines
            .iter()
            .zip(self.params.iter().zip(&self.movements))
            .map(|(l, (p, m))| l.point_at(p.extension) + *m)
            .collect()
    }

    /// Input lines shifted by their movement vectors.
    pub fn displaced_lines(&self, lines: &[Line3]) -> Vec<Line3> {
        lines
            .iter()
            .zip(&self.movements)
            .map(|(l, m)| l.displaced(*m))
            .collect()
    }
}

/// Solve with default tolerances.
pub fn solve(lines: &[Line3]) -> Result<Meeting, SolveError> {
    solve_with_cfg(lines, MeetCfg::default())
}

/// Minimal perpendicular displacements making all `lines` meet in one point.
///
/// Errors
/// - `EmptyInput` for no lines.
/// - `Geometry` if a normal frame cannot be built.
/// - `Decomposition`, `NonFinite`, `Infeasible` when the KKT solve fails or
///   its result violates the constraints beyond `cfg.eps_residual`.
pub fn solve_with_cfg(lines: &[Line3], cfg: MeetCfg) -> Result<Meeting, SolveError> {
    if lines.is_empty() {
        return Err(SolveError::EmptyInput);
    }
    let problem = Problem::assemble(lines)?;
    let values = solve_kkt(&problem, cfg)?;
    let max_residual = problem.max_residual(values.as_slice());
    let tol = cfg.eps_residual * (1.0 + start_scale(lines));
    if max_residual > tol {
        return Err(SolveError::Infeasible {
            residual: max_residual,
            tol,
        });
    }
    Ok(decode(lines, &problem.frames, &problem.layout, values.as_slice(), max_residual))
}

/// Largest absolute start coordinate; sets the residual scale.
fn start_scale(lines: &[Line3]) -> f64 {
    lines
        .iter()
        .flat_map(|l| l.start().to_array())
        .fold(0.0, |acc: f64, c| acc.max(c.abs()))
}

/// Assemble and solve `[H Aᵀ; A 0] [x; λ] = [0; b]`; returns `x`.
fn solve_kkt(problem: &Problem, cfg: MeetCfg) -> Result<DVector<f64>, SolveError> {
    let n = problem.layout.len();
    let m = problem.constraints.len();
    let mut kkt = DMatrix::<f64>::zeros(n + m, n + m);
    let mut rhs = DVector::<f64>::zeros(n + m);

    for slot in problem.layout.movement_slots() {
        kkt[(slot, slot)] = 2.0;
    }
    for (r, c) in problem.constraints.iter().enumerate() {
        let (entries, b) = c.row(&problem.layout);
        for (j, a) in entries {
            kkt[(n + r, j)] += a;
            kkt[(j, n + r)] += a;
        }
        rhs[n + r] = b;
    }
    if !rhs.iter().all(|v| v.is_finite()) || !kkt.iter().all(|v| v.is_finite()) {
        return Err(SolveError::NonFinite);
    }

    // Least-norm solution, i.e. the optimum closest to the all-zero start.
    let svd = kkt
        .try_svd(true, true, cfg.eps_svd, cfg.max_svd_iter)
        .ok_or(SolveError::Decomposition("svd did not converge"))?;
    let sol = svd
        .solve(&rhs, cfg.eps_rank)
        .map_err(SolveError::Decomposition)?;
    if !sol.iter().all(|v| v.is_finite()) {
        return Err(SolveError::NonFinite);
    }
    Ok(sol.rows(0, n).into_owned())
}

fn decode(
    lines: &[Line3],
    frames: &[NormalFrame],
    layout: &ParamLayout,
    values: &[f64],
    max_residual: f64,
) -> Meeting {
    let params: Vec<LineParams> = (0..layout.lines)
        .map(|k| layout.line_params(values, k))
        .collect();
    let movements: Vec<Vec3> = params
        .iter()
        .zip(frames)
        .map(|(p, f)| f.combine(p.movement[0], p.movement[1]))
        .collect();
    let point = lines[0].point_at(params[0].extension) + movements[0];
    let objective: f64 = params.iter().map(LineParams::cost).sum();
    Meeting {
        point,
        movements,
        params,
        objective,
        max_residual,
    }
}
