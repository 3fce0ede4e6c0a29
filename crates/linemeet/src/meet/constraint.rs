//! Intersection constraints as value records.
//!
//! One `Constraint` per (adjacent pair, axis). Each side is a `Term`: the
//! affine function `start[c] + coeffs · (e, m0, m1)` of one line's unknowns.
//! Only line k and k+1 are chained; equality is transitive along the chain,
//! so every displaced line passes through the same point.

use crate::geom3::{normal_frame, GeomError, Line3, NormalFrame, Vec3};

use super::params::{ParamKind, ParamLayout};

/// `offset + coeffs · (extension, move0, move1)` of line `line`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Term {
    pub line: usize,
    pub offset: f64,
    pub coeffs: [f64; 3],
}

impl Term {
    /// Axis `axis` of `start + d·e + n0·m0 + n1·m1`.
    fn for_axis(line: usize, l: &Line3, frame: &NormalFrame, axis: usize) -> Self {
        let pick = |v: Vec3| v.to_array()[axis];
        let [n0, n1] = frame.axes();
        Self {
            line,
            offset: pick(l.start()),
            coeffs: [pick(l.direction()), pick(n0), pick(n1)],
        }
    }

    #[inline]
    pub fn eval(&self, layout: &ParamLayout, values: &[f64]) -> f64 {
        let mut acc = self.offset;
        for (kind, c) in ParamKind::ALL.iter().zip(self.coeffs) {
            acc += c * values[layout.index(self.line, *kind)];
        }
        acc
    }
}

/// `lhs == rhs` in one spatial axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraint {
    pub axis: usize,
    pub lhs: Term,
    pub rhs: Term,
}

impl Constraint {
    /// `lhs - rhs`; zero when satisfied.
    #[inline]
    pub fn residual(&self, layout: &ParamLayout, values: &[f64]) -> f64 {
        self.lhs.eval(layout, values) - self.rhs.eval(layout, values)
    }

    /// Linear row form `a · x = b`, as sparse `(slot, coefficient)` pairs.
    pub fn row(&self, layout: &ParamLayout) -> ([(usize, f64); 6], f64) {
        let mut entries = [(0usize, 0.0f64); 6];
        for (i, kind) in ParamKind::ALL.iter().enumerate() {
            entries[i] = (layout.index(self.lhs.line, *kind), self.lhs.coeffs[i]);
            entries[3 + i] = (layout.index(self.rhs.line, *kind), -self.rhs.coeffs[i]);
        }
        (entries, self.rhs.offset - self.lhs.offset)
    }
}

/// Frames plus constraints for one batch of lines.
#[derive(Clone, Debug)]
pub struct Problem {
    pub layout: ParamLayout,
    pub frames: Vec<NormalFrame>,
    pub constraints: Vec<Constraint>,
}

impl Problem {
    /// Build frames and adjacent-pair constraints (`3 · (N − 1)` of them).
    pub fn assemble(lines: &[Line3]) -> Result<Self, GeomError> {
        let frames = lines
            .iter()
            .map(|l| normal_frame(l.direction()))
            .collect::<Result<Vec<_>, _>>()?;
        let mut constraints = Vec::with_capacity(3 * lines.len().saturating_sub(1));
        for k in 0..lines.len().saturating_sub(1) {
            for axis in 0..3 {
                constraints.push(Constraint {
                    axis,
                    lhs: Term::for_axis(k, &lines[k], &frames[k], axis),
                    rhs: Term::for_axis(k + 1, &lines[k + 1], &frames[k + 1], axis),
                });
            }
        }
        Ok(Self {
            layout: ParamLayout::new(lines.len()),
            frames,
            constraints,
        })
    }

    /// Largest absolute constraint residual at `values` (0 with no constraints).
    pub fn max_residual(&self, values: &[f64]) -> f64 {
        self.constraints
            .iter()
            .map(|c| c.residual(&self.layout, values).abs())
            .fold(0.0, f64::max)
    }
}
