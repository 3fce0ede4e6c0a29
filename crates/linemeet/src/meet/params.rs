//! Fixed-layout parameter vector: three scalars per line.
//!
//! Slot of `(line, kind)` is `3 * line + kind`, with kinds ordered
//! extension, movement along `n0`, movement along `n1`.

/// Which of a line's three unknowns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Extension = 0,
    Move0 = 1,
    Move1 = 2,
}

impl ParamKind {
    pub const ALL: [ParamKind; 3] = [ParamKind::Extension, ParamKind::Move0, ParamKind::Move1];
    pub const PER_LINE: usize = 3;
}

/// Index arithmetic for `lines` lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamLayout {
    pub lines: usize,
}

impl ParamLayout {
    #[inline]
    pub fn new(lines: usize) -> Self {
        Self { lines }
    }
    /// Total number of scalars (`3 · lines`).
    #[inline]
    pub fn len(&self) -> usize {
        self.lines * ParamKind::PER_LINE
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }
    #[inline]
    pub fn index(&self, line: usize, kind: ParamKind) -> usize {
        debug_assert!(line < self.lines, "line {line} out of {}", self.lines);
        line * ParamKind::PER_LINE + kind as usize
    }
    /// Slots of the objective terms (all movement scalars).
    pub fn movement_slots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.lines).flat_map(move |k| {
            [
                self.index(k, ParamKind::Move0),
                self.index(k, ParamKind::Move1),
            ]
        })
    }
    /// Read back one line's unknowns from a flat slice of length `len()`.
    #[inline]
    pub fn line_params(&self, values: &[f64], line: usize) -> LineParams {
        LineParams {
            extension: values[self.index(line, ParamKind::Extension)],
            movement: [
                values[self.index(line, ParamKind::Move0)],
                values[self.index(line, ParamKind::Move1)],
            ],
        }
    }
}

/// Solved unknowns of one line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineParams {
    /// Signed distance along the line direction from its start.
    pub extension: f64,
    /// Coefficients along the normal-frame axes `(n0, n1)`.
    pub movement: [f64; 2],
}

impl LineParams {
    /// This line's share of the objective, `m0² + m1²`.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.movement[0] * self.movement[0] + self.movement[1] * self.movement[1]
    }
}
