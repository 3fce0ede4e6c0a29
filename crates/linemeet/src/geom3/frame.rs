//! Normal frames: an orthonormal basis of the plane perpendicular to a line.

use super::{GeomError, Vec3};

/// `|direction.x|` at or below this picks the (1,0,0) dummy.
///
/// Exact-zero switching underflows `direction × (0,1,0)` for subnormal `x`.
pub(crate) const DUMMY_SWITCH_EPS: f64 = 1e-6;
/// Minimum `|direction × dummy|` before the dummy counts as parallel.
const DUMMY_PARALLEL_EPS: f64 = 1e-9;

/// Pair of unit vectors spanning the plane orthogonal to a line direction.
///
/// Invariants (for a unit `direction` d):
/// - `|n0| = |n1| = 1`, `n0·n1 = 0`, `n0·d = n1·d = 0`.
/// - `(n0, d, n1)` is right-handed: `n0 × d = n1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalFrame {
    pub n0: Vec3,
    pub n1: Vec3,
}

impl NormalFrame {
    /// Both axes, `[n0, n1]`.
    #[inline]
    pub fn axes(&self) -> [Vec3; 2] {
        [self.n0, self.n1]
    }

    /// `n0 · a + n1 · b`.
    #[inline]
    pub fn combine(&self, a: f64, b: f64) -> Vec3 {
        self.n0 * a + self.n1 * b
    }
}

/// Reference vector that is never parallel to a unit `direction`.
///
/// (0,1,0) when `direction.x` is nonzero; otherwise (1,0,0). A unit vector
/// with `x ≈ 0` is nearly orthogonal to (1,0,0); one with `|x| > eps` keeps
/// `|d × (0,1,0)| >= |x|` away from zero.
#[inline]
fn dummy_for(direction: Vec3) -> Vec3 {
    if direction.x.abs() > DUMMY_SWITCH_EPS {
        Vec3::unit_y()
    } else {
        Vec3::unit_x()
    }
}

/// Normal frame for an already normalized `direction`.
///
/// `n0 = normalize(d × dummy)`, `n1 = normalize(n0 × d)`.
/// Fails with `ZeroLength` only for a zero (or non-finite) direction.
pub fn normal_frame(direction: Vec3) -> Result<NormalFrame, GeomError> {
    let dummy = dummy_for(direction);
    let first = direction.cross(&dummy);
    debug_assert!(
        (direction.length() - 1.0).abs() > 1e-6 || first.length() > DUMMY_PARALLEL_EPS,
        "dummy vector parallel to direction {direction:?}"
    );
    let n0 = first.normalized()?;
    let n1 = n0.cross(&direction).normalized()?;
    Ok(NormalFrame { n0, n1 })
}
