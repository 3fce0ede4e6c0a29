//! Minimal-displacement line meeting in 3D.
//!
//! Given lines that generally do not intersect, find the smallest
//! perpendicular shift of each line (least squares over all shifts) such that
//! the shifted lines share one common point.
//!
//! Layers
//! - `geom3`: vectors, lines, normal frames (leaf).
//! - `meet`: parameter layout, constraint records, KKT solve, decoding.
//! - `rand3`: seeded line bundles for tests, benches and the CLI.

pub mod geom3;
pub mod meet;
pub mod rand3;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom3::{GeomError, Line3, NormalFrame, Vec3};
pub use meet::{solve, solve_with_cfg, MeetCfg, Meeting, SolveError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom3::{cross, dot, normal_frame, GeomError, Line3, NormalFrame, Vec3};
    pub use crate::meet::{solve, solve_with_cfg, LineParams, MeetCfg, Meeting, SolveError};
    pub use crate::rand3::{draw_bundle, Bundle, BundleCfg, ReplayToken};
}
