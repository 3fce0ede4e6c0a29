//! 3D Geometry primitives (vectors, lines, normal frames).
//!
//! Purpose
//! - Provide the leaf layer of the line-meeting optimizer: a single value-type
//!   vector `Vec3`, an immutable `Line3` with unit direction, and the fixed
//!   normal-frame convention used to parametrize perpendicular displacement.
//!
//! Conventions
//! - All operations are pure; nothing mutates an operand.
//! - Normalization is exact-zero strict: only a zero (or non-finite) length
//!   fails, tiny vectors are scaled up as-is.
//! - Conversions to `nalgebra::Vector3<f64>` exist for the solver layer.
//!
//! Code cross-refs: `crate::meet` (consumer), `crate::rand3` (bundle generator).

mod frame;
mod types;

pub use frame::{normal_frame, NormalFrame};
pub use types::{cross, dot, Line3, Vec3};

use thiserror::Error;

/// Errors raised by geometric primitives.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GeomError {
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,
    #[error("vector index {0} out of range (expected 0, 1 or 2)")]
    InvalidIndex(usize),
}
