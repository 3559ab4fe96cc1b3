//! Orb math - vector algebra shared by the renderer and the CLI.
//!
//! Everything is double precision. `Vec3` is glam's `DVec3`; the helpers in
//! [`basis`] add the few operations a path tracer needs on top of it.

use thiserror::Error;

/// Double precision vector used for points, directions and colors.
pub use glam::DVec3 as Vec3;
pub use glam::dvec3;

mod basis;
mod interval;
mod ray;

pub use basis::{normalize, orthonormal_basis, reflect};
pub use interval::Interval;
pub use ray::Ray;

/// Errors raised by vector operations with degenerate input.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("cannot normalize degenerate vector ({0}, {1}, {2})")]
    DegenerateVector(f64, f64, f64),
}

impl MathError {
    pub(crate) fn degenerate(v: Vec3) -> Self {
        MathError::DegenerateVector(v.x, v.y, v.z)
    }
}

/// Result type for math operations.
pub type MathResult<T> = Result<T, MathError>;
