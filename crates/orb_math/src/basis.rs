//! Normalization, reflection and tangent frames.

use crate::{MathError, MathResult, Vec3};

/// Normalize `v`, failing on zero-length or non-finite input.
#[inline]
pub fn normalize(v: Vec3) -> MathResult<Vec3> {
    v.try_normalize().ok_or_else(|| MathError::degenerate(v))
}

/// Mirror `incoming` about `normal`.
///
/// `incoming` points toward the surface; the result points away from it.
/// `normal` must be unit length. The result is renormalized to absorb
/// rounding drift.
#[inline]
pub fn reflect(incoming: Vec3, normal: Vec3) -> Vec3 {
    let r = incoming - normal * 2.0 * normal.dot(incoming);
    r.normalize_or_zero()
}

/// Build `(tangent, binormal)` so that `(tangent, binormal, normal)` is a
/// right-handed orthonormal frame.
///
/// The helper axis is picked by comparing `|n.x|` with `|n.y|` so the cross
/// product never degenerates. `normal` must be unit length.
pub fn orthonormal_basis(normal: Vec3) -> (Vec3, Vec3) {
    let axis = if normal.x.abs() > normal.y.abs() {
        Vec3::Y
    } else {
        Vec3::X
    };
    let tangent = axis.cross(normal).normalize();
    let binormal = normal.cross(tangent).normalize();
    (tangent, binormal)
}
