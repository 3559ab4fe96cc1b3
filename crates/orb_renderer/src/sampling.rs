//! Hemisphere direction sampling in a local frame.

use crate::random::XorShift;
use orb_math::Vec3;
use std::f64::consts::{FRAC_1_PI, PI};

/// Draw a direction uniformly over the hemisphere around `normal`.
///
/// Density is `1 / 2pi` per steradian, see [`uniform_hemisphere_pdf`].
pub fn uniform_hemisphere(rng: &mut XorShift, normal: Vec3, tangent: Vec3, binormal: Vec3) -> Vec3 {
    let tz = rng.next01();
    let phi = rng.next_range(0.0, 2.0 * PI);
    let k = (1.0 - tz * tz).sqrt();
    let tx = k * phi.cos();
    let ty = k * phi.sin();

    tz * normal + tx * tangent + ty * binormal
}

/// Draw a cosine-weighted direction over the hemisphere around `normal`.
///
/// The radius on the unit disk is `sqrt(u)`, which makes the polar cosine
/// follow `cos(theta) / pi`.
pub fn cosine_hemisphere(rng: &mut XorShift, normal: Vec3, tangent: Vec3, binormal: Vec3) -> Vec3 {
    let phi = rng.next_range(0.0, 2.0 * PI);
    let r2 = rng.next01();
    let r = r2.sqrt();
    let tx = r * phi.cos();
    let ty = r * phi.sin();
    let tz = (1.0 - r2).sqrt();

    tz * normal + tx * tangent + ty * binormal
}

#[inline]
pub fn uniform_hemisphere_pdf() -> f64 {
    0.5 * FRAC_1_PI
}

#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: f64) -> f64 {
    cos_theta.max(0.0) * FRAC_1_PI
}
