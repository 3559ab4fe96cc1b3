//! Monte Carlo radiance estimator.
//!
//! Solves the rendering equation along a single path: at every bounce the
//! material picks one outgoing direction and the path throughput is scaled by
//! that sample's weight. Paths end on an emitter, on escaping the scene, or
//! at the depth limit (which contributes nothing).

use crate::{Color, RenderConfig, RenderResult, Scene};
use crate::random::XorShift;
use orb_math::Ray;

/// Default maximum number of path segments.
pub const DEPTH_LIMIT: u32 = 10;

/// Result of tracing one path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Radiance carried back along the primary ray
    pub radiance: Color,
    /// Number of surfaces the path scattered off
    pub bounces: u32,
}

/// Trace one path starting with `ray`.
///
/// Equivalent to the recursive estimator
/// `L(x) = Le` on emitters, `weight * L(next)` elsewhere, unrolled into a
/// loop with an accumulated throughput so stack depth stays constant.
pub fn trace(
    scene: &Scene,
    ray: &Ray,
    rng: &mut XorShift,
    config: &RenderConfig,
) -> RenderResult<PathSample> {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for depth in 0..config.max_depth {
        let Some((object, hit)) = scene.intersect(&ray) else {
            return Ok(PathSample {
                radiance: throughput * config.background,
                bounces: depth,
            });
        };

        // Emitters are assumed black, so the path stops here
        let material = object.material();
        if material.is_emissive() {
            return Ok(PathSample {
                radiance: throughput * material.emission(),
                bounces: depth,
            });
        }

        let scatter = material.sample(rng, ray.direction(), hit.normal)?;
        throughput *= scatter.throughput;
        ray = Ray::new(hit.position, scatter.direction)?;
    }

    Ok(PathSample {
        radiance: Color::ZERO,
        bounces: config.max_depth,
    })
}

/// Radiance arriving at `ray`'s origin from its direction.
pub fn radiance(
    scene: &Scene,
    ray: &Ray,
    rng: &mut XorShift,
    config: &RenderConfig,
) -> RenderResult<Color> {
    trace(scene, ray, rng, config).map(|path| path.radiance)
}
