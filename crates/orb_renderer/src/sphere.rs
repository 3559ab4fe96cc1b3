//! Sphere primitive for ray tracing.

use crate::{Hitpoint, RenderError, RenderResult};
use orb_math::{Interval, Ray, Vec3};

/// Minimum accepted hit distance; secondary rays must not re-hit their origin.
pub const HIT_EPSILON: f64 = 1e-6;

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and finite.
    pub fn new(center: Vec3, radius: f64) -> RenderResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(RenderError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Closed-form ray/sphere test.
    ///
    /// Takes the nearest root beyond [`HIT_EPSILON`]; when the near root is
    /// behind the origin (ray starts inside) the far root is used.
    pub fn intersect(&self, ray: &Ray) -> Option<Hitpoint> {
        let o_to_p = self.center - ray.origin();
        let b = o_to_p.dot(ray.direction());
        let c = b * b - o_to_p.length_squared() + self.radius * self.radius;

        if c < 0.0 {
            return None;
        }

        let sqrt_c = c.sqrt();
        let window = Interval::new(HIT_EPSILON, f64::INFINITY);

        let t1 = b - sqrt_c;
        let t2 = b + sqrt_c;
        let t = if window.surrounds(t1) {
            t1
        } else if window.surrounds(t2) {
            t2
        } else {
            return None;
        };

        let position = ray.at(t);
        let outward_normal = ((position - self.center) / self.radius).normalize();
        Some(Hitpoint::new(ray, t, outward_normal))
    }
}
