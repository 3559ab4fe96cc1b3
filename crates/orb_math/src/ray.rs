use crate::{normalize, MathResult, Vec3};

/// A ray in 3D space with an origin and a unit direction.
///
/// The direction is normalized on construction and the fields are private,
/// so every `Ray` in flight is guaranteed to carry a unit direction. The
/// sphere intersection test relies on this.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    ///
    /// Fails if `direction` has zero length or non-finite components.
    pub fn new(origin: Vec3, direction: Vec3) -> MathResult<Self> {
        Ok(Self {
            origin,
            direction: normalize(direction)?,
        })
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}
