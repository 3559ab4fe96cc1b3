//! Record of a ray-object intersection.

use orb_math::{Ray, Vec3};

/// Where and how a ray met a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitpoint {
    /// Ray parameter of the intersection; `+inf` means no hit yet
    pub distance: f64,
    /// Point of intersection
    pub position: Vec3,
    /// Unit surface normal pointing away from the object's center
    pub normal: Vec3,
    /// Whether the ray arrived from outside the surface
    pub front_face: bool,
}

impl Default for Hitpoint {
    fn default() -> Self {
        Self {
            distance: f64::INFINITY,
            position: Vec3::ZERO,
            normal: Vec3::ZERO,
            front_face: false,
        }
    }
}

impl Hitpoint {
    /// Build a hitpoint at parameter `distance` along `ray`.
    ///
    /// `outward_normal` must be unit length.
    pub fn new(ray: &Ray, distance: f64, outward_normal: Vec3) -> Self {
        Self {
            distance,
            position: ray.at(distance),
            normal: outward_normal,
            front_face: ray.direction().dot(outward_normal) < 0.0,
        }
    }

    /// Whether this record describes an actual intersection.
    pub fn is_hit(&self) -> bool {
        self.distance.is_finite()
    }
}
