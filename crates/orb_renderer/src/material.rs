//! Surface reflectance models.
//!
//! `Material` is a closed enum over the supported BRDFs. Every variant that
//! scatters exposes the same two operations:
//!
//! - `eval(incoming, normal, outgoing)`: the BRDF value for a direction pair
//! - `sample(rng, incoming, normal)`: an outgoing direction together with the
//!   complete Monte Carlo weight for it
//!
//! `incoming` is the direction the ray travels (pointing at the surface) and
//! `normal` is the geometric normal pointing away from the object's center.
//!
//! The weight returned by `sample` is `brdf * cos / pdf` already evaluated,
//! so the integrator never divides by a density itself. For Dirac-delta lobes
//! (glass) there is no finite pdf; the weight is the Fresnel/IOR factor of the
//! branch taken and `pdf` is `None`.

use crate::random::XorShift;
use crate::sampling::{
    cosine_hemisphere, cosine_hemisphere_pdf, uniform_hemisphere, uniform_hemisphere_pdf,
};
use crate::{RenderError, RenderResult};
use orb_math::{orthonormal_basis, reflect, Vec3};
use std::f64::consts::{FRAC_1_PI, PI};

/// Color type alias (linear RGB radiance or reflectance)
pub type Color = Vec3;

/// Outcome of sampling a material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    /// Unit outgoing direction in world space
    pub direction: Vec3,
    /// Solid-angle density of `direction`; `None` for delta lobes
    pub pdf: Option<f64>,
    /// Multiplier applied to the radiance arriving along `direction`
    pub throughput: Color,
}

/// Flip `normal` so it faces against `incoming`.
#[inline]
fn facing(normal: Vec3, incoming: Vec3) -> Vec3 {
    if normal.dot(incoming) < 0.0 {
        normal
    } else {
        -normal
    }
}

/// Diffuse surface sampled uniformly over the hemisphere.
///
/// Same BRDF as [`Lambertian`]; kept for comparing estimator variance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambertianSimple {
    reflectance: Color,
}

impl LambertianSimple {
    pub fn new(reflectance: Color) -> Self {
        Self { reflectance }
    }

    pub fn eval(&self, _incoming: Vec3, _normal: Vec3, _outgoing: Vec3) -> Color {
        self.reflectance * FRAC_1_PI
    }

    pub fn sample(&self, rng: &mut XorShift, incoming: Vec3, normal: Vec3) -> Scatter {
        let normal = facing(normal, incoming);
        let (tangent, binormal) = orthonormal_basis(normal);
        let direction = uniform_hemisphere(rng, normal, tangent, binormal);

        let pdf = uniform_hemisphere_pdf();
        let cos_theta = normal.dot(direction).max(0.0);
        Scatter {
            direction,
            pdf: Some(pdf),
            throughput: self.eval(incoming, normal, direction) * cos_theta / pdf,
        }
    }
}

/// Diffuse surface with cosine-weighted importance sampling.
///
/// The sampling density cancels the cosine term exactly, so every sample
/// carries the reflectance as its weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    reflectance: Color,
}

impl Lambertian {
    pub fn new(reflectance: Color) -> Self {
        Self { reflectance }
    }

    pub fn eval(&self, _incoming: Vec3, _normal: Vec3, _outgoing: Vec3) -> Color {
        self.reflectance * FRAC_1_PI
    }

    pub fn sample(&self, rng: &mut XorShift, incoming: Vec3, normal: Vec3) -> Scatter {
        let normal = facing(normal, incoming);
        let (tangent, binormal) = orthonormal_basis(normal);
        let direction = cosine_hemisphere(rng, normal, tangent, binormal);

        Scatter {
            direction,
            pdf: Some(cosine_hemisphere_pdf(normal.dot(direction))),
            throughput: self.reflectance,
        }
    }
}

/// Energy-normalized Phong lobe around the mirror direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phong {
    reflectance: Color,
    exponent: f64,
}

impl Phong {
    /// Create a Phong material. Larger exponents give tighter highlights.
    pub fn new(reflectance: Color, exponent: f64) -> Self {
        Self {
            reflectance,
            exponent,
        }
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    pub fn eval(&self, incoming: Vec3, normal: Vec3, outgoing: Vec3) -> Color {
        let normal = facing(normal, incoming);
        if normal.dot(outgoing) < 0.0 {
            return Color::ZERO;
        }

        let cos_alpha = reflect(incoming, normal).dot(outgoing).max(0.0);
        self.reflectance * (self.exponent + 2.0) / (2.0 * PI) * cos_alpha.powf(self.exponent)
    }

    /// Density of `outgoing` under [`Phong::sample`].
    pub fn pdf(&self, incoming: Vec3, normal: Vec3, outgoing: Vec3) -> f64 {
        let normal = facing(normal, incoming);
        let cos_alpha = reflect(incoming, normal).dot(outgoing).max(0.0);
        (self.exponent + 1.0) / (2.0 * PI) * cos_alpha.powf(self.exponent)
    }

    pub fn sample(&self, rng: &mut XorShift, incoming: Vec3, normal: Vec3) -> Scatter {
        let facing_normal = facing(normal, incoming);
        let mirror = reflect(incoming, facing_normal);
        let (tangent, binormal) = orthonormal_basis(mirror);

        let u1 = rng.next01();
        let u2 = rng.next01();
        let phi = 2.0 * PI * u1;
        let theta = u2.powf(1.0 / (self.exponent + 1.0)).acos();
        let (sin_theta, cos_theta) = theta.sin_cos();

        let direction = (tangent * sin_theta * phi.cos()
            + mirror * cos_theta
            + binormal * sin_theta * phi.sin())
        .normalize();

        let pdf = self.pdf(incoming, normal, direction);
        let cos_surface = facing_normal.dot(direction);
        // Lobe directions that dip below the surface carry nothing
        let throughput = if cos_surface > 0.0 && pdf > 0.0 {
            self.eval(incoming, normal, direction) * cos_surface / pdf
        } else {
            Color::ZERO
        };

        Scatter {
            direction,
            pdf: Some(pdf),
            throughput,
        }
    }
}

/// Fresnel split at a dielectric interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fresnel {
    /// Fraction of energy reflected
    pub reflected: f64,
    /// Fraction transmitted, including the squared IOR-ratio radiance
    /// compression of the refracted ray
    pub transmitted: f64,
}

/// Geometry of a ray meeting a dielectric boundary.
enum Interface {
    TotalInternalReflection {
        reflected: Vec3,
    },
    Split {
        reflected: Vec3,
        refracted: Vec3,
        fresnel: Fresnel,
        /// Relative IOR across the boundary in the direction of travel
        eta: f64,
    },
}

/// Ideal smooth dielectric (glass).
///
/// Scattering is a pair of Dirac deltas (mirror and refraction directions),
/// so [`Glass::eval`] has no finite value and returns zero; use
/// [`Glass::sample`], which picks a branch by Russian roulette on the
/// Fresnel reflectance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glass {
    reflectance: Color,
    ior: f64,
}

impl Glass {
    /// Index of refraction of the outside medium (vacuum).
    const OUTSIDE_IOR: f64 = 1.0;

    /// Create a glass material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(reflectance: Color, ior: f64) -> Self {
        Self { reflectance, ior }
    }

    pub fn ior(&self) -> f64 {
        self.ior
    }

    pub fn eval(&self, _incoming: Vec3, _normal: Vec3, _outgoing: Vec3) -> Color {
        Color::ZERO
    }

    fn interface(&self, incoming: Vec3, normal: Vec3) -> Interface {
        let oriented = facing(normal, incoming);
        let entering = normal.dot(oriented) > 0.0;
        let eta = if entering {
            Self::OUTSIDE_IOR / self.ior
        } else {
            self.ior / Self::OUTSIDE_IOR
        };

        let reflected = reflect(incoming, oriented);

        // Snell's law: cos^2 of the transmitted angle
        let d_dot_n = incoming.dot(oriented);
        let cos2t = 1.0 - eta * eta * (1.0 - d_dot_n * d_dot_n);
        if cos2t < 0.0 {
            return Interface::TotalInternalReflection { reflected };
        }

        let cos_t = cos2t.sqrt();
        let refracted = (incoming * eta - oriented * (d_dot_n * eta + cos_t)).normalize();

        let cos_i = -d_dot_n;
        let r_parallel = (eta * cos_i - cos_t) / (eta * cos_i + cos_t);
        let r_perpendicular = (cos_i - eta * cos_t) / (cos_i + eta * cos_t);
        let fr = 0.5 * (r_parallel * r_parallel + r_perpendicular * r_perpendicular);

        Interface::Split {
            reflected,
            refracted,
            fresnel: Fresnel {
                reflected: fr,
                transmitted: (1.0 - fr) * eta * eta,
            },
            eta,
        }
    }

    /// Fresnel terms for a ray travelling along `incoming`.
    ///
    /// Total internal reflection reports everything reflected.
    pub fn fresnel(&self, incoming: Vec3, normal: Vec3) -> Fresnel {
        match self.interface(incoming, normal) {
            Interface::TotalInternalReflection { .. } => Fresnel {
                reflected: 1.0,
                transmitted: 0.0,
            },
            Interface::Split { fresnel, .. } => fresnel,
        }
    }

    pub fn sample(&self, rng: &mut XorShift, incoming: Vec3, normal: Vec3) -> Scatter {
        match self.interface(incoming, normal) {
            Interface::TotalInternalReflection { reflected } => Scatter {
                direction: reflected,
                pdf: None,
                throughput: self.reflectance,
            },
            Interface::Split {
                reflected,
                refracted,
                fresnel,
                eta,
            } => {
                // Reflect with probability Fr. The branch weight is the Fresnel
                // term divided by its selection probability: Fr / Fr for the
                // mirror, Ft / (1 - Fr) = eta^2 for the refraction.
                if rng.next01() < fresnel.reflected {
                    Scatter {
                        direction: reflected,
                        pdf: None,
                        throughput: self.reflectance,
                    }
                } else {
                    Scatter {
                        direction: refracted,
                        pdf: None,
                        throughput: self.reflectance * (eta * eta),
                    }
                }
            }
        }
    }
}

/// Pure emitter. Reflects nothing and must never be asked to scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lightsource {
    emission: Color,
}

impl Lightsource {
    pub fn new(emission: Color) -> Self {
        Self { emission }
    }
}

/// Any supported surface model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    LambertianSimple(LambertianSimple),
    Lambertian(Lambertian),
    Phong(Phong),
    Glass(Glass),
    Lightsource(Lightsource),
}

impl Material {
    /// Radiance emitted by the surface.
    pub fn emission(&self) -> Color {
        match self {
            Material::Lightsource(light) => light.emission,
            _ => Color::ZERO,
        }
    }

    /// Albedo-like color of the surface.
    pub fn reflectance(&self) -> Color {
        match self {
            Material::LambertianSimple(m) => m.reflectance,
            Material::Lambertian(m) => m.reflectance,
            Material::Phong(m) => m.reflectance,
            Material::Glass(m) => m.reflectance,
            Material::Lightsource(_) => Color::ZERO,
        }
    }

    /// Whether any channel of the emission is positive.
    pub fn is_emissive(&self) -> bool {
        let e = self.emission();
        e.x > 0.0 || e.y > 0.0 || e.z > 0.0
    }

    /// Evaluate the BRDF.
    ///
    /// Fails for light sources, which have no scattering interface.
    pub fn eval(&self, incoming: Vec3, normal: Vec3, outgoing: Vec3) -> RenderResult<Color> {
        match self {
            Material::LambertianSimple(m) => Ok(m.eval(incoming, normal, outgoing)),
            Material::Lambertian(m) => Ok(m.eval(incoming, normal, outgoing)),
            Material::Phong(m) => Ok(m.eval(incoming, normal, outgoing)),
            Material::Glass(m) => Ok(m.eval(incoming, normal, outgoing)),
            Material::Lightsource(_) => Err(RenderError::LightSourceScatter),
        }
    }

    /// Sample an outgoing direction and its Monte Carlo weight.
    ///
    /// Fails for light sources, which have no scattering interface.
    pub fn sample(&self, rng: &mut XorShift, incoming: Vec3, normal: Vec3) -> RenderResult<Scatter> {
        match self {
            Material::LambertianSimple(m) => Ok(m.sample(rng, incoming, normal)),
            Material::Lambertian(m) => Ok(m.sample(rng, incoming, normal)),
            Material::Phong(m) => Ok(m.sample(rng, incoming, normal)),
            Material::Glass(m) => Ok(m.sample(rng, incoming, normal)),
            Material::Lightsource(_) => Err(RenderError::LightSourceScatter),
        }
    }
}

impl From<LambertianSimple> for Material {
    fn from(m: LambertianSimple) -> Self {
        Material::LambertianSimple(m)
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Phong> for Material {
    fn from(m: Phong) -> Self {
        Material::Phong(m)
    }
}

impl From<Glass> for Material {
    fn from(m: Glass) -> Self {
        Material::Glass(m)
    }
}

impl From<Lightsource> for Material {
    fn from(m: Lightsource) -> Self {
        Material::Lightsource(m)
    }
}
