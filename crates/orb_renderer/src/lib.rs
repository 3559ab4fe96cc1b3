//! Orb renderer - CPU path tracing of sphere scenes
//!
//! An unbiased Monte Carlo path tracer. Scenes are small lists of spheres,
//! each with one of a closed set of materials; the driver estimates the
//! radiance reaching a pinhole sensor and stores it in a linear framebuffer.

mod camera;
mod error;
mod hitpoint;
mod image_buffer;
mod material;
mod presets;
mod renderer;
mod scene;
mod sphere;

pub mod integrator;
pub mod random;
pub mod sampling;

pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use hitpoint::Hitpoint;
pub use image_buffer::{color_to_rgb, to_ldr, ImageBuffer, DISPLAY_GAMMA};
pub use integrator::{radiance, trace, PathSample, DEPTH_LIMIT};
pub use material::{
    Color, Fresnel, Glass, Lambertian, LambertianSimple, Lightsource, Material, Phong, Scatter,
};
pub use presets::ScenePreset;
pub use random::XorShift;
pub use renderer::{
    render, render_pixel, render_with_camera, PixelEstimate, PixelFailure, RenderConfig,
    RenderOutput, RenderStats,
};
pub use scene::{Scene, SceneObject};
pub use sphere::{Sphere, HIT_EPSILON};

/// Re-export Vec3 and common math types from orb_math
pub use orb_math::{Ray, Vec3};
