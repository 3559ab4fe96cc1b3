//! Pinhole camera with a virtual sensor plane.

use crate::RenderResult;
use orb_math::{normalize, Ray, Vec3};

/// Pinhole camera for generating primary rays.
///
/// The sensor is a rectangle of world-space size `sensor_height * aspect` by
/// `sensor_height`, centered `sensor_distance` in front of the camera.
/// Pixel row 0 is at the bottom of the sensor.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    image_width: u32,
    image_height: u32,

    // Camera positioning
    position: Vec3,
    look_at: Vec3,
    up: Vec3,

    // Sensor settings
    sensor_height: f64,
    sensor_distance: f64,

    // Cached computed values (set by initialize())
    sensor_center: Vec3,
    sensor_x: Vec3,
    sensor_y: Vec3,
}

impl Camera {
    /// Create a camera with the default framing of the built-in room.
    pub fn new() -> Self {
        Self {
            image_width: 640,
            image_height: 480,
            position: Vec3::new(7.0, 3.0, 7.0),
            look_at: Vec3::new(0.0, 1.0, 0.0),
            up: Vec3::Y,
            sensor_height: 30.0,
            sensor_distance: 45.0,
            sensor_center: Vec3::ZERO,
            sensor_x: Vec3::X,
            sensor_y: Vec3::Y,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, position: Vec3, look_at: Vec3, up: Vec3) -> Self {
        self.position = position;
        self.look_at = look_at;
        self.up = up;
        self
    }

    /// Set the sensor height and its distance from the pinhole.
    pub fn with_sensor(mut self, height: f64, distance: f64) -> Self {
        self.sensor_height = height;
        self.sensor_distance = distance;
        self
    }

    /// Initialize the sensor basis (must be called before generating rays).
    ///
    /// Fails when the view direction is degenerate or parallel to `up`.
    pub fn initialize(&mut self) -> RenderResult<()> {
        let aspect = self.image_width as f64 / self.image_height as f64;
        let sensor_width = self.sensor_height * aspect;

        let dir = normalize(self.look_at - self.position)?;
        self.sensor_x = normalize(dir.cross(self.up))? * sensor_width;
        self.sensor_y = normalize(self.sensor_x.cross(dir))? * self.sensor_height;
        self.sensor_center = self.position + dir * self.sensor_distance;

        Ok(())
    }

    /// Primary ray through pixel `(x, y)` at offset `(u, v)` inside it.
    ///
    /// `u` and `v` are in [0, 1); `(0.5, 0.5)` is the pixel center.
    pub fn ray(&self, x: u32, y: u32, u: f64, v: f64) -> RenderResult<Ray> {
        let sx = (x as f64 + u) / self.image_width as f64 - 0.5;
        let sy = (y as f64 + v) / self.image_height as f64 - 0.5;
        let on_sensor = self.sensor_center + self.sensor_x * sx + self.sensor_y * sy;

        Ok(Ray::new(self.position, on_sensor - self.position)?)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
