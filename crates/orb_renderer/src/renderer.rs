//! Render driver.
//!
//! Maps pixels, sub-pixel cells and samples to camera rays, runs the
//! estimator and accumulates into the framebuffer. Rows are rendered in
//! parallel on a rayon pool; each pixel owns a random source seeded from its
//! index, so the image does not depend on the thread count or on scheduling.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::integrator::{trace, DEPTH_LIMIT};
use crate::random::XorShift;
use crate::{Camera, Color, ImageBuffer, RenderError, RenderResult, Scene};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples taken in every sub-pixel cell
    pub samples_per_subpixel: u32,
    /// Sub-pixel grid resolution; each pixel gets `subpixels^2` cells
    pub subpixels: u32,
    /// Worker threads
    pub threads: usize,
    /// Maximum path length
    pub max_depth: u32,
    /// Radiance of rays that leave the scene
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            samples_per_subpixel: 1,
            subpixels: 4,
            threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            max_depth: DEPTH_LIMIT,
            background: Color::ZERO,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set sampling density.
    pub fn with_samples(mut self, samples_per_subpixel: u32, subpixels: u32) -> Self {
        self.samples_per_subpixel = samples_per_subpixel;
        self.subpixels = subpixels;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Primary samples per pixel.
    pub fn samples_per_pixel(&self) -> u64 {
        self.samples_per_subpixel as u64 * (self.subpixels as u64).pow(2)
    }

    /// Reject configurations the driver cannot render.
    pub fn validate(&self) -> RenderResult<()> {
        let problem = if self.width == 0 || self.height == 0 {
            format!("resolution must be positive, got {}x{}", self.width, self.height)
        } else if self.samples_per_subpixel == 0 {
            "sample count must be positive".to_string()
        } else if self.subpixels == 0 {
            "sub-pixel grid must be at least 1x1".to_string()
        } else if self.threads == 0 {
            "thread count must be positive".to_string()
        } else {
            return Ok(());
        };
        Err(RenderError::InvalidConfig(problem))
    }
}

/// A pixel whose estimate was abandoned.
#[derive(Debug)]
pub struct PixelFailure {
    pub x: u32,
    pub y: u32,
    pub error: RenderError,
}

/// Counters gathered while rendering.
#[derive(Debug, Default)]
pub struct RenderStats {
    /// Primary rays traced
    pub samples: u64,
    /// Scattering events over all paths
    pub bounces: u64,
    /// Pixels left black because a sample failed, in row-major order
    pub failures: Vec<PixelFailure>,
}

impl RenderStats {
    fn merge(mut self, other: RenderStats) -> RenderStats {
        self.samples += other.samples;
        self.bounces += other.bounces;
        self.failures.extend(other.failures);
        self
    }

    /// Average number of bounces per primary ray.
    pub fn mean_path_length(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.bounces as f64 / self.samples as f64
        }
    }
}

/// Framebuffer plus statistics of a finished render.
#[derive(Debug)]
pub struct RenderOutput {
    pub image: ImageBuffer,
    pub stats: RenderStats,
}

/// Estimate of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelEstimate {
    pub color: Color,
    pub samples: u64,
    pub bounces: u64,
}

/// Render a single pixel with stratified supersampling.
///
/// Every sub-pixel cell is jittered `samples_per_subpixel` times and the
/// contributions are normalized by the total sample count. Any failing
/// sample aborts the whole pixel.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> RenderResult<PixelEstimate> {
    let index = y as u64 * config.width as u64 + x as u64;
    let mut rng = XorShift::for_pixel(index);

    let n = config.subpixels;
    let cell = 1.0 / n as f64;
    let scale = 1.0 / config.samples_per_pixel() as f64;

    let mut color = Color::ZERO;
    let mut bounces = 0;
    for sy in 0..n {
        for sx in 0..n {
            let mut accumulated = Color::ZERO;
            for _ in 0..config.samples_per_subpixel {
                let u = (sx as f64 + rng.next01()) * cell;
                let v = (sy as f64 + rng.next01()) * cell;
                let ray = camera.ray(x, y, u, v)?;
                let path = trace(scene, &ray, &mut rng, config)?;
                accumulated += path.radiance * scale;
                bounces += path.bounces as u64;
            }
            color += accumulated;
        }
    }

    Ok(PixelEstimate {
        color,
        samples: config.samples_per_pixel(),
        bounces,
    })
}

/// Render one framebuffer row in place.
fn render_row(
    camera: &Camera,
    scene: &Scene,
    y: u32,
    row: &mut [Color],
    config: &RenderConfig,
) -> RenderStats {
    let mut stats = RenderStats::default();
    for (x, cell) in (0..config.width).zip(row.iter_mut()) {
        match render_pixel(camera, scene, x, y, config) {
            Ok(estimate) => {
                *cell = estimate.color;
                stats.samples += estimate.samples;
                stats.bounces += estimate.bounces;
            }
            Err(error) => stats.failures.push(PixelFailure { x, y, error }),
        }
    }
    stats
}

/// Render the scene through the default camera.
pub fn render(scene: &Scene, config: &RenderConfig) -> RenderResult<RenderOutput> {
    render_with_camera(scene, &Camera::new(), config)
}

/// Render the scene through `camera`, resized to the configured resolution.
pub fn render_with_camera(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
) -> RenderResult<RenderOutput> {
    config.validate()?;

    let mut camera = camera.clone().with_resolution(config.width, config.height);
    camera.initialize()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    log::info!(
        "Rendering {}x{} @ {} spp ({} objects, {} threads)",
        config.width,
        config.height,
        config.samples_per_pixel(),
        scene.len(),
        config.threads
    );

    let mut image = ImageBuffer::new(config.width, config.height);
    let rows_done = AtomicUsize::new(0);
    let report_every = (config.height as usize / 10).max(1);

    let mut stats = pool.install(|| {
        image
            .pixels
            .par_chunks_mut(config.width as usize)
            .enumerate()
            .map(|(y, row)| {
                let stats = render_row(&camera, scene, y as u32, row, config);

                let finished = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
                if finished % report_every == 0 || finished == config.height as usize {
                    log::info!(
                        "Rendering {:.1}%",
                        100.0 * finished as f64 / config.height as f64
                    );
                }
                stats
            })
            .reduce(RenderStats::default, RenderStats::merge)
    });

    stats.failures.sort_by_key(|f| (f.y, f.x));
    if let Some(first) = stats.failures.first() {
        log::warn!(
            "{} pixel(s) failed and were left black; first at ({}, {}): {}",
            stats.failures.len(),
            first.x,
            first.y,
            first.error
        );
    }
    log::debug!("Mean path length {:.3}", stats.mean_path_length());

    Ok(RenderOutput { image, stats })
}
