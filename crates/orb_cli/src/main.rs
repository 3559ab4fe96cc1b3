use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use orb_math::Vec3;
use orb_renderer::{render, Color, RenderConfig, ScenePreset, DEPTH_LIMIT};

/// Render a built-in sphere scene with Monte Carlo path tracing
#[derive(Parser, Debug)]
#[command(name = "orb", version)]
struct Args {
    /// Output image; `.png` writes PNG, anything else plain-text PPM
    #[arg(short, long, default_value = "image.ppm")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Samples per sub-pixel cell
    #[arg(short, long, default_value_t = 1)]
    samples: u32,

    /// Sub-pixel grid size (n gives n*n cells per pixel)
    #[arg(long, default_value_t = 4)]
    subpixels: u32,

    /// Worker threads (defaults to available parallelism)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Maximum path length
    #[arg(long, default_value_t = DEPTH_LIMIT)]
    max_depth: u32,

    /// Scene preset: diffuse, diffuse-uniform, specular or glass
    #[arg(long, default_value_t = ScenePreset::Diffuse)]
    scene: ScenePreset,

    /// Radiance of rays leaving the scene, as a gray level
    #[arg(long, default_value_t = 0.0)]
    background: f64,
}

impl Args {
    fn config(&self) -> RenderConfig {
        let mut config = RenderConfig::default()
            .with_resolution(self.width, self.height)
            .with_samples(self.samples, self.subpixels)
            .with_max_depth(self.max_depth)
            .with_background(Color::splat(self.background));
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        config
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.config();

    log::info!("Scene preset: {}", args.scene);

    let scene = args.scene.build()?;
    let start = Instant::now();
    let output = render(&scene, &config)?;
    let elapsed = start.elapsed();

    log::info!(
        "Rendered in {:.2?} ({:.2} bounces per path)",
        elapsed,
        output.stats.mean_path_length()
    );

    output
        .image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Wrote {}", args.output.display());

    // Average of the framebuffer, handy for comparing runs
    let mean = output.image.pixels.iter().copied().sum::<Vec3>()
        / output.image.pixels.len().max(1) as f64;
    log::debug!("Mean radiance: {:.4} {:.4} {:.4}", mean.x, mean.y, mean.z);

    Ok(())
}
