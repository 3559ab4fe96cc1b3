//! Framebuffer and display encoding.
//!
//! The framebuffer holds linear radiance. Writers gamma-encode for a display
//! gamma of 2.2 and emit rows top first; in memory row 0 is the bottom of the
//! sensor, so rows are written in reverse.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{Color, RenderResult};
use orb_math::Interval;

/// Display gamma assumed by the writers.
pub const DISPLAY_GAMMA: f64 = 2.2;

/// Map a linear value to an 8-bit display value.
///
/// `round(clamp01(value)^(1/2.2) * 255)`
#[inline]
pub fn to_ldr(value: f64) -> u8 {
    let encoded = Interval::UNIT.clamp(value).powf(1.0 / DISPLAY_GAMMA);
    (encoded * 255.0).round() as u8
}

/// Convert a color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [to_ldr(color.x), to_ldr(color.y), to_ldr(color.z)]
}

/// Linear framebuffer, row-major with row 0 at the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Rows in display order: top of the sensor first.
    fn display_rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks(self.width.max(1) as usize).rev()
    }

    /// Write a plain-text PPM (`P3`) image.
    pub fn write_ppm<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for row in self.display_rows() {
            for color in row {
                let [r, g, b] = color_to_rgb(*color);
                write!(writer, "{r} {g} {b} ")?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }

    /// Save as a plain-text PPM file.
    pub fn save_ppm(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Gamma-encoded RGB bytes in display order.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for row in self.display_rows() {
            for color in row {
                bytes.extend_from_slice(&color_to_rgb(*color));
            }
        }
        bytes
    }

    /// Save as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let top = self.height.saturating_sub(1);
        let rgb = image::RgbImage::from_fn(self.width, self.height, |x, row| {
            image::Rgb(color_to_rgb(self.get(x, top - row)))
        });
        rgb.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Save, choosing the format from the extension (`.png`, otherwise PPM).
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

        log::debug!("Writing {}x{} image to {}", self.width, self.height, path.display());
        if is_png {
            self.save_png(path)
        } else {
            self.save_ppm(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_ldr() {
        assert_eq!(to_ldr(0.0), 0);
        assert_eq!(to_ldr(-3.0), 0);
        assert_eq!(to_ldr(1.0), 255);
        assert_eq!(to_ldr(8.0), 255);
        // 0.5^(1/2.2) * 255 = 186.08
        assert_eq!(to_ldr(0.5), 186);
        // 0.01^(1/2.2) * 255 = 31.44
        assert_eq!(to_ldr(0.01), 31);
        assert_eq!(to_ldr(f64::NAN), 0);
    }

    #[test]
    fn test_get_set() {
        let mut image = ImageBuffer::new(3, 2);
        assert_eq!(image.pixels.len(), 6);
        image.set(2, 1, Color::ONE);
        assert_eq!(image.get(2, 1), Color::ONE);
        assert_eq!(image.pixels[5], Color::ONE);
    }

    #[test]
    fn test_ppm_layout() {
        let mut image = ImageBuffer::new(2, 2);
        // Bottom row dark, top row bright
        image.set(0, 0, Color::new(0.0, 0.0, 0.0));
        image.set(1, 0, Color::new(1.0, 0.0, 0.0));
        image.set(0, 1, Color::new(0.0, 1.0, 0.0));
        image.set(1, 1, Color::new(0.0, 0.0, 1.0));

        let mut out = Vec::new();
        image.write_ppm(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "P3");
        assert_eq!(lines[1], "2 2");
        assert_eq!(lines[2], "255");
        assert_eq!(lines[3].trim_end(), "0 255 0 0 0 255");
        assert_eq!(lines[4].trim_end(), "0 0 0 255 0 0");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_rgb8_matches_ppm_order() {
        let mut image = ImageBuffer::new(1, 2);
        image.set(0, 1, Color::ONE);

        assert_eq!(image.to_rgb8(), vec![255, 255, 255, 0, 0, 0]);
    }

    #[test]
    fn test_save_formats() {
        let dir = std::env::temp_dir().join(format!("orb-image-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut buffer = ImageBuffer::new(4, 3);
        buffer.set(1, 2, Color::splat(0.5));

        let ppm = dir.join("out.ppm");
        buffer.save(&ppm).unwrap();
        let text = std::fs::read_to_string(&ppm).unwrap();
        assert!(text.starts_with("P3\n4 3\n255\n"));

        let png = dir.join("out.png");
        buffer.save(&png).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(1, 0).0, [186, 186, 186]);
        assert_eq!(decoded.into_raw(), buffer.to_rgb8());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
