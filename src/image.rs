//! The image plane: a raster of linear-light pixels, subsample generation,
//! and the PPM/PAM/TGA byte-stream writers.
//!
//! Subsampling comes in two flavors. The fixed 25-point stencil walks a
//! deterministic pattern in [−0.5, 0.5]² around each pixel center, so the
//! same scene renders to the same bytes on any machine and any thread count.
//! The jitter sampler draws uniform offsets instead. The stencil is the
//! compiled-in default; flip [`USE_RANDOM_SAMPLE_POINTS`] for the jitter.
//!
//! Writers serialize the whole file into memory first — a failed render
//! never leaves a truncated image on disk.

use crate::color::{Color, Space};
use crate::math::{Point2, Vector2};
use crate::precision::Real;
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::io::Write;
use std::path::Path;

/// Compile-time choice between the deterministic stencil and uniform jitter.
pub const USE_RANDOM_SAMPLE_POINTS: bool = false;

/// The deterministic sampling pattern: offsets from the pixel center in
/// [−0.5, 0.5]². Dead center first, then corners, a cross, and a 4×4 grid.
pub const FIXED_SAMPLING_PATTERN: [Vector2; 25] = [
    Vector2::new(0.0, 0.0),
    // corners
    Vector2::new(0.25, 0.25),
    Vector2::new(0.25, -0.25),
    Vector2::new(-0.25, 0.25),
    Vector2::new(-0.25, -0.25),
    // cross around center
    Vector2::new(0.0, 0.25),
    Vector2::new(0.0, -0.25),
    Vector2::new(0.25, 0.0),
    Vector2::new(-0.25, 0.0),
    // a 4×4 grid in 0.25 steps
    Vector2::new(-0.375, -0.375),
    Vector2::new(-0.125, -0.375),
    Vector2::new(0.125, -0.375),
    Vector2::new(0.375, -0.375),
    Vector2::new(-0.375, -0.125),
    Vector2::new(-0.125, -0.125),
    Vector2::new(0.125, -0.125),
    Vector2::new(0.375, -0.125),
    Vector2::new(-0.375, 0.125),
    Vector2::new(-0.125, 0.125),
    Vector2::new(0.125, 0.125),
    Vector2::new(0.375, 0.125),
    Vector2::new(-0.375, 0.375),
    Vector2::new(-0.125, 0.375),
    Vector2::new(0.125, 0.375),
    Vector2::new(0.375, 0.375),
];

/// Sub-pixel offset provider. The fixed variant indexes the stencil; the
/// random variant draws from a per-pixel seeded generator so parallel rows
/// don't share RNG state.
enum SampleFuzzer {
    Fixed,
    Random(SmallRng),
}

impl SampleFuzzer {
    fn offset(&mut self, index: usize) -> Vector2 {
        match self {
            SampleFuzzer::Fixed => FIXED_SAMPLING_PATTERN[index % FIXED_SAMPLING_PATTERN.len()],
            SampleFuzzer::Random(rng) => {
                Vector2::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5))
            }
        }
    }
}

/// Invoked from the worker after each completed row, with the row index.
/// Callers promise to return quickly.
pub type RowNotifier<'a> = &'a (dyn Fn(usize) + Sync);

pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
    /// The space pixels are converted into at write-out.
    pub output_space: Space,
}

impl Image {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::black(); width * height],
            output_space: Space::Gamma,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel read; out of bounds is a programmer error and panics.
    #[inline]
    pub fn at(&self, y: usize, x: usize) -> Color {
        assert!(y < self.height && x < self.width, "image access out of bounds");
        self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, y: usize, x: usize, color: Color) {
        assert!(y < self.height && x < self.width, "image access out of bounds");
        self.pixels[y * self.width + x] = color;
    }

    /// Fills the raster by evaluating `get_color` at `samples` sub-points
    /// per pixel and averaging in linear space. Rows are dispatched across
    /// the rayon pool; each worker owns its row's pixels outright, so the
    /// deterministic stencil renders bit-identically at any thread count.
    ///
    /// `mask` gates antialiasing: a pixel whose mask byte is below
    /// `mask_threshold` is skipped entirely (left as it was).
    pub fn generate_each<F>(
        &mut self,
        get_color: F,
        samples: usize,
        row_notifier: Option<RowNotifier<'_>>,
        mask: Option<&[u8]>,
        mask_threshold: u8,
    ) where
        F: Fn(Point2) -> Color + Sync,
    {
        assert!(samples > 0, "at least one sample per pixel");
        if let Some(m) = mask {
            assert_eq!(m.len(), self.width * self.height, "mask size mismatch");
        }
        let width = self.width;
        self.pixels
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                let mut fuzzer = if USE_RANDOM_SAMPLE_POINTS {
                    SampleFuzzer::Random(SmallRng::seed_from_u64(y as u64))
                } else {
                    SampleFuzzer::Fixed
                };
                let mut sample_buffer = Vec::with_capacity(samples);
                for (x, pixel) in row.iter_mut().enumerate() {
                    if let Some(m) = mask {
                        if m[y * width + x] < mask_threshold {
                            continue;
                        }
                    }
                    sample_buffer.clear();
                    let center = Point2::new(x as Real + 0.5, y as Real + 0.5);
                    for s in 0..samples {
                        let p = center + fuzzer.offset(s);
                        sample_buffer.push(get_color(p));
                    }
                    *pixel = Color::blend_samples(&sample_buffer);
                }
                if let Some(notify) = row_notifier {
                    notify(y);
                }
                debug!("row {y} complete");
            });
    }

    fn output_pixels(&self) -> impl Iterator<Item = Color> + '_ {
        let space = self.output_space;
        self.pixels.iter().map(move |c| c.to_space(space))
    }

    /// Binary PPM (P6): RGB triples, 8 bits per channel, maxval 255.
    pub fn write_ppm(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut buffer = Vec::with_capacity(self.width * self.height * 3 + 32);
        write!(&mut buffer, "P6\n{} {}\n255\n", self.width, self.height)?;
        for color in self.output_pixels() {
            let (r, g, b) = color.to_rgb8();
            buffer.extend_from_slice(&[r, g, b]);
        }
        std::fs::write(path, buffer)
    }

    /// Binary PGM (P5): single-channel luma, maxval 255.
    pub fn write_pgm(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut buffer = Vec::with_capacity(self.width * self.height + 32);
        write!(&mut buffer, "P5\n{} {}\n255\n", self.width, self.height)?;
        for color in self.output_pixels() {
            buffer.push((color.luma().clamp(0.0, 1.0) * 255.0).round() as u8);
        }
        std::fs::write(path, buffer)
    }

    /// PAM (P7), 3 or 4 channels.
    pub fn write_pam(&self, path: impl AsRef<Path>, with_alpha: bool) -> std::io::Result<()> {
        let depth = if with_alpha { 4 } else { 3 };
        let tupltype = if with_alpha { "RGB_ALPHA" } else { "RGB" };
        let mut buffer = Vec::with_capacity(self.width * self.height * depth + 96);
        write!(
            &mut buffer,
            "P7\nWIDTH {}\nHEIGHT {}\nDEPTH {}\nMAXVAL 255\nTUPLTYPE {}\nENDHDR\n",
            self.width, self.height, depth, tupltype
        )?;
        for color in self.output_pixels() {
            let (r, g, b) = color.to_rgb8();
            buffer.extend_from_slice(&[r, g, b]);
            if with_alpha {
                buffer.push(255);
            }
        }
        std::fs::write(path, buffer)
    }

    /// Uncompressed 24-bit top-down TGA (image type 2, BGR order).
    pub fn write_tga(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut buffer = Vec::with_capacity(self.width * self.height * 3 + 18);
        let w = self.width as u16;
        let h = self.height as u16;
        let header: [u8; 18] = [
            0,                 // id length
            0,                 // no color map
            2,                 // uncompressed true color
            0, 0, 0, 0, 0,     // color map spec
            0, 0,              // x origin
            0, 0,              // y origin
            (w & 0xff) as u8,
            (w >> 8) as u8,
            (h & 0xff) as u8,
            (h >> 8) as u8,
            24,                // bits per pixel
            0x20,              // top-down row order
        ];
        buffer.extend_from_slice(&header);
        for color in self.output_pixels() {
            let (r, g, b) = color.to_rgb8();
            buffer.extend_from_slice(&[b, g, r]);
        }
        std::fs::write(path, buffer)
    }
}
