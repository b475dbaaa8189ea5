//! Renderer collaborator and the deterministic fallback pattern generator
//!
//! A real renderer (diffusion model, spectrogram synthesizer) lives outside
//! this crate and plugs in through [`Renderer`].

use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, ImageResult, Rgb, RgbImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::RenderError;

/// Rendered RGB raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    image: RgbImage,
}

impl Artifact {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Wrap raw RGB8 bytes; `None` if the length does not match the size
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        RgbImage::from_raw(width, height, pixels).map(Self::new)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGB8 bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// File extension for the encoded form
    pub fn extension(&self) -> &'static str {
        crate::ARTIFACT_EXT
    }

    /// Encode as PNG
    pub fn write_png<W: Write>(&self, writer: W) -> ImageResult<()> {
        PngEncoder::new(writer).write_image(
            self.image.as_raw(),
            self.width(),
            self.height(),
            ColorType::Rgb8,
        )
    }
}

/// Anything that can turn a prompt and seed into an artifact
pub trait Renderer {
    fn render(&self, prompt: &str, seed: u64, width: u32, height: u32) -> Result<Artifact, RenderError>;
}

/// Seeded stripe-and-speckle pattern. Same seed and size, same pixels.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternRenderer;

impl PatternRenderer {
    const BACKGROUND: Rgb<u8> = Rgb([16, 16, 18]);
    const STRIPE_SPACING: usize = 7;
    const SPECKLES: usize = 4000;

    pub fn new() -> Self {
        Self
    }
}

impl Renderer for PatternRenderer {
    fn render(&self, _prompt: &str, seed: u64, width: u32, height: u32) -> Result<Artifact, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize { width, height });
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut img = RgbImage::from_pixel(width, height, Self::BACKGROUND);

        for x in (0..width).step_by(Self::STRIPE_SPACING) {
            let v = 45 + (180.0 * rng.gen::<f64>()) as u8;
            let color = Rgb([v, v / 2, 60]);
            for y in 0..height {
                img.put_pixel(x, y, color);
            }
        }

        for _ in 0..Self::SPECKLES {
            let x = rng.gen_range(0..width);
            let y = rng.gen_range(0..height);
            let c = 70 + rng.gen_range(0..150u8);
            img.put_pixel(x, y, Rgb([c, c, c]));
        }

        Ok(Artifact::new(img))
    }
}

// =============================================================================
// TESTS
// =============================================================================
