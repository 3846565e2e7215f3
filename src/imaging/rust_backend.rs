//! Pure Rust imaging backend built on the `image` crate.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` with content sniffing |
//! | Encode | `DynamicImage::save_with_format`, format from extension |
//! | Resample | `DynamicImage::resize_exact` (Nearest / Triangle / CatmullRom) |
//! | Colorspace | Rec.601 luma over `RgbImage`; `DynamicImage::to_rgb8` / `to_rgba8` |
//!
//! Decoded images are normalised to 8 bits per channel but keep their
//! channel count, so a 16-bit grayscale PNG loads as a one-component buffer.

use super::backend::{BackendError, ImageBackend};
use super::buffer::PixelBuffer;
use super::params::{Components, ResizeFilter};
use image::{DynamicImage, GrayImage, ImageFormat, ImageReader, Luma, RgbImage};
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Extensions whose codecs are compiled in.
const FORMAT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("png", ImageFormat::Png),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    FORMAT_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Look up the output format for `path` by extension, case-insensitively.
fn output_format(path: &Path) -> Result<ImageFormat, BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    FORMAT_CANDIDATES
        .iter()
        .find(|(candidate, fmt)| *candidate == ext && fmt.writing_enabled())
        .map(|(_, fmt)| *fmt)
        .ok_or_else(|| BackendError::Encode(format!("Unsupported output format: '{ext}'")))
}

/// Gray from color with Rec.601 weights (0.299, 0.587, 0.114), rounded.
/// `DynamicImage::to_luma8` uses Rec.709 weights instead.
fn rec601_luma(rgb: &RgbImage) -> GrayImage {
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let weighted = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
        Luma([((weighted + 500) / 1000) as u8])
    })
}

/// Production backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<PixelBuffer, BackendError> {
        let img = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| BackendError::Decode(format!("{}: {}", path.display(), e)))?;
        debug!(
            path = %path.display(),
            width = img.width(),
            height = img.height(),
            color = ?img.color(),
            "decoded image"
        );
        Ok(PixelBuffer::from_dynamic(img))
    }

    fn encode(&self, buffer: &PixelBuffer, path: &Path) -> Result<(), BackendError> {
        let format = output_format(path)?;
        buffer
            .to_dynamic()?
            .save_with_format(path, format)
            .map_err(|e| BackendError::Encode(format!("{}: {}", path.display(), e)))
    }

    fn resample(
        &self,
        buffer: &PixelBuffer,
        width: u32,
        height: u32,
        filter: ResizeFilter,
    ) -> Result<PixelBuffer, BackendError> {
        let resized = buffer
            .to_dynamic()?
            .resize_exact(width, height, filter.filter_type());
        Ok(PixelBuffer::from_dynamic(resized))
    }

    fn convert(
        &self,
        buffer: &PixelBuffer,
        target: Components,
    ) -> Result<PixelBuffer, BackendError> {
        let img = buffer.to_dynamic()?;
        let converted = match target {
            Components::Gray => DynamicImage::ImageLuma8(rec601_luma(&img.to_rgb8())),
            Components::GrayAlpha => DynamicImage::ImageLumaA8(img.to_luma_alpha8()),
            Components::Rgb => DynamicImage::ImageRgb8(img.to_rgb8()),
            Components::Rgba => DynamicImage::ImageRgba8(img.to_rgba8()),
        };
        Ok(PixelBuffer::from_dynamic(converted))
    }
}
