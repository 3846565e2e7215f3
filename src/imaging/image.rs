//! The [`Image`] container: an owned 8-bit raster with bounds-checked pixel
//! access, compositing, and shape-changing transforms.
//!
//! ## Construction
//!
//! | Constructor | `is_empty` | `source_path` |
//! |---|---|---|
//! | [`Image::open`] / [`Image::open_with`] | `false` | set |
//! | [`Image::from_raw`] / [`Image::from_buffer`] / [`Image::from_image`] | `false` | `None` |
//! | [`Image::blank`] / [`Image::blank_with_components`] | `true` | `None` |
//!
//! ## Ownership
//!
//! Every image owns its [`PixelBuffer`] outright. Derived images (flips,
//! conversions, [`Image::resized`]) copy into fresh storage, and the
//! in-place operations ([`Image::resize`], [`Image::set`], [`Image::blit`])
//! therefore never reach another image's pixels. Shape changes swap in a
//! whole new buffer, so width, height, component count and byte length
//! always agree.
//!
//! ## Backends
//!
//! Operations that need a codec, resampler or colorspace routine come in
//! two forms: a plain one that uses [`RustBackend`], and a `*_with` form
//! that takes any [`ImageBackend`].

use super::backend::{BackendError, ImageBackend};
use super::buffer::{PixelBuffer, expected_len};
use super::calculations::{clip_region, pixel_offset};
use super::color::Color;
use super::params::{Components, ResizeFilter};
use super::rust_backend::RustBackend;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Unable to load image '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("Unable to save image '{}': {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("Unsupported bits per pixel: {bits_per_pixel}")]
    UnsupportedFormat { bits_per_pixel: u32 },
    #[error("Pixel ({x}, {y}) is out of range for a {width}x{height} image")]
    IndexOutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("Source image has incorrect format: expected {expected} components, found {found}")]
    FormatMismatch {
        expected: Components,
        found: Components,
    },
    #[error("Buffer of {actual} bytes does not match the declared shape ({expected} bytes)")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("A {width}x{height} image with {components} components is too large to address")]
    TooLarge {
        width: u32,
        height: u32,
        components: Components,
    },
    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub type Result<T> = std::result::Result<T, ImageError>;

#[derive(Debug, Clone)]
pub struct Image {
    buffer: PixelBuffer,
    source_path: Option<PathBuf>,
    modified: SystemTime,
    is_empty: bool,
}

impl Image {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Decode an image file with the default backend.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(&RustBackend::new(), path.as_ref())
    }

    /// Decode an image file with `backend`.
    ///
    /// Any decode failure (missing file, corrupt data, unknown format) is
    /// reported as [`ImageError::Load`]; no image is produced.
    #[tracing::instrument(level = "debug", skip(backend))]
    pub fn open_with<B: ImageBackend>(backend: &B, path: &Path) -> Result<Self> {
        let buffer = backend.decode(path).map_err(|source| ImageError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            source_path: Some(path.to_path_buf()),
            ..Self::from_buffer(buffer)
        })
    }

    /// Wrap an existing buffer.
    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            buffer,
            source_path: None,
            modified: SystemTime::now(),
            is_empty: false,
        }
    }

    /// Take ownership of raw row-major bytes laid out as
    /// `height × width × components`.
    pub fn from_raw(
        width: u32,
        height: u32,
        components: Components,
        data: Vec<u8>,
    ) -> Result<Self> {
        let expected = checked_len(width, height, components)?;
        let buffer = PixelBuffer::from_raw(width, height, components, data).map_err(|data| {
            ImageError::ShapeMismatch {
                expected,
                actual: data.len(),
            }
        })?;
        Ok(Self::from_buffer(buffer))
    }

    /// Deep copy of another image's pixels.
    ///
    /// Unlike [`Clone`], the copy is a new image: it has no source path, a
    /// fresh timestamp, and is never empty.
    pub fn from_image(other: &Image) -> Self {
        Self::from_buffer(other.buffer.clone())
    }

    /// Zero-filled canvas whose channel count is derived from `bits_per_pixel`.
    pub fn blank(width: u32, height: u32, bits_per_pixel: u32) -> Result<Self> {
        let components = Components::from_bits_per_pixel(bits_per_pixel)
            .ok_or(ImageError::UnsupportedFormat { bits_per_pixel })?;
        Self::blank_with_components(width, height, components)
    }

    /// Zero-filled canvas with an explicit channel count.
    pub fn blank_with_components(
        width: u32,
        height: u32,
        components: Components,
    ) -> Result<Self> {
        Ok(Self {
            is_empty: true,
            ..Self::from_buffer(zeroed(width, height, components)?)
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn components(&self) -> Components {
        self.buffer.components()
    }

    pub fn bits_per_pixel(&self) -> u32 {
        self.components().bits_per_pixel()
    }

    pub fn data(&self) -> &[u8] {
        self.buffer.data()
    }

    /// Direct byte access. Call [`Image::mark_modified`] after writing
    /// through this so the timestamp and empty flag stay truthful.
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.buffer.data_mut()
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    /// File this image was decoded from, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// True for a blank canvas nothing has been written to yet.
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    fn touch(&mut self) {
        self.modified = SystemTime::now();
    }

    /// Record an out-of-band change to the pixel data.
    pub fn mark_modified(&mut self) {
        self.touch();
        self.is_empty = false;
    }

    // =========================================================================
    // Pixel access
    // =========================================================================

    fn check_bounds(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::IndexOutOfRange {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(pixel_offset(self.width(), self.components().count(), x, y))
    }

    /// Read pixel `(x, y)` widened to four channels.
    pub fn get(&self, x: u32, y: u32) -> Result<Color> {
        let offset = self.check_bounds(x, y)?;
        let components = self.components();
        let pixel = &self.data()[offset..offset + components.count()];
        Ok(Color::expand(pixel, components))
    }

    /// Write the leading channels of `color` into pixel `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, color: impl Into<Color>) -> Result<()> {
        let offset = self.check_bounds(x, y)?;
        let channels = self.components().count();
        color
            .into()
            .narrow_into(&mut self.buffer.data_mut()[offset..offset + channels]);
        self.mark_modified();
        Ok(())
    }

    // =========================================================================
    // Compositing
    // =========================================================================

    /// Copy `source` into this image with its top-left corner at `(x, y)`.
    ///
    /// Whatever falls outside this image is clipped away; a source placed
    /// entirely outside copies nothing. Both images must have the same
    /// component count.
    pub fn blit(&mut self, source: &Image, x: u32, y: u32) -> Result<()> {
        if source.components() != self.components() {
            return Err(ImageError::FormatMismatch {
                expected: self.components(),
                found: source.components(),
            });
        }

        self.touch();

        let Some(region) = clip_region(self.size(), source.size(), x, y) else {
            debug!(x, y, "blit source lies outside destination, nothing copied");
            return Ok(());
        };

        let channels = self.components().count();
        let span = region.width as usize * channels;
        let dest_start = region.x as usize * channels;

        for row in 0..region.height {
            let src = &source.buffer.row(row)[..span];
            let dest = self.buffer.row_mut(region.y + row);
            dest[dest_start..dest_start + span].copy_from_slice(src);
        }

        debug!(?region, "blit");
        self.is_empty = false;
        Ok(())
    }

    // =========================================================================
    // Transforms
    // =========================================================================

    /// New image turned upside down.
    pub fn flip_vertical(&self) -> Image {
        Self::from_buffer(self.buffer.flipped_vertical())
    }

    /// New image mirrored left to right.
    pub fn flip_horizontal(&self) -> Image {
        Self::from_buffer(self.buffer.flipped_horizontal())
    }

    fn resample_buffer<B: ImageBackend>(
        &self,
        backend: &B,
        width: u32,
        height: u32,
        filter: ResizeFilter,
    ) -> Result<PixelBuffer> {
        let components = self.components();
        checked_len(width, height, components)?;
        if width == 0 || height == 0 || self.buffer.is_zero_sized() {
            // Nothing to sample from or into.
            return zeroed(width, height, components);
        }

        let resampled = backend.resample(&self.buffer, width, height, filter)?;
        if resampled.width() != width
            || resampled.height() != height
            || resampled.components() != components
        {
            return Err(BackendError::ProcessingFailed(format!(
                "resample to {width}x{height} returned {}x{} with {} components",
                resampled.width(),
                resampled.height(),
                resampled.components().count()
            ))
            .into());
        }
        Ok(resampled)
    }

    /// Resample this image in place.
    pub fn resize(&mut self, width: u32, height: u32, filter: ResizeFilter) -> Result<()> {
        self.resize_with(&RustBackend::new(), width, height, filter)
    }

    #[tracing::instrument(level = "debug", skip(self, backend))]
    pub fn resize_with<B: ImageBackend>(
        &mut self,
        backend: &B,
        width: u32,
        height: u32,
        filter: ResizeFilter,
    ) -> Result<()> {
        self.buffer = self.resample_buffer(backend, width, height, filter)?;
        self.touch();
        Ok(())
    }

    /// Resampled copy; this image is left untouched.
    pub fn resized(&self, width: u32, height: u32, filter: ResizeFilter) -> Result<Image> {
        self.resized_with(&RustBackend::new(), width, height, filter)
    }

    pub fn resized_with<B: ImageBackend>(
        &self,
        backend: &B,
        width: u32,
        height: u32,
        filter: ResizeFilter,
    ) -> Result<Image> {
        let buffer = self.resample_buffer(backend, width, height, filter)?;
        Ok(Self::from_buffer(buffer))
    }

    // =========================================================================
    // Format conversion
    // =========================================================================

    /// Convert to `target` channels.
    ///
    /// Returns [`Cow::Borrowed`] (this very image) when the image already
    /// has `target` channels or when the pair has no defined conversion.
    /// Callers detect an unsupported request by comparing
    /// [`Image::components`] before and after.
    pub fn convert(&self, target: Components) -> Result<Cow<'_, Image>> {
        self.convert_with(&RustBackend::new(), target)
    }

    pub fn convert_with<B: ImageBackend>(
        &self,
        backend: &B,
        target: Components,
    ) -> Result<Cow<'_, Image>> {
        let from = self.components();
        if from == target {
            return Ok(Cow::Borrowed(self));
        }
        if !conversion_supported(from, target) {
            warn!(
                from = from.count(),
                to = target.count(),
                "unsupported conversion, image left unchanged"
            );
            return Ok(Cow::Borrowed(self));
        }

        debug!(from = from.count(), to = target.count(), "converting");
        let converted = backend.convert(&self.buffer, target)?;
        Ok(Cow::Owned(Self::from_buffer(converted)))
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Encode to `path`; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_with(&RustBackend::new(), path.as_ref())
    }

    #[tracing::instrument(level = "debug", skip(self, backend))]
    pub fn save_with<B: ImageBackend>(&self, backend: &B, path: &Path) -> Result<()> {
        backend
            .encode(&self.buffer, path)
            .map_err(|source| ImageError::Save {
                path: path.to_path_buf(),
                source,
            })
    }
}

fn checked_len(width: u32, height: u32, components: Components) -> Result<usize> {
    expected_len(width, height, components).ok_or(ImageError::TooLarge {
        width,
        height,
        components,
    })
}

fn zeroed(width: u32, height: u32, components: Components) -> Result<PixelBuffer> {
    PixelBuffer::try_zeroed(width, height, components).ok_or(ImageError::TooLarge {
        width,
        height,
        components,
    })
}

/// Pairs [`Image::convert`] hands to the colorspace primitive.
///
/// Anything involving gray+alpha is left alone, as is every identity pair.
pub fn conversion_supported(from: Components, to: Components) -> bool {
    use Components::*;
    matches!(
        (from, to),
        (Rgb | Rgba, Gray) | (Gray | Rgba, Rgb) | (Gray | Rgb, Rgba)
    )
}
