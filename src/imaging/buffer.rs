//! Owned, tightly packed 8-bit pixel storage.
//!
//! A [`PixelBuffer`] is the `(width, height, components, bytes)` quadruple
//! that every backend primitive consumes and produces. Its fields are private
//! and it can only be built through shape-checked constructors, so
//! `data.len() == width * height * components` holds for every value that
//! exists. Operations that change shape build a new buffer and the caller
//! swaps it in whole.

use super::backend::BackendError;
use super::params::Components;
use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    components: Components,
    data: Vec<u8>,
}

/// Number of bytes a `width × height` buffer of `components` channels needs,
/// or `None` if that does not fit in `usize`.
pub fn expected_len(width: u32, height: u32, components: Components) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(components.count())
}

impl PixelBuffer {
    /// Zero-filled buffer, or `None` if its byte length overflows `usize`.
    pub fn try_zeroed(width: u32, height: u32, components: Components) -> Option<Self> {
        let len = expected_len(width, height, components)?;
        Some(Self {
            width,
            height,
            components,
            data: vec![0; len],
        })
    }

    /// Zero-filled buffer.
    ///
    /// # Panics
    ///
    /// If the byte length overflows `usize`. Shapes that come from outside
    /// the program should go through [`PixelBuffer::try_zeroed`].
    pub fn zeroed(width: u32, height: u32, components: Components) -> Self {
        Self::try_zeroed(width, height, components).unwrap_or_else(|| {
            panic!(
                "{width}x{height} buffer with {} components overflows usize",
                components.count()
            )
        })
    }

    /// Wrap existing bytes. Returns the bytes back if their length does not
    /// match the declared shape.
    pub fn from_raw(
        width: u32,
        height: u32,
        components: Components,
        data: Vec<u8>,
    ) -> Result<Self, Vec<u8>> {
        if expected_len(width, height, components) != Some(data.len()) {
            return Err(data);
        }
        Ok(Self {
            width,
            height,
            components,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn components(&self) -> Components {
        self.components
    }

    pub fn is_zero_sized(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    fn stride(&self) -> usize {
        self.width as usize * self.components.count()
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// New buffer with the row order reversed.
    pub fn flipped_vertical(&self) -> Self {
        let stride = self.stride();
        let mut data = Vec::with_capacity(self.data.len());
        if stride > 0 {
            for row in self.data.chunks_exact(stride).rev() {
                data.extend_from_slice(row);
            }
        }
        self.with_data(data)
    }

    /// New buffer with the pixel order of every row reversed.
    pub fn flipped_horizontal(&self) -> Self {
        let stride = self.stride();
        let channels = self.components.count();
        let mut data = Vec::with_capacity(self.data.len());
        if stride > 0 {
            for row in self.data.chunks_exact(stride) {
                for pixel in row.chunks_exact(channels).rev() {
                    data.extend_from_slice(pixel);
                }
            }
        }
        self.with_data(data)
    }

    /// Same shape, different bytes. `data` must already have the right length.
    fn with_data(&self, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), self.data.len());
        Self {
            width: self.width,
            height: self.height,
            components: self.components,
            data,
        }
    }

    /// Copy into an `image::DynamicImage` of the matching 8-bit variant.
    pub fn to_dynamic(&self) -> Result<DynamicImage, BackendError> {
        let (w, h) = (self.width, self.height);
        let data = self.data.clone();
        let image = match self.components {
            Components::Gray => GrayImage::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
            Components::GrayAlpha => {
                GrayAlphaImage::from_raw(w, h, data).map(DynamicImage::ImageLumaA8)
            }
            Components::Rgb => RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
            Components::Rgba => RgbaImage::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
        };
        image.ok_or_else(|| {
            BackendError::ProcessingFailed(format!(
                "{}x{} buffer with {} components has inconsistent length",
                w,
                h,
                self.components.count()
            ))
        })
    }

    /// Take ownership of a decoded image, normalising it to 8 bits per
    /// channel while keeping its channel count.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let (components, data) = match image.color().channel_count() {
            1 => (Components::Gray, image.into_luma8().into_raw()),
            2 => (Components::GrayAlpha, image.into_luma_alpha8().into_raw()),
            3 => (Components::Rgb, image.into_rgb8().into_raw()),
            _ => (Components::Rgba, image.into_rgba8().into_raw()),
        };
        Self {
            width,
            height,
            components,
            data,
        }
    }
}
