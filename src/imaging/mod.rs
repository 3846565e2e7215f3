//! Raster images: the [`Image`] container and the primitives behind it.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode / encode** | `image::ImageReader`, `DynamicImage::save_with_format` |
//! | **Resample** | `DynamicImage::resize_exact` (nearest, triangle, Catmull-Rom) |
//! | **Colorspace** | Rec.601 luma over `RgbImage`, `DynamicImage::to_rgb8` / `to_rgba8` |
//! | **Flip / blit / pixel access** | in-crate, directly on [`PixelBuffer`] |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for pixel addressing and blit clipping (unit testable)
//! - **Parameters**: [`Components`], [`ResizeFilter`], and the [`Color`] value type
//! - **Buffer**: [`PixelBuffer`], the shape-checked owned byte storage
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Image**: the container combining buffer, backend and lifecycle state

pub mod backend;
pub mod buffer;
pub mod calculations;
pub mod color;
pub mod image;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use buffer::PixelBuffer;
pub use color::Color;
pub use self::image::{Image, ImageError, conversion_supported};
pub use params::{Components, ResizeFilter};
pub use rust_backend::{RustBackend, supported_extensions};
