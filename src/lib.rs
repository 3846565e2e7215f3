//! # Rasterbox
//!
//! A small raster image toolkit: load an image from disk, read and write
//! individual pixels, composite one image onto another, flip, resample,
//! change the number of color channels, and save the result.
//!
//! # The Image Model
//!
//! Every [`imaging::Image`] stores 8 bits per channel in a packed,
//! row-major byte buffer with no row padding. The channel count fixes the
//! pixel layout:
//!
//! ```text
//! components  bits/pixel  layout
//! 1           8           gray
//! 2           16          gray, alpha
//! 3           24          red, green, blue
//! 4           32          red, green, blue, alpha
//! ```
//!
//! Pixel values cross the API as [`imaging::Color`] (always RGBA). Writes
//! narrow the color to the image's layout; reads expand stored channels
//! back to RGBA with defined fill rules.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | The `Image` container, pixel buffer, blit clipping, and the `image`-crate backend |
//! | [`config`] | `config.toml` loading, validation, and merging onto stock defaults |
//! | [`logging`] | `tracing` subscriber setup with the `timestamp - LEVEL - message` line format |
//! | [`output`] | CLI output formatting for each subcommand |
//!
//! # Design Decisions
//!
//! ## Backend Seam
//!
//! Decoding, encoding, resampling and colorspace conversion go through the
//! [`imaging::ImageBackend`] trait. [`imaging::RustBackend`] implements it
//! with the pure-Rust `image` crate, so the binary needs no system
//! libraries. Tests substitute a recording mock to check what an `Image`
//! asks the backend for without decoding anything.
//!
//! Flip, blit and pixel access never touch the backend; they work on the
//! byte buffer directly.
//!
//! ## Unsupported Conversions Are Not Errors
//!
//! [`imaging::Image::convert`] returns a `Cow`. A conversion with no defined
//! mapping (anything involving gray+alpha) logs a warning and hands back
//! the original image borrowed, so a caller can compare channel counts
//! instead of handling an error for a request that has a sensible no-op.
//!
//! ## Lifecycle Flags
//!
//! An image remembers the file it came from, when it last changed, and
//! whether it is still an untouched blank canvas. Pixel writes and blits
//! that copy something clear the blank flag; every mutation refreshes the
//! modification time.

pub mod config;
pub mod imaging;
pub mod logging;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
