//! Shared test utilities for the rasterbox test suite.
//!
//! Provides pattern builders and region assertions for [`Image`] tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut dest = gradient(8, 8, Components::Rgba);
//! let original = dest.clone();
//! let stamp = solid(2, 2, Components::Rgba, Color::WHITE);
//!
//! dest.blit(&stamp, 3, 3).unwrap();
//! assert_region(&dest, &stamp, 3, 3);
//! assert_outside_unchanged(&dest, &original, (3, 3, 2, 2));
//! ```

use crate::imaging::{Color, Components, Image};

// =========================================================================
// Pattern builders
// =========================================================================

/// Image whose every byte is distinct-ish and depends on position and channel.
///
/// Pixel `(0, 0)` starts at `[0, 7, 14, 21]`, so it never equals the
/// handful of named colors tests write.
pub fn gradient(width: u32, height: u32, components: Components) -> Image {
    let channels = components.count();
    let mut data = Vec::with_capacity(width as usize * height as usize * channels);
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                data.push(((x as usize * 31 + y as usize * 17 + c * 7) % 256) as u8);
            }
        }
    }
    Image::from_raw(width, height, components, data).unwrap()
}

/// Image filled with `color`, narrowed to `components`.
pub fn solid(width: u32, height: u32, components: Components, color: Color) -> Image {
    let mut img = Image::blank_with_components(width, height, components).unwrap();
    for (x, y) in coords(&img) {
        img.set(x, y, color).unwrap();
    }
    img
}

/// Every `(x, y)` of an image in row-major order.
pub fn coords(img: &Image) -> Vec<(u32, u32)> {
    let (w, h) = img.size();
    (0..h).flat_map(|y| (0..w).map(move |x| (x, y))).collect()
}

// =========================================================================
// Assertions (panic on the first differing pixel)
// =========================================================================

/// Assert that `source` appears verbatim in `dest` at `(x, y)`.
pub fn assert_region(dest: &Image, source: &Image, x: u32, y: u32) {
    for (sx, sy) in coords(source) {
        assert_eq!(
            dest.get(x + sx, y + sy).unwrap(),
            source.get(sx, sy).unwrap(),
            "pixel ({}, {}) differs from source ({sx}, {sy})",
            x + sx,
            y + sy
        );
    }
}

/// Assert that every pixel outside `(x, y, width, height)` matches `original`.
pub fn assert_outside_unchanged(img: &Image, original: &Image, rect: (u32, u32, u32, u32)) {
    let (rx, ry, rw, rh) = rect;
    for (x, y) in coords(img) {
        let inside = x >= rx && x < rx + rw && y >= ry && y < ry + rh;
        if !inside {
            assert_eq!(
                img.get(x, y).unwrap(),
                original.get(x, y).unwrap(),
                "pixel ({x}, {y}) outside the blit region changed"
            );
        }
    }
}
