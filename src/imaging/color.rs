//! The fixed four-channel color value used for per-pixel access.
//!
//! Reads always widen to four channels and writes always narrow from four,
//! so both directions are total functions over [`Components`]:
//!
//! | components | stored from `Color` | `Color` read back |
//! |---|---|---|
//! | 4 | `r g b a` | `(c0, c1, c2, c3)` |
//! | 3 | `r g b` | `(c0, c1, c2, 255)` |
//! | 2 | `r g` | `(c0, c0, c0, c1)` |
//! | 1 | `r` | `(c0, c0, c0, 255)` |
//!
//! Narrowing is positional, not a colorspace conversion: writing
//! `Color::rgba(10, 20, 30, 40)` into a gray+alpha pixel stores `[10, 20]`.

use super::params::Components;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Opaque gray.
    pub const fn gray(value: u8) -> Self {
        Self::rgba(value, value, value, 255)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Write the leading `pixel.len()` channels into `pixel`.
    ///
    /// `pixel` is a single pixel slice of 1–4 bytes.
    pub fn narrow_into(self, pixel: &mut [u8]) {
        let channels = self.to_array();
        let n = pixel.len().min(4);
        pixel[..n].copy_from_slice(&channels[..n]);
    }

    /// Widen a stored pixel of `components` channels to a full color.
    pub fn expand(pixel: &[u8], components: Components) -> Self {
        match components {
            Components::Rgba => Self::rgba(pixel[0], pixel[1], pixel[2], pixel[3]),
            Components::Rgb => Self::rgb(pixel[0], pixel[1], pixel[2]),
            Components::GrayAlpha => Self::rgba(pixel[0], pixel[0], pixel[0], pixel[1]),
            Components::Gray => Self::gray(pixel[0]),
        }
    }

    /// What a pixel of `components` channels reads back after this color is written to it.
    pub fn narrowed(self, components: Components) -> Self {
        let mut pixel = [0u8; 4];
        self.narrow_into(&mut pixel[..components.count()]);
        Self::expand(&pixel, components)
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<Color> for [u8; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
