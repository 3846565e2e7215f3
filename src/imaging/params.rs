//! Parameter types for image operations.
//!
//! These types describe *what* shape a pixel buffer has or *which* kernel a
//! resample should use. They carry no pixel data themselves, so the
//! [`backend`](super::backend) and the [`Image`](super::image::Image)
//! container can share them without either depending on the other.
//!
//! ## Types
//!
//! - [`Components`]: Channels per pixel (1–4). Each channel is one byte, so
//!   bits-per-pixel is always `components * 8`.
//! - [`ResizeFilter`]: Resampling kernel: nearest, bilinear or bicubic.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of 8-bit channels stored per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Components {
    /// Single luminance channel.
    Gray,
    /// Luminance followed by alpha.
    GrayAlpha,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl Components {
    pub const ALL: [Components; 4] = [
        Components::Gray,
        Components::GrayAlpha,
        Components::Rgb,
        Components::Rgba,
    ];

    pub fn count(self) -> usize {
        match self {
            Components::Gray => 1,
            Components::GrayAlpha => 2,
            Components::Rgb => 3,
            Components::Rgba => 4,
        }
    }

    pub fn bits_per_pixel(self) -> u32 {
        self.count() as u32 * 8
    }

    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(Components::Gray),
            2 => Some(Components::GrayAlpha),
            3 => Some(Components::Rgb),
            4 => Some(Components::Rgba),
            _ => None,
        }
    }

    /// Map a bits-per-pixel value onto a channel count.
    ///
    /// Only whole-byte layouts of one to four channels have a mapping.
    pub fn from_bits_per_pixel(bits_per_pixel: u32) -> Option<Self> {
        if bits_per_pixel % 8 != 0 {
            return None;
        }
        Self::from_count((bits_per_pixel / 8) as usize)
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, Components::GrayAlpha | Components::Rgba)
    }
}

impl TryFrom<u8> for Components {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_count(value as usize)
            .ok_or_else(|| format!("component count must be 1-4, got {value}"))
    }
}

impl From<Components> for u8 {
    fn from(components: Components) -> Self {
        components.count() as u8
    }
}

impl fmt::Display for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Components::Gray => "gray",
            Components::GrayAlpha => "gray+alpha",
            Components::Rgb => "rgb",
            Components::Rgba => "rgba",
        };
        write!(f, "{} ({})", self.count(), name)
    }
}

impl FromStr for Components {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("expected a component count 1-4, got '{s}'"))?;
        Self::try_from(count)
    }
}

/// Resampling kernel used when an image changes pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFilter {
    #[default]
    Nearest,
    Bilinear,
    Bicubic,
}

impl ResizeFilter {
    pub const ALL: [ResizeFilter; 3] = [
        ResizeFilter::Nearest,
        ResizeFilter::Bilinear,
        ResizeFilter::Bicubic,
    ];

    /// The `image` crate kernel that implements this filter.
    pub fn filter_type(self) -> FilterType {
        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Bilinear => FilterType::Triangle,
            ResizeFilter::Bicubic => FilterType::CatmullRom,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResizeFilter::Nearest => "nearest",
            ResizeFilter::Bilinear => "bilinear",
            ResizeFilter::Bicubic => "bicubic",
        }
    }
}

impl fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResizeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(ResizeFilter::Nearest),
            "bilinear" | "linear" => Ok(ResizeFilter::Bilinear),
            "bicubic" | "cubic" => Ok(ResizeFilter::Bicubic),
            other => Err(format!(
                "unknown resize filter '{other}' (expected nearest, bilinear or bicubic)"
            )),
        }
    }
}
