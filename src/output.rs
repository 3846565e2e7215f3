//! CLI output formatting for every subcommand.
//!
//! # Output Format
//!
//! ## Info
//!
//! ```text
//! photo.png
//!     Size: 640x480
//!     Components: 4 (rgba)
//!     Bits per pixel: 32
//!     Bytes: 1228800
//! ```
//!
//! ## Pixel
//!
//! ```text
//! (17, 42) rgba(0, 255, 64, 255)
//! ```
//!
//! ## Transforms
//!
//! ```text
//! photo.png → small.png
//!     Resized 640x480 → 64x48 (bicubic)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure and do no I/O.

use crate::imaging::{Color, Components, Image, ResizeFilter};
use serde::Serialize;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn dims((w, h): (u32, u32)) -> String {
    format!("{w}x{h}")
}

/// Header line naming the input and, when there is one, the output file.
fn header(input: &Path, output: Option<&Path>) -> String {
    match output {
        Some(out) => format!("{} → {}", input.display(), out.display()),
        None => input.display().to_string(),
    }
}

// ============================================================================
// Info
// ============================================================================

/// Serializable summary of an image, printed by `info` and `info --json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageInfo {
    pub path: Option<String>,
    pub width: u32,
    pub height: u32,
    pub components: Components,
    pub bits_per_pixel: u32,
    pub bytes: usize,
    pub is_empty: bool,
}

impl ImageInfo {
    pub fn of(image: &Image) -> Self {
        Self {
            path: image.source_path().map(|p| p.display().to_string()),
            width: image.width(),
            height: image.height(),
            components: image.components(),
            bits_per_pixel: image.bits_per_pixel(),
            bytes: image.data().len(),
            is_empty: image.is_empty(),
        }
    }
}

pub fn format_info(info: &ImageInfo) -> Vec<String> {
    let mut lines = vec![info.path.clone().unwrap_or_else(|| "(in memory)".to_string())];
    lines.push(format!("{}Size: {}", indent(1), dims((info.width, info.height))));
    lines.push(format!("{}Components: {}", indent(1), info.components));
    lines.push(format!("{}Bits per pixel: {}", indent(1), info.bits_per_pixel));
    lines.push(format!("{}Bytes: {}", indent(1), info.bytes));
    if info.is_empty {
        lines.push(format!("{}Blank canvas", indent(1)));
    }
    lines
}

pub fn print_info(info: &ImageInfo) {
    for line in format_info(info) {
        println!("{}", line);
    }
}

// ============================================================================
// Pixel
// ============================================================================

pub fn format_pixel(x: u32, y: u32, color: Color) -> String {
    format!("({x}, {y}) {color}")
}

// ============================================================================
// Transforms
// ============================================================================

/// Result of a `convert` request, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOutcome {
    pub from: Components,
    pub requested: Components,
    pub result: Components,
}

impl ConvertOutcome {
    pub fn converted(&self) -> bool {
        self.from != self.result
    }
}

pub fn format_convert(input: &Path, output: &Path, outcome: &ConvertOutcome) -> Vec<String> {
    let detail = if outcome.from == outcome.requested {
        format!("Already {}", outcome.from)
    } else if outcome.converted() {
        format!("Converted {} → {}", outcome.from, outcome.result)
    } else {
        format!(
            "Unsupported conversion {} → {}, written unchanged",
            outcome.from, outcome.requested
        )
    };
    vec![
        header(input, Some(output)),
        format!("{}{}", indent(1), detail),
    ]
}

pub fn format_resize(
    input: &Path,
    output: &Path,
    from: (u32, u32),
    to: (u32, u32),
    filter: ResizeFilter,
) -> Vec<String> {
    vec![
        header(input, Some(output)),
        format!("{}Resized {} → {} ({})", indent(1), dims(from), dims(to), filter),
    ]
}

pub fn format_flip(input: &Path, output: &Path, axis: &str) -> Vec<String> {
    vec![
        header(input, Some(output)),
        format!("{}Flipped {}", indent(1), axis),
    ]
}

pub fn format_blit(
    dest: &Path,
    source: &Path,
    output: &Path,
    at: (u32, u32),
    source_size: (u32, u32),
) -> Vec<String> {
    vec![
        header(dest, Some(output)),
        format!(
            "{}Blitted {} ({}) at ({}, {})",
            indent(1),
            source.display(),
            dims(source_size),
            at.0,
            at.1
        ),
    ]
}

pub fn format_blank(output: &Path, image: &Image) -> Vec<String> {
    vec![
        output.display().to_string(),
        format!(
            "{}Blank {} canvas, {}",
            indent(1),
            dims(image.size()),
            image.components()
        ),
    ]
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
