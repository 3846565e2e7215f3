//! Pure calculation functions for pixel addressing and blit clipping.
//!
//! All functions here are pure and testable without any I/O or images.

/// Byte offset of pixel `(x, y)` in a tightly packed row-major buffer.
pub fn pixel_offset(width: u32, components: usize, x: u32, y: u32) -> usize {
    (y as usize * width as usize + x as usize) * components
}

/// Rectangle copied by a blit, in destination coordinates.
///
/// The source region always starts at the source's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Calculate the part of a `source`-sized image that lands inside `dest`
/// when placed at `(x, y)`.
///
/// # Arguments
/// * `dest` - Destination dimensions (width, height)
/// * `source` - Source dimensions (width, height)
/// * `x`, `y` - Placement of the source's top-left corner in the destination
///
/// # Returns
/// * `Some(region)` - The clipped rectangle, never empty
/// * `None` - Nothing of the source falls inside the destination
///
/// # Examples
/// ```
/// # use rasterbox::imaging::calculations::{clip_region, Region};
/// // 4x4 source at (6, 1) on an 8x8 canvas → only two columns fit
/// assert_eq!(
///     clip_region((8, 8), (4, 4), 6, 1),
///     Some(Region { x: 6, y: 1, width: 2, height: 4 })
/// );
///
/// // Placed past the right edge → nothing copied
/// assert_eq!(clip_region((8, 8), (4, 4), 9, 0), None);
/// ```
pub fn clip_region(dest: (u32, u32), source: (u32, u32), x: u32, y: u32) -> Option<Region> {
    let (dest_w, dest_h) = dest;
    let (src_w, src_h) = source;

    let width = src_w.min(dest_w.saturating_sub(x));
    let height = src_h.min(dest_h.saturating_sub(y));

    if width == 0 || height == 0 {
        return None;
    }

    Some(Region {
        x,
        y,
        width,
        height,
    })
}
