//! Pixel drawing primitives on RGBA images.
//!
//! Everything here clips to the image bounds, so callers can draw shapes
//! that hang over an edge.

use image::{Rgba, RgbaImage};

use crate::error::{BeadError, Result};
use crate::types::Colour;

/// Largest accepted cell size in pixels.
pub const MAX_CELL_SIZE: u32 = 256;

/// Reject cell sizes above [`MAX_CELL_SIZE`].
pub fn check_cell_size(cell: u32) -> Result<()> {
    if cell > MAX_CELL_SIZE {
        return Err(BeadError::InvalidDimensions {
            message: format!("cell size {} is larger than {}", cell, MAX_CELL_SIZE),
            help: Some(format!("Use a cell size between 1 and {}", MAX_CELL_SIZE)),
        });
    }
    Ok(())
}

/// `cells * cell + extra` pixels, or an error if that overflows.
pub fn span(cells: u32, cell: u32, extra: u32) -> Result<u32> {
    cells
        .checked_mul(cell)
        .and_then(|n| n.checked_add(extra))
        .ok_or_else(|| BeadError::InvalidDimensions {
            message: format!("{} cells of {}px do not fit in an image", cells, cell),
            help: Some("Use a smaller grid or cell size".to_string()),
        })
}

/// Fill an axis-aligned rectangle.
pub fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, colour: Colour) {
    let rgba = Rgba(colour.to_rgba());
    let x_end = x.saturating_add(w).min(img.width());
    let y_end = y.saturating_add(h).min(img.height());

    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, rgba);
        }
    }
}

/// Fill a circle centred at `(cx, cy)`.
///
/// A pixel is filled when its centre lies within `radius`.
pub fn fill_circle(img: &mut RgbaImage, cx: f32, cy: f32, radius: f32, colour: Colour) {
    if radius <= 0.0 {
        return;
    }

    let rgba = Rgba(colour.to_rgba());
    let r2 = radius * radius;

    let x_start = (cx - radius).floor().max(0.0) as u32;
    let y_start = (cy - radius).floor().max(0.0) as u32;
    let x_end = ((cx + radius).ceil().max(0.0) as u32).min(img.width());
    let y_end = ((cy + radius).ceil().max(0.0) as u32).min(img.height());

    for py in y_start..y_end {
        for px in x_start..x_end {
            let dx = px as f32 + 0.5 - cx;
            let dy = py as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(px, py, rgba);
            }
        }
    }
}

/// Draw a vertical line `thickness` pixels wide starting at column `x`.
pub fn vline(img: &mut RgbaImage, x: u32, y: u32, len: u32, thickness: u32, colour: Colour) {
    fill_rect(img, x, y, thickness, len, colour);
}

/// Draw a horizontal line `thickness` pixels tall starting at row `y`.
pub fn hline(img: &mut RgbaImage, x: u32, y: u32, len: u32, thickness: u32, colour: Colour) {
    fill_rect(img, x, y, len, thickness, colour);
}
