//! Printable pattern export.
//!
//! Draws the pattern on a white sheet with a gridline between every cell,
//! heavier lines every 10th cell, and row/column numbers every 5th cell so
//! beads can be counted off while building.

use image::{Rgba, RgbaImage};

use crate::error::Result;
use crate::types::{Colour, Pattern};

use super::canvas::{check_cell_size, fill_circle, fill_rect, hline, span, vline};
use super::font::{draw_text, text_height, text_width};
use super::preview::{cell_colours, BeadStyle};

const PAPER: Colour = Colour::WHITE;
const MINOR_LINE: Colour = Colour::rgb(0xC8, 0xC8, 0xC8);
const MAJOR_LINE: Colour = Colour::rgb(0x40, 0x40, 0x40);
const LABEL: Colour = Colour::rgb(0x30, 0x30, 0x30);

/// Thickness of the heavy gridlines.
const MAJOR_THICKNESS: u32 = 2;

/// Options for [`render_export`].
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    pub cell_size: u32,
    pub style: BeadStyle,
    /// Label every n-th row and column.
    pub label_every: u32,
    /// Heavy gridline every n-th cell boundary.
    pub major_every: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            cell_size: 16,
            style: BeadStyle::Circle,
            label_every: 5,
            major_every: 10,
        }
    }
}

impl ExportOptions {
    /// Font scale for labels, growing with the cell size.
    fn label_scale(&self) -> u32 {
        (self.cell_size / 8).max(1)
    }

    /// Width of the label margin on the top and left edges.
    fn margin(&self, pattern: &Pattern) -> u32 {
        let scale = self.label_scale();
        let widest = pattern.width().max(pattern.height()).to_string();
        let side = text_width(&widest, scale) + 4 * scale;
        let top = text_height(scale) + 4 * scale;
        side.max(top)
    }
}

/// File name for an exported pattern: `perler-pattern-{W}x{H}.png`.
pub fn export_filename(pattern: &Pattern) -> String {
    format!("perler-pattern-{}x{}.png", pattern.width(), pattern.height())
}

/// File name for a preview image next to the export.
pub fn preview_filename(pattern: &Pattern) -> String {
    format!(
        "perler-pattern-{}x{}-preview.png",
        pattern.width(),
        pattern.height()
    )
}

/// Render the annotated, printable pattern sheet.
pub fn render_export(pattern: &Pattern, options: &ExportOptions) -> Result<RgbaImage> {
    let cell = options.cell_size.max(2);
    check_cell_size(cell)?;
    let label_every = options.label_every.max(1);
    let major_every = options.major_every.max(1);
    let scale = options.label_scale();
    let margin = options.margin(pattern);
    let colours = cell_colours(pattern)?;

    let grid_w = span(pattern.width(), cell, 0)?;
    let grid_h = span(pattern.height(), cell, 0)?;
    let mut img = RgbaImage::from_pixel(
        span(pattern.width(), cell, margin + MAJOR_THICKNESS)?,
        span(pattern.height(), cell, margin + MAJOR_THICKNESS)?,
        Rgba(PAPER.to_rgba()),
    );

    // Beads
    for (y, row) in pattern.grid().iter().enumerate() {
        for (x, entry) in row.iter().enumerate() {
            let colour = colours[entry.id.as_str()];
            let ox = margin + x as u32 * cell;
            let oy = margin + y as u32 * cell;

            match options.style {
                BeadStyle::Circle => {
                    let half = cell as f32 / 2.0;
                    let (cx, cy) = (ox as f32 + half, oy as f32 + half);
                    fill_circle(&mut img, cx, cy, half - 1.0, colour.darken(25.0));
                    fill_circle(&mut img, cx, cy, half - 2.0, colour);
                }
                BeadStyle::Square => fill_rect(&mut img, ox, oy, cell, cell, colour),
            }
        }
    }

    // Minor lines first so heavy lines sit on top
    for i in 0..=pattern.width() {
        vline(&mut img, margin + i * cell, margin, grid_h, 1, MINOR_LINE);
    }
    for i in 0..=pattern.height() {
        hline(&mut img, margin, margin + i * cell, grid_w, 1, MINOR_LINE);
    }

    let span_w = grid_w + MAJOR_THICKNESS;
    let span_h = grid_h + MAJOR_THICKNESS;
    for i in 0..=pattern.width() {
        if i % major_every == 0 || i == pattern.width() {
            vline(&mut img, margin + i * cell, margin, span_h, MAJOR_THICKNESS, MAJOR_LINE);
        }
    }
    for i in 0..=pattern.height() {
        if i % major_every == 0 || i == pattern.height() {
            hline(&mut img, margin, margin + i * cell, span_w, MAJOR_THICKNESS, MAJOR_LINE);
        }
    }

    // 1-based labels centred on their column / row
    let label_h = text_height(scale);
    for col in (label_every..=pattern.width()).step_by(label_every as usize) {
        let text = col.to_string();
        let centre = margin + (col - 1) * cell + cell / 2;
        let x = centre.saturating_sub(text_width(&text, scale) / 2);
        let y = margin.saturating_sub(label_h) / 2;
        draw_text(&mut img, &text, x, y, scale, LABEL);
    }
    for row in (label_every..=pattern.height()).step_by(label_every as usize) {
        let text = row.to_string();
        let centre = margin + (row - 1) * cell + cell / 2;
        let x = margin.saturating_sub(text_width(&text, scale) + 2 * scale);
        let y = centre.saturating_sub(label_h / 2);
        draw_text(&mut img, &text, x, y, scale, LABEL);
    }

    Ok(img)
}
