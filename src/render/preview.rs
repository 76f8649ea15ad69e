//! On-screen style preview of a bead pattern.
//!
//! One `cell_size` square per bead, drawn as a round bead or a flat square
//! on a soft grey background.

use std::collections::HashMap;

use image::{Rgba, RgbaImage};
use serde::Deserialize;

use crate::error::Result;
use crate::types::{Colour, Pattern};

use super::canvas::{check_cell_size, fill_circle, fill_rect, span};

/// Preview background.
pub const BACKGROUND: Colour = Colour::rgb(0xE0, 0xE5, 0xEC);

/// Default cell size in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 12;

/// How each bead is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BeadStyle {
    /// Filled circle, radius half a cell minus one pixel.
    #[default]
    Circle,
    /// Filled square covering the whole cell.
    Square,
}

/// Options for [`render_preview`].
#[derive(Debug, Clone, Copy)]
pub struct PreviewOptions {
    pub cell_size: u32,
    pub style: BeadStyle,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            style: BeadStyle::Circle,
        }
    }
}

/// Render the pattern as a preview image.
pub fn render_preview(pattern: &Pattern, options: &PreviewOptions) -> Result<RgbaImage> {
    let cell = options.cell_size.max(1);
    check_cell_size(cell)?;
    let width = span(pattern.width(), cell, 0)?;
    let height = span(pattern.height(), cell, 0)?;
    let colours = cell_colours(pattern)?;

    let mut img = RgbaImage::from_pixel(width, height, Rgba(BACKGROUND.to_rgba()));

    for (y, row) in pattern.grid().iter().enumerate() {
        for (x, entry) in row.iter().enumerate() {
            let colour = colours[entry.id.as_str()];
            let ox = x as u32 * cell;
            let oy = y as u32 * cell;

            match options.style {
                BeadStyle::Circle => {
                    let half = cell as f32 / 2.0;
                    fill_circle(&mut img, ox as f32 + half, oy as f32 + half, half - 1.0, colour);
                }
                BeadStyle::Square => fill_rect(&mut img, ox, oy, cell, cell, colour),
            }
        }
    }

    Ok(img)
}

/// Parse each distinct colour in the pattern once.
pub(crate) fn cell_colours(pattern: &Pattern) -> Result<HashMap<&str, Colour>> {
    let mut colours = HashMap::new();
    for entry in pattern.grid().iter().flatten() {
        if !colours.contains_key(entry.id.as_str()) {
            colours.insert(entry.id.as_str(), entry.colour()?);
        }
    }
    Ok(colours)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorEntry;

    fn two_by_one() -> Pattern {
        Pattern::from_grid(vec![vec![
            ColorEntry::new("R", "Red", "#FF0000").unwrap(),
            ColorEntry::new("B", "Blue", "#0000FF").unwrap(),
        ]])
        .unwrap()
    }

    #[test]
    fn test_preview_size() {
        let img = render_preview(&two_by_one(), &PreviewOptions::default()).unwrap();
        assert_eq!((img.width(), img.height()), (24, 12));
    }

    #[test]
    fn test_preview_square() {
        let options = PreviewOptions {
            cell_size: 4,
            style: BeadStyle::Square,
        };
        let img = render_preview(&two_by_one(), &options).unwrap();

        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(3, 3).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(4, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_preview_circle_leaves_corners() {
        let img = render_preview(&two_by_one(), &PreviewOptions::default()).unwrap();

        assert_eq!(img.get_pixel(6, 6).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(18, 6).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(0, 0).0, BACKGROUND.to_rgba());
        assert_eq!(img.get_pixel(12, 0).0, BACKGROUND.to_rgba());
    }

    #[test]
    fn test_preview_rejects_oversized_cells() {
        let options = PreviewOptions {
            cell_size: 3_000_000_000,
            style: BeadStyle::Square,
        };
        let err = render_preview(&two_by_one(), &options).unwrap_err();
        assert!(matches!(err, crate::error::BeadError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_preview_rejects_bad_hex() {
        let bad = ColorEntry {
            id: "X".to_string(),
            name: "Broken".to_string(),
            hex: "red".to_string(),
        };
        let pattern = Pattern::from_grid(vec![vec![bad]]).unwrap();
        assert!(render_preview(&pattern, &PreviewOptions::default()).is_err());
    }
}
