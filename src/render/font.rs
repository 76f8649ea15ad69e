//! Tiny 3x5 digit font for grid index labels.

use image::RgbaImage;

use crate::types::Colour;

use super::canvas::fill_rect;

/// Glyph width in font pixels.
pub const GLYPH_WIDTH: u32 = 3;

/// Glyph height in font pixels.
pub const GLYPH_HEIGHT: u32 = 5;

/// Digit glyphs, `#` = ink.
const DIGITS: [[&str; 5]; 10] = [
    ["###", "#.#", "#.#", "#.#", "###"],
    [".#.", "##.", ".#.", ".#.", "###"],
    ["###", "..#", "###", "#..", "###"],
    ["###", "..#", ".##", "..#", "###"],
    ["#.#", "#.#", "###", "..#", "..#"],
    ["###", "#..", "###", "..#", "###"],
    ["###", "#..", "###", "#.#", "###"],
    ["###", "..#", "..#", ".#.", ".#."],
    ["###", "#.#", "###", "#.#", "###"],
    ["###", "#.#", "###", "..#", "###"],
];

/// Width in image pixels of `text` drawn at `scale`.
///
/// Glyphs are separated by one font pixel.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        return 0;
    }
    (n * (GLYPH_WIDTH + 1) - 1) * scale
}

/// Height in image pixels of a line of text at `scale`.
pub fn text_height(scale: u32) -> u32 {
    GLYPH_HEIGHT * scale
}

/// Draw `text` with its top-left corner at `(x, y)`.
///
/// Characters other than ASCII digits leave a blank cell.
pub fn draw_text(img: &mut RgbaImage, text: &str, x: u32, y: u32, scale: u32, colour: Colour) {
    let scale = scale.max(1);
    let mut cursor = x;

    for c in text.chars() {
        if let Some(glyph) = c.to_digit(10).map(|d| &DIGITS[d as usize]) {
            for (gy, row) in glyph.iter().enumerate() {
                for (gx, cell) in row.chars().enumerate() {
                    if cell == '#' {
                        fill_rect(
                            img,
                            cursor + gx as u32 * scale,
                            y + gy as u32 * scale,
                            scale,
                            scale,
                            colour,
                        );
                    }
                }
            }
        }
        cursor += (GLYPH_WIDTH + 1) * scale;
    }
}
