//! Core domain types for beadgen.
//!
//! This module contains the fundamental values the pipeline passes around:
//! - `Colour` - RGBA colour values and the bead distance metric
//! - `ColorEntry` / `Palette` - the closed set of bead colours
//! - `Pattern` - the bead grid with per-colour counts

mod colour;
mod palette;
mod pattern;

pub use colour::{Colour, ALPHA_THRESHOLD};
pub use palette::{ColorEntry, Palette, WHITE_HEX};
pub use pattern::{Material, Pattern};
