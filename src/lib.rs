//! beadgen - Image to fuse bead pattern generator
//!
//! Quantizes images onto a fixed bead palette, supports global and per-cell
//! colour edits, and renders previews and printable pattern sheets.

pub mod cli;
pub mod commentary;
pub mod config;
pub mod edit;
pub mod error;
pub mod output;
pub mod quantize;
pub mod render;
pub mod types;

pub use commentary::{describe_or_fallback, Commentary, Commentator, Difficulty};
pub use config::Config;
pub use edit::{apply_edit, replace_global, replace_single, EditRequest};
pub use error::{BeadError, Result};
pub use quantize::{quantize, quantize_bytes, resolve_height, Quantizer, Resample, TargetHeight};
pub use render::{
    export_filename, preview_filename, render_export, render_preview, write_png, BeadStyle,
    ExportOptions, PreviewOptions,
};
pub use types::{ColorEntry, Colour, Material, Palette, Pattern};
