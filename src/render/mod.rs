//! Rendering module for beadgen.
//!
//! Turns patterns into raster images: a quick preview and an annotated,
//! printable export.

mod canvas;
mod export;
mod font;
mod png;
mod preview;

pub use export::{export_filename, preview_filename, render_export, ExportOptions};
pub use png::write_png;
pub use preview::{render_preview, BeadStyle, PreviewOptions, BACKGROUND, DEFAULT_CELL_SIZE};
