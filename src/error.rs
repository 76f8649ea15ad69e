use miette::Diagnostic;
use thiserror::Error;

/// Main error type for beadgen operations
#[derive(Error, Diagnostic, Debug)]
pub enum BeadError {
    #[error("IO error: {0}")]
    #[diagnostic(code(beadgen::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(beadgen::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Could not decode image: {message}")]
    #[diagnostic(
        code(beadgen::decode),
        help("Use a raster format such as PNG, JPEG, GIF, BMP or WebP")
    )]
    Decode { message: String },

    #[error("Palette has no colours")]
    #[diagnostic(
        code(beadgen::empty_palette),
        help("A pattern needs at least one colour to map pixels onto")
    )]
    EmptyPalette,

    #[error("Invalid dimensions: {message}")]
    #[diagnostic(code(beadgen::dimensions))]
    InvalidDimensions {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Cell ({x}, {y}) is outside the {width}x{height} pattern")]
    #[diagnostic(code(beadgen::out_of_bounds))]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(beadgen::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Export error: {message}")]
    #[diagnostic(code(beadgen::export))]
    Export {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, BeadError>;
