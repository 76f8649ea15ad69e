pub mod completions;
pub mod generate;
pub mod palette;

use clap::{Parser, Subcommand};

/// beadgen - Turn images into fuse bead patterns
#[derive(Parser, Debug)]
#[command(name = "beadgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Quantize an image into a bead pattern and render it
    Generate(generate::GenerateArgs),

    /// List the colours of a bead palette
    Palette(palette::PaletteArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
