use std::path::PathBuf;

use clap::Args;

use crate::error::{BeadError, Result};
use crate::output::{display_path, plural, Printer};
use crate::types::Palette;

/// List the colours of a bead palette
#[derive(Args, Debug, Default)]
pub struct PaletteArgs {
    /// Palette file (YAML or JSON); defaults to the builtin Perler palette
    #[arg(long, short)]
    pub palette: Option<PathBuf>,

    /// Print the palette as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PaletteArgs, printer: &Printer) -> Result<()> {
    let (palette, source) = match &args.palette {
        Some(path) => (Palette::load(path)?, display_path(path)),
        None => (Palette::perler(), "builtin".to_string()),
    };

    printer.status(
        "Loaded",
        &format!(
            "{} ({}) from {}",
            palette.name,
            plural(palette.len(), "colour", "colours"),
            source
        ),
    );
    if let Some(background) = palette.background() {
        printer.info(
            "Background",
            &format!("{} {}", background.id, printer.dim(&background.name)),
        );
    }

    if args.json {
        let json = serde_json::to_string_pretty(&palette).map_err(|e| BeadError::Export {
            message: format!("Failed to serialize palette: {}", e),
            help: None,
        })?;
        println!("{}", json);
    } else {
        print!("{}", format_palette(&palette, printer));
    }

    Ok(())
}

/// One `id  name  hex` line per colour, in palette order.
fn format_palette(palette: &Palette, printer: &Printer) -> String {
    let id_width = palette.colors().iter().map(|c| c.id.len()).max().unwrap_or(0);
    let name_width = palette.colors().iter().map(|c| c.name.len()).max().unwrap_or(0);

    let mut out = String::new();
    for c in palette.colors() {
        let id = format!("{:<id_width$}", c.id);
        out.push_str(&format!(
            "{}  {:<name_width$}  {}\n",
            printer.bold(&id),
            c.name,
            printer.dim(&c.hex)
        ));
    }
    out
}
