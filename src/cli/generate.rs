//! Generate command: turn an image into a printable bead pattern.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use crate::config::Config;
use crate::edit::{apply_edit, EditRequest};
use crate::error::{BeadError, Result};
use crate::output::{display_path, plural, Printer};
use crate::quantize::{Quantizer, Resample, TargetHeight};
use crate::render::{
    export_filename, preview_filename, render_export, render_preview, write_png, BeadStyle,
    ExportOptions, PreviewOptions,
};
use crate::types::{ColorEntry, Material, Palette, Pattern};

/// Quantize an image into a bead pattern and render it
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Image to convert (PNG, JPEG, GIF, BMP, WebP)
    #[arg(required = true)]
    pub image: PathBuf,

    /// Grid width in beads
    #[arg(long, short)]
    pub width: Option<u32>,

    /// Grid height in beads, or "auto" to follow the image's aspect ratio
    #[arg(long)]
    pub height: Option<TargetHeight>,

    /// Palette file (YAML or JSON); defaults to the builtin Perler palette
    #[arg(long, short)]
    pub palette: Option<PathBuf>,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Pixels per bead in the rendered images
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Bead drawing style
    #[arg(long, value_enum)]
    pub style: Option<BeadStyle>,

    /// Resampling filter
    #[arg(long, value_enum)]
    pub filter: Option<Resample>,

    /// Replace every bead of one colour, e.g. --replace P05=P01
    #[arg(long = "replace", value_name = "OLD=NEW")]
    pub replace: Vec<String>,

    /// Set one bead (0-based column and row), e.g. --set 3,4=P02
    #[arg(long = "set", value_name = "X,Y=ID")]
    pub set: Vec<String>,

    /// Print the pattern as JSON instead of a materials list
    #[arg(long)]
    pub json: bool,

    /// Config file (defaults to ./beadgen.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Settings after merging flags over the config file.
#[derive(Debug)]
struct Settings {
    width: u32,
    height: TargetHeight,
    palette: Palette,
    output: PathBuf,
    cell_size: u32,
    style: BeadStyle,
    filter: Resample,
}

impl Settings {
    fn resolve(args: &GenerateArgs, config: Config) -> Result<Self> {
        let palette = match &args.palette {
            Some(path) => Palette::load(path)?,
            None => config.load_palette()?,
        };

        Ok(Self {
            width: args.width.unwrap_or(config.width),
            height: args.height.unwrap_or(config.height),
            palette,
            output: args.output.clone().unwrap_or(config.output),
            cell_size: args.cell_size.unwrap_or(config.cell_size),
            style: args.style.unwrap_or(config.style),
            filter: args.filter.unwrap_or(config.filter),
        })
    }
}

/// JSON report printed with `--json`.
#[derive(Debug, Serialize)]
struct PatternReport<'a> {
    width: u32,
    height: u32,
    total_beads: usize,
    materials: Vec<Material>,
    /// Colour ids, row-major.
    rows: Vec<Vec<&'a str>>,
}

impl<'a> PatternReport<'a> {
    fn new(pattern: &'a Pattern) -> Self {
        Self {
            width: pattern.width(),
            height: pattern.height(),
            total_beads: pattern.total_beads(),
            materials: pattern.materials(),
            rows: pattern
                .grid()
                .iter()
                .map(|row| row.iter().map(|cell| cell.id.as_str()).collect())
                .collect(),
        }
    }
}

/// Result of a generate run: the final pattern and the files written.
#[derive(Debug)]
pub struct Generated {
    pub pattern: Pattern,
    pub export: PathBuf,
    pub preview: PathBuf,
}

pub fn run(args: GenerateArgs, printer: &Printer) -> Result<()> {
    let generated = generate(&args, &std::env::current_dir()?, printer)?;
    let pattern = &generated.pattern;

    if args.json {
        let json = serde_json::to_string_pretty(&PatternReport::new(pattern)).map_err(|e| {
            BeadError::Export {
                message: format!("Failed to serialize pattern: {}", e),
                help: None,
            }
        })?;
        println!("{}", json);
    } else {
        print!("{}", format_materials(pattern));
    }

    printer.success(
        "Finished",
        &format!(
            "{}x{} pattern, {} in {}",
            pattern.width(),
            pattern.height(),
            plural(pattern.total_beads(), "bead", "beads"),
            plural(pattern.counts().len(), "colour", "colours"),
        ),
    );

    Ok(())
}

/// Quantize, edit and render, writing the export and preview PNGs.
///
/// `dir` is where `beadgen.yaml` is looked up when `--config` is not given.
pub fn generate(args: &GenerateArgs, dir: &Path, printer: &Printer) -> Result<Generated> {
    let config = Config::discover(args.config.as_deref(), dir)?;
    let settings = Settings::resolve(args, config)?;

    // Reject bad edits before doing any image work
    let edits = parse_edits(&args.replace, &args.set, &settings.palette)?;

    let bytes = fs::read(&args.image).map_err(|e| BeadError::Io {
        path: args.image.clone(),
        message: e.to_string(),
    })?;

    printer.status(
        "Quantizing",
        &format!(
            "{} ({} wide, height {}, {} from {})",
            display_path(&args.image),
            settings.width,
            settings.height,
            plural(settings.palette.len(), "colour", "colours"),
            settings.palette.name,
        ),
    );

    let mut pattern = Quantizer::new().with_filter(settings.filter).quantize_bytes(
        &bytes,
        settings.width,
        settings.height,
        &settings.palette,
    )?;

    for edit in &edits {
        if let EditRequest::Global { target_id, .. } = edit {
            if pattern.count(target_id) == 0 {
                printer.warning(
                    "Warning",
                    &format!("no beads of colour {} to replace", target_id),
                );
            }
        }
        pattern = apply_edit(&pattern, edit)?;
        printer.status("Editing", &describe_edit(edit, printer));
    }

    fs::create_dir_all(&settings.output).map_err(|e| BeadError::Io {
        path: settings.output.clone(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let export = settings.output.join(export_filename(&pattern));
    let sheet = render_export(
        &pattern,
        &ExportOptions {
            style: settings.style,
            ..ExportOptions::default()
        },
    )?;
    write_png(&sheet, &export)?;
    printer.status("Writing", &printer.cyan(&display_path(&export)));

    let preview = settings.output.join(preview_filename(&pattern));
    let image = render_preview(
        &pattern,
        &PreviewOptions {
            cell_size: settings.cell_size,
            style: settings.style,
        },
    )?;
    write_png(&image, &preview)?;
    printer.status("Writing", &printer.cyan(&display_path(&preview)));

    Ok(Generated {
        pattern,
        export,
        preview,
    })
}

/// Parse `--replace` then `--set` arguments into edit requests.
///
/// Replacement colours must exist in `palette`.
pub fn parse_edits(replace: &[String], set: &[String], palette: &Palette) -> Result<Vec<EditRequest>> {
    let mut edits = Vec::with_capacity(replace.len() + set.len());
    for arg in replace {
        edits.push(parse_replace(arg, palette)?);
    }
    for arg in set {
        edits.push(parse_set(arg, palette)?);
    }
    Ok(edits)
}

/// Parse `OLD=NEW`.
fn parse_replace(arg: &str, palette: &Palette) -> Result<EditRequest> {
    let (old, new) = arg.split_once('=').ok_or_else(|| BeadError::Parse {
        message: format!("Invalid replacement '{}'", arg),
        help: Some("Use OLD=NEW with palette colour ids, e.g. P05=P01".to_string()),
    })?;

    let target_id = old.trim();
    if target_id.is_empty() {
        return Err(BeadError::Parse {
            message: format!("Invalid replacement '{}': missing colour id", arg),
            help: Some("Use OLD=NEW with palette colour ids, e.g. P05=P01".to_string()),
        });
    }

    Ok(EditRequest::Global {
        target_id: target_id.to_string(),
        replacement: lookup(palette, new.trim())?,
    })
}

/// Parse `X,Y=ID`.
fn parse_set(arg: &str, palette: &Palette) -> Result<EditRequest> {
    let invalid = || BeadError::Parse {
        message: format!("Invalid cell edit '{}'", arg),
        help: Some("Use X,Y=ID with a 0-based column and row, e.g. 3,4=P02".to_string()),
    };

    let (coords, id) = arg.split_once('=').ok_or_else(invalid)?;
    let (x, y) = coords.split_once(',').ok_or_else(invalid)?;
    let x: u32 = x.trim().parse().map_err(|_| invalid())?;
    let y: u32 = y.trim().parse().map_err(|_| invalid())?;

    Ok(EditRequest::Single {
        x,
        y,
        replacement: lookup(palette, id.trim())?,
    })
}

fn lookup(palette: &Palette, id: &str) -> Result<ColorEntry> {
    palette.get(id).cloned().ok_or_else(|| BeadError::Parse {
        message: format!("Unknown colour '{}' in palette {}", id, palette.id),
        help: Some("Run `beadgen palette` to list colour ids".to_string()),
    })
}

fn describe_edit(edit: &EditRequest, printer: &Printer) -> String {
    let arrow = printer.dim("->");
    match edit {
        EditRequest::Global {
            target_id,
            replacement,
        } => format!("{} {} {} ({})", target_id, arrow, replacement.id, replacement.name),
        EditRequest::Single { x, y, replacement } => format!(
            "({}, {}) {} {} ({})",
            x, y, arrow, replacement.id, replacement.name
        ),
    }
}

/// Format the materials list: one aligned line per colour, most used first,
/// followed by the total.
pub fn format_materials(pattern: &Pattern) -> String {
    let materials = pattern.materials();
    let id_width = materials.iter().map(|m| m.entry.id.len()).max().unwrap_or(0);
    let name_width = materials.iter().map(|m| m.entry.name.len()).max().unwrap_or(0);
    let count_width = pattern.total_beads().to_string().len();

    let mut out = String::new();
    for m in &materials {
        out.push_str(&format!(
            "{:<id_width$}  {:<name_width$}  {}  {:>count_width$}\n",
            m.entry.id, m.entry.name, m.entry.hex, m.count
        ));
    }
    out.push_str(&format!("Total: {}\n", plural(pattern.total_beads(), "bead", "beads")));
    out
}
