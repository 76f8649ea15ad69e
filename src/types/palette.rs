//! Bead colour entries and palettes.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BeadError, Result};

use super::Colour;

/// Hex code that marks the background colour for transparent pixels.
pub const WHITE_HEX: &str = "#FFFFFF";

/// A single bead colour.
///
/// Identity is `id`: two entries with the same id count as the same colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorEntry {
    /// Identifier, unique within a palette (e.g. `P01`).
    pub id: String,
    /// Human readable name.
    pub name: String,
    /// `#RRGGBB` hex code.
    pub hex: String,
}

impl ColorEntry {
    /// Create a colour entry, validating the hex code.
    pub fn new(id: impl Into<String>, name: impl Into<String>, hex: impl Into<String>) -> Result<Self> {
        let entry = Self {
            id: id.into(),
            name: name.into(),
            hex: hex.into(),
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Parse the hex code into a colour.
    pub fn colour(&self) -> Result<Colour> {
        Colour::from_hex(&self.hex)
    }

    /// Check whether this is the white background entry.
    pub fn is_white(&self) -> bool {
        self.hex.trim().eq_ignore_ascii_case(WHITE_HEX)
    }

    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(BeadError::Parse {
                message: format!("Colour '{}' has an empty id", self.name),
                help: Some("Every palette colour needs a unique id, e.g. P01".to_string()),
            });
        }
        self.colour().map(|_| ())
    }
}

/// An ordered, closed set of bead colours.
///
/// Order matters: it breaks ties during quantization and picks the fallback
/// background colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub id: String,
    pub name: String,
    colors: Vec<ColorEntry>,
}

impl Palette {
    /// Create a palette, validating ids and hex codes.
    ///
    /// An empty colour list is allowed here; quantization rejects it.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        colors: Vec<ColorEntry>,
    ) -> Result<Self> {
        let palette = Self {
            id: id.into(),
            name: name.into(),
            colors,
        };
        palette.validate()?;
        Ok(palette)
    }

    /// The builtin 28-colour fuse-bead palette.
    pub fn perler() -> Self {
        const COLOURS: [(&str, &str, &str); 28] = [
            ("P01", "Black", "#2E2E2E"),
            ("P02", "White", "#FFFFFF"),
            ("P03", "Red", "#C62933"),
            ("P04", "Orange", "#EF7D26"),
            ("P05", "Yellow", "#FBD822"),
            ("P06", "Dark Green", "#0B6841"),
            ("P07", "Dark Blue", "#213B8B"),
            ("P08", "Purple", "#583688"),
            ("P09", "Pink", "#DB5F89"),
            ("P10", "Grey", "#87888A"),
            ("P11", "Brown", "#5A3D31"),
            ("P12", "Light Blue", "#3E91C9"),
            ("P13", "Light Green", "#6BCB77"),
            ("P14", "Tan", "#D6A681"),
            ("P15", "Peach", "#F5C6A5"),
            ("P16", "Cream", "#F0EAD6"),
            ("P17", "Magenta", "#B22E68"),
            ("P18", "Turquoise", "#008C95"),
            ("P19", "Rust", "#8A3222"),
            ("P20", "Cheddar", "#F6A024"),
            ("P21", "Butterscotch", "#D58C46"),
            ("P22", "Parrot Green", "#00904B"),
            ("P23", "Dark Grey", "#48494B"),
            ("P24", "Toothpaste", "#94D6D6"),
            ("P25", "Hot Coral", "#FF5C5C"),
            ("P26", "Plum", "#7A3575"),
            ("P27", "Kiwi Lime", "#7BC744"),
            ("P28", "Blush", "#FF9796"),
        ];

        Self {
            id: "perler".to_string(),
            name: "Perler".to_string(),
            colors: COLOURS
                .iter()
                .map(|(id, name, hex)| ColorEntry {
                    id: id.to_string(),
                    name: name.to_string(),
                    hex: hex.to_string(),
                })
                .collect(),
        }
    }

    /// Load a palette from a YAML or JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BeadError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read palette: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse a palette from a YAML (or JSON) document.
    pub fn parse(content: &str) -> Result<Self> {
        let palette: Palette = serde_yaml::from_str(content).map_err(|e| BeadError::Parse {
            message: format!("Invalid palette: {}", e),
            help: Some("Expected `id`, `name` and a `colors` list of {id, name, hex}".to_string()),
        })?;
        palette.validate()?;
        Ok(palette)
    }

    /// Colours in palette order.
    pub fn colors(&self) -> &[ColorEntry] {
        &self.colors
    }

    /// Look up a colour by id.
    pub fn get(&self, id: &str) -> Option<&ColorEntry> {
        self.colors.iter().find(|c| c.id == id)
    }

    /// The entry transparent pixels map to: the first white entry, otherwise
    /// the first entry.
    pub fn background(&self) -> Option<&ColorEntry> {
        self.background_index().map(|i| &self.colors[i])
    }

    /// Index of [`Palette::background`]; `None` only for an empty palette.
    pub fn background_index(&self) -> Option<usize> {
        if self.colors.is_empty() {
            return None;
        }
        Some(self.colors.iter().position(|c| c.is_white()).unwrap_or(0))
    }

    /// Get the number of colours.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.colors {
            entry.validate()?;
            if !seen.insert(entry.id.as_str()) {
                return Err(BeadError::Parse {
                    message: format!("Duplicate colour id '{}' in palette '{}'", entry.id, self.id),
                    help: Some("Colour ids must be unique within a palette".to_string()),
                });
            }
        }
        Ok(())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::perler()
    }
}
