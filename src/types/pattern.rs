//! The bead pattern grid and its per-colour counts.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::error::{BeadError, Result};

use super::ColorEntry;

/// A grid of bead colours with occurrence counts.
///
/// Patterns are immutable values: edits produce a new pattern, so the grid
/// and the counts can never drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pattern {
    width: u32,
    height: u32,

    /// Cells, row-major: `grid[y][x]`.
    grid: Vec<Vec<ColorEntry>>,

    /// Colour id -> number of cells with that id.
    counts: BTreeMap<String, usize>,
}

/// One line of a materials list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Material {
    pub entry: ColorEntry,
    pub count: usize,
}

impl Pattern {
    /// Build a pattern from a grid, counting cells from scratch.
    pub fn from_grid(grid: Vec<Vec<ColorEntry>>) -> Result<Self> {
        let height = grid.len();
        let width = grid.first().map_or(0, |row| row.len());

        if width == 0 || height == 0 {
            return Err(BeadError::InvalidDimensions {
                message: format!("pattern grid is {}x{}", width, height),
                help: Some("A pattern needs at least one row and one column".to_string()),
            });
        }

        if let Some((y, row)) = grid.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(BeadError::InvalidDimensions {
                message: format!("row {} has {} cells, expected {}", y, row.len(), width),
                help: None,
            });
        }

        let counts = count_cells(&grid);

        Ok(Self {
            width: width as u32,
            height: height as u32,
            grid,
            counts,
        })
    }

    /// Assemble a pattern from a grid and counts accumulated alongside it.
    pub(crate) fn from_parts(
        width: u32,
        height: u32,
        grid: Vec<Vec<ColorEntry>>,
        counts: BTreeMap<String, usize>,
    ) -> Self {
        debug_assert_eq!(grid.len(), height as usize);
        debug_assert_eq!(counts.values().sum::<usize>(), (width * height) as usize);

        Self {
            width,
            height,
            grid,
            counts,
        }
    }

    /// A pattern of the same shape holding `grid`, counted from scratch.
    pub(crate) fn with_grid(&self, grid: Vec<Vec<ColorEntry>>) -> Self {
        debug_assert_eq!(grid.len(), self.grid.len());

        let counts = count_cells(&grid);
        Self::from_parts(self.width, self.height, grid, counts)
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rows of cells.
    pub fn grid(&self) -> &[Vec<ColorEntry>] {
        &self.grid
    }

    /// Get the cell at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Option<&ColorEntry> {
        self.grid
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
    }

    /// Occurrence count per colour id.
    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// Number of cells with the given colour id (0 when absent).
    pub fn count(&self, id: &str) -> usize {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Total number of beads needed.
    pub fn total_beads(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Distinct colours used, most frequent first.
    ///
    /// Ties keep the order in which colours first appear (row-major).
    pub fn materials(&self) -> Vec<Material> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut materials: Vec<Material> = Vec::with_capacity(self.counts.len());

        for entry in self.grid.iter().flatten() {
            if seen.insert(entry.id.as_str()) {
                materials.push(Material {
                    entry: entry.clone(),
                    count: self.count(&entry.id),
                });
            }
        }

        // Stable sort keeps first-appearance order among equal counts
        materials.sort_by(|a, b| b.count.cmp(&a.count));
        materials
    }
}

/// Count cells per colour id.
fn count_cells(grid: &[Vec<ColorEntry>]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for entry in grid.iter().flatten() {
        *counts.entry(entry.id.clone()).or_insert(0) += 1;
    }
    counts
}
