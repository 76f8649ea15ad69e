//! Pattern editing.
//!
//! Edits never touch the input pattern. Each one copies the grid, applies
//! the change and recounts every cell.

use crate::error::{BeadError, Result};
use crate::types::{ColorEntry, Pattern};

/// A requested change to a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRequest {
    /// Replace every cell whose colour id is `target_id`.
    Global {
        target_id: String,
        replacement: ColorEntry,
    },
    /// Replace the single cell at column `x`, row `y`.
    Single {
        x: u32,
        y: u32,
        replacement: ColorEntry,
    },
}

/// Apply an edit request, returning the edited pattern.
pub fn apply_edit(pattern: &Pattern, edit: &EditRequest) -> Result<Pattern> {
    match edit {
        EditRequest::Global {
            target_id,
            replacement,
        } => Ok(replace_global(pattern, target_id, replacement)),
        EditRequest::Single { x, y, replacement } => replace_single(pattern, *x, *y, replacement),
    }
}

/// Replace every cell coloured `target_id` with `replacement`.
///
/// Replacing a colour that does not occur yields an equal pattern.
pub fn replace_global(pattern: &Pattern, target_id: &str, replacement: &ColorEntry) -> Pattern {
    let grid = pattern
        .grid()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    if cell.id == target_id {
                        replacement.clone()
                    } else {
                        cell.clone()
                    }
                })
                .collect()
        })
        .collect();

    pattern.with_grid(grid)
}

/// Replace the cell at column `x`, row `y` with `replacement`.
pub fn replace_single(
    pattern: &Pattern,
    x: u32,
    y: u32,
    replacement: &ColorEntry,
) -> Result<Pattern> {
    if x >= pattern.width() || y >= pattern.height() {
        return Err(BeadError::OutOfBounds {
            x,
            y,
            width: pattern.width(),
            height: pattern.height(),
        });
    }

    let mut grid = pattern.grid().to_vec();
    grid[y as usize][x as usize] = replacement.clone();

    Ok(pattern.with_grid(grid))
}
