//! Free-text commentary about a source image.
//!
//! A commentary service (typically a hosted vision model) suggests a title,
//! a difficulty and a use for the finished piece. It never influences the
//! pattern itself, and its failures stop here: callers always get a value.
//!
//! No client ships with the crate. Callers plug one in by implementing
//! [`Commentator`] and calling [`describe_or_fallback`]:
//!
//! ```
//! use beadgen::{describe_or_fallback, Commentary, Commentator, Result};
//! use image::DynamicImage;
//!
//! struct Offline;
//!
//! impl Commentator for Offline {
//!     fn describe(&self, _image: &DynamicImage) -> Result<Commentary> {
//!         Ok(Commentary::fallback())
//!     }
//! }
//!
//! let image = DynamicImage::new_rgba8(1, 1);
//! assert_eq!(describe_or_fallback(&Offline, &image), Commentary::fallback());
//! ```

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::{BeadError, Result};

/// Commentary returned by a [`Commentator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commentary {
    pub title: String,
    pub description: String,
    /// Free-text difficulty label, e.g. "Easy" or "Medium".
    pub difficulty: String,
    pub suggested_usage: String,
}

/// Coarse difficulty bucket derived from the free-text label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Commentary {
    /// Value used whenever commentary is unavailable.
    pub fn fallback() -> Self {
        Self {
            title: "Analysis unavailable".to_string(),
            description: "Could not get ideas for this image right now.".to_string(),
            difficulty: "Unknown".to_string(),
            suggested_usage: "Decoration".to_string(),
        }
    }

    /// Parse commentary from a JSON response body.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| BeadError::Parse {
            message: format!("Invalid commentary response: {}", e),
            help: None,
        })
    }

    /// Bucket the difficulty label: "hard" wins over "medium", anything
    /// else is easy.
    pub fn difficulty_level(&self) -> Difficulty {
        let label = self.difficulty.to_lowercase();
        if label.contains("hard") {
            Difficulty::Hard
        } else if label.contains("medium") {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }
}

/// Source of image commentary.
pub trait Commentator {
    fn describe(&self, image: &DynamicImage) -> Result<Commentary>;
}

/// Ask `commentator` about `image`, substituting the fallback on any error.
pub fn describe_or_fallback(commentator: &dyn Commentator, image: &DynamicImage) -> Commentary {
    commentator
        .describe(image)
        .unwrap_or_else(|_| Commentary::fallback())
}
