//! Image to bead pattern quantization.
//!
//! Resamples a source image to the target grid size and maps every pixel to
//! the nearest palette colour using the weighted RGB metric on [`Colour`].
//! Mostly-transparent pixels become the palette's background entry.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use serde::Deserialize;

use crate::error::{BeadError, Result};
use crate::types::{ColorEntry, Colour, Palette, Pattern};

/// Requested grid height: a fixed number of rows, or derived from the
/// source aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "RawHeight")]
pub enum TargetHeight {
    #[default]
    Auto,
    Fixed(u32),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawHeight {
    Rows(u32),
    Keyword(String),
}

impl TryFrom<RawHeight> for TargetHeight {
    type Error = BeadError;

    fn try_from(raw: RawHeight) -> Result<Self> {
        match raw {
            RawHeight::Rows(rows) => Ok(TargetHeight::Fixed(rows)),
            RawHeight::Keyword(s) => s.parse(),
        }
    }
}

impl FromStr for TargetHeight {
    type Err = BeadError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(TargetHeight::Auto);
        }
        s.parse::<u32>()
            .map(TargetHeight::Fixed)
            .map_err(|_| BeadError::Parse {
                message: format!("Invalid height '{}'", s),
                help: Some("Use a positive number of rows or 'auto'".to_string()),
            })
    }
}

impl fmt::Display for TargetHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetHeight::Auto => write!(f, "auto"),
            TargetHeight::Fixed(rows) => write!(f, "{}", rows),
        }
    }
}

/// Resampling filter used to shrink the source image to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Resample {
    Nearest,
    #[default]
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<Resample> for FilterType {
    fn from(filter: Resample) -> Self {
        match filter {
            Resample::Nearest => FilterType::Nearest,
            Resample::Triangle => FilterType::Triangle,
            Resample::CatmullRom => FilterType::CatmullRom,
            Resample::Gaussian => FilterType::Gaussian,
            Resample::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Converts images into bead patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quantizer {
    filter: Resample,
}

impl Quantizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different resampling filter.
    pub fn with_filter(mut self, filter: Resample) -> Self {
        self.filter = filter;
        self
    }

    /// Decode encoded image bytes and quantize them.
    pub fn quantize_bytes(
        &self,
        bytes: &[u8],
        width: u32,
        height: TargetHeight,
        palette: &Palette,
    ) -> Result<Pattern> {
        if palette.is_empty() {
            return Err(BeadError::EmptyPalette);
        }
        let image = decode(bytes)?;
        self.quantize(&image, width, height, palette)
    }

    /// Quantize a decoded image to a `width` x `height` bead pattern.
    pub fn quantize(
        &self,
        image: &DynamicImage,
        width: u32,
        height: TargetHeight,
        palette: &Palette,
    ) -> Result<Pattern> {
        let lookup = PaletteLookup::new(palette)?;

        if image.width() == 0 || image.height() == 0 {
            return Err(BeadError::Decode {
                message: "image has no pixels".to_string(),
            });
        }
        let height = resolve_height(width, height, image.width(), image.height())?;

        let pixels = self.resample(image, width, height);

        let mut grid: Vec<Vec<ColorEntry>> = Vec::with_capacity(height as usize);
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();

        for y in 0..height {
            let mut row = Vec::with_capacity(width as usize);
            for x in 0..width {
                let [r, g, b, a] = pixels.get_pixel(x, y).0;
                let entry = lookup.resolve(Colour::new(r, g, b, a));

                *counts.entry(entry.id.clone()).or_insert(0) += 1;
                row.push(entry.clone());
            }
            grid.push(row);
        }

        Ok(Pattern::from_parts(width, height, grid, counts))
    }

    /// Resample to exactly `width` x `height` RGBA pixels.
    fn resample(&self, image: &DynamicImage, width: u32, height: u32) -> RgbaImage {
        if image.width() == width && image.height() == height {
            return image.to_rgba8();
        }
        image
            .resize_exact(width, height, self.filter.into())
            .to_rgba8()
    }
}

/// Quantize a decoded image with the default resampling filter.
pub fn quantize(
    image: &DynamicImage,
    width: u32,
    height: TargetHeight,
    palette: &Palette,
) -> Result<Pattern> {
    Quantizer::new().quantize(image, width, height, palette)
}

/// Decode and quantize encoded image bytes with the default resampling filter.
pub fn quantize_bytes(
    bytes: &[u8],
    width: u32,
    height: TargetHeight,
    palette: &Palette,
) -> Result<Pattern> {
    Quantizer::new().quantize_bytes(bytes, width, height, palette)
}

/// Decode image bytes in any format the `image` crate understands.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| BeadError::Decode {
        message: e.to_string(),
    })
}

/// Resolve the final grid height for a source image.
///
/// `Auto` keeps the source aspect ratio, rounded, and never drops below one row.
pub fn resolve_height(
    width: u32,
    height: TargetHeight,
    source_width: u32,
    source_height: u32,
) -> Result<u32> {
    if width == 0 {
        return Err(BeadError::InvalidDimensions {
            message: "width must be at least 1".to_string(),
            help: Some("Pass a positive --width".to_string()),
        });
    }

    match height {
        TargetHeight::Fixed(0) => Err(BeadError::InvalidDimensions {
            message: "height must be at least 1".to_string(),
            help: Some("Pass a positive --height or 'auto'".to_string()),
        }),
        TargetHeight::Fixed(rows) => Ok(rows),
        TargetHeight::Auto => {
            if source_width == 0 {
                return Err(BeadError::InvalidDimensions {
                    message: "source image has zero width".to_string(),
                    help: None,
                });
            }
            let rows = (width as f64 * source_height as f64 / source_width as f64).round();
            Ok((rows as u32).max(1))
        }
    }
}

/// Palette colours parsed once per quantization call.
struct PaletteLookup<'a> {
    entries: &'a [ColorEntry],
    colours: Vec<Colour>,
    background: usize,
}

impl<'a> PaletteLookup<'a> {
    fn new(palette: &'a Palette) -> Result<Self> {
        let entries = palette.colors();
        let background = palette.background_index().ok_or(BeadError::EmptyPalette)?;

        let colours = entries
            .iter()
            .map(ColorEntry::colour)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            entries,
            colours,
            background,
        })
    }

    /// Map a pixel to its palette entry.
    fn resolve(&self, pixel: Colour) -> &'a ColorEntry {
        if pixel.is_background() {
            return &self.entries[self.background];
        }
        &self.entries[self.nearest(pixel)]
    }

    /// Index of the closest palette colour; the earliest entry wins ties.
    fn nearest(&self, pixel: Colour) -> usize {
        let mut best_index = 0;
        let mut best_dist = u32::MAX;

        for (i, colour) in self.colours.iter().enumerate() {
            let dist = pixel.distance_squared(*colour);
            if dist < best_dist {
                best_dist = dist;
                best_index = i;
            }
        }

        best_index
    }
}
