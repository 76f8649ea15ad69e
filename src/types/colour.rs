//! Colour type, hex parsing and the weighted RGB distance metric.

use std::fmt;
use std::str::FromStr;

use palette::{Hsl, IntoColor, Srgb};

use crate::error::{BeadError, Result};

/// Alpha values below this are treated as background.
pub const ALPHA_THRESHOLD: u8 = 128;

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a `#RRGGBB` hex string (case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || BeadError::Parse {
            message: format!("Invalid hex colour: {}", s),
            help: Some("Use the #RRGGBB format, e.g. #C62933".to_string()),
        };

        let digits = match s.strip_prefix('#') {
            Some(digits) if digits.len() == 6 => digits,
            _ => return Err(invalid()),
        };
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let rgb: Srgb<u8> = s.parse().map_err(|_| invalid())?;
        Ok(Self::rgb(rgb.red, rgb.green, rgb.blue))
    }

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Check if the colour counts as background (mostly transparent).
    pub fn is_background(self) -> bool {
        self.a < ALPHA_THRESHOLD
    }

    /// Squared weighted RGB distance, ignoring alpha.
    ///
    /// Low-cost perceptual approximation (https://www.compuphase.com/cmetric.htm):
    /// red and blue are weighted by the mean red level of the two colours,
    /// green is weighted 4x. Each weighted red/blue term is floored after
    /// dividing by 256, with the half-unit of `rmean` folded into the
    /// divisor so the whole computation stays in integers.
    pub fn distance_squared(self, other: Colour) -> u32 {
        let red_sum = self.r as i32 + other.r as i32;
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;

        let r_term = ((1024 + red_sum) * dr * dr) >> 9;
        let g_term = 4 * dg * dg;
        let b_term = ((1534 - red_sum) * db * db) >> 9;

        (r_term + g_term + b_term) as u32
    }

    /// Weighted RGB distance.
    pub fn distance(self, other: Colour) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// Darken the colour in HSL space by a percentage of its lightness.
    pub fn darken(self, percent: f32) -> Self {
        let rgb: Srgb<f32> = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        );

        let mut hsl: Hsl = rgb.into_color();
        hsl.lightness = (hsl.lightness * (1.0 - percent / 100.0)).clamp(0.0, 1.0);

        let out: Srgb<f32> = hsl.into_color();
        Self::new(
            (out.red * 255.0).round().clamp(0.0, 255.0) as u8,
            (out.green * 255.0).round().clamp(0.0, 255.0) as u8,
            (out.blue * 255.0).round().clamp(0.0, 255.0) as u8,
            self.a,
        )
    }
}

impl FromStr for Colour {
    type Err = BeadError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
