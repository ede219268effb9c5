//! RGB color values.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque RGB color with channels in the range [0.0, 1.0].
///
/// Opacity is consumed while resolving fills, so resolved colors carry no
/// alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel [0.0, 1.0]
    pub r: f64,
    /// Green channel [0.0, 1.0]
    pub g: f64,
    /// Blue channel [0.0, 1.0]
    pub b: f64,
}

impl Color {
    /// Pure white, the default page background.
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Pure black.
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Create a color from normalized channels.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Parse a hex color string (`#rrggbb`, `rrggbb`, or `#rgb`).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(Error::InvalidColor(hex.to_string()));
        }

        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return Err(Error::InvalidColor(hex.to_string())),
        };

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&expanded[range], 16)
                .map_err(|_| Error::InvalidColor(hex.to_string()))
        };

        Ok(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Encode as a lowercase `#rrggbb` string.
    ///
    /// Each channel is scaled to 0..=255 and rounded to the nearest integer.
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b)
        )
    }

    /// Check that every channel is finite and within [0.0, 1.0].
    pub fn validate(&self) -> Result<()> {
        let in_range = |c: f64| c.is_finite() && (0.0..=1.0).contains(&c);
        if in_range(self.r) && in_range(self.g) && in_range(self.b) {
            Ok(())
        } else {
            Err(Error::InvalidColor(format!(
                "channels out of range: r={}, g={}, b={}",
                self.r, self.g, self.b
            )))
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}
