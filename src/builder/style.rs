use std::fmt::{Display, Formatter};
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::common::{CodeError, CodeResult, ECLevel};

// Color
//------------------------------------------------------------------------------

/// sRGB color with alpha, written as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn from_hex(hex: &str) -> CodeResult<Self> {
        let invalid = || CodeError::InvalidColor(hex.to_string());
        let digits = hex.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) || !matches!(digits.len(), 6 | 8) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self { r: channel(0)?, g: channel(2)?, b: channel(4)?, a })
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }

    /// Relative luminance in [0, 1], ignoring alpha.
    pub fn luminance(self) -> f32 {
        let lin = |c: u8| {
            let c = c as f32 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * lin(self.r) + 0.7152 * lin(self.g) + 0.0722 * lin(self.b)
    }

    /// Contrast ratio between two colors, from 1 to 21.
    pub fn contrast(self, other: Color) -> f32 {
        let (l1, l2) = (self.luminance(), other.luminance());
        let (hi, lo) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (hi + 0.05) / (lo + 0.05)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        color.to_rgba()
    }
}

// Style
//------------------------------------------------------------------------------

// Scanners struggle below this foreground/background contrast ratio
const MIN_CONTRAST: f32 = 3.0;

/// Rendering options handed to the renderer alongside the payload.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeStyle {
    /// Output edge length in pixels.
    pub size: u32,
    /// Quiet zone in modules.
    pub margin: u32,
    pub foreground: Color,
    pub background: Color,
    pub ec_level: ECLevel,
}

impl Default for CodeStyle {
    fn default() -> Self {
        Self {
            size: 512,
            margin: 4,
            foreground: Color::BLACK,
            background: Color::WHITE,
            ec_level: ECLevel::M,
        }
    }
}

impl CodeStyle {
    pub fn validate(&self) -> CodeResult<()> {
        if self.size == 0 {
            return Err(CodeError::InvalidValue {
                key: "size".to_string(),
                reason: "size must be greater than zero".to_string(),
            });
        }
        if self.foreground.contrast(self.background) < MIN_CONTRAST {
            return Err(CodeError::InvalidColor(format!(
                "{} on {} has too little contrast",
                self.foreground, self.background
            )));
        }
        Ok(())
    }
}
