//! Validated RGB colors and per-color arithmetic

use crate::io::error::{Result, invalid_color};
use rand::Rng;
use std::fmt;

/// RGB color with components in [0, 255]
///
/// Building a `Color` from untyped data goes through [`Color::try_from`] or
/// [`Color::from_hex`], which is where invalid colors are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(pub [u8; 3]);

/// Pure black
pub const BLACK: Color = Color([0, 0, 0]);
/// Pure white
pub const WHITE: Color = Color([255, 255, 255]);
/// Pure red
pub const RED: Color = Color([255, 0, 0]);
/// Pure green
pub const GREEN: Color = Color([0, 255, 0]);
/// Pure blue
pub const BLUE: Color = Color([0, 0, 255]);

impl Color {
    /// Create a color from its three channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Red channel
    pub const fn r(self) -> u8 {
        self.0[0]
    }

    /// Green channel
    pub const fn g(self) -> u8 {
        self.0[1]
    }

    /// Blue channel
    pub const fn b(self) -> u8 {
        self.0[2]
    }

    /// Channels as an array in RGB order
    pub const fn to_array(self) -> [u8; 3] {
        self.0
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hexadecimal color
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not exactly six hexadecimal characters
    /// after the optional leading `#`
    pub fn from_hex(hexa: &str) -> Result<Self> {
        let digits = hexa.strip_prefix('#').unwrap_or(hexa);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid_color(&format!(
                "'{hexa}' should be 6 hexadecimal chars (not counting '#')"
            )));
        }

        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| invalid_color(&format!("'{hexa}' is not hexadecimal")))
        };
        Ok(Self([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }

    /// Lower-case `#rrggbb` representation
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
    }

    /// Complementary color: each channel becomes `min + max - channel`
    pub fn complementary(self) -> Self {
        let lo = self.0.iter().copied().min().unwrap_or(0);
        let hi = self.0.iter().copied().max().unwrap_or(0);
        let sum = u16::from(lo) + u16::from(hi);
        // lo <= c <= hi, so sum - c stays within [lo, hi]
        Self(self.0.map(|c| (sum - u16::from(c)) as u8))
    }

    /// Perceived brightness (Rec. 709 weights)
    pub fn luminance(self) -> f64 {
        0.0722f64.mul_add(
            f64::from(self.b()),
            0.2126f64.mul_add(f64::from(self.r()), 0.7152 * f64::from(self.g())),
        )
    }

    /// Packed integer `r + 256 g + 65536 b`, used for color counting
    pub fn packed(self) -> u32 {
        u32::from(self.r()) + (u32::from(self.g()) << 8) + (u32::from(self.b()) << 16)
    }

    /// Inverse of [`Color::packed`]
    pub const fn from_packed(value: u32) -> Self {
        Self([
            (value & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            ((value >> 16) & 0xff) as u8,
        ])
    }

    /// Uniformly random color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random())
    }

    /// Uniformly random gray level
    pub fn random_grayscale<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let level = rng.random();
        Self([level; 3])
    }
}

impl TryFrom<&[i64]> for Color {
    type Error = crate::io::error::ImgprocError;

    fn try_from(components: &[i64]) -> Result<Self> {
        let [r, g, b] = components else {
            return Err(invalid_color(&format!(
                "expected 3 components, found {}",
                components.len()
            )));
        };

        let channel = |value: i64| {
            u8::try_from(value)
                .ok()
                .ok_or_else(|| invalid_color(&format!("component {value} outside [0, 255]")))
        };
        Ok(Self([channel(*r)?, channel(*g)?, channel(*b)?]))
    }
}

impl From<[u8; 3]> for Color {
    fn from(channels: [u8; 3]) -> Self {
        Self(channels)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
