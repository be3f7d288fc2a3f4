//! Named color palettes stored as JSON

use crate::color::rgb::Color;
use crate::io::error::{ImgprocError, Result, WithPath, invalid_parameter};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use std::path::Path;

const BUILTIN_PALETTE: &str = include_str!("../../assets/palette.json");

#[derive(Debug, Deserialize)]
struct PaletteEntry {
    name: String,
    color: String,
}

/// Ordered list of named colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<(String, Color)>,
}

impl Palette {
    /// Palette shipped with the crate
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded asset is malformed
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_PALETTE)
    }

    /// Parse a JSON array of `{ "name": ..., "color": "#rrggbb" }` objects
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not such an array or a color is not valid hex
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Vec<PaletteEntry> = serde_json::from_str(json)?;
        let entries = raw
            .into_iter()
            .map(|entry| Ok((entry.name, Color::from_hex(&entry.color)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Load a palette from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).with_path(path)?;
        Self::from_json_str(&json).with_path(path)
    }

    /// Number of colors
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette holds no colors
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Color names in palette order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Look up a color by name, ignoring case
    ///
    /// # Errors
    ///
    /// Returns an error if no color carries that name
    pub fn find(&self, name: &str) -> Result<Color> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|&(_, color)| color)
            .ok_or_else(|| {
                invalid_parameter("color", &name, &"not found among the available colors")
            })
    }

    /// Pick a color uniformly at random
    ///
    /// # Errors
    ///
    /// Returns an error if the palette is empty
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Color> {
        self.entries
            .choose(rng)
            .map(|&(_, color)| color)
            .ok_or_else(|| ImgprocError::InvalidSourceData {
                reason: "palette is empty".to_string(),
            })
    }
}
