//! Color gradients stored as JSON and sampled along [0, 1]
//!
//! A gradient of `n` colors splits [0, 1] into `n - 1` equal segments. Inside
//! a segment the two end colors are mixed by the gradient's interpolation and
//! each channel is truncated to an integer.

use crate::color::rgb::{BLACK, Color};
use crate::io::error::{ImgprocError, Result, WithPath, invalid_parameter};
use num_traits::ToPrimitive;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use std::path::Path;

const BUILTIN_GRADIENTS: &str = include_str!("../../assets/gradients.json");

/// Mixing curve between two neighboring gradient colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Weight grows linearly with the position inside the segment
    #[default]
    Linear,
    /// Weight grows with the square of the position, lingering on the first color
    Quadratic,
}

impl Interpolation {
    const fn weight(self, local: f64) -> f64 {
        match self {
            Self::Linear => local,
            Self::Quadratic => local * local,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GradientEntry {
    name: String,
    colors: Vec<String>,
    #[serde(default)]
    interpolation: Interpolation,
}

/// Named sequence of colors evenly spread over [0, 1]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient {
    name: String,
    colors: Vec<Color>,
    interpolation: Interpolation,
}

impl Gradient {
    /// Build a gradient from its colors
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty
    pub fn new(name: impl Into<String>, colors: Vec<Color>, interpolation: Interpolation) -> Result<Self> {
        let name = name.into();
        if colors.is_empty() {
            return Err(invalid_parameter("gradient", &name, &"needs at least one color"));
        }
        Ok(Self {
            name,
            colors,
            interpolation,
        })
    }

    /// Gradient name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Colors in gradient order
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Mixing curve
    pub const fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Color found at position `t` of the gradient
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is not within [0, 1]
    pub fn color_at(&self, t: f64) -> Result<Color> {
        if !(0.0..=1.0).contains(&t) {
            return Err(invalid_parameter("t", &t, &"must be within [0, 1]"));
        }
        let segments = self.colors.len().saturating_sub(1);
        let (Some(&first), Some(&last)) = (self.colors.first(), self.colors.last()) else {
            return Err(ImgprocError::InvalidSourceData {
                reason: format!("gradient {} has no colors", self.name),
            });
        };
        if segments == 0 {
            return Ok(first);
        }

        let scaled = t * segments as f64;
        let end = scaled.ceil().to_usize().unwrap_or(segments).clamp(1, segments);
        let start_color = self.colors.get(end - 1).copied().unwrap_or(first);
        let end_color = self.colors.get(end).copied().unwrap_or(last);
        let weight = self.interpolation.weight(scaled - (end - 1) as f64);

        let mut mixed = [0; 3];
        for ((out, &from), &to) in mixed.iter_mut().zip(&start_color.0).zip(&end_color.0) {
            let value = (1.0 - weight).mul_add(f64::from(from), weight * f64::from(to));
            *out = value.floor().clamp(0.0, 255.0).to_u8().unwrap_or(0);
        }
        Ok(Color(mixed))
    }

    /// Pick one of the gradient's colors uniformly at random
    pub fn sample_color<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        self.colors.choose(rng).copied().unwrap_or(BLACK)
    }
}

/// Collection of named gradients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientLibrary {
    gradients: Vec<Gradient>,
}

impl GradientLibrary {
    /// Gradients shipped with the crate
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded asset is malformed
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_GRADIENTS)
    }

    /// Parse a JSON array of `{ "name": ..., "colors": ["#rrggbb", ...] }`
    /// objects, each with an optional `"interpolation"` of `linear` or `quadratic`
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not such an array, a color is not
    /// valid hex or a gradient has no colors
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Vec<GradientEntry> = serde_json::from_str(json)?;
        let gradients = raw
            .into_iter()
            .map(|entry| {
                let colors = entry
                    .colors
                    .iter()
                    .map(|hex| Color::from_hex(hex))
                    .collect::<Result<Vec<_>>>()?;
                Gradient::new(entry.name, colors, entry.interpolation)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { gradients })
    }

    /// Load gradients from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).with_path(path)?;
        Self::from_json_str(&json).with_path(path)
    }

    /// Number of gradients
    pub const fn len(&self) -> usize {
        self.gradients.len()
    }

    /// Whether the library holds no gradients
    pub const fn is_empty(&self) -> bool {
        self.gradients.is_empty()
    }

    /// Gradient names in file order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.gradients.iter().map(Gradient::name)
    }

    /// Look up a gradient by name, ignoring case
    ///
    /// # Errors
    ///
    /// Returns an error if no gradient carries that name
    pub fn find(&self, name: &str) -> Result<&Gradient> {
        self.gradients
            .iter()
            .find(|gradient| gradient.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                invalid_parameter("gradient", &name, &"not found among the available gradients")
            })
    }

    /// Pick a gradient uniformly at random
    ///
    /// # Errors
    ///
    /// Returns an error if the library is empty
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&Gradient> {
        self.gradients
            .choose(rng)
            .ok_or_else(|| ImgprocError::InvalidSourceData {
                reason: "gradient library is empty".to_string(),
            })
    }
}
