//! Named effects that can be run over the containers of any divider

use crate::color::Color;
use crate::io::error::{ImgprocError, Result};
use crate::morph::adjust::{blur, vividness};
use crate::morph::channels::{complement, grayscale, negative};
use crate::partition::divider::{Divider, Selection};
use rand::Rng;
use std::str::FromStr;

/// Blur radius used when none is configured
pub const DEFAULT_BLUR_RADIUS: f32 = 2.0;
/// Saturation factor of the `vivid` effect
pub const VIVID_FACTOR: f64 = 1.8;

/// Effect applied to selected containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Effect {
    /// Fill with a random color
    Paint,
    /// Invert colors
    Negative,
    /// Convert to grayscale
    Grayscale,
    /// Replace colors by their complement
    Complement,
    /// Gaussian blur
    Blur,
    /// Boost saturation
    Vivid,
}

impl Effect {
    /// Every effect, in declaration order
    pub const ALL: [Self; 6] = [
        Self::Paint,
        Self::Negative,
        Self::Grayscale,
        Self::Complement,
        Self::Blur,
        Self::Vivid,
    ];

    /// Lower-case name as accepted by [`Effect::from_str`]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Paint => "paint",
            Self::Negative => "negative",
            Self::Grayscale => "grayscale",
            Self::Complement => "complement",
            Self::Blur => "blur",
            Self::Vivid => "vivid",
        }
    }

    /// Run the effect over the selected containers of a divider
    ///
    /// `Paint` draws a fresh random color per container from `rng`.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection is invalid for the divider
    pub fn run<D, R>(
        self,
        divider: &mut D,
        selection: &Selection<D::Index>,
        blur_radius: f32,
        rng: &mut R,
    ) -> Result<()>
    where
        D: Divider,
        R: Rng + ?Sized,
    {
        let indices = divider.select(selection, rng)?;
        match self {
            Self::Paint => divider.paint_selected(&indices, || Color::random(rng)),
            Self::Negative => divider.apply_to_selected(&indices, &negative),
            Self::Grayscale => divider.apply_to_selected(&indices, &grayscale),
            Self::Complement => divider.apply_to_selected(&indices, &complement),
            Self::Blur => divider.apply_to_selected(&indices, &blur(blur_radius)),
            Self::Vivid => divider.apply_to_selected(&indices, &vividness(VIVID_FACTOR)),
        }
    }
}

impl FromStr for Effect {
    type Err = ImgprocError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|effect| effect.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ImgprocError::Unsupported {
                feature: format!("effect '{s}'"),
            })
    }
}
