//! Color values, validation, named palettes and gradients

/// Color gradients loaded from JSON
pub mod gradient;
/// Named color palettes loaded from JSON
pub mod palette;
/// Validated RGB colors and per-color arithmetic
pub mod rgb;

pub use gradient::{Gradient, GradientLibrary, Interpolation};
pub use palette::Palette;
pub use rgb::Color;
