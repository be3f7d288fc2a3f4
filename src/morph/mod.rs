//! Pixel transforms usable on whole images or on divider containers

/// Enhancement by blending, autocontrast and blur
pub mod adjust;
/// Per-pixel color transforms, flips, translation and pixel sorting
pub mod channels;
/// Filled rectangles and polygons
pub mod draw;
/// Named effects applied through a divider selection
pub mod effect;
/// White framing and side trimming
pub mod frame;
