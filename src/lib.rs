//! Image manipulation toolkit built around pixel-region partitioning
//!
//! An image is split into containers (bands, grid cells, rings, arbitrary
//! coordinate groups or Voronoi cells), containers are transformed or repainted,
//! and the result is stitched back. Around this core sit color utilities, pixel
//! transforms, folder ranking, randomized variant generation and JPEG glitching.

#![deny(unsafe_code)]

/// Image statistics and folder ranking
pub mod analysis;
/// Color values and named palettes
pub mod color;
/// Input/output operations and error handling
pub mod io;
/// Pixel transforms applied to images or containers
pub mod morph;
/// Dividers splitting an image into modifiable containers
pub mod partition;
/// Randomized generation of image variants
pub mod serigraph;

pub use io::error::{ImgprocError, Result};
pub use io::image::Image;
