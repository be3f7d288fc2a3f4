//! Pixel-region partitioning
//!
//! A divider owns an image, computes its containers once at construction,
//! lets callers transform or repaint containers, and stitches the result back:
//! - Bands and grid cells are [`Block`] views into the owned image
//! - Rings, arbitrary groups and Voronoi cells are owned [`Cell`]s scattered back on stitch

/// Explicit coordinate-group partitions
pub mod arbitrary;
/// Parallel strips along one axis
pub mod band;
/// Rectangular views and sparse owned pixel containers
pub mod container;
/// Shared divider trait and selection helpers
pub mod divider;
/// Regular grids of equal cells
pub mod grid;
/// Concentric rings around a center
pub mod ring;
/// Nearest-seed partitions
pub mod voronoi;

pub use arbitrary::ArbitraryDivider;
pub use band::{BandDivider, Orientation};
pub use container::{Block, Cell, PixelContainer};
pub use divider::{Divider, SampleSize, Selection};
pub use grid::RegularGridDivider;
pub use ring::CircularDivider;
pub use voronoi::VoronoiDivider;
