//! Parallel strips along one image axis

use crate::color::Color;
use crate::io::error::{ImgprocError, Result, out_of_range};
use crate::io::image::{Image, check_image};
use crate::partition::container::{Block, PixelContainer};
use crate::partition::divider::Divider;
use ndarray::{Array3, ArrayView3, ArrayViewMut3, Axis, Slice};
use std::ops::Range;
use std::str::FromStr;

/// Direction in which bands are stacked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Strips stacked top to bottom; boundaries are row indices
    #[default]
    Horizontal,
    /// Strips stacked left to right; boundaries are column indices
    Vertical,
}

impl Orientation {
    /// Image axis the boundaries index into
    pub const fn axis(self) -> Axis {
        match self {
            Self::Horizontal => Axis(0),
            Self::Vertical => Axis(1),
        }
    }
}

impl FromStr for Orientation {
    type Err = ImgprocError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            _ => Err(ImgprocError::Unsupported {
                feature: format!(
                    "band orientation '{s}' (only horizontal and vertical are supported)"
                ),
            }),
        }
    }
}

/// Splits an image into bands at a set of boundary indices
///
/// Band `i` spans `boundaries[i - 1]..boundaries[i]`, with the image edges closing
/// the first and last band. Bands are views: changes land in the owned image directly.
#[derive(Debug, Clone)]
pub struct BandDivider {
    image: Image,
    orientation: Orientation,
    boundaries: Vec<usize>,
    spans: Vec<Range<usize>>,
}

impl BandDivider {
    /// Partition `image` at `boundaries`
    ///
    /// Boundaries may come in any order and contain duplicates; they are sorted
    /// and deduplicated. Boundaries past the image edge are clamped to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is not three-channel
    pub fn new(image: Image, boundaries: &[usize], orientation: Orientation) -> Result<Self> {
        check_image(&image)?;
        let extent = image.len_of(orientation.axis());

        let mut boundaries: Vec<usize> = boundaries.iter().map(|&b| b.min(extent)).collect();
        boundaries.sort_unstable();
        boundaries.dedup();

        let starts = std::iter::once(0).chain(boundaries.iter().copied());
        let ends = boundaries.iter().copied().chain(std::iter::once(extent));
        let spans = starts.zip(ends).map(|(start, end)| start..end).collect();

        Ok(Self {
            image,
            orientation,
            boundaries,
            spans,
        })
    }

    /// Number of bands
    pub const fn n_bands(&self) -> usize {
        self.spans.len()
    }

    /// Sanitized boundaries
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// Stacking direction
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Index range of a band along the partition axis
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a band index
    pub fn span(&self, index: usize) -> Result<Range<usize>> {
        self.spans
            .get(index)
            .cloned()
            .ok_or_else(|| out_of_range("band", index, self.n_bands()))
    }

    /// Read-only view of a band
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a band index
    pub fn band(&self, index: usize) -> Result<ArrayView3<'_, u8>> {
        let span = self.span(index)?;
        Ok(self
            .image
            .slice_axis(self.orientation.axis(), Slice::from(span)))
    }

    /// Mutable block over a band
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a band index
    pub fn band_mut(&mut self, index: usize) -> Result<Block<'_>> {
        let span = self.span(index)?;
        let origin = match self.orientation {
            Orientation::Horizontal => [span.start, 0],
            Orientation::Vertical => [0, span.start],
        };
        let view: ArrayViewMut3<'_, u8> = self
            .image
            .slice_axis_mut(self.orientation.axis(), Slice::from(span));
        Ok(Block::new(view, origin))
    }

    /// Iterate over read-only band views in order
    pub fn bands(&self) -> impl Iterator<Item = ArrayView3<'_, u8>> {
        let axis = self.orientation.axis();
        self.spans
            .iter()
            .map(move |span| self.image.slice_axis(axis, Slice::from(span.clone())))
    }
}

impl Divider for BandDivider {
    type Index = usize;

    fn len(&self) -> usize {
        self.n_bands()
    }

    fn indices(&self) -> Vec<usize> {
        (0..self.n_bands()).collect()
    }

    fn apply_at<F>(&mut self, index: usize, transform: &F) -> Result<()>
    where
        F: Fn(ArrayView3<'_, u8>) -> Array3<u8>,
    {
        self.band_mut(index)?.apply(transform)
    }

    fn paint_at(&mut self, index: usize, color: Color) -> Result<()> {
        self.band_mut(index)?.paint(color);
        Ok(())
    }

    // Bands write through to the owned buffer, which is already their
    // concatenation along the partition axis.
    fn stitch(self) -> Image {
        self.image
    }
}
