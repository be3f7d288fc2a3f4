//! Pixel containers: rectangular views and sparse owned coordinate sets
//!
//! [`Block`] borrows a rectangle of the divider's image, so every transform
//! or paint writes straight through to the parent buffer. [`Cell`] owns a
//! copy of its pixels together with their coordinates; changes stay in the
//! cell until the divider scatters them back with [`scatter_cells`].

use crate::color::Color;
use crate::io::error::{ImgprocError, Result};
use crate::io::image::Image;
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, ArrayViewMut3, Axis, aview1, s};

/// Operations shared by every kind of pixel container
pub trait PixelContainer {
    /// Number of pixels held by the container
    fn pixel_count(&self) -> usize;

    /// Replace the container's pixels with `transform(current pixels)`
    ///
    /// # Errors
    ///
    /// Returns an error if the transform does not preserve the pixel shape
    fn apply<F>(&mut self, transform: &F) -> Result<()>
    where
        F: Fn(ArrayView3<'_, u8>) -> Array3<u8>;

    /// Replace every pixel with a single color
    fn paint(&mut self, color: Color);
}

fn check_shape(expected: (usize, usize, usize), found: (usize, usize, usize)) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(ImgprocError::ShapeMismatch { expected, found })
    }
}

/// Rectangular view into a divider's image
#[derive(Debug)]
pub struct Block<'a> {
    pixels: ArrayViewMut3<'a, u8>,
    origin: [usize; 2],
}

impl<'a> Block<'a> {
    /// Wrap a mutable view whose top-left pixel sits at `origin` in the parent image
    pub const fn new(pixels: ArrayViewMut3<'a, u8>, origin: [usize; 2]) -> Self {
        Self { pixels, origin }
    }

    /// Dimensions as (height, width)
    pub fn shape(&self) -> (usize, usize) {
        let (height, width, _) = self.pixels.dim();
        (height, width)
    }

    /// Top-left corner in parent image coordinates
    pub const fn origin(&self) -> [usize; 2] {
        self.origin
    }

    /// Geometric center in parent image coordinates
    pub fn center(&self) -> [f64; 2] {
        let (height, width) = self.shape();
        [
            self.origin[0] as f64 + (height as f64 - 1.0) / 2.0,
            self.origin[1] as f64 + (width as f64 - 1.0) / 2.0,
        ]
    }

    /// Read-only view of the pixels
    pub fn pixels(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }
}

impl PixelContainer for Block<'_> {
    fn pixel_count(&self) -> usize {
        let (height, width) = self.shape();
        height * width
    }

    fn apply<F>(&mut self, transform: &F) -> Result<()>
    where
        F: Fn(ArrayView3<'_, u8>) -> Array3<u8>,
    {
        let updated = transform(self.pixels.view());
        check_shape(self.pixels.dim(), updated.dim())?;
        self.pixels.assign(&updated);
        Ok(())
    }

    fn paint(&mut self, color: Color) {
        let channels = color.to_array();
        for mut pixel in self.pixels.lanes_mut(Axis(2)) {
            pixel.assign(&aview1(&channels));
        }
    }
}

/// Arbitrarily shaped group of pixels holding its own values
///
/// Pixel `k` has value `values.row(k)` and belongs at `(rows[k], cols[k])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    values: Array2<u8>,
    rows: Vec<usize>,
    cols: Vec<usize>,
}

impl Cell {
    /// Build a cell from values (one RGB row per pixel) and their coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if values, rows and columns differ in length or values
    /// are not three-channel
    pub fn new(values: Array2<u8>, rows: Vec<usize>, cols: Vec<usize>) -> Result<Self> {
        let (count, channels) = values.dim();
        if count != rows.len() || count != cols.len() || channels != 3 {
            return Err(ImgprocError::InvalidSourceData {
                reason: format!(
                    "cell needs matching lengths and 3 channels: {count} values x {channels} channels, {} rows, {} cols",
                    rows.len(),
                    cols.len()
                ),
            });
        }
        Ok(Self { values, rows, cols })
    }

    /// Copy the pixels at the given coordinates out of an image
    ///
    /// Coordinates must lie inside the image.
    pub fn sample(image: &Image, rows: Vec<usize>, cols: Vec<usize>) -> Self {
        let values = Array2::from_shape_fn((rows.len(), 3), |(k, c)| {
            match (rows.get(k), cols.get(k)) {
                (Some(&r), Some(&col)) => image.get((r, col, c)).copied().unwrap_or(0),
                _ => 0,
            }
        });
        Self { values, rows, cols }
    }

    /// Number of pixels
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the cell holds no pixels
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row coordinates in the parent image
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Column coordinates in the parent image
    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    /// Pixel values, one RGB row per coordinate
    pub fn values(&self) -> ArrayView2<'_, u8> {
        self.values.view()
    }

    /// Smallest row coordinate (0 for an empty cell)
    pub fn min_row(&self) -> usize {
        self.rows.iter().copied().min().unwrap_or(0)
    }

    /// Smallest column coordinate (0 for an empty cell)
    pub fn min_col(&self) -> usize {
        self.cols.iter().copied().min().unwrap_or(0)
    }

    /// Shape of the bounding box view: (height, width, 3)
    pub fn view_shape(&self) -> (usize, usize, usize) {
        if self.is_empty() {
            return (0, 0, 3);
        }
        let max_row = self.rows.iter().copied().max().unwrap_or(0);
        let max_col = self.cols.iter().copied().max().unwrap_or(0);
        (max_row - self.min_row() + 1, max_col - self.min_col() + 1, 3)
    }

    /// Bounding-box image of the cell; pixels outside the cell are black
    pub fn view(&self) -> Array3<u8> {
        let mut view = Array3::zeros(self.view_shape());
        let (row0, col0) = (self.min_row(), self.min_col());
        for ((&r, &c), value) in self.rows.iter().zip(&self.cols).zip(self.values.rows()) {
            view.slice_mut(s![r - row0, c - col0, ..]).assign(&value);
        }
        view
    }

    /// Write the cell's values back into an image at their coordinates
    pub fn scatter_into(&self, canvas: &mut Image) {
        for ((&r, &c), value) in self.rows.iter().zip(&self.cols).zip(self.values.rows()) {
            canvas.slice_mut(s![r, c, ..]).assign(&value);
        }
    }
}

impl PixelContainer for Cell {
    fn pixel_count(&self) -> usize {
        self.len()
    }

    fn apply<F>(&mut self, transform: &F) -> Result<()>
    where
        F: Fn(ArrayView3<'_, u8>) -> Array3<u8>,
    {
        if self.is_empty() {
            return Ok(());
        }
        let view = self.view();
        let updated = transform(view.view());
        check_shape(view.dim(), updated.dim())?;

        let (row0, col0) = (self.min_row(), self.min_col());
        for ((&r, &c), mut value) in self
            .rows
            .iter()
            .zip(&self.cols)
            .zip(self.values.rows_mut())
        {
            value.assign(&updated.slice(s![r - row0, c - col0, ..]));
        }
        Ok(())
    }

    fn paint(&mut self, color: Color) {
        let channels = color.to_array();
        for mut value in self.values.rows_mut() {
            value.assign(&aview1(&channels));
        }
    }
}

/// Copy `image` and scatter every cell's values back onto the copy
pub fn scatter_cells(image: &Image, cells: &[Cell]) -> Image {
    let mut canvas = image.clone();
    for cell in cells {
        cell.scatter_into(&mut canvas);
    }
    canvas
}
