//! Fixed-size rectangular grid of equal cells

use crate::color::Color;
use crate::io::error::{Result, invalid_parameter, out_of_range};
use crate::io::image::{Image, check_image};
use crate::partition::container::{Block, PixelContainer};
use crate::partition::divider::Divider;
use ndarray::{Array3, ArrayView3, s};

/// Splits an image into a regular grid of `cell_height x cell_width` blocks
///
/// The image dimensions must be multiples of the cell dimensions. Cells are
/// views: changes land in the owned image directly.
#[derive(Debug, Clone)]
pub struct RegularGridDivider {
    image: Image,
    cell_size: (usize, usize),
    grid_size: (usize, usize),
}

impl RegularGridDivider {
    /// Partition `image` into cells of `(cell_height, cell_width)`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The image is not three-channel
    /// - A cell dimension is zero
    /// - The image height or width is not divisible by the cell dimension
    pub fn new(image: Image, cell_size: (usize, usize)) -> Result<Self> {
        let (height, width) = check_image(&image)?;
        let (cell_height, cell_width) = cell_size;

        if cell_height == 0 || cell_width == 0 {
            return Err(invalid_parameter(
                "cell_size",
                &format!("{cell_height}x{cell_width}"),
                &"cell dimensions must be positive",
            ));
        }
        if height % cell_height != 0 {
            return Err(invalid_parameter(
                "cell_size",
                &format!("{cell_height}x{cell_width}"),
                &format!("image height {height} is not divisible by cell height"),
            ));
        }
        if width % cell_width != 0 {
            return Err(invalid_parameter(
                "cell_size",
                &format!("{cell_height}x{cell_width}"),
                &format!("image width {width} is not divisible by cell width"),
            ));
        }

        Ok(Self {
            image,
            cell_size,
            grid_size: (height / cell_height, width / cell_width),
        })
    }

    /// Number of cell rows
    pub const fn n_rows(&self) -> usize {
        self.grid_size.0
    }

    /// Number of cell columns
    pub const fn n_cols(&self) -> usize {
        self.grid_size.1
    }

    /// Total number of cells
    pub const fn n_cells(&self) -> usize {
        self.grid_size.0 * self.grid_size.1
    }

    /// Cell dimensions as (height, width)
    pub const fn cell_size(&self) -> (usize, usize) {
        self.cell_size
    }

    fn check_index(&self, (row, col): (usize, usize)) -> Result<()> {
        if row >= self.n_rows() {
            return Err(out_of_range("row", row, self.n_rows()));
        }
        if col >= self.n_cols() {
            return Err(out_of_range("column", col, self.n_cols()));
        }
        Ok(())
    }

    /// Read-only view of a cell
    ///
    /// # Errors
    ///
    /// Returns an error if the row or column is outside the grid
    pub fn cell(&self, index: (usize, usize)) -> Result<ArrayView3<'_, u8>> {
        self.check_index(index)?;
        let (ch, cw) = self.cell_size;
        let (row, col) = index;
        Ok(self
            .image
            .slice(s![row * ch..(row + 1) * ch, col * cw..(col + 1) * cw, ..]))
    }

    /// Mutable block over a cell
    ///
    /// # Errors
    ///
    /// Returns an error if the row or column is outside the grid
    pub fn cell_mut(&mut self, index: (usize, usize)) -> Result<Block<'_>> {
        self.check_index(index)?;
        let (ch, cw) = self.cell_size;
        let (row, col) = index;
        let view = self
            .image
            .slice_mut(s![row * ch..(row + 1) * ch, col * cw..(col + 1) * cw, ..]);
        Ok(Block::new(view, [row * ch, col * cw]))
    }

    /// Iterate over `(index, view)` pairs in row-major order
    pub fn blocks(&self) -> impl Iterator<Item = ((usize, usize), ArrayView3<'_, u8>)> {
        let (ch, cw) = self.cell_size;
        self.indices().into_iter().map(move |(row, col)| {
            let view = self
                .image
                .slice(s![row * ch..(row + 1) * ch, col * cw..(col + 1) * cw, ..]);
            ((row, col), view)
        })
    }
}

impl Divider for RegularGridDivider {
    type Index = (usize, usize);

    fn len(&self) -> usize {
        self.n_cells()
    }

    fn indices(&self) -> Vec<(usize, usize)> {
        let cols = self.n_cols();
        (0..self.n_cells()).map(|k| (k / cols, k % cols)).collect()
    }

    fn apply_at<F>(&mut self, index: (usize, usize), transform: &F) -> Result<()>
    where
        F: Fn(ArrayView3<'_, u8>) -> Array3<u8>,
    {
        self.cell_mut(index)?.apply(transform)
    }

    fn paint_at(&mut self, index: (usize, usize), color: Color) -> Result<()> {
        self.cell_mut(index)?.paint(color);
        Ok(())
    }

    fn stitch(self) -> Image {
        let (ch, cw) = self.cell_size;
        let mut canvas = Array3::zeros((self.n_rows() * ch, self.n_cols() * cw, 3));
        for ((row, col), view) in self.blocks() {
            canvas
                .slice_mut(s![row * ch..(row + 1) * ch, col * cw..(col + 1) * cw, ..])
                .assign(&view);
        }
        canvas
    }
}

/// Crop the bottom and right edges so the image is a whole number of cells
///
/// # Errors
///
/// Returns an error if the image is not three-channel or a cell dimension is zero
pub fn crop_to_multiple(image: &Image, cell_size: (usize, usize)) -> Result<Image> {
    let (height, width) = check_image(image)?;
    let (ch, cw) = cell_size;
    if ch == 0 || cw == 0 {
        return Err(invalid_parameter(
            "cell_size",
            &format!("{ch}x{cw}"),
            &"cell dimensions must be positive",
        ));
    }
    Ok(image
        .slice(s![..height - height % ch, ..width - width % cw, ..])
        .to_owned())
}
