//! Cells defined by explicit row/column coordinate groups

use crate::color::Color;
use crate::io::error::{ImgprocError, Result, invalid_parameter, out_of_range};
use crate::io::image::{Image, check_image};
use crate::partition::container::{Cell, PixelContainer, scatter_cells};
use crate::partition::divider::Divider;
use bitvec::prelude::{BitVec, bitvec};
use ndarray::{Array3, ArrayView3};

/// Splits an image into cells given as coordinate groups
///
/// The groups must cover every pixel exactly once.
#[derive(Debug, Clone)]
pub struct ArbitraryDivider {
    image: Image,
    cells: Vec<Cell>,
}

impl ArbitraryDivider {
    /// Partition `image` into one cell per `(cell_rows[i], cell_cols[i])` group
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The image is not three-channel
    /// - The row and column group lists (or a pair of groups) differ in length
    /// - A coordinate lies outside the image
    /// - Some pixel is assigned more than once (`OverlappingPixels`)
    /// - Some pixel is not assigned (`MissingPixels`)
    pub fn new(image: Image, cell_rows: Vec<Vec<usize>>, cell_cols: Vec<Vec<usize>>) -> Result<Self> {
        let (height, width) = check_image(&image)?;

        if cell_rows.len() != cell_cols.len() {
            return Err(invalid_parameter(
                "cell_cols",
                &cell_cols.len(),
                &format!("expected one column group per row group ({})", cell_rows.len()),
            ));
        }
        for (i, (rows, cols)) in cell_rows.iter().zip(&cell_cols).enumerate() {
            if rows.len() != cols.len() {
                return Err(invalid_parameter(
                    "cell_cols",
                    &cols.len(),
                    &format!("group {i} has {} rows", rows.len()),
                ));
            }
        }

        let coverage = Coverage::measure(height, width, &cell_rows, &cell_cols)?;
        if coverage.duplicates > 0 {
            return Err(ImgprocError::OverlappingPixels {
                count: coverage.duplicates,
            });
        }
        let missing = height * width - coverage.covered;
        if missing > 0 {
            return Err(ImgprocError::MissingPixels { count: missing });
        }

        let cells = cell_rows
            .into_iter()
            .zip(cell_cols)
            .map(|(rows, cols)| Cell::sample(&image, rows, cols))
            .collect();
        Ok(Self { image, cells })
    }

    /// Number of cells
    pub const fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// Cells in order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One cell
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a cell index
    pub fn cell(&self, index: usize) -> Result<&Cell> {
        self.cells
            .get(index)
            .ok_or_else(|| out_of_range("cell", index, self.n_cells()))
    }

    fn cell_mut(&mut self, index: usize) -> Result<&mut Cell> {
        let len = self.cells.len();
        self.cells
            .get_mut(index)
            .ok_or_else(|| out_of_range("cell", index, len))
    }
}

struct Coverage {
    covered: usize,
    duplicates: usize,
}

impl Coverage {
    fn measure(
        height: usize,
        width: usize,
        cell_rows: &[Vec<usize>],
        cell_cols: &[Vec<usize>],
    ) -> Result<Self> {
        let mut seen: BitVec = bitvec![0; height * width];
        let mut coverage = Self {
            covered: 0,
            duplicates: 0,
        };

        for (rows, cols) in cell_rows.iter().zip(cell_cols) {
            for (&r, &c) in rows.iter().zip(cols) {
                if r >= height {
                    return Err(out_of_range("row", r, height));
                }
                if c >= width {
                    return Err(out_of_range("column", c, width));
                }
                let flat = r * width + c;
                if seen.get(flat).is_some_and(|bit| *bit) {
                    coverage.duplicates += 1;
                } else {
                    seen.set(flat, true);
                    coverage.covered += 1;
                }
            }
        }
        Ok(coverage)
    }
}

impl Divider for ArbitraryDivider {
    type Index = usize;

    fn len(&self) -> usize {
        self.cells.len()
    }

    fn indices(&self) -> Vec<usize> {
        (0..self.cells.len()).collect()
    }

    fn apply_at<F>(&mut self, index: usize, transform: &F) -> Result<()>
    where
        F: Fn(ArrayView3<'_, u8>) -> Array3<u8>,
    {
        self.cell_mut(index)?.apply(transform)
    }

    fn paint_at(&mut self, index: usize, color: Color) -> Result<()> {
        self.cell_mut(index)?.paint(color);
        Ok(())
    }

    fn stitch(self) -> Image {
        scatter_cells(&self.image, &self.cells)
    }
}
