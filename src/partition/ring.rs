//! Concentric rings around a center point

use crate::color::Color;
use crate::io::error::{Result, invalid_parameter, out_of_range};
use crate::io::image::{Image, check_image};
use crate::partition::container::{Cell, PixelContainer, scatter_cells};
use crate::partition::divider::Divider;
use ndarray::{Array2, Array3, ArrayView3};

/// Splits an image into rings of increasing distance from a center
///
/// Ring `i` holds the pixels whose distance lies in `[radii[i - 1], radii[i])`;
/// ring 0 starts at the center and the last ring takes everything from the last
/// radius out to the farthest corner. Rings are sparse cells.
#[derive(Debug, Clone)]
pub struct CircularDivider {
    image: Image,
    radii: Vec<f64>,
    center: [f64; 2],
    distances: Array2<f64>,
    cells: Vec<Cell>,
}

impl CircularDivider {
    /// Partition `image` at `radii` around `center` (defaults to the image center)
    ///
    /// Radii may come in any order and contain duplicates.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is not three-channel or a radius is negative or not finite
    pub fn new(image: Image, radii: &[f64], center: Option<[f64; 2]>) -> Result<Self> {
        let (height, width) = check_image(&image)?;

        if let Some(&bad) = radii.iter().find(|r| !r.is_finite() || **r < 0.0) {
            return Err(invalid_parameter(
                "radii",
                &bad,
                &"radii must be finite and non-negative",
            ));
        }
        let mut radii = radii.to_vec();
        radii.sort_by(f64::total_cmp);
        radii.dedup();

        let center = center.unwrap_or([(height / 2) as f64, (width / 2) as f64]);
        let distances = Array2::from_shape_fn((height, width), |(i, j)| {
            (i as f64 - center[0]).hypot(j as f64 - center[1])
        });

        let mut divider = Self {
            image,
            radii,
            center,
            distances,
            cells: Vec::new(),
        };
        divider.cells = (0..divider.n_rings())
            .map(|ring| divider.collect_ring(ring))
            .collect();
        Ok(divider)
    }

    /// Number of rings (radii + 1)
    pub const fn n_rings(&self) -> usize {
        self.radii.len() + 1
    }

    /// Sanitized radii
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Center in (row, col) coordinates
    pub const fn center(&self) -> [f64; 2] {
        self.center
    }

    /// Distance from every pixel to the center
    pub const fn distances(&self) -> &Array2<f64> {
        &self.distances
    }

    /// Largest distance from the center to any image corner
    pub fn max_radius(&self) -> f64 {
        self.distances.iter().copied().fold(0.0, f64::max)
    }

    /// Distance interval `[low, high)` covered by a ring
    ///
    /// The last ring is unbounded above.
    pub fn bounds(&self, ring: usize) -> (f64, f64) {
        let low = ring
            .checked_sub(1)
            .and_then(|i| self.radii.get(i))
            .copied()
            .unwrap_or(0.0);
        let high = self.radii.get(ring).copied().unwrap_or(f64::INFINITY);
        (low, high)
    }

    fn collect_ring(&self, ring: usize) -> Cell {
        let (low, high) = self.bounds(ring);
        let (rows, cols): (Vec<usize>, Vec<usize>) = self
            .distances
            .indexed_iter()
            .filter(|&(_, &d)| d >= low && d < high)
            .map(|(pos, _)| pos)
            .unzip();
        Cell::sample(&self.image, rows, cols)
    }

    /// Ring cells in order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One ring
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a ring index
    pub fn cell(&self, index: usize) -> Result<&Cell> {
        self.cells
            .get(index)
            .ok_or_else(|| out_of_range("ring", index, self.n_rings()))
    }

    fn cell_mut(&mut self, index: usize) -> Result<&mut Cell> {
        let len = self.cells.len();
        self.cells
            .get_mut(index)
            .ok_or_else(|| out_of_range("ring", index, len))
    }
}

impl Divider for CircularDivider {
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
