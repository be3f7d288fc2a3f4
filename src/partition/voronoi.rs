//! Voronoi-like cells keyed by each pixel's nearest seeds

use crate::color::Color;
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{Image, check_image};
use crate::partition::arbitrary::ArbitraryDivider;
use crate::partition::container::Cell;
use crate::partition::divider::Divider;
use ndarray::{Array3, ArrayView3};
use std::collections::HashMap;

/// Indices of the `k` seeds nearest to `point`, nearest first
///
/// Distances are Euclidean; equally distant seeds come in index order.
pub fn nearest_seeds(point: [f64; 2], seeds: &[[f64; 2]], k: usize) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<(f64, usize)> = seeds
        .iter()
        .enumerate()
        .map(|(i, seed)| {
            let dr = seed[0] - point[0];
            let dc = seed[1] - point[1];
            (dr.mul_add(dr, dc * dc), i)
        })
        .collect();
    let closer = |a: &(f64, usize), b: &(f64, usize)| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1));
    if k < ranked.len() {
        ranked.select_nth_unstable_by(k - 1, closer);
        ranked.truncate(k);
    }
    ranked.sort_unstable_by(closer);
    ranked.into_iter().map(|(_, i)| i).collect()
}

/// Partition where pixels sharing the same `k` nearest seeds form a cell
///
/// With `k == 1` this is the Voronoi diagram of the seeds. In ordered mode the
/// seed key is sorted, so pixels with the same nearest set share a cell whatever
/// the ranking among those seeds; otherwise the ranking is part of the key.
/// Cells are numbered by first appearance in row-major order.
#[derive(Debug, Clone)]
pub struct VoronoiDivider {
    inner: ArbitraryDivider,
    keys: Vec<Vec<usize>>,
}

impl VoronoiDivider {
    /// Partition `image` around `seeds` given as (row, col) coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The image is not three-channel
    /// - There are no seeds or a seed coordinate is not finite
    /// - `k` is zero or larger than the number of seeds
    pub fn new(image: Image, seeds: &[[f64; 2]], k: usize, ordered: bool) -> Result<Self> {
        let (height, width) = check_image(&image)?;

        if seeds.is_empty() {
            return Err(invalid_parameter("seeds", &0, &"at least one seed is required"));
        }
        if let Some(seed) = seeds.iter().find(|s| !s[0].is_finite() || !s[1].is_finite()) {
            return Err(invalid_parameter(
                "seeds",
                &format!("{seed:?}"),
                &"seed coordinates must be finite",
            ));
        }
        if k == 0 || k > seeds.len() {
            return Err(invalid_parameter(
                "k",
                &k,
                &format!("must be between 1 and the number of seeds ({})", seeds.len()),
            ));
        }

        let mut slots: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut keys: Vec<Vec<usize>> = Vec::new();
        let mut cell_rows: Vec<Vec<usize>> = Vec::new();
        let mut cell_cols: Vec<Vec<usize>> = Vec::new();

        for row in 0..height {
            for col in 0..width {
                let mut key = nearest_seeds([row as f64, col as f64], seeds, k);
                if ordered {
                    key.sort_unstable();
                }
                let known = slots.get(&key).copied();
                let slot = known.unwrap_or_else(|| {
                    let slot = keys.len();
                    slots.insert(key.clone(), slot);
                    keys.push(key);
                    cell_rows.push(Vec::new());
                    cell_cols.push(Vec::new());
                    slot
                });
                if let (Some(rows), Some(cols)) = (cell_rows.get_mut(slot), cell_cols.get_mut(slot))
                {
                    rows.push(row);
                    cols.push(col);
                }
            }
        }

        Ok(Self {
            inner: ArbitraryDivider::new(image, cell_rows, cell_cols)?,
            keys,
        })
    }

    /// Seed indices identifying each cell
    pub fn keys(&self) -> &[Vec<usize>] {
        &self.keys
    }

    /// Cells in order
    pub fn cells(&self) -> &[Cell] {
        self.inner.cells()
    }

    /// One cell
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a cell index
    pub fn cell(&self, index: usize) -> Result<&Cell> {
        self.inner.cell(index)
    }
}

impl Divider for VoronoiDivider {
    type Index = usize;

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn indices(&self) -> Vec<usize> {
        self.inner.indices()
    }

    fn apply_at<F>(&mut self, index: usize, transform: &F) -> Result<()>
    where
        F: Fn(ArrayView3<'_, u8>) -> Array3<u8>,
    {
        self.inner.apply_at(index, transform)
    }

    fn paint_at(&mut self, index: usize, color: Color) -> Result<()> {
        self.inner.paint_at(index, color)
    }

    fn stitch(self) -> Image {
        self.inner.stitch()
    }
}
