//! Common divider surface: indexed apply/paint, random selection and stitching

use crate::color::Color;
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::Image;
use ndarray::{Array3, ArrayView3};
use rand::Rng;
use std::fmt::Debug;

/// How many containers a random sample should cover
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleSize {
    /// Absolute number of containers
    Count(usize),
    /// Share of all containers, in (0, 1]
    Fraction(f64),
}

impl SampleSize {
    /// Resolve to an absolute count out of `total` containers
    ///
    /// Fractions are floored: 50% of 5 containers is 2.
    ///
    /// # Errors
    ///
    /// Returns an error if a fraction is outside (0, 1] or a count exceeds `total`
    pub fn resolve(self, total: usize) -> Result<usize> {
        match self {
            Self::Count(count) if count <= total => Ok(count),
            Self::Count(count) => Err(invalid_parameter(
                "num_samples",
                &count,
                &format!("cannot sample more than {total} containers"),
            )),
            Self::Fraction(fraction) if fraction > 0.0 && fraction <= 1.0 => {
                Ok((fraction * total as f64).floor() as usize)
            }
            Self::Fraction(fraction) => Err(invalid_parameter(
                "num_samples",
                &fraction,
                &"expecting an integer or a (0, 1]-float",
            )),
        }
    }
}

/// Which containers an operation touches
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<I> {
    /// Every container, in index order
    All,
    /// One container chosen uniformly at random
    Random,
    /// A random sample drawn without replacement
    Sample(SampleSize),
    /// An explicit list of indices
    Selected(Vec<I>),
}

/// Partition of an image into containers that can be modified and stitched back
///
/// Implementors provide indexed access; the selection helpers are built on top.
/// Index lists are rebuilt on every call, so traversals never share hidden state.
pub trait Divider {
    /// Container index type (`usize` or `(row, col)`)
    type Index: Copy + Debug;

    /// Number of containers
    fn len(&self) -> usize;

    /// Whether the partition holds no containers
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every container index, in traversal order
    fn indices(&self) -> Vec<Self::Index>;

    /// Apply a transform to one container
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range or the transform changes the pixel shape
    fn apply_at<F>(&mut self, index: Self::Index, transform: &F) -> Result<()>
    where
        F: Fn(ArrayView3<'_, u8>) -> Array3<u8>;

    /// Paint one container with a single color
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range
    fn paint_at(&mut self, index: Self::Index, color: Color) -> Result<()>;

    /// Reassemble the containers into a full image
    fn stitch(self) -> Image
    where
        Self: Sized;

    /// Pick one container index uniformly at random
    fn random_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Self::Index> {
        let indices = self.indices();
        if indices.is_empty() {
            return None;
        }
        indices.get(rng.random_range(0..indices.len())).copied()
    }

    /// Draw distinct container indices without replacement
    ///
    /// # Errors
    ///
    /// Returns an error if the sample size is invalid for this partition
    fn random_indices<R: Rng + ?Sized>(
        &self,
        size: SampleSize,
        rng: &mut R,
    ) -> Result<Vec<Self::Index>> {
        let indices = self.indices();
        let amount = size.resolve(indices.len())?;
        Ok(rand::seq::index::sample(rng, indices.len(), amount)
            .into_iter()
            .filter_map(|i| indices.get(i).copied())
            .collect())
    }

    /// Resolve a selection into concrete indices
    ///
    /// # Errors
    ///
    /// Returns an error if a random sample size is invalid
    fn select<R: Rng + ?Sized>(
        &self,
        selection: &Selection<Self::Index>,
        rng: &mut R,
    ) -> Result<Vec<Self::Index>> {
        match selection {
            Selection::All => Ok(self.indices()),
            Selection::Random => Ok(self.random_index(rng).into_iter().collect()),
            Selection::Sample(size) => self.random_indices(*size, rng),
            Selection::Selected(indices) => Ok(indices.clone()),
        }
    }

    /// Apply a transform to every selected container
    ///
    /// # Errors
    ///
    /// Returns an error if the selection is invalid or a transform fails
    fn apply_selection<F, R>(
        &mut self,
        selection: &Selection<Self::Index>,
        transform: &F,
        rng: &mut R,
    ) -> Result<()>
    where
        F: Fn(ArrayView3<'_, u8>) -> Array3<u8>,
        R: Rng + ?Sized,
    {
        for index in self.select(selection, rng)? {
            self.apply_at(index, transform)?;
        }
        Ok(())
    }

    /// Paint every selected container, drawing one color per container
    ///
    /// # Errors
    ///
    /// Returns an error if the selection is invalid or an index is out of range
    fn paint_selection<C, R>(
        &mut self,
        selection: &Selection<Self::Index>,
        mut color: C,
        rng: &mut R,
    ) -> Result<()>
    where
        C: FnMut() -> Color,
        R: Rng + ?Sized,
    {
        for index in self.select(selection, rng)? {
            self.paint_at(index, color())?;
        }
        Ok(())
    }

    /// Apply a transform to all containers
    ///
    /// # Errors
    ///
    /// Returns an error if a transform changes the pixel shape
    fn apply_to_all<F>(&mut self, transform: &F) -> Result<()>
    where
        F: Fn(ArrayView3<'_, u8>) -> Array3<u8>,
    {
        for index in self.indices() {
            self.apply_at(index, transform)?;
        }
        Ok(())
    }

    /// Apply a transform to one random container
    ///
    /// # Errors
    ///
    /// Returns an error if the transform changes the pixel shape
    fn apply_to_random<F, R>(&mut self, transform: &F, rng: &mut R) -> Result<()>
    where
        F: Fn(ArrayView3<'_, u8>) -> Array3<u8>,
        R: Rng + ?Sized,
    {
        self.apply_selection(&Selection::Random, transform, rng)
    }

    /// Apply a transform to a random sample of containers
    ///
    /// # Errors
    ///
    /// Returns an error if the sample size is invalid or a transform fails
    fn apply_to_random_sample<F, R>(
        &mut self,
        transform: &F,
        size: SampleSize,
        rng: &mut R,
    ) -> Result<()>
    where
        F: Fn(ArrayView3<'_, u8>) -> Array3<u8>,
        R: Rng + ?Sized,
    {
        self.apply_selection(&Selection::Sample(size), transform, rng)
    }

    /// Apply a transform to the listed containers
    ///
    /// # Errors
    ///
    /// Returns an error if an index is out of range or a transform fails
    fn apply_to_selected<F>(&mut self, indices: &[Self::Index], transform: &F) -> Result<()>
    where
        F: Fn(ArrayView3<'_, u8>) -> Array3<u8>,
    {
        for &index in indices {
            self.apply_at(index, transform)?;
        }
        Ok(())
    }

    /// Paint all containers, drawing one color per container
    ///
    /// # Errors
    ///
    /// Propagates index errors from the implementor
    fn paint_all<C>(&mut self, mut color: C) -> Result<()>
    where
        C: FnMut() -> Color,
    {
        for index in self.indices() {
            self.paint_at(index, color())?;
        }
        Ok(())
    }

    /// Paint one random container
    ///
    /// # Errors
    ///
    /// Propagates index errors from the implementor
    fn paint_random<C, R>(&mut self, color: C, rng: &mut R) -> Result<()>
    where
        C: FnMut() -> Color,
        R: Rng + ?Sized,
    {
        self.paint_selection(&Selection::Random, color, rng)
    }

    /// Paint a random sample of containers
    ///
    /// # Errors
    ///
    /// Returns an error if the sample size is invalid
    fn paint_random_sample<C, R>(&mut self, color: C, size: SampleSize, rng: &mut R) -> Result<()>
    where
        C: FnMut() -> Color,
        R: Rng + ?Sized,
    {
        self.paint_selection(&Selection::Sample(size), color, rng)
    }

    /// Paint the listed containers
    ///
    /// # Errors
    ///
    /// Returns an error if an index is out of range
    fn paint_selected<C>(&mut self, indices: &[Self::Index], mut color: C) -> Result<()>
    where
        C: FnMut() -> Color,
    {
        for &index in indices {
            self.paint_at(index, color())?;
        }
        Ok(())
    }
}
