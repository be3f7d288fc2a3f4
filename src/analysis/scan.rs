//! Whole-image color statistics

use crate::color::Color;
use ndarray::{ArrayView3, Axis};
use std::collections::HashMap;

fn color_counts(pixels: ArrayView3<'_, u8>) -> HashMap<Color, usize> {
    let mut counts = HashMap::new();
    for pixel in pixels.lanes(Axis(2)) {
        let color = Color::new(pixel[0], pixel[1], pixel[2]);
        *counts.entry(color).or_insert(0) += 1;
    }
    counts
}

/// Most frequent color; ties go to the smallest packed value
///
/// An empty image yields black.
pub fn background_color(pixels: ArrayView3<'_, u8>) -> Color {
    color_counts(pixels)
        .into_iter()
        .max_by(|(ca, na), (cb, nb)| na.cmp(nb).then(cb.packed().cmp(&ca.packed())))
        .map(|(color, _)| color)
        .unwrap_or_default()
}

/// Share of the image covered by each distinct color, in ascending packed-color order
pub fn color_ratios(pixels: ArrayView3<'_, u8>) -> Vec<f64> {
    let total = pixels.len_of(Axis(0)) * pixels.len_of(Axis(1));
    let mut counts: Vec<(Color, usize)> = color_counts(pixels).into_iter().collect();
    counts.sort_by_key(|(color, _)| color.packed());
    counts
        .into_iter()
        .map(|(_, n)| n as f64 / total as f64)
        .collect()
}

/// Shannon entropy (natural logarithm) of the color distribution
pub fn entropy(pixels: ArrayView3<'_, u8>) -> f64 {
    -color_ratios(pixels)
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| p * p.ln())
        .sum::<f64>()
}

/// Number of distinct colors
pub fn num_colors(pixels: ArrayView3<'_, u8>) -> usize {
    color_counts(pixels).len()
}

/// Mean perceived luminance over all pixels (0 for an empty image)
pub fn mean_luminance(pixels: ArrayView3<'_, u8>) -> f64 {
    let count = pixels.len_of(Axis(0)) * pixels.len_of(Axis(1));
    if count == 0 {
        return 0.0;
    }
    pixels
        .lanes(Axis(2))
        .into_iter()
        .map(|p| Color::new(p[0], p[1], p[2]).luminance())
        .sum::<f64>()
        / count as f64
}

/// Euclidean (Frobenius) norm of the difference between the image and a flat color
pub fn distance_to_color(pixels: ArrayView3<'_, u8>, color: Color) -> f64 {
    pixels
        .lanes(Axis(2))
        .into_iter()
        .map(|p| {
            p.iter()
                .zip(color.0)
                .map(|(&v, c)| (f64::from(v) - f64::from(c)).powi(2))
                .sum::<f64>()
        })
        .sum::<f64>()
        .sqrt()
}

/// Distance between the image and its background color
pub fn distance_to_mode(pixels: ArrayView3<'_, u8>) -> f64 {
    distance_to_color(pixels.view(), background_color(pixels))
}
