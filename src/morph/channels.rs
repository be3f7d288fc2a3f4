//! Per-pixel color transforms and simple geometric moves

use crate::analysis::scan::background_color;
use crate::color::{Color, rgb};
use crate::io::error::{ImgprocError, Result, invalid_parameter};
use crate::morph::adjust::clamp_channel;
use ndarray::{Array3, ArrayView2, ArrayView3, Axis, aview1, s};
use std::cmp::Ordering;
use std::str::FromStr;

/// Luma grayscale (ITU-R 601 weights) replicated over the three channels
pub fn grayscale(pixels: ArrayView3<'_, u8>) -> Array3<u8> {
    let mut out = pixels.to_owned();
    for mut pixel in out.lanes_mut(Axis(2)) {
        let luma = 0.114f64.mul_add(
            f64::from(pixel[2]),
            0.299f64.mul_add(f64::from(pixel[0]), 0.587 * f64::from(pixel[1])),
        );
        pixel.fill(clamp_channel(luma));
    }
    out
}

/// Invert every channel
pub fn negative(pixels: ArrayView3<'_, u8>) -> Array3<u8> {
    pixels.mapv(|v| u8::MAX - v)
}

/// Replace every pixel by its complementary color
pub fn complement(pixels: ArrayView3<'_, u8>) -> Array3<u8> {
    let mut out = pixels.to_owned();
    for mut pixel in out.lanes_mut(Axis(2)) {
        let color = Color::new(pixel[0], pixel[1], pixel[2]).complementary();
        pixel.assign(&aview1(&color.to_array()));
    }
    out
}

/// One of the three color channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// First channel
    Red,
    /// Second channel
    Green,
    /// Third channel
    Blue,
}

impl Channel {
    /// Position in the channel axis
    pub const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

impl FromStr for Channel {
    type Err = ImgprocError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Self::Red),
            "g" | "green" => Ok(Self::Green),
            "b" | "blue" => Ok(Self::Blue),
            _ => Err(invalid_parameter(
                "channel",
                &s,
                &"must be one of `r`, `g` or `b`",
            )),
        }
    }
}

/// Keep a single channel and zero the other two
pub fn isolate_channel(channel: Channel) -> impl Fn(ArrayView3<'_, u8>) -> Array3<u8> {
    move |pixels| {
        let mut out = Array3::zeros(pixels.dim());
        let keep = channel.index();
        out.index_axis_mut(Axis(2), keep)
            .assign(&pixels.index_axis(Axis(2), keep));
        out
    }
}

/// Mirror direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    /// Upside down (reverse rows)
    UpDown,
    /// Left to right (reverse columns)
    LeftRight,
}

impl FromStr for FlipAxis {
    type Err = ImgprocError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ud" => Ok(Self::UpDown),
            "rl" | "lr" => Ok(Self::LeftRight),
            _ => Err(invalid_parameter(
                "side",
                &s,
                &"takes either 'ud' or 'rl' as a value",
            )),
        }
    }
}

/// Mirror the pixels along one axis
pub fn flip(axis: FlipAxis) -> impl Fn(ArrayView3<'_, u8>) -> Array3<u8> {
    move |pixels| match axis {
        FlipAxis::UpDown => pixels.slice(s![..;-1, .., ..]).to_owned(),
        FlipAxis::LeftRight => pixels.slice(s![.., ..;-1, ..]).to_owned(),
    }
}

/// Replace every exact occurrence of `from` by `to`
pub fn map_color(from: Color, to: Color) -> impl Fn(ArrayView3<'_, u8>) -> Array3<u8> {
    move |pixels| {
        let mut out = pixels.to_owned();
        for mut pixel in out.lanes_mut(Axis(2)) {
            if pixel.iter().eq(from.0.iter()) {
                pixel.assign(&aview1(&to.0));
            }
        }
        out
    }
}

/// Color of the area uncovered by a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Black pixels
    Black,
    /// White pixels
    White,
    /// A fixed color
    Color(Color),
    /// The most frequent color of the source
    Background,
}

/// Shift the pixels by `(rows, cols)`, filling the uncovered area
///
/// Positive offsets move content down and right.
pub fn translate(rows: isize, cols: isize, fill: Fill) -> impl Fn(ArrayView3<'_, u8>) -> Array3<u8> {
    move |pixels| {
        let (height, width, _) = pixels.dim();
        let color = match fill {
            Fill::Black => rgb::BLACK,
            Fill::White => rgb::WHITE,
            Fill::Color(color) => color,
            Fill::Background => background_color(pixels.view()),
        };

        let mut out = Array3::zeros(pixels.dim());
        for mut pixel in out.lanes_mut(Axis(2)) {
            pixel.assign(&aview1(&color.0));
        }

        let (src_rows, dst_rows) = shifted_span(height, rows);
        let (src_cols, dst_cols) = shifted_span(width, cols);
        if !src_rows.is_empty() && !src_cols.is_empty() {
            out.slice_mut(s![dst_rows, dst_cols, ..])
                .assign(&pixels.slice(s![src_rows, src_cols, ..]));
        }
        out
    }
}

// Source and destination ranges of a shift by `offset` along an axis of `len`
fn shifted_span(len: usize, offset: isize) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
    let shift = offset.unsigned_abs().min(len);
    if offset >= 0 {
        (0..len - shift, shift..len)
    } else {
        (shift..len, 0..len - shift)
    }
}

/// Direction of a pixel sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest key first
    #[default]
    Increasing,
    /// Largest key first
    Decreasing,
}

impl FromStr for SortOrder {
    type Err = ImgprocError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "increasing" => Ok(Self::Increasing),
            "decreasing" | "reverse" => Ok(Self::Decreasing),
            _ => Err(invalid_parameter(
                "order",
                &s,
                &"must be 'increasing' or 'decreasing'",
            )),
        }
    }
}

fn pixel_colors(pixels: ArrayView3<'_, u8>) -> Vec<Color> {
    pixels
        .lanes(Axis(2))
        .into_iter()
        .map(|p| Color::new(p[0], p[1], p[2]))
        .collect()
}

// Lay the colors out in row-major order of their sorted keys
fn arrange(dim: (usize, usize, usize), colors: &[Color], keys: &[f64], order: SortOrder) -> Array3<u8> {
    let mut indices: Vec<usize> = (0..colors.len()).collect();
    indices.sort_by(|&a, &b| {
        keys.get(a)
            .zip(keys.get(b))
            .map_or(Ordering::Equal, |(x, y)| x.total_cmp(y))
    });
    if order == SortOrder::Decreasing {
        indices.reverse();
    }

    let mut out = Array3::zeros(dim);
    for (mut pixel, color) in out
        .lanes_mut(Axis(2))
        .into_iter()
        .zip(indices.iter().filter_map(|&i| colors.get(i)))
    {
        pixel.assign(&aview1(&color.0));
    }
    out
}

/// Rearrange the pixels in row-major order of a per-pixel key
///
/// The increasing sort is stable; the decreasing sort is its exact reverse.
pub fn sort_pixels<K>(key: K, order: SortOrder) -> impl Fn(ArrayView3<'_, u8>) -> Array3<u8>
where
    K: Fn(Color) -> f64,
{
    move |pixels| {
        let colors = pixel_colors(pixels.view());
        let keys: Vec<f64> = colors.iter().map(|&c| key(c)).collect();
        arrange(pixels.dim(), &colors, &keys, order)
    }
}

/// Rearrange the pixels by precomputed keys, one per pixel
///
/// # Errors
///
/// Returns an error if `keys` is not shaped like the pixel grid
pub fn sort_pixels_by(
    pixels: ArrayView3<'_, u8>,
    keys: ArrayView2<'_, f64>,
    order: SortOrder,
) -> Result<Array3<u8>> {
    let (height, width, _) = pixels.dim();
    if keys.dim() != (height, width) {
        return Err(invalid_parameter(
            "keys",
            &format!("{:?}", keys.dim()),
            &format!("expected one key per pixel ({height}, {width})"),
        ));
    }
    let keys: Vec<f64> = keys.iter().copied().collect();
    Ok(arrange(pixels.dim(), &pixel_colors(pixels), &keys, order))
}
