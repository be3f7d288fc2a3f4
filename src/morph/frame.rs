//! White framing and side trimming

use crate::color::rgb::WHITE;
use crate::io::image::Image;
use ndarray::{Array3, ArrayView3, Axis, aview1, s};

/// Grow the canvas by `frame_height x frame_width` of white and center the image in it
///
/// Each side receives half of the frame dimension (rounded down); odd remainders
/// go to the bottom and right edges.
pub fn add_white_frame(pixels: ArrayView3<'_, u8>, frame_height: usize, frame_width: usize) -> Image {
    let (height, width, _) = pixels.dim();
    let (top, left) = (frame_height / 2, frame_width / 2);
    let mut framed = Array3::from_elem((height + frame_height, width + frame_width, 3), u8::MAX);
    framed
        .slice_mut(s![top..top + height, left..left + width, ..])
        .assign(&pixels);
    framed
}

/// Paint white borders of `frame_width / 2` columns on the left and right edges
pub fn width_border(pixels: ArrayView3<'_, u8>, frame_width: usize) -> Image {
    let (_, width, _) = pixels.dim();
    let side = (frame_width / 2).min(width);
    let mut framed = pixels.to_owned();
    for range in [0..side, width - side..width] {
        let mut border = framed.slice_mut(s![.., range, ..]);
        for mut pixel in border.lanes_mut(Axis(2)) {
            pixel.assign(&aview1(&WHITE.0));
        }
    }
    framed
}

/// Crop `frame_width / 2` columns from the left and right edges
pub fn width_reduce(pixels: ArrayView3<'_, u8>, frame_width: usize) -> Image {
    let (_, width, _) = pixels.dim();
    let side = (frame_width / 2).min(width / 2);
    pixels.slice(s![.., side..width - side, ..]).to_owned()
}
