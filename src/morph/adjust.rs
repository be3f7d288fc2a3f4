//! Enhancement filters: brightness, contrast, vividness, autocontrast, blur and pixelate
//!
//! Enhancements blend the image with a degenerate version of itself:
//! `out = degenerate + factor * (image - degenerate)`. A factor of 1.0 leaves
//! the image untouched, 0.0 yields the degenerate image and larger factors
//! push away from it.

use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{from_rgb_image, to_rgb_image};
use crate::morph::channels::grayscale;
use image::imageops::{self, FilterType};
use log::warn;
use ndarray::{Array3, ArrayView3, Axis, Zip};
use num_traits::ToPrimitive;

/// Saturation boost applied before pixelating
pub const PIXELATE_SATURATION: f64 = 1.25;
/// Contrast boost applied before pixelating
pub const PIXELATE_CONTRAST: f64 = 1.2;

/// Round and saturate a floating point channel value into [0, 255]
pub fn clamp_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0).to_u8().unwrap_or(0)
}

fn blend(degenerate: &Array3<u8>, pixels: ArrayView3<'_, u8>, factor: f64) -> Array3<u8> {
    let mut out = Array3::zeros(pixels.dim());
    Zip::from(&mut out)
        .and(degenerate)
        .and(&pixels)
        .for_each(|o, &d, &p| {
            let d = f64::from(d);
            *o = clamp_channel(factor.mul_add(f64::from(p) - d, d));
        });
    out
}

/// Scale brightness; the degenerate image is black
pub fn brightness(factor: f64) -> impl Fn(ArrayView3<'_, u8>) -> Array3<u8> {
    move |pixels| {
        let black = Array3::zeros(pixels.dim());
        blend(&black, pixels, factor)
    }
}

/// Scale contrast; the degenerate image is the mean gray level
pub fn contrast(factor: f64) -> impl Fn(ArrayView3<'_, u8>) -> Array3<u8> {
    move |pixels| {
        let gray = grayscale(pixels.view());
        let mean = gray.iter().map(|&v| f64::from(v)).sum::<f64>() / gray.len().max(1) as f64;
        let flat = Array3::from_elem(pixels.dim(), clamp_channel(mean));
        blend(&flat, pixels, factor)
    }
}

/// Scale color saturation; the degenerate image is the grayscale version
pub fn vividness(factor: f64) -> impl Fn(ArrayView3<'_, u8>) -> Array3<u8> {
    move |pixels| {
        let gray = grayscale(pixels.view());
        blend(&gray, pixels, factor)
    }
}

/// Stretch each channel so its darkest value maps to 0 and its brightest to 255
///
/// Constant channels are left as they are.
pub fn autocontrast(pixels: ArrayView3<'_, u8>) -> Array3<u8> {
    let mut out = pixels.to_owned();
    for mut channel in out.axis_iter_mut(Axis(2)) {
        let lo = channel.iter().copied().min().unwrap_or(0);
        let hi = channel.iter().copied().max().unwrap_or(0);
        if hi > lo {
            let scale = 255.0 / f64::from(hi - lo);
            channel.mapv_inplace(|v| clamp_channel(f64::from(v - lo) * scale));
        }
    }
    out
}

/// Gaussian blur with the given standard deviation
///
/// Falls back to an unblurred copy, with a warning, when the pixels cannot be
/// handed to the imaging backend.
pub fn blur(radius: f32) -> impl Fn(ArrayView3<'_, u8>) -> Array3<u8> {
    move |pixels| {
        let owned = pixels.to_owned();
        if owned.is_empty() {
            return owned;
        }
        let blurred = to_rgb_image(&owned)
            .map(|rgb| imageops::blur(&rgb, radius))
            .and_then(from_rgb_image);
        match blurred {
            Ok(out) => out,
            Err(err) => {
                warn!("Blur skipped: {err}");
                owned
            }
        }
    }
}

/// Chunky low-resolution look: boost saturation and contrast, shrink by
/// `superpixel`, then scale back up with bicubic filtering
///
/// # Errors
///
/// Returns an error if `superpixel` is zero
pub fn pixelate(superpixel: u32) -> Result<impl Fn(ArrayView3<'_, u8>) -> Array3<u8>> {
    if superpixel == 0 {
        return Err(invalid_parameter("superpixel", &superpixel, &"must be positive"));
    }
    let saturate = vividness(PIXELATE_SATURATION);
    let sharpen = contrast(PIXELATE_CONTRAST);
    Ok(move |pixels: ArrayView3<'_, u8>| {
        let boosted = sharpen(saturate(pixels).view());
        if boosted.is_empty() {
            return boosted;
        }
        let resized = to_rgb_image(&boosted).and_then(|rgb| {
            let (width, height) = rgb.dimensions();
            let small = imageops::resize(
                &rgb,
                (width / superpixel).max(1),
                (height / superpixel).max(1),
                FilterType::CatmullRom,
            );
            from_rgb_image(imageops::resize(&small, width, height, FilterType::CatmullRom))
        });
        match resized {
            Ok(out) => out,
            Err(err) => {
                warn!("Pixelate skipped resizing: {err}");
                boosted
            }
        }
    })
}
