//! Filled rectangles and polygons drawn onto pixel arrays
//!
//! Points are `[row, col]` pairs in pixel units. A pixel is covered when its
//! center lies inside the shape or on its outline, so both axis-aligned and
//! rotated shapes include their boundary pixels.

use crate::color::Color;
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{Image, check_image};
use log::warn;
use ndarray::{Array3, ArrayView3, Axis, aview1, s};
use num_traits::ToPrimitive;

/// A `[row, col]` position
pub type Point = [f64; 2];

const EDGE_TOLERANCE: f64 = 1e-9;

/// Side of a base segment, seen walking from its first point to its second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Right-hand side on screen (rows grow downward)
    Right,
    /// Left-hand side on screen
    Left,
}

fn check_points(points: &[Point]) -> Result<()> {
    points
        .iter()
        .find(|p| !p.iter().all(|v| v.is_finite()))
        .map_or(Ok(()), |p| {
            Err(invalid_parameter("point", &format!("{p:?}"), &"coordinates must be finite"))
        })
}

// Inclusive pixel range covered by [a, b] along an axis of `len` pixels
fn pixel_span(a: f64, b: f64, len: usize) -> Option<(usize, usize)> {
    let lo = a.min(b).round();
    let hi = a.max(b).round();
    let last = len.checked_sub(1)?.to_f64()?;
    if hi < 0.0 || lo > last {
        return None;
    }
    Some((lo.max(0.0).to_usize()?, hi.min(last).to_usize()?))
}

fn fill_pixel(image: &mut Image, row: usize, col: usize, color: Color) {
    image
        .slice_mut(s![row, col, ..])
        .assign(&aview1(&color.0));
}

/// Fill the axis-aligned rectangle spanned by two opposite corners
///
/// Both corners are inclusive; the part outside the image is clipped.
///
/// # Errors
///
/// Returns an error if the image is not RGB or a coordinate is not finite
pub fn fill_rectangle(image: &mut Image, corner: Point, opposite: Point, color: Color) -> Result<()> {
    let (height, width) = check_image(image)?;
    check_points(&[corner, opposite])?;
    let rows = pixel_span(corner[0], opposite[0], height);
    let cols = pixel_span(corner[1], opposite[1], width);
    if let (Some((r0, r1)), Some((c0, c1))) = (rows, cols) {
        for mut pixel in image
            .slice_mut(s![r0..=r1, c0..=c1, ..])
            .lanes_mut(Axis(2))
        {
            pixel.assign(&aview1(&color.0));
        }
    }
    Ok(())
}

/// Corner opposite to `corner` along a diagonal of the given length
///
/// `theta` is in degrees, measured from the row axis toward the column axis.
pub fn diagonal_corner(corner: Point, length: f64, theta: f64) -> Point {
    let (sin, cos) = theta.to_radians().sin_cos();
    [length.mul_add(cos, corner[0]), length.mul_add(sin, corner[1])]
}

/// Vertices of a rectangle with one corner at `origin`, a `length` side
/// pointing at `theta` degrees from the row axis and a `width` side turned a
/// quarter toward the columns
pub fn rotated_rectangle(origin: Point, length: f64, width: f64, theta: f64) -> [Point; 4] {
    let (sin, cos) = theta.to_radians().sin_cos();
    let far = [length.mul_add(cos, origin[0]), length.mul_add(sin, origin[1])];
    let offset = [-width * sin, width * cos];
    [
        origin,
        far,
        [far[0] + offset[0], far[1] + offset[1]],
        [origin[0] + offset[0], origin[1] + offset[1]],
    ]
}

/// Vertices of a rectangle standing on the segment `base`, `height` pixels
/// deep on the given side
///
/// # Errors
///
/// Returns an error if the two base points coincide or are not finite
pub fn rectangle_on_base(base: [Point; 2], height: f64, side: Side) -> Result<[Point; 4]> {
    check_points(&base)?;
    let [start, end] = base;
    let (dr, dc) = (end[0] - start[0], end[1] - start[1]);
    let norm = dr.hypot(dc);
    if norm <= EDGE_TOLERANCE {
        return Err(invalid_parameter(
            "base",
            &format!("{base:?}"),
            &"base points must differ",
        ));
    }
    let sign = match side {
        Side::Right => 1.0,
        Side::Left => -1.0,
    };
    let normal = [sign * dc / norm * height, -sign * dr / norm * height];
    Ok([
        start,
        end,
        [end[0] + normal[0], end[1] + normal[1]],
        [start[0] + normal[0], start[1] + normal[1]],
    ])
}

fn on_segment(point: Point, a: Point, b: Point) -> bool {
    let (dr, dc) = (b[0] - a[0], b[1] - a[1]);
    let (pr, pc) = (point[0] - a[0], point[1] - a[1]);
    let cross = dr.mul_add(pc, -(dc * pr));
    let dot = dr.mul_add(pr, dc * pc);
    let squared = dr.mul_add(dr, dc * dc);
    cross.abs() <= EDGE_TOLERANCE * squared.sqrt().max(1.0)
        && dot >= -EDGE_TOLERANCE
        && dot <= squared + EDGE_TOLERANCE
}

fn covers(vertices: &[Point], point: Point) -> bool {
    let edges = vertices.iter().zip(vertices.iter().cycle().skip(1));
    let mut inside = false;
    for (&a, &b) in edges {
        if on_segment(point, a, b) {
            return true;
        }
        if (a[0] > point[0]) != (b[0] > point[0]) {
            let crossing = (point[0] - a[0]).mul_add((b[1] - a[1]) / (b[0] - a[0]), a[1]);
            if point[1] < crossing {
                inside = !inside;
            }
        }
    }
    inside
}

/// Fill a polygon given by its vertices, in order
///
/// Self-intersecting outlines are filled with the even-odd rule.
///
/// # Errors
///
/// Returns an error if the image is not RGB, fewer than three vertices are
/// given or a coordinate is not finite
pub fn fill_polygon(image: &mut Image, vertices: &[Point], color: Color) -> Result<()> {
    let (height, width) = check_image(image)?;
    if vertices.len() < 3 {
        return Err(invalid_parameter(
            "vertices",
            &vertices.len(),
            &"a polygon needs at least three vertices",
        ));
    }
    check_points(vertices)?;

    let (lo, hi) = vertices.iter().fold(
        ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]),
        |(lo, hi), p| ([lo[0].min(p[0]), lo[1].min(p[1])], [hi[0].max(p[0]), hi[1].max(p[1])]),
    );
    let (Some((r0, r1)), Some((c0, c1))) = (
        pixel_span(lo[0].floor(), hi[0].ceil(), height),
        pixel_span(lo[1].floor(), hi[1].ceil(), width),
    ) else {
        return Ok(());
    };

    for row in r0..=r1 {
        for col in c0..=c1 {
            let center = [row as f64, col as f64];
            if covers(vertices, center) {
                fill_pixel(image, row, col, color);
            }
        }
    }
    Ok(())
}

/// Transform drawing a filled polygon over a copy of the pixels
///
/// Pixels that cannot be drawn on are returned unchanged with a warning.
///
/// # Errors
///
/// Returns an error if fewer than three vertices are given or a coordinate is
/// not finite
pub fn polygon(vertices: Vec<Point>, color: Color) -> Result<impl Fn(ArrayView3<'_, u8>) -> Array3<u8>> {
    if vertices.len() < 3 {
        return Err(invalid_parameter(
            "vertices",
            &vertices.len(),
            &"a polygon needs at least three vertices",
        ));
    }
    check_points(&vertices)?;
    Ok(move |pixels: ArrayView3<'_, u8>| {
        let mut out = pixels.to_owned();
        if let Err(err) = fill_polygon(&mut out, &vertices, color) {
            warn!("Polygon skipped: {err}");
        }
        out
    })
}
