//! Binary dilation with the 4-connected cross structuring element.

use crate::arrays::Mask;
use log::debug;
use multiversion::multiversion;

/// ORs a row shifted by one column in both directions into `out`.
#[multiversion(targets = "simd")]
fn or_row_with_sides(row: &[bool], out: &mut [bool]) {
    debug_assert_eq!(row.len(), out.len());
    let width = row.len();
    for c in 0..width {
        let left = c > 0 && row[c - 1];
        let right = c + 1 < width && row[c + 1];
        out[c] = row[c] | left | right;
    }
}

#[multiversion(targets = "simd")]
fn or_row(other: &[bool], out: &mut [bool]) {
    for (o, v) in out.iter_mut().zip(other) {
        *o |= *v;
    }
}

/// One round of cross-shaped dilation.
///
/// A pixel is set in the result when it, or its up/down/left/right neighbor inside the grid,
/// is set in `mask`.
pub fn dilate_cross(mask: &Mask) -> Mask {
    let height = mask.height;
    mask.par_map_rows(false, |row, out| {
        or_row_with_sides(mask.get_row(row), out);
        if row > 0 {
            or_row(mask.get_row(row - 1), out);
        }
        if row + 1 < height {
            or_row(mask.get_row(row + 1), out);
        }
    })
}

/// Applies `iterations` rounds of [`dilate_cross`]. Each round reaches exactly one pixel
/// further (Manhattan distance) than the previous one. Zero iterations return a copy.
pub fn dilate(mask: &Mask, iterations: usize) -> Mask {
    let mut current = mask.clone();
    for i in 0..iterations {
        current = dilate_cross(&current);
        debug!("dilation round {}: {} pixels set", i + 1, current.count_set());
    }
    current
}
