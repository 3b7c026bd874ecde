//! Palette reduction with k-means in the 8-bit Lab space of [`crate::cielab`].
//!
//! Seeds are pixels at evenly spaced lightness quantiles, which makes the result deterministic
//! and spreads the initial palette from dark to light. Distances are sums of absolute Lab
//! differences, ties going to the lower palette index.

use crate::arrays::{Array2D, LABImage, LabelGrid};
use crate::error::{Error, Result};
use image::{Rgb, RgbImage};
use log::{debug, info};
use rayon::prelude::*;

/// Output of [`quantize`]: one label per pixel and the palette the labels index.
#[derive(Clone, Debug)]
pub struct Quantized {
    pub labels: LabelGrid,
    /// Exactly `num_colors` entries. Entries no pixel maps to keep their seed color.
    pub palette: Vec<Rgb<u8>>,
}

// count, L, a, b, R, G, B
type Sums = [u64; 7];

#[inline(always)]
fn nearest(pixel: &[u8], centers: &[[i32; 3]]) -> u8 {
    let mut best = 0usize;
    let mut best_distance = i32::MAX;
    for (k, c) in centers.iter().enumerate() {
        let d = (pixel[0] as i32 - c[0]).abs()
            + (pixel[1] as i32 - c[1]).abs()
            + (pixel[2] as i32 - c[2]).abs();
        if d < best_distance {
            best_distance = d;
            best = k;
        }
    }
    best as u8
}

fn accumulate(lab: &LABImage, rgb: &[u8], labels: &[u8], num_colors: usize) -> Vec<Sums> {
    labels
        .par_iter()
        .zip(lab.lab_data.par_chunks_exact(4))
        .zip(rgb.par_chunks_exact(3))
        .fold(
            || vec![[0u64; 7]; num_colors],
            |mut acc, ((label, l), c)| {
                let s = &mut acc[*label as usize];
                s[0] += 1;
                s[1] += l[0] as u64;
                s[2] += l[1] as u64;
                s[3] += l[2] as u64;
                s[4] += c[0] as u64;
                s[5] += c[1] as u64;
                s[6] += c[2] as u64;
                acc
            },
        )
        .reduce(
            || vec![[0u64; 7]; num_colors],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b) {
                    for i in 0..7 {
                        x[i] += y[i];
                    }
                }
                a
            },
        )
}

#[inline(always)]
fn rounded_mean(sum: u64, count: u64) -> u64 {
    (sum + count / 2) / count
}

/// Maps every pixel of `image` to one of `num_colors` palette entries.
///
/// `num_colors` must be in `1..=256`; `max_iterations` bounds the number of assign/update
/// rounds, which stop early once no pixel changes cluster.
pub fn quantize(image: &RgbImage, num_colors: usize, max_iterations: u16) -> Result<Quantized> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }
    if !(1..=256).contains(&num_colors) {
        return Err(Error::InvalidConfiguration(format!(
            "number of colors must be between 1 and 256, got {num_colors}"
        )));
    }
    let rgb = image.as_raw();
    let lab = LABImage::from_srgb(rgb, width, height)?;
    let n = lab.len();

    let mut order: Vec<usize> = (0..n).collect();
    order.par_sort_unstable_by_key(|&i| {
        let p = lab.pixel(i);
        (p[0], p[1], p[2], i)
    });
    let seeds: Vec<usize> = (0..num_colors)
        .map(|j| order[((2 * j + 1) * n) / (2 * num_colors)])
        .collect();
    let mut centers: Vec<[i32; 3]> = seeds
        .iter()
        .map(|&i| {
            let p = lab.pixel(i);
            [p[0] as i32, p[1] as i32, p[2] as i32]
        })
        .collect();

    let mut labels = vec![0u8; n];
    for iteration in 0..max_iterations {
        let changed: usize = labels
            .par_iter_mut()
            .zip(lab.lab_data.par_chunks_exact(4))
            .map(|(label, pixel)| {
                let next = nearest(pixel, &centers);
                let moved = (*label != next) as usize;
                *label = next;
                moved
            })
            .sum();
        debug!("quantize iteration {iteration}: {changed} pixels changed cluster");
        if iteration > 0 && changed == 0 {
            break;
        }
        let sums = accumulate(&lab, rgb, &labels, num_colors);
        for (center, s) in centers.iter_mut().zip(&sums) {
            if s[0] == 0 {
                continue;
            }
            *center = [
                rounded_mean(s[1], s[0]) as i32,
                rounded_mean(s[2], s[0]) as i32,
                rounded_mean(s[3], s[0]) as i32,
            ];
        }
    }

    let sums = accumulate(&lab, rgb, &labels, num_colors);
    let palette: Vec<Rgb<u8>> = sums
        .iter()
        .zip(&seeds)
        .map(|(s, &seed)| {
            if s[0] == 0 {
                let c = &rgb[seed * 3..seed * 3 + 3];
                Rgb([c[0], c[1], c[2]])
            } else {
                Rgb([
                    rounded_mean(s[4], s[0]) as u8,
                    rounded_mean(s[5], s[0]) as u8,
                    rounded_mean(s[6], s[0]) as u8,
                ])
            }
        })
        .collect();
    let used = sums.iter().filter(|s| s[0] > 0).count();
    info!("quantized {width}x{height} image to {used} of {num_colors} colors");
    Ok(Quantized {
        labels: Array2D::from_slice(&labels, width, height)?,
        palette,
    })
}
