use crate::cielab::srgb_to_cielab_pixel;
use crate::error::{Error, Result};
use aligned_vec::{AVec, ConstAlign};
use rayon::prelude::*;
use std::fmt;
use std::ops::{Index, IndexMut};

const ALIGN: usize = 64;

/// Row-major 2-D grid backed by a 64-byte aligned buffer.
///
/// Indexing with `(x, y)` addresses column `x` of row `y`.
pub struct Array2D<T> {
    pub data: AVec<T, ConstAlign<ALIGN>>,
    pub width: usize,
    pub height: usize,
}

/// Per-pixel palette indices produced by the quantizer.
pub type LabelGrid = Array2D<u8>;

/// Boolean grid, `true` where a cell is set.
pub type Mask = Array2D<bool>;

impl<T> Array2D<T> {
    pub fn from_slice(data: &[T], width: usize, height: usize) -> Result<Self>
    where
        T: Clone,
    {
        if data.len() != width * height {
            return Err(Error::LengthMismatch {
                width,
                height,
                expected: width * height,
                found: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data: AVec::from_slice(ALIGN, data),
        })
    }

    /// Builds a grid from a row-major list of rows. All rows must have the same length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self>
    where
        T: Clone,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if let Some(bad) = rows.iter().find(|r| r.as_ref().len() != width) {
            return Err(Error::ShapeMismatch {
                expected_width: width,
                expected_height: height,
                width: bad.as_ref().len(),
                height,
            });
        }
        let data: AVec<T, ConstAlign<ALIGN>> = AVec::from_iter(
            ALIGN,
            rows.iter().flat_map(|r| r.as_ref().iter().cloned()),
        );
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_fill(value: T, width: usize, height: usize) -> Self
    where
        T: Clone + Copy,
    {
        let data: AVec<T, ConstAlign<ALIGN>> =
            AVec::from_iter(ALIGN, (0..width * height).map(|_| value));
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Fails with [`Error::ShapeMismatch`] unless `other` has the same width and height.
    pub fn ensure_same_shape<U>(&self, other: &Array2D<U>) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::ShapeMismatch {
                expected_width: self.width,
                expected_height: self.height,
                width: other.width,
                height: other.height,
            });
        }
        Ok(())
    }

    #[inline(always)]
    pub fn get_row(&self, row: usize) -> &[T] {
        debug_assert!(row < self.height);
        &self.data[(self.width * row)..(self.width * row + self.width)]
    }

    #[inline(always)]
    pub fn get_index(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            self.width > x,
            "Index ({x}, {y}) is out of bounds ({}, {})",
            self.width,
            self.height
        );
        debug_assert!(
            self.height > y,
            "Index ({x}, {y}) is out of bounds ({}, {})",
            self.width,
            self.height
        );
        self.width * y + x
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            Some(&self.data[self.width * y + x])
        } else {
            None
        }
    }
}

impl<T: Send + Sync> Array2D<T> {
    /// Builds a grid of the same shape as `self` by computing every output row in parallel.
    ///
    /// `f` receives the row number and the output row to fill.
    pub(crate) fn par_map_rows<U, F>(&self, fill: U, f: F) -> Array2D<U>
    where
        U: Copy + Send + Sync,
        F: Fn(usize, &mut [U]) + Sync + Send,
    {
        let mut out = Array2D::from_fill(fill, self.width, self.height);
        if out.is_empty() {
            return out;
        }
        let width = out.width;
        out.data
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, out_row)| f(row, out_row));
        out
    }
}

impl Array2D<bool> {
    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|v| **v).count()
    }

    /// True when every set cell of `other` is also set in `self`.
    pub fn is_superset_of(&self, other: &Array2D<bool>) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| *a || !*b)
    }
}

impl<T: Clone> Clone for Array2D<T> {
    fn clone(&self) -> Self {
        Self {
            data: AVec::from_slice(ALIGN, &self.data),
            width: self.width,
            height: self.height,
        }
    }
}

impl<T: PartialEq> PartialEq for Array2D<T> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.data[..] == other.data[..]
    }
}

impl<T: fmt::Debug> fmt::Debug for Array2D<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array2D")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data", &&self.data[..])
            .finish()
    }
}

impl<T> Index<(usize, usize)> for Array2D<T> {
    type Output = T;
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        &self.data[self.get_index(x, y)]
    }
}

impl<T> IndexMut<(usize, usize)> for Array2D<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        let idx = self.get_index(x, y);
        &mut self.data[idx]
    }
}

/// Packed 8-bit Lab image with one padding byte per pixel (`[L, a, b, 0]`).
#[derive(Debug)]
pub struct LABImage {
    pub lab_data: AVec<u8, ConstAlign<ALIGN>>,
    pub width: usize,
    pub height: usize,
}

impl LABImage {
    /// Converts packed RGB24 to Lab. Conversion runs in parallel over pixel chunks.
    pub fn from_srgb(rgb_image: &[u8], width: usize, height: usize) -> Result<Self> {
        if rgb_image.len() != width * height * 3 {
            return Err(Error::LengthMismatch {
                width,
                height,
                expected: width * height * 3,
                found: rgb_image.len(),
            });
        }
        let mut lab_output: AVec<u8, ConstAlign<ALIGN>> =
            AVec::from_iter(ALIGN, (0..width * height * 4).map(|_| 0u8));
        lab_output
            .par_chunks_exact_mut(4)
            .zip(rgb_image.par_chunks_exact(3))
            .for_each(|(out, rgb)| out[..3].copy_from_slice(&srgb_to_cielab_pixel(rgb)));
        Ok(Self {
            width,
            height,
            lab_data: lab_output,
        })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lab values of the pixel with row-major index `i`.
    #[inline(always)]
    pub fn pixel(&self, i: usize) -> &[u8] {
        &self.lab_data[i * 4..i * 4 + 3]
    }
}
