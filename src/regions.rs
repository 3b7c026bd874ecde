//! Per-label area and centroid.
//!
//! Statistics are gathered over all pixels of a label, regardless of whether they form one
//! connected region. A label split into distant blobs gets a single centroid, which may lie
//! outside every blob.

use crate::arrays::LabelGrid;
use crate::error::{Error, Result};
use rayon::prelude::*;

/// Area and centroid of all pixels carrying one label.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionStats {
    pub label: usize,
    /// Number of pixels with this label.
    pub area: usize,
    /// `(row, column)` of the mean pixel position, `None` when the label is unused.
    pub centroid: Option<(f64, f64)>,
}

impl RegionStats {
    /// Number shown to the user for this region (labels are 0-based, numbers 1-based).
    pub fn display_number(&self) -> usize {
        self.label + 1
    }
}

/// Statistics for every label in `0..num_labels`, index-aligned with the palette.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionTable {
    pub width: usize,
    pub height: usize,
    pub regions: Vec<RegionStats>,
}

impl RegionTable {
    pub fn total_area(&self) -> usize {
        self.regions.iter().map(|r| r.area).sum()
    }

    /// Regions large enough to receive a number.
    pub fn labeled(&self, min_area: usize) -> impl Iterator<Item = &RegionStats> + '_ {
        self.regions
            .iter()
            .filter(move |r| r.area > 0 && r.area >= min_area)
    }
}

#[derive(Clone)]
struct Accumulator {
    count: Vec<u64>,
    row_sum: Vec<u64>,
    col_sum: Vec<u64>,
}

impl Accumulator {
    fn new(num_labels: usize) -> Self {
        Self {
            count: vec![0; num_labels],
            row_sum: vec![0; num_labels],
            col_sum: vec![0; num_labels],
        }
    }

    fn merge(mut self, other: Self) -> Self {
        for k in 0..self.count.len() {
            self.count[k] += other.count[k];
            self.row_sum[k] += other.row_sum[k];
            self.col_sum[k] += other.col_sum[k];
        }
        self
    }
}

/// Computes area and centroid for labels `0..num_labels`.
///
/// Sums are exact integers accumulated per row and merged, so the result does not depend on
/// how rows are scheduled. Fails with [`Error::UnresolvedLabel`] when a pixel carries a label
/// `>= num_labels`.
pub fn region_statistics(labels: &LabelGrid, num_labels: usize) -> Result<RegionTable> {
    let acc = (0..labels.height)
        .into_par_iter()
        .try_fold(
            || Accumulator::new(num_labels),
            |mut acc, row| {
                for (col, label) in labels.get_row(row).iter().enumerate() {
                    let k = *label as usize;
                    if k >= num_labels {
                        return Err(Error::UnresolvedLabel {
                            label: k,
                            palette_len: num_labels,
                        });
                    }
                    acc.count[k] += 1;
                    acc.row_sum[k] += row as u64;
                    acc.col_sum[k] += col as u64;
                }
                Ok(acc)
            },
        )
        .try_reduce(|| Accumulator::new(num_labels), |a, b| Ok(a.merge(b)))?;

    let regions = (0..num_labels)
        .map(|k| {
            let area = acc.count[k];
            let centroid = (area > 0).then(|| {
                (
                    acc.row_sum[k] as f64 / area as f64,
                    acc.col_sum[k] as f64 / area as f64,
                )
            });
            RegionStats {
                label: k,
                area: area as usize,
                centroid,
            }
        })
        .collect();
    Ok(RegionTable {
        width: labels.width,
        height: labels.height,
        regions,
    })
}
