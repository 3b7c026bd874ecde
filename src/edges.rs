//! Boundary extraction between differently labeled pixels.
//!
//! A pixel is on an edge when one of its 4-neighbors (up, down, left, right) carries another
//! label. Both pixels of every differing pair are marked, so a transition produces a 2 px wide
//! line. Pixels outside the grid are not neighbors: the image border itself is never an edge.

use crate::arrays::{LabelGrid, Mask};
use multiversion::multiversion;

/// Marks every pixel whose left or right neighbor differs from it.
#[multiversion(targets = "simd")]
fn mark_horizontal(row: &[u8], out: &mut [bool]) {
    debug_assert_eq!(row.len(), out.len());
    for (c, pair) in row.windows(2).enumerate() {
        if pair[0] != pair[1] {
            out[c] = true;
            out[c + 1] = true;
        }
    }
}

/// Marks every pixel of `row` which differs from the pixel of `other` in the same column.
#[multiversion(targets = "simd")]
fn mark_vertical(row: &[u8], other: &[u8], out: &mut [bool]) {
    debug_assert_eq!(row.len(), other.len());
    for ((o, a), b) in out.iter_mut().zip(row).zip(other) {
        *o |= a != b;
    }
}

/// Computes the edge mask of a label grid.
///
/// Every output row depends only on the label rows directly above, at and below it, so rows
/// are computed in parallel.
pub fn extract_edges(labels: &LabelGrid) -> Mask {
    let height = labels.height;
    labels.par_map_rows(false, |row, out| {
        let current = labels.get_row(row);
        mark_horizontal(current, out);
        if row > 0 {
            mark_vertical(current, labels.get_row(row - 1), out);
        }
        if row + 1 < height {
            mark_vertical(current, labels.get_row(row + 1), out);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::extract_edges;
    use crate::arrays::{Array2D, Mask};

    fn mask_from(rows: &[&str]) -> Mask {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.chars().map(|c| c == '#').collect())
            .collect();
        Array2D::from_rows(&rows).unwrap()
    }

    #[test]
    fn uniform_grid_has_no_edges() {
        let labels = Array2D::from_fill(3u8, 6, 4);
        let edges = extract_edges(&labels);
        assert_eq!(edges.shape(), (6, 4));
        assert_eq!(edges.count_set(), 0);
    }

    #[test]
    fn horizontal_split_marks_middle_rows() {
        let labels = Array2D::from_rows(&[[0u8; 4], [0; 4], [1; 4], [1; 4]]).unwrap();
        let edges = extract_edges(&labels);
        assert_eq!(edges, mask_from(&["....", "####", "####", "...."]));
    }

    #[test]
    fn vertical_split_marks_both_columns() {
        let labels = Array2D::from_rows(&[[0u8, 0, 2, 2, 2], [0, 0, 2, 2, 2]]).unwrap();
        let edges = extract_edges(&labels);
        assert_eq!(edges, mask_from(&[".##..", ".##.."]));
    }

    #[test]
    fn single_odd_pixel_marks_cross() {
        let labels = Array2D::from_rows(&[
            [0u8, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [0, 0, 7, 0, 0],
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
        ])
        .unwrap();
        let edges = extract_edges(&labels);
        assert_eq!(
            edges,
            mask_from(&[".....", "..#..", ".###.", "..#..", "....."])
        );
    }

    #[test]
    fn diagonal_neighbors_do_not_count() {
        let labels = Array2D::from_rows(&[[1u8, 0], [0, 1]]).unwrap();
        let edges = extract_edges(&labels);
        // every pixel still has a differing 4-neighbor here
        assert_eq!(edges.count_set(), 4);

        let labels = Array2D::from_rows(&[[1u8, 1, 1], [1, 1, 1], [1, 1, 1]]).unwrap();
        assert_eq!(extract_edges(&labels).count_set(), 0);
    }

    #[test]
    fn single_row_and_single_column_grids() {
        let labels = Array2D::from_rows(&[[4u8, 4, 5]]).unwrap();
        assert_eq!(extract_edges(&labels), mask_from(&[".##"]));

        let labels = Array2D::from_rows(&[[4u8], [5], [5]]).unwrap();
        assert_eq!(extract_edges(&labels), mask_from(&["#", "#", "."]));
    }

    #[test]
    fn empty_grid_gives_empty_mask() {
        let labels: Array2D<u8> = Array2D::from_fill(0, 0, 0);
        assert!(extract_edges(&labels).is_empty());
    }

    #[test]
    fn matches_definition_on_irregular_grid() {
        let labels = Array2D::from_rows(&[
            [0u8, 0, 1, 1, 2, 2],
            [0, 3, 1, 1, 2, 2],
            [0, 0, 0, 1, 1, 2],
            [4, 4, 0, 0, 1, 2],
        ])
        .unwrap();
        let edges = extract_edges(&labels);
        for y in 0..labels.height {
            for x in 0..labels.width {
                let here = labels[(x, y)];
                let differs = [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)]
                    .iter()
                    .filter_map(|(dx, dy)| {
                        let nx = x as i64 + dx;
                        let ny = y as i64 + dy;
                        labels.get(nx.try_into().ok()?, ny.try_into().ok()?)
                    })
                    .any(|v| *v != here);
                assert_eq!(edges[(x, y)], differs, "at ({x}, {y})");
            }
        }
    }
}
