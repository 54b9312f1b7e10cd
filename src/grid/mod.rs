//! K-map grid geometry
//!
//! Maps minterm indices to `(row, col)` positions in the Gray-coded layouts
//! used for 2, 3 and 4 variable maps, and turns a set of covered minterms back
//! into the rectangles that outline a group on the grid.
//!
//! A Gray-coded K-map is a torus: a group that is adjacent in the Boolean
//! sense may touch both the first and the last row (or column). Such groups
//! are split into one rectangle per edge run, so a group wrapping both axes
//! (the four corners of a 4x4 map) yields four rectangles.
//!
//! ```text
//!            CD=00 01  11  10
//!   AB=00  [  0   1   3   2 ]
//!      01  [  4   5   7   6 ]
//!      11  [ 12  13  15  14 ]
//!      10  [  8   9  11  10 ]
//! ```

mod display;

pub use display::KmapView;

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const LAYOUT_2V: &[&[u32]] = &[&[0, 1], &[2, 3]];
const LAYOUT_3V: &[&[u32]] = &[&[0, 1, 3, 2], &[4, 5, 7, 6]];
const LAYOUT_4V: &[&[u32]] = &[
    &[0, 1, 3, 2],
    &[4, 5, 7, 6],
    &[12, 13, 15, 14],
    &[8, 9, 11, 10],
];

const ROW_LABELS_2V: &[&str] = &["0 (A')", "1 (A)"];
const COL_LABELS_2V: &[&str] = &["0 (B')", "1 (B)"];
const ROW_LABELS_3V: &[&str] = &["0 (A')", "1 (A)"];
const COL_LABELS_3V: &[&str] = &["00 (B'C')", "01 (B'C)", "11 (BC)", "10 (BC')"];
const ROW_LABELS_4V: &[&str] = &["00 (A'B')", "01 (A'B)", "11 (AB)", "10 (AB')"];
const COL_LABELS_4V: &[&str] = &["00 (C'D')", "01 (C'D)", "11 (CD)", "10 (CD')"];

/// Fixed cell layout for one map size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    num_vars: usize,
    cells: &'static [&'static [u32]],
    row_labels: &'static [&'static str],
    col_labels: &'static [&'static str],
}

impl GridLayout {
    /// Layout for a map over `num_vars` variables
    ///
    /// Only 2, 3 and 4 variable maps have a layout.
    pub fn for_vars(num_vars: usize) -> Option<Self> {
        let (cells, row_labels, col_labels) = match num_vars {
            2 => (LAYOUT_2V, ROW_LABELS_2V, COL_LABELS_2V),
            3 => (LAYOUT_3V, ROW_LABELS_3V, COL_LABELS_3V),
            4 => (LAYOUT_4V, ROW_LABELS_4V, COL_LABELS_4V),
            _ => return None,
        };
        Some(GridLayout {
            num_vars,
            cells,
            row_labels,
            col_labels,
        })
    }

    /// Number of variables the layout is for
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, |row| row.len())
    }

    /// Minterm index shown at a grid position
    pub fn index_at(&self, row: usize, col: usize) -> Option<u32> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Grid position of a minterm index
    pub fn coordinates_of(&self, minterm: u32) -> Option<(usize, usize)> {
        self.cells.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|&index| index == minterm)
                .map(|col| (row, col))
        })
    }

    /// Gray-code labels for the rows, e.g. `01 (A'B)`
    pub fn row_labels(&self) -> &'static [&'static str] {
        self.row_labels
    }

    /// Gray-code labels for the columns
    pub fn col_labels(&self) -> &'static [&'static str] {
        self.col_labels
    }
}

/// Grid position of a minterm, or `None` if the map size has no layout
///
/// # Examples
///
/// ```
/// use kmap_logic::coordinates_of;
///
/// assert_eq!(coordinates_of(10, 4), Some((3, 3)));
/// assert_eq!(coordinates_of(6, 3), Some((1, 3)));
/// assert_eq!(coordinates_of(1, 1), None);
/// ```
pub fn coordinates_of(minterm: u32, num_vars: usize) -> Option<(usize, usize)> {
    GridLayout::for_vars(num_vars)?.coordinates_of(minterm)
}

/// One rectangle of a group, inclusive on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// First row
    pub row_start: usize,
    /// Last row
    pub row_end: usize,
    /// First column
    pub col_start: usize,
    /// Last column
    pub col_end: usize,
}

impl Rect {
    /// Whether a grid position lies inside the rectangle
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.row_start..=self.row_end).contains(&row)
            && (self.col_start..=self.col_end).contains(&col)
    }

    /// Number of cells enclosed
    pub fn area(&self) -> usize {
        (self.row_end - self.row_start + 1) * (self.col_end - self.col_start + 1)
    }
}

/// Split the touched indices of one axis into inclusive ranges
///
/// A set touching both index 0 and `last` with a gap in between wraps around
/// the edge and becomes two runs: the contiguous prefix starting at 0 and the
/// contiguous suffix ending at `last`. Everything else is one `min..=max`
/// range.
fn axis_ranges(touched: &BTreeSet<usize>, last: usize) -> Vec<(usize, usize)> {
    let (Some(&min), Some(&max)) = (touched.first(), touched.last()) else {
        return Vec::new();
    };
    let contiguous = max - min == touched.len() - 1;
    if contiguous || min != 0 || max != last {
        return vec![(min, max)];
    }

    let mut head_end = 0;
    while touched.contains(&(head_end + 1)) {
        head_end += 1;
    }
    let mut tail_start = last;
    while tail_start > 0 && touched.contains(&(tail_start - 1)) {
        tail_start -= 1;
    }

    if head_end < tail_start {
        vec![(0, head_end), (tail_start, last)]
    } else {
        vec![(min, max)]
    }
}

/// Rectangles outlining a set of covered minterms on the grid
///
/// Minterms without a grid position are ignored; an empty set, or a map size
/// without a layout, yields no rectangles. The result is the Cartesian
/// product of the row ranges and the column ranges.
///
/// # Examples
///
/// ```
/// use kmap_logic::bounding_boxes;
///
/// // The four corners of a 4-variable map
/// let corners = bounding_boxes(&[0, 2, 8, 10], 4);
/// assert_eq!(corners.len(), 4);
///
/// // A plain 2x2 block in the middle
/// let block = bounding_boxes(&[5, 7, 13, 15], 4);
/// assert_eq!(block.len(), 1);
/// assert_eq!(block[0].area(), 4);
/// ```
pub fn bounding_boxes(covered: &[u32], num_vars: usize) -> Vec<Rect> {
    let Some(layout) = GridLayout::for_vars(num_vars) else {
        return Vec::new();
    };
    let positions: Vec<(usize, usize)> = covered
        .iter()
        .filter_map(|&minterm| layout.coordinates_of(minterm))
        .collect();
    if positions.is_empty() {
        return Vec::new();
    }

    let rows: BTreeSet<usize> = positions.iter().map(|&(row, _)| row).collect();
    let cols: BTreeSet<usize> = positions.iter().map(|&(_, col)| col).collect();
    let row_ranges = axis_ranges(&rows, layout.rows() - 1);
    let col_ranges = axis_ranges(&cols, layout.cols() - 1);

    let mut rects = Vec::with_capacity(row_ranges.len() * col_ranges.len());
    for &(row_start, row_end) in &row_ranges {
        for &(col_start, col_end) in &col_ranges {
            rects.push(Rect {
                row_start,
                row_end,
                col_start,
                col_end,
            });
        }
    }
    debug!("bounding boxes for {:?}: {:?}", covered, rects);
    rects
}
