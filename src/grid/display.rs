//! Text rendering of a minimized K-map

use super::GridLayout;
use crate::engine::Minimization;
use std::fmt;

/// A minimization result drawn as a Gray-coded grid
///
/// Each cell shows its value followed by the ids of the groups covering it.
/// Cells missing from a short grid read in lenient mode are drawn as `.`:
///
/// ```text
///            00 (C'D')  01 (C'D)  11 (CD)  10 (CD')
/// 00 (A'B')  1 [1]      0         0        1 [1]
/// ```
///
/// # Examples
///
/// ```
/// use kmap_logic::{parse_cells, simplify, KmapView, Mode};
///
/// let result = simplify(&parse_cells("1001").unwrap(), Mode::Sop).unwrap();
/// let view = KmapView::new(&result).unwrap();
/// let text = view.to_string();
/// assert!(text.contains("1 [1]"));
/// assert!(text.contains("1 [2]"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct KmapView<'a> {
    layout: GridLayout,
    result: &'a Minimization,
}

impl<'a> KmapView<'a> {
    /// View of a result, or `None` for map sizes without a grid layout
    pub fn new(result: &'a Minimization) -> Option<Self> {
        let layout = GridLayout::for_vars(result.num_vars)?;
        Some(KmapView { layout, result })
    }

    /// The layout being drawn
    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Symbol of the cell holding a minterm index
    fn value_of(&self, index: u32) -> char {
        if self.result.minterms.contains(&index) {
            '1'
        } else if self.result.maxterms.contains(&index) {
            '0'
        } else if self.result.dontcares.contains(&index) {
            'X'
        } else {
            '.'
        }
    }

    /// Ids of the groups whose implicant covers an active term, ascending
    fn groups_at(&self, index: u32) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .result
            .groups
            .iter()
            .filter(|group| group.covered_minterm_indices.contains(&index))
            .map(|group| group.group_id)
            .collect();
        ids.dedup();
        ids
    }

    fn cell_text(&self, index: u32) -> String {
        let value = self.value_of(index);
        let ids = self.groups_at(index);
        if ids.is_empty() {
            value.to_string()
        } else {
            let ids: Vec<String> = ids.iter().map(usize::to_string).collect();
            format!("{} [{}]", value, ids.join(","))
        }
    }
}

impl fmt::Display for KmapView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = &self.layout;
        let rows: Vec<Vec<String>> = (0..layout.rows())
            .map(|row| {
                (0..layout.cols())
                    .filter_map(|col| layout.index_at(row, col))
                    .map(|index| self.cell_text(index))
                    .collect()
            })
            .collect();

        let label_width = layout.row_labels().iter().map(|l| l.len()).max().unwrap_or(0);
        let col_widths: Vec<usize> = (0..layout.cols())
            .map(|col| {
                rows.iter()
                    .filter_map(|row| row.get(col))
                    .map(String::len)
                    .chain(layout.col_labels().get(col).map(|l| l.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:width$}", "", width = label_width)?;
        for (label, width) in layout.col_labels().iter().zip(&col_widths) {
            write!(f, "  {:width$}", label, width = *width)?;
        }
        writeln!(f)?;

        for (label, cells) in layout.row_labels().iter().zip(&rows) {
            write!(f, "{:width$}", label, width = label_width)?;
            for (cell, width) in cells.iter().zip(&col_widths) {
                write!(f, "  {:width$}", cell, width = *width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
