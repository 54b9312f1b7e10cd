//! Minimization engine
//!
//! The [`Engine`] ties the pipeline together: it classifies the cells,
//! generates prime implicants over the active terms and don't-cares, covers
//! the active terms, renders both the simplified and the original expression,
//! and outlines every chosen implicant on the grid.
//!
//! # Examples
//!
//! ```
//! use kmap_logic::{parse_cells, Engine, KmapConfig, Mode};
//!
//! # fn main() -> std::io::Result<()> {
//! // Four corners of a 4-variable map
//! let cells = parse_cells("1010 0000 1010 0000")?;
//! let engine = Engine::new(KmapConfig::default());
//! let result = engine.simplify(&cells, Mode::Sop)?;
//!
//! assert_eq!(result.simplified_expression, "B'D'");
//! assert_eq!(result.groups.len(), 4);
//! # Ok(())
//! # }
//! ```

mod cells;
#[cfg(test)]
mod tests;

pub use cells::{parse_cells, read_cells, variable_count, Cell, CellSet};

use crate::cover::solve;
use crate::error::KmapError;
use crate::grid::{bounding_boxes, Rect};
use crate::implicants::prime_implicants;
use crate::mode::Mode;
use crate::render::{eliminated_variables, render_expression, render_original};
use crate::term::Term;
use crate::KmapConfig;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One rectangle of a rendered group
///
/// An implicant that wraps around the map edges is drawn as several
/// rectangles sharing the same `group_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupVisual {
    /// First row
    pub row_start: usize,
    /// Last row
    pub row_end: usize,
    /// First column
    pub col_start: usize,
    /// Last column
    pub col_end: usize,
    /// Colour tag from the configured palette
    pub color_tag: String,
    /// 1-based rank of the implicant this rectangle belongs to
    pub group_id: usize,
    /// Active terms covered by the implicant, ascending
    pub covered_minterm_indices: Vec<u32>,
}

impl GroupVisual {
    /// The rectangle on its own
    pub fn rect(&self) -> Rect {
        Rect {
            row_start: self.row_start,
            row_end: self.row_end,
            col_start: self.col_start,
            col_end: self.col_end,
        }
    }
}

/// Complete result of minimizing one K-map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minimization {
    /// Minimized expression in the requested form
    pub simplified_expression: String,
    /// Canonical (unminimized) expression over the active terms
    pub original_expression: String,
    /// Cells holding `1`
    pub minterms: Vec<u32>,
    /// Cells holding `0`
    pub maxterms: Vec<u32>,
    /// Don't-care cells
    pub dontcares: Vec<u32>,
    /// Rectangles for every chosen implicant
    pub groups: Vec<GroupVisual>,
    /// Form of the expressions
    pub mode: Mode,
    /// Number of variables of the map
    #[serde(default)]
    pub num_vars: usize,
    /// Chosen implicants, ascending; group `n` draws `implicants[n - 1]`
    #[serde(default)]
    pub implicants: Vec<Term>,
}

impl Minimization {
    /// Terms the simplified expression had to cover
    pub fn active_terms(&self) -> &[u32] {
        match self.mode {
            Mode::Sop => &self.minterms,
            Mode::Pos => &self.maxterms,
        }
    }

    /// Implicant drawn by a group
    pub fn implicant_for(&self, group_id: usize) -> Option<&Term> {
        group_id
            .checked_sub(1)
            .and_then(|rank| self.implicants.get(rank))
    }

    /// Variables eliminated by a group's implicant
    pub fn eliminated_variables(&self, group_id: usize) -> Vec<&'static str> {
        self.implicant_for(group_id)
            .map(eliminated_variables)
            .unwrap_or_default()
    }

    /// Rectangles belonging to one group
    pub fn rects_for(&self, group_id: usize) -> impl Iterator<Item = &GroupVisual> + '_ {
        self.groups
            .iter()
            .filter(move |group| group.group_id == group_id)
    }

    /// Serialize to the JSON wire format
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// A minimization request in the `{"map": [...], "type": "SOP"}` wire shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifyRequest {
    /// Cell symbols in minterm-index order
    #[serde(default)]
    pub map: Vec<String>,
    /// Requested form; defaults to SOP
    #[serde(rename = "type", default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    Mode::Sop.as_str().to_string()
}

/// The K-map minimizer
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: KmapConfig,
}

impl Engine {
    /// Create an engine with the given configuration
    pub fn new(config: KmapConfig) -> Self {
        Engine { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &KmapConfig {
        &self.config
    }

    /// Minimize a cell grid given in minterm-index order
    pub fn simplify(&self, cells: &[Cell], mode: Mode) -> Result<Minimization, KmapError> {
        let set = CellSet::classify(cells, &self.config)?;
        self.simplify_set(&set, mode)
    }

    /// Minimize a grid of cell symbols with a mode string
    ///
    /// The mode is validated before any cell is looked at.
    pub fn simplify_symbols<S: AsRef<str>>(
        &self,
        cells: &[S],
        mode: &str,
    ) -> Result<Minimization, KmapError> {
        let mode: Mode = mode.parse()?;
        let set = CellSet::from_symbols(cells, &self.config)?;
        self.simplify_set(&set, mode)
    }

    /// Minimize a wire-format request
    pub fn simplify_request(&self, request: &SimplifyRequest) -> Result<Minimization, KmapError> {
        self.simplify_symbols(&request.map, &request.mode)
    }

    /// Minimize an already classified cell set
    pub fn simplify_set(&self, set: &CellSet, mode: Mode) -> Result<Minimization, KmapError> {
        let num_vars = set.num_vars();
        let active = set.active(mode);
        let full = active.len() == 1usize << num_vars;

        let implicants = if active.is_empty() || full {
            Vec::new()
        } else {
            let primes = prime_implicants(
                active.iter().chain(set.dontcares()).copied(),
                num_vars,
            );
            let solution = solve(&primes, active);
            if !solution.is_complete() {
                error!(
                    "cover left {:?} uncovered with primes {:?}",
                    solution.uncovered(),
                    primes
                );
                return Err(KmapError::ComputationFailure {
                    reason: Arc::from(format!(
                        "active terms {:?} left uncovered",
                        solution.uncovered()
                    )),
                });
            }
            solution.into_implicants()
        };

        let simplified_expression = if full {
            mode.full_constant().to_string()
        } else {
            render_expression(&implicants, mode)
        };
        let original_expression = render_original(active, num_vars, mode);
        let groups = self.group_visuals(&implicants, active, num_vars);

        info!(
            "{} {}-variable map: {} -> {} ({} groups)",
            mode,
            num_vars,
            original_expression,
            simplified_expression,
            implicants.len()
        );

        Ok(Minimization {
            simplified_expression,
            original_expression,
            minterms: set.minterms().to_vec(),
            maxterms: set.maxterms().to_vec(),
            dontcares: set.dontcares().to_vec(),
            groups,
            mode,
            num_vars,
            implicants,
        })
    }

    fn group_visuals(
        &self,
        implicants: &[Term],
        active: &[u32],
        num_vars: usize,
    ) -> Vec<GroupVisual> {
        let palette = &self.config.palette;
        let mut groups = Vec::new();
        for (rank, implicant) in implicants.iter().enumerate() {
            let covered: Vec<u32> = active
                .iter()
                .copied()
                .filter(|&minterm| implicant.covers(minterm))
                .collect();
            let color_tag = if palette.is_empty() {
                String::new()
            } else {
                palette[rank % palette.len()].to_string()
            };
            for rect in bounding_boxes(&covered, num_vars) {
                groups.push(GroupVisual {
                    row_start: rect.row_start,
                    row_end: rect.row_end,
                    col_start: rect.col_start,
                    col_end: rect.col_end,
                    color_tag: color_tag.clone(),
                    group_id: rank + 1,
                    covered_minterm_indices: covered.clone(),
                });
            }
        }
        groups
    }
}

/// Minimize a cell grid with the default configuration
pub fn simplify(cells: &[Cell], mode: Mode) -> Result<Minimization, KmapError> {
    Engine::default().simplify(cells, mode)
}
