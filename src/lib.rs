//! # K-map Logic Minimizer
//!
//! This crate minimizes Boolean functions of 1-4 variables given as a
//! Karnaugh-map cell grid (`1`, `0`, `X` for don't-care) and outlines the
//! groups used by the minimal expression on the map, including groups that
//! wrap around its edges.
//!
//! ## Overview
//!
//! The pipeline runs in four stages:
//!
//! 1. **Prime implicants** - [`prime_implicants`] merges terms that differ in
//!    one variable until nothing merges any more (Quine-McCluskey).
//! 2. **Cover** - [`solve`] takes every essential prime implicant, then
//!    greedily covers what is left.
//! 3. **Rendering** - [`render_expression`] writes the chosen implicants as a
//!    sum of products or a product of sums.
//! 4. **Grid mapping** - [`bounding_boxes`] turns each implicant back into one,
//!    two or four rectangles on the Gray-coded map.
//!
//! [`Engine`] runs all four and returns a [`Minimization`].
//!
//! ## Minimizing a Map
//!
//! ```
//! use kmap_logic::{parse_cells, simplify, Mode};
//!
//! # fn main() -> std::io::Result<()> {
//! // 3-variable map, cells in minterm-index order
//! let cells = parse_cells("1 1 0 0 1 1 0 1")?;
//!
//! let sop = simplify(&cells, Mode::Sop)?;
//! assert_eq!(sop.simplified_expression, "B' + AC");
//!
//! let pos = simplify(&cells, Mode::Pos)?;
//! assert_eq!(pos.simplified_expression, "(B' + C)(A + B')");
//! # Ok(())
//! # }
//! ```
//!
//! ## From an Expression
//!
//! Maps can also be built from a Boolean expression, with an optional
//! don't-care expression:
//!
//! ```
//! use kmap_logic::{cells_from_expressions, simplify, Mode};
//!
//! # fn main() -> std::io::Result<()> {
//! let cells = cells_from_expressions("A'B'C + BC", Some("AB'C"), 3)?;
//! let result = simplify(&cells, Mode::Sop)?;
//! assert_eq!(result.simplified_expression, "C");
//! # Ok(())
//! # }
//! ```
//!
//! ## Explanations
//!
//! The latest result can be handed to an [`Explainer`] through a
//! caller-owned [`ResultSlot`]. [`PromptExplainer`] produces the prompt text
//! for a language-model backend; calling such a backend is left to the
//! caller.

pub mod cover;
pub mod engine;
pub mod error;
pub mod explain;
pub mod expression;
pub mod grid;
pub mod implicants;
pub mod mode;
pub mod render;
pub mod term;

pub use cover::{solve, Chart, Solution};
pub use engine::{
    parse_cells, read_cells, simplify, Cell, CellSet, Engine, GroupVisual, Minimization,
    SimplifyRequest,
};
pub use error::KmapError;
pub use explain::{explain_latest, ExplainError, Explainer, PromptExplainer, ResultSlot};
pub use expression::{cells_from_expressions, Expr, ExpressionParseError};
pub use grid::{bounding_boxes, coordinates_of, GridLayout, KmapView, Rect};
pub use implicants::prime_implicants;
pub use mode::Mode;
pub use render::{render_expression, render_original, render_term, VARIABLE_NAMES};
pub use term::{Bit, Term, TermParseError, MAX_VARS};

use std::sync::Arc;

/// Colour tags cycled through by implicant rank
pub const DEFAULT_PALETTE: [&str; 6] = [
    "border-red-500",
    "border-green-500",
    "border-yellow-500",
    "border-purple-500",
    "border-pink-500",
    "border-yellow-500",
];

/// Configuration for the minimization engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmapConfig {
    /// Treat a cell count other than 2, 4, 8 or 16 as a 4-variable map
    /// instead of rejecting it
    pub lenient_variable_count: bool,
    /// Colour tags assigned to groups by implicant rank
    pub palette: Vec<Arc<str>>,
}

impl Default for KmapConfig {
    fn default() -> Self {
        KmapConfig {
            lenient_variable_count: false,
            palette: DEFAULT_PALETTE.iter().map(|&tag| Arc::from(tag)).collect(),
        }
    }
}

impl KmapConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether unrecognised cell counts fall back to 4 variables
    pub fn with_lenient_variable_count(mut self, lenient: bool) -> Self {
        self.lenient_variable_count = lenient;
        self
    }

    /// Replace the colour palette
    pub fn with_palette<I, S>(mut self, palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KmapConfig::new();
        assert!(!config.lenient_variable_count);
        assert_eq!(config.palette.len(), 6);
        assert_eq!(config.palette[0].as_ref(), "border-red-500");
    }

    #[test]
    fn test_config_builders() {
        let config = KmapConfig::new()
            .with_lenient_variable_count(true)
            .with_palette(["a", "b"]);
        assert!(config.lenient_variable_count);
        assert_eq!(config.palette.len(), 2);
    }
}
