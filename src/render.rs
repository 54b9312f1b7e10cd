//! Rendering terms as SOP product terms or POS sum terms
//!
//! Variables are named `A`, `B`, `C`, `D` by position and complemented with
//! a trailing `'`. In SOP form a `1` bit is the plain variable; in POS form
//! the polarity flips and a `0` bit is the plain variable.

use crate::mode::Mode;
use crate::term::{Bit, Term};

/// Variable names by bit position
pub const VARIABLE_NAMES: [&str; 4] = ["A", "B", "C", "D"];

/// Render one constrained position
fn literal(position: usize, value: bool, mode: Mode) -> String {
    let name = VARIABLE_NAMES[position];
    let plain = match mode {
        Mode::Sop => value,
        Mode::Pos => !value,
    };
    if plain {
        name.to_string()
    } else {
        format!("{}'", name)
    }
}

/// Render a single term
///
/// SOP terms concatenate their literals (`A'BC`); POS terms join them with
/// ` + ` inside parentheses (`(A + B')`). A term with every position
/// eliminated renders as the constant `1` (SOP) or `0` (POS).
///
/// # Examples
///
/// ```
/// use kmap_logic::{render_term, Mode, Term};
///
/// let term: Term = "-0-0".parse().unwrap();
/// assert_eq!(render_term(&term, Mode::Sop), "B'D'");
/// assert_eq!(render_term(&term, Mode::Pos), "(B + D)");
/// ```
pub fn render_term(term: &Term, mode: Mode) -> String {
    let literals: Vec<String> = term
        .literals()
        .map(|(position, value)| literal(position, value, mode))
        .collect();
    if literals.is_empty() {
        return mode.full_constant().to_string();
    }
    match mode {
        Mode::Sop => literals.concat(),
        Mode::Pos => format!("({})", literals.join(" + ")),
    }
}

/// Render a list of terms as a complete expression
///
/// SOP products are joined with ` + `; POS sums are written side by side
/// (implicit conjunction). An empty list renders the constant for a function
/// with no active terms.
pub fn render_expression(terms: &[Term], mode: Mode) -> String {
    if terms.is_empty() {
        return mode.empty_constant().to_string();
    }
    let rendered: Vec<String> = terms.iter().map(|term| render_term(term, mode)).collect();
    match mode {
        Mode::Sop => rendered.join(" + "),
        Mode::Pos => rendered.concat(),
    }
}

/// Render the unsimplified expression for a list of active term indices
///
/// Each index becomes a fully specified term (one literal per variable), in
/// ascending index order.
///
/// # Examples
///
/// ```
/// use kmap_logic::{render_original, Mode};
///
/// assert_eq!(render_original(&[3, 0], 2, Mode::Sop), "A'B' + AB");
/// assert_eq!(render_original(&[1], 2, Mode::Pos), "(A + B')");
/// ```
pub fn render_original(indices: &[u32], num_vars: usize, mode: Mode) -> String {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    let terms: Vec<Term> = sorted
        .into_iter()
        .map(|index| Term::from_index(index, num_vars))
        .collect();
    render_expression(&terms, mode)
}

/// Names of the variables eliminated from a term
pub fn eliminated_variables(term: &Term) -> Vec<&'static str> {
    term.bits()
        .iter()
        .enumerate()
        .filter(|(_, bit)| **bit == Bit::DontCare)
        .map(|(position, _)| VARIABLE_NAMES[position])
        .collect()
}
