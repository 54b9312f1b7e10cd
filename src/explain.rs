//! Explanation collaborator boundary
//!
//! An [`Explainer`] turns a finished [`Minimization`] into free-form text.
//! The latest result lives in a [`ResultSlot`] owned by the caller, so a
//! follow-up explanation always refers to the result that caller stored.
//!
//! [`PromptExplainer`] is the built-in explainer: it produces the structured
//! prompt a language-model backend would be asked to answer. Backends wrap
//! or replace it.

use crate::engine::Minimization;
use crate::error::KmapError;
use crate::render::VARIABLE_NAMES;
use std::fmt::{self, Write};
use std::sync::Arc;

/// Failure reported by an explanation backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainError {
    message: Arc<str>,
}

impl ExplainError {
    /// Create an error with a message
    pub fn new(message: impl Into<Arc<str>>) -> Self {
        ExplainError {
            message: message.into(),
        }
    }

    /// The backend's message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ExplainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Explanation failed: {}", self.message)
    }
}

impl std::error::Error for ExplainError {}

/// Something that can explain a minimization result
pub trait Explainer {
    /// Produce an explanation for one result
    fn explain(&self, result: &Minimization) -> Result<String, ExplainError>;
}

/// Holder for the most recent minimization result
///
/// Every [`store`](ResultSlot::store) replaces the previous result.
#[derive(Debug, Clone, Default)]
pub struct ResultSlot {
    latest: Option<Minimization>,
}

impl ResultSlot {
    /// An empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored result
    pub fn store(&mut self, result: Minimization) {
        self.latest = Some(result);
    }

    /// The stored result, if any
    pub fn latest(&self) -> Option<&Minimization> {
        self.latest.as_ref()
    }

    /// Remove the stored result
    pub fn clear(&mut self) -> Option<Minimization> {
        self.latest.take()
    }
}

/// Explain the result held in a slot
///
/// Fails with [`KmapError::NoPriorResult`] when the slot is empty and with
/// [`KmapError::Explanation`] when the explainer itself fails.
pub fn explain_latest(slot: &ResultSlot, explainer: &dyn Explainer) -> Result<String, KmapError> {
    let result = slot.latest().ok_or(KmapError::NoPriorResult)?;
    Ok(explainer.explain(result)?)
}

/// Builds the step-by-step explanation prompt for a result
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptExplainer;

impl PromptExplainer {
    /// Render the prompt text
    pub fn prompt(result: &Minimization) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = write_prompt(&mut out, result);
        out
    }
}

impl Explainer for PromptExplainer {
    fn explain(&self, result: &Minimization) -> Result<String, ExplainError> {
        Ok(Self::prompt(result))
    }
}

fn write_prompt(out: &mut String, result: &Minimization) -> fmt::Result {
    let variables = VARIABLE_NAMES[..result.num_vars.min(VARIABLE_NAMES.len())].join(", ");
    writeln!(
        out,
        "You are an expert in digital electronics and Boolean algebra simplification."
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Explain step-by-step how the following Boolean expression was simplified \
         using a Karnaugh Map (K-Map):"
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Original Expression ({}): {}",
        result.mode, result.original_expression
    )?;
    writeln!(out, "Simplified Expression: {}", result.simplified_expression)?;
    writeln!(out)?;
    writeln!(out, "Details:")?;
    writeln!(out, "- Variables: {}", variables)?;
    writeln!(out, "- Minterms: {:?}", result.minterms)?;
    writeln!(out, "- Maxterms: {:?}", result.maxterms)?;
    if !result.dontcares.is_empty() {
        writeln!(out, "- Don't-cares: {:?}", result.dontcares)?;
    }
    writeln!(out, "- Groups Identified:")?;
    if result.implicants.is_empty() {
        writeln!(out, "  (none: the function is constant)")?;
    }
    for (rank, implicant) in result.implicants.iter().enumerate() {
        let group_id = rank + 1;
        let rects: Vec<String> = result
            .rects_for(group_id)
            .map(|g| {
                format!(
                    "rows {}-{} cols {}-{}",
                    g.row_start, g.row_end, g.col_start, g.col_end
                )
            })
            .collect();
        let covered = result
            .rects_for(group_id)
            .next()
            .map(|g| g.covered_minterm_indices.clone())
            .unwrap_or_default();
        let eliminated = result.eliminated_variables(group_id);
        writeln!(
            out,
            "  {}. implicant {} covers {:?} (size {}), eliminates [{}], drawn as {}{}",
            group_id,
            implicant,
            covered,
            implicant.expand().len(),
            eliminated.join(", "),
            if rects.is_empty() {
                "no rectangle".to_string()
            } else {
                rects.join("; ")
            },
            if rects.len() > 1 { " (wraps around)" } else { "" }
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Explain clearly:")?;
    writeln!(
        out,
        "1. First restate the input: original expression, mode ({}), {} \
         and the simplified expression.",
        result.mode,
        match result.mode {
            crate::mode::Mode::Sop => "minterms",
            crate::mode::Mode::Pos => "maxterms",
        }
    )?;
    writeln!(
        out,
        "2. How the grouping was done (adjacent 1s or 0s, wrapping, and group sizes)."
    )?;
    writeln!(out, "3. Which variables were eliminated.")?;
    writeln!(out, "4. Logical reasoning for the simplified expression.")?;
    writeln!(
        out,
        "Use friendly, plain but professional language, with as many paragraphs as needed."
    )?;
    writeln!(
        out,
        "5. Finish with: \"This is an AI generated explanation and it may contain \
         mistakes, check precisely.\""
    )
}
