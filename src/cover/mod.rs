//! Covering the active terms with prime implicants
//!
//! This module provides the prime implicant [`Chart`] and the [`solve`]
//! function that picks a cover from it:
//!
//! 1. Every prime implicant that is the only one covering some active term is
//!    essential and always chosen.
//! 2. Remaining active terms are covered greedily, each step taking the prime
//!    implicant that covers the most uncovered terms (the earliest implicant in
//!    sorted order wins ties).
//!
//! Don't-cares never appear in the chart; they only shaped the implicants.


use crate::term::Term;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Prime implicant chart restricted to the active terms
///
/// Maps each active term to the prime implicants covering it, in ascending
/// implicant order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    implicants: Vec<Term>,
    entries: BTreeMap<u32, Vec<Term>>,
}

impl Chart {
    /// Build the chart for a set of prime implicants and active terms
    pub fn new(primes: &[Term], active: &[u32]) -> Self {
        let implicants: Vec<Term> = primes
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let entries = active
            .iter()
            .map(|&minterm| {
                let covering = implicants
                    .iter()
                    .filter(|pi| pi.covers(minterm))
                    .copied()
                    .collect();
                (minterm, covering)
            })
            .collect();
        Chart {
            implicants,
            entries,
        }
    }

    /// The prime implicants in ascending order
    pub fn implicants(&self) -> &[Term] {
        &self.implicants
    }

    /// The active terms of this chart, ascending
    pub fn active_terms(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    /// Prime implicants covering an active term
    ///
    /// Returns an empty slice for indices that are not active terms.
    pub fn implicants_for(&self, minterm: u32) -> &[Term] {
        self.entries
            .get(&minterm)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate over `(active term, covering implicants)` rows
    pub fn rows(&self) -> impl Iterator<Item = (u32, &[Term])> + '_ {
        self.entries
            .iter()
            .map(|(&minterm, covering)| (minterm, covering.as_slice()))
    }

    /// Implicants that are the sole cover of at least one active term
    pub fn essentials(&self) -> BTreeSet<Term> {
        self.entries
            .values()
            .filter_map(|covering| match covering.as_slice() {
                [only] => Some(*only),
                _ => None,
            })
            .collect()
    }

    /// Active terms covered by an implicant
    pub fn covered_by(&self, implicant: &Term) -> BTreeSet<u32> {
        implicant
            .expand()
            .into_iter()
            .filter(|minterm| self.entries.contains_key(minterm))
            .collect()
    }
}

/// The chosen prime implicants and any active terms they failed to cover
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
    implicants: Vec<Term>,
    essential: usize,
    uncovered: Vec<u32>,
}

impl Solution {
    /// Chosen implicants in ascending order
    pub fn implicants(&self) -> &[Term] {
        &self.implicants
    }

    /// How many of the chosen implicants were essential
    pub fn essential_count(&self) -> usize {
        self.essential
    }

    /// Active terms left uncovered
    ///
    /// Always empty for a well-formed chart; anything here means the chart
    /// was built from implicants that do not span the active terms.
    pub fn uncovered(&self) -> &[u32] {
        &self.uncovered
    }

    /// Every active term is covered
    pub fn is_complete(&self) -> bool {
        self.uncovered.is_empty()
    }

    /// Consume the solution, returning the chosen implicants
    pub fn into_implicants(self) -> Vec<Term> {
        self.implicants
    }
}

/// Select a cover of `active` from `primes`
///
/// # Examples
///
/// ```
/// use kmap_logic::{prime_implicants, solve};
///
/// // f(A,B,C,D) = sum m(4,8,10,11,12,15) + d(9,14)
/// let active = [4, 8, 10, 11, 12, 15];
/// let primes = prime_implicants([4, 8, 10, 11, 12, 15, 9, 14], 4);
/// let solution = solve(&primes, &active);
///
/// assert!(solution.is_complete());
/// assert_eq!(solution.essential_count(), 2);
/// assert_eq!(solution.implicants().len(), 3);
/// ```
pub fn solve(primes: &[Term], active: &[u32]) -> Solution {
    solve_chart(&Chart::new(primes, active))
}

/// Select a cover from an already built chart
pub fn solve_chart(chart: &Chart) -> Solution {
    let mut chosen = chart.essentials();
    let essential = chosen.len();

    let mut remaining: BTreeSet<u32> = chart.active_terms().collect();
    for implicant in &chosen {
        for minterm in chart.covered_by(implicant) {
            remaining.remove(&minterm);
        }
    }
    debug!(
        "chart: {} active terms, {} primes, {} essential, {} left after essentials",
        chart.entries.len(),
        chart.implicants.len(),
        essential,
        remaining.len()
    );

    while !remaining.is_empty() {
        let mut best: Option<(Term, BTreeSet<u32>)> = None;
        for implicant in chart.implicants() {
            if chosen.contains(implicant) {
                continue;
            }
            let covered: BTreeSet<u32> = remaining
                .iter()
                .copied()
                .filter(|&minterm| implicant.covers(minterm))
                .collect();
            let best_len = best.as_ref().map_or(0, |(_, c)| c.len());
            if covered.len() > best_len {
                best = Some((*implicant, covered));
            }
        }
        let Some((implicant, covered)) = best else {
            break;
        };
        debug!("greedy pick {} covers {:?}", implicant, covered);
        chosen.insert(implicant);
        for minterm in covered {
            remaining.remove(&minterm);
        }
    }

    Solution {
        implicants: chosen.into_iter().collect(),
        essential,
        uncovered: remaining.into_iter().collect(),
    }
}
