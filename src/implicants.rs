//! Prime implicant generation (Quine-McCluskey tabulation)
//!
//! Terms are bucketed by the number of `1` positions. Each generation tries
//! every pair drawn from neighbouring buckets; pairs that merge feed the next
//! generation, and any term of the current generation that took part in no
//! merge is prime. The loop stops at the first generation that produces no
//! merges.

use crate::term::Term;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Terms of one generation keyed by their population count
type Generation = BTreeMap<usize, BTreeSet<Term>>;

fn bucket(terms: impl IntoIterator<Item = Term>) -> Generation {
    let mut generation = Generation::new();
    for term in terms {
        generation.entry(term.ones()).or_default().insert(term);
    }
    generation
}

/// Enumerate every prime implicant of a set of term indices
///
/// `terms` should contain both the active terms and the don't-cares: the
/// don't-cares take part in merging even though nothing requires them to be
/// covered. Duplicate indices are ignored. The result is deduplicated and
/// sorted in the `-` < `0` < `1` order.
///
/// # Examples
///
/// ```
/// use kmap_logic::prime_implicants;
///
/// let primes = prime_implicants([0, 2, 8, 10], 4);
/// let text: Vec<String> = primes.iter().map(|t| t.to_string()).collect();
/// assert_eq!(text, vec!["-0-0"]);
/// ```
pub fn prime_implicants(terms: impl IntoIterator<Item = u32>, num_vars: usize) -> Vec<Term> {
    let mut current = bucket(
        terms
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|index| Term::from_index(index, num_vars)),
    );
    let mut primes = BTreeSet::new();
    let mut round = 0usize;

    while !current.is_empty() {
        let mut merged = Vec::new();
        let mut used = BTreeSet::new();

        for ((&lower_ones, lower), (&upper_ones, upper)) in
            current.iter().zip(current.iter().skip(1))
        {
            if upper_ones != lower_ones + 1 {
                continue;
            }
            for a in lower {
                for b in upper {
                    if let Some(term) = a.combine(b) {
                        used.insert(*a);
                        used.insert(*b);
                        merged.push(term);
                    }
                }
            }
        }

        let before = primes.len();
        primes.extend(
            current
                .values()
                .flatten()
                .filter(|term| !used.contains(*term))
                .copied(),
        );
        debug!(
            "generation {}: {} merges, {} new primes",
            round,
            merged.len(),
            primes.len() - before
        );

        current = bucket(merged);
        round += 1;
    }

    primes.into_iter().collect()
}
