//! Tri-state terms (cubes) over at most four variables
//!
//! A [`Term`] is the unit every stage of the minimizer works on: the generator
//! merges terms into prime implicants, the coverage solver picks among them,
//! and the renderer turns them back into product or sum terms.
//!
//! Bit positions are ordered most significant first, so position 0 is
//! variable `A` and the term for minterm 5 over three variables is `101`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest number of variables a K-map can hold
pub const MAX_VARS: usize = 4;

/// A single position in a term
///
/// The declaration order is significant: it gives the same ordering as the
/// characters `-` < `0` < `1`, which is the order implicants are listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bit {
    /// The variable is eliminated from the term
    DontCare,
    /// The variable must be 0
    Zero,
    /// The variable must be 1
    One,
}

impl Bit {
    /// Character used in the textual `01-` notation
    pub fn as_char(self) -> char {
        match self {
            Bit::DontCare => '-',
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    fn from_value(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }

    /// Whether a concrete variable value satisfies this position
    pub fn accepts(self, value: bool) -> bool {
        match self {
            Bit::DontCare => true,
            Bit::Zero => !value,
            Bit::One => value,
        }
    }
}

/// A cube of the Boolean space stored as a fixed-size bit array
///
/// Only the first [`num_vars`](Term::num_vars) positions are meaningful; the
/// tail is always [`Bit::Zero`] so that derived equality and ordering agree
/// with the textual form.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Term {
    bits: [Bit; MAX_VARS],
    len: u8,
}

impl Term {
    /// Build the fully specified term for a minterm index
    ///
    /// # Examples
    ///
    /// ```
    /// use kmap_logic::Term;
    ///
    /// assert_eq!(Term::from_index(5, 3).to_string(), "101");
    /// assert_eq!(Term::from_index(2, 4).to_string(), "0010");
    /// ```
    pub fn from_index(index: u32, num_vars: usize) -> Self {
        debug_assert!(num_vars <= MAX_VARS, "terms hold at most {MAX_VARS} variables");
        let len = num_vars.min(MAX_VARS);
        let mut bits = [Bit::Zero; MAX_VARS];
        for (position, bit) in bits.iter_mut().enumerate().take(len) {
            let shift = len - 1 - position;
            *bit = Bit::from_value((index >> shift) & 1 == 1);
        }
        Term {
            bits,
            len: len as u8,
        }
    }

    /// Number of variables this term ranges over
    pub fn num_vars(&self) -> usize {
        self.len as usize
    }

    /// The meaningful positions of this term
    pub fn bits(&self) -> &[Bit] {
        &self.bits[..self.num_vars()]
    }

    /// Population count used to bucket terms during merging
    ///
    /// Only [`Bit::One`] positions count; eliminated positions do not.
    pub fn ones(&self) -> usize {
        self.bits().iter().filter(|&&bit| bit == Bit::One).count()
    }

    /// Number of eliminated variables
    pub fn eliminated(&self) -> usize {
        self.bits().iter().filter(|&&bit| bit == Bit::DontCare).count()
    }

    /// Iterate over the constrained positions as `(position, value)` pairs
    pub fn literals(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.bits()
            .iter()
            .enumerate()
            .filter_map(|(position, bit)| match bit {
                Bit::DontCare => None,
                Bit::Zero => Some((position, false)),
                Bit::One => Some((position, true)),
            })
    }

    /// Merge two terms that differ in exactly one constrained position
    ///
    /// Returns `None` when the terms differ in more than one position, are
    /// identical, or disagree on where the eliminated positions are.
    ///
    /// # Examples
    ///
    /// ```
    /// use kmap_logic::Term;
    ///
    /// let a: Term = "0101".parse().unwrap();
    /// let b: Term = "0111".parse().unwrap();
    /// assert_eq!(a.combine(&b).unwrap().to_string(), "01-1");
    ///
    /// let c: Term = "1010".parse().unwrap();
    /// assert!(a.combine(&c).is_none());
    /// ```
    pub fn combine(&self, other: &Term) -> Option<Term> {
        if self.len != other.len {
            return None;
        }
        let mut differing = None;
        for (position, (a, b)) in self.bits().iter().zip(other.bits()).enumerate() {
            match (a, b) {
                (Bit::Zero, Bit::One) | (Bit::One, Bit::Zero) => {
                    if differing.replace(position).is_some() {
                        return None;
                    }
                }
                (Bit::DontCare, Bit::DontCare) | (Bit::Zero, Bit::Zero) | (Bit::One, Bit::One) => {}
                (Bit::DontCare, _) | (_, Bit::DontCare) => return None,
            }
        }
        let position = differing?;
        let mut merged = *self;
        merged.bits[position] = Bit::DontCare;
        Some(merged)
    }

    /// Whether this term covers the given minterm
    ///
    /// A term covers `m` when every constrained position equals the matching
    /// bit of `m`.
    pub fn covers(&self, minterm: u32) -> bool {
        let len = self.num_vars();
        if minterm >> len != 0 {
            return false;
        }
        self.bits()
            .iter()
            .enumerate()
            .all(|(position, bit)| bit.accepts((minterm >> (len - 1 - position)) & 1 == 1))
    }

    /// All concrete minterms this term covers, ascending
    pub fn expand(&self) -> Vec<u32> {
        (0..1u32 << self.num_vars())
            .filter(|&minterm| self.covers(minterm))
            .collect()
    }

    /// Every position is eliminated
    pub fn is_universal(&self) -> bool {
        self.bits().iter().all(|&bit| bit == Bit::DontCare)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            write!(f, "{}", bit.as_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Term({})", self)
    }
}

/// Error returned when parsing a term from its `01-` notation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermParseError {
    /// The string is empty or longer than [`MAX_VARS`]
    InvalidLength {
        /// Length of the rejected input
        len: usize,
    },
    /// A character other than `0`, `1` or `-`
    InvalidSymbol {
        /// The offending character
        symbol: char,
        /// Position of the character in the input
        position: usize,
    },
}

impl fmt::Display for TermParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermParseError::InvalidLength { len } => write!(
                f,
                "Term length {} out of range (expected 1..={})",
                len, MAX_VARS
            ),
            TermParseError::InvalidSymbol { symbol, position } => write!(
                f,
                "Invalid term symbol {:?} at position {} (expected '0', '1' or '-')",
                symbol, position
            ),
        }
    }
}

impl std::error::Error for TermParseError {}

impl FromStr for Term {
    type Err = TermParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len == 0 || len > MAX_VARS {
            return Err(TermParseError::InvalidLength { len });
        }
        let mut bits = [Bit::Zero; MAX_VARS];
        for (position, symbol) in s.chars().enumerate() {
            bits[position] = match symbol {
                '0' => Bit::Zero,
                '1' => Bit::One,
                '-' => Bit::DontCare,
                _ => return Err(TermParseError::InvalidSymbol { symbol, position }),
            };
        }
        Ok(Term {
            bits,
            len: len as u8,
        })
    }
}

impl From<Term> for String {
    fn from(term: Term) -> Self {
        term.to_string()
    }
}

impl TryFrom<String> for Term {
    type Error = TermParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
