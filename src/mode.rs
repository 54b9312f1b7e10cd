//! Output form selection (sum of products or product of sums)

use crate::error::KmapError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which standard form to minimize into
///
/// In SOP mode the active terms are the minterms (cells holding `1`); in POS
/// mode they are the maxterms (cells holding `0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    /// Sum of products
    #[default]
    Sop,
    /// Product of sums
    Pos,
}

impl Mode {
    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Sop => "SOP",
            Mode::Pos => "POS",
        }
    }

    /// Expression for a function with no active terms
    pub fn empty_constant(&self) -> &'static str {
        match self {
            Mode::Sop => "0",
            Mode::Pos => "1",
        }
    }

    /// Expression for a function whose active terms fill the whole map
    pub fn full_constant(&self) -> &'static str {
        match self {
            Mode::Sop => "1",
            Mode::Pos => "0",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parsing of `"SOP"` / `"POS"`
///
/// # Examples
///
/// ```
/// use kmap_logic::Mode;
///
/// assert_eq!("pos".parse::<Mode>().unwrap(), Mode::Pos);
/// assert!("xor".parse::<Mode>().is_err());
/// ```
impl FromStr for Mode {
    type Err = KmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SOP" => Ok(Mode::Sop),
            "POS" => Ok(Mode::Pos),
            _ => Err(KmapError::InvalidMode { mode: Arc::from(s) }),
        }
    }
}
