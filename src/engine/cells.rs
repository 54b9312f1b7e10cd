//! K-map cells and their classification into term sets

use crate::error::KmapError;
use crate::mode::Mode;
use crate::KmapConfig;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, BufRead};
use std::sync::Arc;

/// Value of one K-map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// The function is 1 (a minterm)
    #[serde(rename = "1")]
    One,
    /// The function is 0 (a maxterm)
    #[serde(rename = "0")]
    Zero,
    /// Unconstrained
    #[serde(rename = "X", alias = "x")]
    DontCare,
}

impl Cell {
    /// Parse a cell symbol: `1`, `0`, or `X` (either case)
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "1" => Some(Cell::One),
            "0" => Some(Cell::Zero),
            "X" | "x" => Some(Cell::DontCare),
            _ => None,
        }
    }

    /// The canonical symbol
    pub fn as_char(self) -> char {
        match self {
            Cell::One => '1',
            Cell::Zero => '0',
            Cell::DontCare => 'X',
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Parse cells from text
///
/// Every character other than a comma or whitespace is one cell, so
/// `"1,0,X,1"`, `"1 0 X 1"` and `"10X1"` are the same four cells.
///
/// # Examples
///
/// ```
/// use kmap_logic::{parse_cells, Cell};
///
/// let cells = parse_cells("1 0, X1").unwrap();
/// assert_eq!(cells, vec![Cell::One, Cell::Zero, Cell::DontCare, Cell::One]);
/// assert!(parse_cells("102").is_err());
/// ```
pub fn parse_cells(text: &str) -> Result<Vec<Cell>, KmapError> {
    text.chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .enumerate()
        .map(|(index, c)| {
            let mut buf = [0u8; 4];
            let symbol: &str = c.encode_utf8(&mut buf);
            Cell::from_symbol(symbol).ok_or_else(|| KmapError::InvalidCell {
                index,
                value: Arc::from(symbol),
            })
        })
        .collect()
}

/// Read cells from a reader, one or more per line
///
/// Text after `#` on a line is a comment.
pub fn read_cells<R: BufRead>(reader: R) -> io::Result<Vec<Cell>> {
    let mut text = String::new();
    for line in reader.lines() {
        let line = line?;
        let content = line.split('#').next().unwrap_or_default();
        text.push_str(content);
        text.push(' ');
    }
    Ok(parse_cells(&text)?)
}

/// Number of variables for a cell count
///
/// 2, 4, 8 and 16 cells map to 1-4 variables. Any other count is rejected
/// unless `lenient` is set, in which case it is treated as a 4-variable map.
pub fn variable_count(cells: usize, lenient: bool) -> Result<usize, KmapError> {
    match cells {
        2 => Ok(1),
        4 => Ok(2),
        8 => Ok(3),
        16 => Ok(4),
        _ if lenient => {
            warn!(
                "cell count {} is not 2, 4, 8 or 16; assuming a 4-variable map",
                cells
            );
            Ok(4)
        }
        _ => Err(KmapError::UnsupportedVariableCount { cells }),
    }
}

/// Cells classified into minterms, maxterms and don't-cares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSet {
    num_vars: usize,
    minterms: Vec<u32>,
    maxterms: Vec<u32>,
    dontcares: Vec<u32>,
}

impl CellSet {
    /// Classify a cell grid given in minterm-index order
    ///
    /// With a lenient configuration only the first 16 cells of an oversized
    /// grid are classified.
    pub fn classify(cells: &[Cell], config: &KmapConfig) -> Result<Self, KmapError> {
        let num_vars = variable_count(cells.len(), config.lenient_variable_count)?;
        let mut set = CellSet {
            num_vars,
            minterms: Vec::new(),
            maxterms: Vec::new(),
            dontcares: Vec::new(),
        };
        for (index, cell) in cells.iter().enumerate().take(1 << num_vars) {
            let index = index as u32;
            match cell {
                Cell::One => set.minterms.push(index),
                Cell::Zero => set.maxterms.push(index),
                Cell::DontCare => set.dontcares.push(index),
            }
        }
        Ok(set)
    }

    /// Classify a grid of cell symbols (`"1"`, `"0"`, `"X"`)
    pub fn from_symbols<S: AsRef<str>>(
        cells: &[S],
        config: &KmapConfig,
    ) -> Result<Self, KmapError> {
        let cells = cells
            .iter()
            .enumerate()
            .map(|(index, symbol)| {
                let symbol = symbol.as_ref();
                Cell::from_symbol(symbol).ok_or_else(|| KmapError::InvalidCell {
                    index,
                    value: Arc::from(symbol),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::classify(&cells, config)
    }

    /// Number of variables
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Indices of cells holding `1`, ascending
    pub fn minterms(&self) -> &[u32] {
        &self.minterms
    }

    /// Indices of cells holding `0`, ascending
    pub fn maxterms(&self) -> &[u32] {
        &self.maxterms
    }

    /// Indices of don't-care cells, ascending
    pub fn dontcares(&self) -> &[u32] {
        &self.dontcares
    }

    /// Terms that must be covered in the given mode
    pub fn active(&self, mode: Mode) -> &[u32] {
        match mode {
            Mode::Sop => &self.minterms,
            Mode::Pos => &self.maxterms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_count() {
        assert_eq!(variable_count(2, false), Ok(1));
        assert_eq!(variable_count(16, false), Ok(4));
        assert_eq!(
            variable_count(6, false),
            Err(KmapError::UnsupportedVariableCount { cells: 6 })
        );
        assert_eq!(variable_count(6, true), Ok(4));
        assert_eq!(variable_count(0, true), Ok(4));
    }

    #[test]
    fn test_classify() {
        let cells = parse_cells("10X1").unwrap();
        let set = CellSet::classify(&cells, &KmapConfig::default()).unwrap();
        assert_eq!(set.num_vars(), 2);
        assert_eq!(set.minterms(), &[0, 3]);
        assert_eq!(set.maxterms(), &[1]);
        assert_eq!(set.dontcares(), &[2]);
        assert_eq!(set.active(Mode::Pos), &[1]);
    }

    #[test]
    fn test_lenient_classification_truncates() {
        let cells = vec![Cell::One; 20];
        let config = KmapConfig::default().with_lenient_variable_count(true);
        let set = CellSet::classify(&cells, &config).unwrap();
        assert_eq!(set.num_vars(), 4);
        assert_eq!(set.minterms().len(), 16);

        let short = vec![Cell::Zero; 5];
        let set = CellSet::classify(&short, &config).unwrap();
        assert_eq!(set.maxterms(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_from_symbols_reports_index() {
        let err = CellSet::from_symbols(&["1", "0", "?", "1"], &KmapConfig::default()).unwrap_err();
        assert_eq!(
            err,
            KmapError::InvalidCell {
                index: 2,
                value: Arc::from("?")
            }
        );
    }

    #[test]
    fn test_read_cells_skips_comments() {
        let input = "# 3-variable map\n1 0 0 1 # row 0\nX X 0 1\n";
        let cells = read_cells(input.as_bytes()).unwrap();
        assert_eq!(cells.len(), 8);
        assert_eq!(cells[4], Cell::DontCare);
    }

    #[test]
    fn test_read_cells_invalid_data() {
        let err = read_cells("1 0 2 1".as_bytes()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_cell_serde_symbols() {
        let cells: Vec<Cell> = serde_json::from_str(r#"["1", "0", "X", "x"]"#).unwrap();
        assert_eq!(cells, vec![Cell::One, Cell::Zero, Cell::DontCare, Cell::DontCare]);
        assert_eq!(serde_json::to_string(&Cell::DontCare).unwrap(), "\"X\"");
    }
}
