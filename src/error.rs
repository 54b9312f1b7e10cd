//! Error types for K-map minimization
//!
//! [`KmapError`] is the single error returned by the engine and the
//! explanation boundary. Like the other error types in this crate it converts
//! into [`std::io::Error`], so callers working in `io::Result` can use `?`.

use crate::explain::ExplainError;
use crate::expression::ExpressionParseError;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Errors produced while minimizing a K-map or explaining a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KmapError {
    /// The requested form is neither SOP nor POS
    InvalidMode {
        /// The rejected mode string
        mode: Arc<str>,
    },
    /// The number of cells does not correspond to 1-4 variables
    UnsupportedVariableCount {
        /// Number of cells supplied
        cells: usize,
    },
    /// A cell value other than `1`, `0` or `X`
    InvalidCell {
        /// Position of the cell in the input
        index: usize,
        /// The rejected value
        value: Arc<str>,
    },
    /// The minimizer reached an internally inconsistent state
    ComputationFailure {
        /// Description of what went wrong
        reason: Arc<str>,
    },
    /// An explanation was requested before any minimization was stored
    NoPriorResult,
    /// The explanation collaborator failed
    Explanation(ExplainError),
    /// A Boolean expression could not be turned into map cells
    Expression(ExpressionParseError),
}

impl fmt::Display for KmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KmapError::InvalidMode { mode } => {
                write!(f, "Invalid mode {:?} (expected SOP or POS)", mode)
            }
            KmapError::UnsupportedVariableCount { cells } => write!(
                f,
                "Unsupported cell count {} (expected 2, 4, 8 or 16 cells)",
                cells
            ),
            KmapError::InvalidCell { index, value } => write!(
                f,
                "Invalid cell {:?} at index {} (expected '1', '0' or 'X')",
                value, index
            ),
            KmapError::ComputationFailure { reason } => {
                write!(f, "Minimization failed: {}", reason)
            }
            KmapError::NoPriorResult => write!(f, "No recent K-map result available"),
            KmapError::Explanation(e) => write!(f, "{}", e),
            KmapError::Expression(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for KmapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KmapError::Explanation(e) => Some(e),
            KmapError::Expression(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ExplainError> for KmapError {
    fn from(err: ExplainError) -> Self {
        KmapError::Explanation(err)
    }
}

impl From<ExpressionParseError> for KmapError {
    fn from(err: ExpressionParseError) -> Self {
        KmapError::Expression(err)
    }
}

impl From<KmapError> for io::Error {
    fn from(err: KmapError) -> Self {
        let kind = match &err {
            KmapError::InvalidMode { .. }
            | KmapError::UnsupportedVariableCount { .. }
            | KmapError::InvalidCell { .. } => io::ErrorKind::InvalidInput,
            KmapError::Expression(_) => io::ErrorKind::InvalidData,
            KmapError::NoPriorResult => io::ErrorKind::NotFound,
            KmapError::ComputationFailure { .. } | KmapError::Explanation(_) => {
                io::ErrorKind::Other
            }
        };
        io::Error::new(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mode_message() {
        let err = KmapError::InvalidMode {
            mode: Arc::from("XOR"),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"XOR\""));
        assert!(msg.contains("SOP or POS"));
    }

    #[test]
    fn test_unsupported_variable_count_message() {
        let err = KmapError::UnsupportedVariableCount { cells: 5 };
        assert!(err.to_string().contains("cell count 5"));
    }

    #[test]
    fn test_invalid_cell_message() {
        let err = KmapError::InvalidCell {
            index: 3,
            value: Arc::from("2"),
        };
        let msg = err.to_string();
        assert!(msg.contains("index 3"));
        assert!(msg.contains("\"2\""));
    }

    #[test]
    fn test_explanation_error_has_source() {
        use std::error::Error;

        let err: KmapError = ExplainError::new("backend unavailable").into();
        assert!(matches!(err, KmapError::Explanation(_)));
        assert!(err.source().is_some());
        assert_ne!(
            err,
            KmapError::ComputationFailure {
                reason: Arc::from("backend unavailable")
            }
        );
    }

    #[test]
    fn test_io_error_kinds() {
        let io_err: io::Error = KmapError::UnsupportedVariableCount { cells: 3 }.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);

        let io_err: io::Error = KmapError::NoPriorResult.into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);

        let io_err: io::Error = KmapError::ComputationFailure {
            reason: Arc::from("uncovered terms"),
        }
        .into();
        assert_eq!(io_err.kind(), io::ErrorKind::Other);
    }
}
