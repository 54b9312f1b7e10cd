//! Error types for Boolean expression input

use std::fmt;
use std::io;
use std::sync::Arc;

/// Errors raised while turning an expression into map cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionParseError {
    /// The expression does not match the grammar
    InvalidSyntax {
        /// The error message from the parser
        message: Arc<str>,
        /// The original input string that failed to parse
        input: Arc<str>,
        /// Byte offset in the input where the error occurred, if known
        position: Option<usize>,
    },
    /// The expression names a variable outside the map's alphabet
    UnknownVariable {
        /// The offending variable, upper-cased
        name: char,
        /// Number of variables of the map
        num_vars: usize,
    },
}

impl fmt::Display for ExpressionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionParseError::InvalidSyntax {
                message,
                input,
                position,
            } => {
                if let Some(pos) = position {
                    write!(
                        f,
                        "Failed to parse expression at position {}: {}. Input: {:?}",
                        pos, message, input
                    )
                } else {
                    write!(
                        f,
                        "Failed to parse expression: {}. Input: {:?}",
                        message, input
                    )
                }
            }
            ExpressionParseError::UnknownVariable { name, num_vars } => write!(
                f,
                "Variable {} is not available in a {}-variable map",
                name, num_vars
            ),
        }
    }
}

impl std::error::Error for ExpressionParseError {}

impl From<ExpressionParseError> for io::Error {
    fn from(err: ExpressionParseError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_with_position() {
        let err = ExpressionParseError::InvalidSyntax {
            message: Arc::from("unexpected token"),
            input: Arc::from("A + + B"),
            position: Some(4),
        };
        let msg = err.to_string();
        assert!(msg.contains("position 4"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn test_syntax_error_without_position() {
        let err = ExpressionParseError::InvalidSyntax {
            message: Arc::from("unexpected end"),
            input: Arc::from("A +"),
            position: None,
        };
        assert!(!err.to_string().contains("position"));
    }

    #[test]
    fn test_unknown_variable_message() {
        let err = ExpressionParseError::UnknownVariable {
            name: 'D',
            num_vars: 3,
        };
        assert_eq!(err.to_string(), "Variable D is not available in a 3-variable map");
    }

    #[test]
    fn test_to_io_error() {
        let err = ExpressionParseError::UnknownVariable {
            name: 'E',
            num_vars: 4,
        };
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
    }
}
