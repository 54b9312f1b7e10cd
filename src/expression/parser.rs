//! Parsing support for Boolean expressions

use super::error::ExpressionParseError;
use super::Expr;
use lalrpop_util::ParseError;
use std::sync::Arc;

// Lalrpop-generated parser module (generated in OUT_DIR at build time)
#[allow(clippy::all)]
mod parser_impl {
    #![allow(clippy::all)]
    #![allow(dead_code)]
    #![allow(unused_variables)]
    #![allow(unused_imports)]
    #![allow(non_snake_case)]
    #![allow(non_camel_case_types)]
    #![allow(non_upper_case_globals)]
    include!(concat!(env!("OUT_DIR"), "/expression/bool_expr.rs"));
}

impl Expr {
    /// Parse an expression in K-map notation
    ///
    /// Supports:
    /// - single-letter variables, case-insensitive
    /// - `'` after an operand, or `~` / `!` before it, for NOT
    /// - `*`, `&` or plain juxtaposition (`AB'`) for AND
    /// - `+` or `|` for OR
    /// - parentheses and the constants `0` and `1`
    ///
    /// # Examples
    ///
    /// ```
    /// use kmap_logic::Expr;
    ///
    /// let expr = Expr::parse("A'B + (c | ~d)").unwrap();
    /// assert_eq!(expr.to_string(), "A'B + C + D'");
    /// assert!(Expr::parse("A + ").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ExpressionParseError> {
        parser_impl::ExprParser::new().parse(input).map_err(|e| {
            let position = error_position(&e);
            ExpressionParseError::InvalidSyntax {
                message: Arc::from(e.to_string()),
                input: Arc::from(input),
                position,
            }
        })
    }
}

/// Byte offset a lalrpop error points at
fn error_position<T, E>(error: &ParseError<usize, T, E>) -> Option<usize> {
    match error {
        ParseError::InvalidToken { location } => Some(*location),
        ParseError::UnrecognizedEof { location, .. } => Some(*location),
        ParseError::UnrecognizedToken {
            token: (start, _, _),
            ..
        } => Some(*start),
        ParseError::ExtraToken {
            token: (start, _, _),
        } => Some(*start),
        ParseError::User { .. } => None,
    }
}
