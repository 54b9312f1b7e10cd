//! Boolean expression input
//!
//! An alternative to typing cells: write the function as an expression over
//! the map variables, optionally with a second expression marking the
//! don't-care cells, and let [`cells_from_expressions`] fill in the map.
//!
//! Variables are single letters. `A` is the most significant bit of a
//! minterm index, matching the bit order of [`Term`](crate::term::Term).

mod error;
mod parser;

pub use error::ExpressionParseError;

use crate::engine::Cell;
use crate::error::KmapError;
use crate::term::MAX_VARS;
use log::debug;
use std::collections::BTreeSet;
use std::fmt;

/// A parsed Boolean expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A variable, stored upper-case
    Var(char),
    /// `0` or `1`
    Constant(bool),
    /// Complement
    Not(Box<Expr>),
    /// Conjunction
    And(Box<Expr>, Box<Expr>),
    /// Disjunction
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// A variable from its (case-insensitive) name
    pub fn var(name: &str) -> Self {
        let letter = name.chars().next().unwrap_or('A');
        Expr::Var(letter.to_ascii_uppercase())
    }

    /// Complement of an expression
    #[allow(clippy::should_implement_trait)]
    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    /// Conjunction of two expressions
    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    /// Disjunction of two expressions
    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    /// Value of the expression at a minterm of a `num_vars`-variable map
    ///
    /// Variables past the map's alphabet read as 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use kmap_logic::Expr;
    ///
    /// let expr = Expr::parse("AB' + C").unwrap();
    /// assert!(expr.evaluate(0b100, 3));
    /// assert!(expr.evaluate(0b001, 3));
    /// assert!(!expr.evaluate(0b110, 3));
    /// ```
    pub fn evaluate(&self, minterm: u32, num_vars: usize) -> bool {
        match self {
            Expr::Var(name) => {
                let position = variable_position(*name);
                position < num_vars && (minterm >> (num_vars - 1 - position)) & 1 == 1
            }
            Expr::Constant(value) => *value,
            Expr::Not(inner) => !inner.evaluate(minterm, num_vars),
            Expr::And(left, right) => {
                left.evaluate(minterm, num_vars) && right.evaluate(minterm, num_vars)
            }
            Expr::Or(left, right) => {
                left.evaluate(minterm, num_vars) || right.evaluate(minterm, num_vars)
            }
        }
    }

    /// Variables referenced, in alphabetical order
    pub fn variables(&self) -> BTreeSet<char> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    /// The alphabetically last variable referenced, if any
    pub fn highest_variable(&self) -> Option<char> {
        self.variables().last().copied()
    }

    /// Smallest map size that can hold every referenced variable
    pub fn required_vars(&self) -> usize {
        self.highest_variable()
            .map_or(0, |name| variable_position(name) + 1)
    }

    fn collect_variables(&self, vars: &mut BTreeSet<char>) {
        match self {
            Expr::Var(name) => {
                vars.insert(*name);
            }
            Expr::Constant(_) => {}
            Expr::Not(inner) => inner.collect_variables(vars),
            Expr::And(left, right) | Expr::Or(left, right) => {
                left.collect_variables(vars);
                right.collect_variables(vars);
            }
        }
    }

    /// Fail if the expression names a variable beyond `num_vars`
    fn check_alphabet(&self, num_vars: usize) -> Result<(), ExpressionParseError> {
        match self.highest_variable() {
            Some(name) if variable_position(name) >= num_vars => {
                Err(ExpressionParseError::UnknownVariable { name, num_vars })
            }
            _ => Ok(()),
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parent: Precedence) -> fmt::Result {
        if self.precedence() < parent {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }

    fn precedence(&self) -> Precedence {
        match self {
            Expr::Or(..) => Precedence::Or,
            Expr::And(..) => Precedence::And,
            Expr::Var(_) | Expr::Constant(_) | Expr::Not(_) => Precedence::Atom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Or,
    And,
    Atom,
}

/// Written in the map's own notation: juxtaposed AND, `+` OR, postfix `'`
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Constant(value) => write!(f, "{}", if *value { "1" } else { "0" }),
            Expr::Not(inner) => {
                match inner.as_ref() {
                    Expr::Var(_) | Expr::Not(_) => write!(f, "{}'", inner),
                    _ => write!(f, "({})'", inner),
                }
            }
            Expr::And(left, right) => {
                left.fmt_operand(f, Precedence::And)?;
                right.fmt_operand(f, Precedence::And)
            }
            Expr::Or(left, right) => {
                left.fmt_operand(f, Precedence::Or)?;
                write!(f, " + ")?;
                right.fmt_operand(f, Precedence::Or)
            }
        }
    }
}

impl std::str::FromStr for Expr {
    type Err = ExpressionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expr::parse(s)
    }
}

/// Position of a variable in a minterm index, `A` first
fn variable_position(name: char) -> usize {
    (name as usize).saturating_sub('A' as usize)
}

/// Build the cells of a `num_vars`-variable map from expressions
///
/// A cell is `X` wherever `dont_cares` holds, otherwise `1` or `0` from
/// `function`.
///
/// # Errors
///
/// Fails when either expression does not parse, names a variable the map
/// does not have, or when `num_vars` is not 1-4.
///
/// # Examples
///
/// ```
/// use kmap_logic::{cells_from_expressions, Cell};
///
/// let cells = cells_from_expressions("A + B", Some("AB"), 2).unwrap();
/// assert_eq!(cells, vec![Cell::Zero, Cell::One, Cell::One, Cell::DontCare]);
/// ```
pub fn cells_from_expressions(
    function: &str,
    dont_cares: Option<&str>,
    num_vars: usize,
) -> Result<Vec<Cell>, KmapError> {
    if !(1..=MAX_VARS).contains(&num_vars) {
        return Err(KmapError::UnsupportedVariableCount {
            cells: 1usize.checked_shl(num_vars as u32).unwrap_or(usize::MAX),
        });
    }

    let function = Expr::parse(function)?;
    function.check_alphabet(num_vars)?;
    let dont_cares = dont_cares
        .map(|text| -> Result<Expr, ExpressionParseError> {
            let expr = Expr::parse(text)?;
            expr.check_alphabet(num_vars)?;
            Ok(expr)
        })
        .transpose()?;

    let cells: Vec<Cell> = (0..1u32 << num_vars)
        .map(|minterm| {
            if dont_cares
                .as_ref()
                .is_some_and(|dc| dc.evaluate(minterm, num_vars))
            {
                Cell::DontCare
            } else if function.evaluate(minterm, num_vars) {
                Cell::One
            } else {
                Cell::Zero
            }
        })
        .collect();
    debug!("cells for {}: {:?}", function, cells);
    Ok(cells)
}
