use std::fmt;

use crate::types::Var;

/// Errors produced while parsing or evaluating a formula.
///
/// Parsing and tree construction stop at the first structural error.
/// Evaluation stops at the first variable missing from the assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unbalanced `(` or `)`. The position is the character offset of the
    /// offending parenthesis.
    MismatchedParenthesis { position: usize },
    /// A character that is neither a variable nor an operator.
    InvalidToken { token: char, position: usize },
    /// The postfix sequence does not reduce to exactly one expression.
    MalformedPostfix { reason: &'static str },
    /// The assignment has no value for a variable used by the expression.
    UnboundVariable(Var),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MismatchedParenthesis { position } => {
                write!(f, "mismatched parenthesis at position {}", position)
            }
            Error::InvalidToken { token, position } => {
                write!(f, "invalid token {:?} at position {}", token, position)
            }
            Error::MalformedPostfix { reason } => write!(f, "malformed expression: {}", reason),
            Error::UnboundVariable(var) => write!(f, "variable '{}' is not bound", var),
        }
    }
}

impl std::error::Error for Error {}
