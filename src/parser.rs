//! Infix to postfix conversion.
//!
//! The grammar accepted here is:
//!
//! ```text
//! statement := term (('&' | '|') term)*
//! term      := '!' term | '(' statement ')' | variable
//! variable  := 'a'..'z' | 'A'..'Z'
//! ```
//!
//! Conversion uses the shunting-yard algorithm driven by the table in
//! [`Operator::precedence`]. Note that `&` and `|` bind equally tightly, so
//! `a & b | c` means `(a & b) | c` and `a | b & c` means `(a | b) & c`.
//! Whitespace is ignored, any other unknown character is rejected.

use log::trace;

use crate::ast::Expr;
use crate::error::{Error, Result};
use crate::symbol::{Operator, Postfix, Symbol};
use crate::types::Var;

/// Converts an infix formula into postfix order.
///
/// Only parenthesis balance and the token alphabet are checked here. Operand
/// and operator counts are validated when the postfix sequence is reduced to a
/// tree (see [`parse`]).
///
/// # Examples
///
/// ```
/// use tautology_rs::parser::to_postfix;
///
/// assert_eq!(to_postfix("a & (b | c)").unwrap().to_string(), "abc|&");
/// assert_eq!(to_postfix("!a & !b").unwrap().to_string(), "a!b!&");
/// ```
pub fn to_postfix(text: &str) -> Result<Postfix> {
    let mut output = Postfix::new();
    // Pending operators with the position they were read at.
    let mut stack: Vec<(Operator, usize)> = Vec::new();
    // Whether the previous token completed a term (variable or `)`).
    let mut after_term = false;

    for (position, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            continue;
        }

        if let Ok(var) = Var::try_from(c) {
            trace!("to_postfix: operand {} at {}", var, position);
            output.push(Symbol::Operand(var));
            after_term = true;
            continue;
        }

        let op = Operator::from_char(c).ok_or(Error::InvalidToken { token: c, position })?;
        trace!("to_postfix: operator {} at {}, stack depth {}", op, position, stack.len());

        match op {
            Operator::LParen => {
                stack.push((op, position));
                after_term = false;
            }
            Operator::RParen => {
                loop {
                    match stack.pop() {
                        Some((Operator::LParen, _)) => break,
                        Some((top, _)) => output.push(Symbol::Operator(top)),
                        None => return Err(Error::MismatchedParenthesis { position }),
                    }
                }
                after_term = true;
            }
            Operator::Not if after_term => {
                // Negation is prefix only: `a!` is not a term.
                return Err(Error::InvalidToken { token: c, position });
            }
            _ => {
                while let Some(&(top, _)) = stack.last() {
                    if top == Operator::LParen || !yields_to(top, op) {
                        break;
                    }
                    stack.pop();
                    output.push(Symbol::Operator(top));
                }
                stack.push((op, position));
                after_term = false;
            }
        }
    }

    while let Some((top, position)) = stack.pop() {
        if top == Operator::LParen {
            return Err(Error::MismatchedParenthesis { position });
        }
        output.push(Symbol::Operator(top));
    }

    Ok(output)
}

/// Whether the operator `top` on the stack must be emitted before `incoming`
/// is pushed.
fn yields_to(top: Operator, incoming: Operator) -> bool {
    if incoming.is_right_associative() {
        top.precedence() > incoming.precedence()
    } else {
        top.precedence() >= incoming.precedence()
    }
}

/// Parses an infix formula into an expression tree.
///
/// # Examples
///
/// ```
/// use tautology_rs::parser::parse;
///
/// let expr = parse("a & b | c").unwrap();
/// assert_eq!(expr.to_string(), "((a & b) | c)");
/// ```
pub fn parse(text: &str) -> Result<Expr> {
    let postfix = to_postfix(text)?;
    Expr::from_postfix(&postfix)
}
