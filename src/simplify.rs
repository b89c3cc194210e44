//! Assignment-free simplification.
//!
//! [`simplify`] reduces a tree bottom-up to either a constant or a residual
//! textual form, applying a few local rules at each node:
//!
//! - equal operands: `x & x = x`, `x | x = x` (by textual identity of the reduced operands)
//! - complement: `x & !x = false`, `x | !x = true` (only when `x` is a single variable)
//! - constants: `!c` folds, `false & _ = false`, `true | _ = true`, and the identities
//!   `true & x = x`, `false | x = x`
//!
//! Anything else is combined into a residual string such as `(a&b)`, which the
//! enclosing node may match again.
//!
//! This is a local optimizer, not a normal-form reducer. Rules only see the two
//! immediate operands, so duplicates or complements separated by other
//! sub-expressions are missed: `(a & b) & !a` stays symbolic even though it is
//! unsatisfiable, and `a | (b | !a)` stays symbolic even though it is a
//! tautology. Use the [oracle][crate::oracle] for a decision.

use std::fmt;

use crate::ast::Expr;

/// Result of [`simplify`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Simplified {
    /// The formula has the same value under every assignment.
    Const(bool),
    /// The formula could not be reduced to a constant.
    Residual(String),
}

impl Simplified {
    /// Returns the constant, if the formula reduced to one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Simplified::Const(value) => Some(*value),
            Simplified::Residual(_) => None,
        }
    }

    pub fn is_const(&self) -> bool {
        matches!(self, Simplified::Const(_))
    }
}

impl fmt::Display for Simplified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Simplified::Const(value) => write!(f, "{}", value),
            Simplified::Residual(text) => write!(f, "{}", text),
        }
    }
}

/// Simplifies `expr` without assigning its variables.
///
/// # Examples
///
/// ```
/// use tautology_rs::parser::parse;
/// use tautology_rs::simplify::{simplify, Simplified};
///
/// assert_eq!(simplify(&parse("a | !a").unwrap()), Simplified::Const(true));
/// assert_eq!(simplify(&parse("a & a").unwrap()), Simplified::Residual("a".to_string()));
/// ```
pub fn simplify(expr: &Expr) -> Simplified {
    // `current` holds the reduction of the most recently finished sub-tree;
    // pending left operands wait in their `Combine*` task.
    enum Task<'a> {
        Reduce(&'a Expr),
        Negate,
        AndRhs(&'a Expr),
        OrRhs(&'a Expr),
        CombineAnd(Simplified),
        CombineOr(Simplified),
    }

    let mut current = Simplified::Const(false);
    let mut tasks = vec![Task::Reduce(expr)];

    while let Some(task) = tasks.pop() {
        match task {
            Task::Reduce(Expr::Operand(var)) => current = Simplified::Residual(var.to_string()),
            Task::Reduce(Expr::Not(inner)) => {
                tasks.push(Task::Negate);
                tasks.push(Task::Reduce(inner));
            }
            Task::Reduce(Expr::And(lhs, rhs)) => {
                tasks.push(Task::AndRhs(rhs));
                tasks.push(Task::Reduce(lhs));
            }
            Task::Reduce(Expr::Or(lhs, rhs)) => {
                tasks.push(Task::OrRhs(rhs));
                tasks.push(Task::Reduce(lhs));
            }
            Task::Negate => {
                current = match current {
                    Simplified::Const(value) => Simplified::Const(!value),
                    Simplified::Residual(text) => Simplified::Residual(format!("!{}", text)),
                };
            }
            // A constant left operand that decides the node leaves `rhs` unreduced.
            Task::AndRhs(rhs) => {
                if current != Simplified::Const(false) {
                    let lhs = std::mem::replace(&mut current, Simplified::Const(false));
                    tasks.push(Task::CombineAnd(lhs));
                    tasks.push(Task::Reduce(rhs));
                }
            }
            Task::OrRhs(rhs) => {
                if current != Simplified::Const(true) {
                    let lhs = std::mem::replace(&mut current, Simplified::Const(true));
                    tasks.push(Task::CombineOr(lhs));
                    tasks.push(Task::Reduce(rhs));
                }
            }
            Task::CombineAnd(lhs) => {
                let rhs = std::mem::replace(&mut current, Simplified::Const(false));
                current = combine_and(lhs, rhs);
            }
            Task::CombineOr(lhs) => {
                let rhs = std::mem::replace(&mut current, Simplified::Const(false));
                current = combine_or(lhs, rhs);
            }
        }
    }

    current
}

fn combine_and(lhs: Simplified, rhs: Simplified) -> Simplified {
    if lhs == rhs {
        return lhs;
    }
    match (lhs, rhs) {
        (Simplified::Residual(x), Simplified::Residual(y)) => {
            if are_complementary(&x, &y) {
                Simplified::Const(false)
            } else {
                Simplified::Residual(format!("({}&{})", x, y))
            }
        }
        (Simplified::Const(false), _) | (_, Simplified::Const(false)) => Simplified::Const(false),
        (Simplified::Const(true), other) | (other, Simplified::Const(true)) => other,
    }
}

fn combine_or(lhs: Simplified, rhs: Simplified) -> Simplified {
    if lhs == rhs {
        return lhs;
    }
    match (lhs, rhs) {
        (Simplified::Residual(x), Simplified::Residual(y)) => {
            if are_complementary(&x, &y) {
                Simplified::Const(true)
            } else {
                Simplified::Residual(format!("({}|{})", x, y))
            }
        }
        (Simplified::Const(true), _) | (_, Simplified::Const(true)) => Simplified::Const(true),
        (Simplified::Const(false), other) | (other, Simplified::Const(false)) => other,
    }
}

/// `true` if one text is a single variable and the other is exactly its negation.
fn are_complementary(x: &str, y: &str) -> bool {
    fn negates(neg: &str, var: &str) -> bool {
        var.chars().count() == 1 && neg.strip_prefix('!') == Some(var)
    }
    negates(x, y) || negates(y, x)
}
