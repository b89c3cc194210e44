//! Evaluation of formulas under an assignment.
//!
//! Two independent evaluators are provided and must agree on every
//! well-formed formula:
//!
//! - [`evaluate_postfix`] runs a stack machine over the postfix sequence and
//!   resolves every operand, with no short-circuiting.
//! - [`evaluate_tree`] walks the expression tree and skips the right operand of
//!   `&`/`|` whenever the left one already decides the result.

use crate::ast::Expr;
use crate::error::{Error, Result};
use crate::symbol::{Operator, Postfix, Symbol};
use crate::types::{Assignment, Var};

/// Entry of the postfix evaluation stack.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum StackEntry {
    /// A variable that has not been looked up yet.
    VariableRef(Var),
    /// A computed value.
    BooleanValue(bool),
}

impl StackEntry {
    fn resolve(self, assignment: &Assignment) -> Result<bool> {
        match self {
            StackEntry::VariableRef(var) => assignment.lookup(var),
            StackEntry::BooleanValue(value) => Ok(value),
        }
    }
}

fn pop_value(stack: &mut Vec<StackEntry>, assignment: &Assignment) -> Result<bool> {
    stack
        .pop()
        .ok_or(Error::MalformedPostfix {
            reason: "operator is missing an operand",
        })?
        .resolve(assignment)
}

/// Evaluates a postfix sequence under `assignment`.
///
/// Fails with [`Error::UnboundVariable`] if an operand has no value, and with
/// [`Error::MalformedPostfix`] if the sequence does not reduce to one value.
pub fn evaluate_postfix(postfix: &Postfix, assignment: &Assignment) -> Result<bool> {
    let mut stack: Vec<StackEntry> = Vec::with_capacity(postfix.len());

    for symbol in postfix {
        let entry = match *symbol {
            Symbol::Operand(var) => StackEntry::VariableRef(var),
            Symbol::Operator(Operator::Not) => {
                let value = pop_value(&mut stack, assignment)?;
                StackEntry::BooleanValue(!value)
            }
            Symbol::Operator(Operator::And) => {
                let rhs = pop_value(&mut stack, assignment)?;
                let lhs = pop_value(&mut stack, assignment)?;
                StackEntry::BooleanValue(lhs & rhs)
            }
            Symbol::Operator(Operator::Or) => {
                let rhs = pop_value(&mut stack, assignment)?;
                let lhs = pop_value(&mut stack, assignment)?;
                StackEntry::BooleanValue(lhs | rhs)
            }
            Symbol::Operator(Operator::LParen | Operator::RParen) => {
                return Err(Error::MalformedPostfix {
                    reason: "parenthesis in postfix sequence",
                });
            }
        };
        stack.push(entry);
    }

    match stack.pop() {
        Some(entry) if stack.is_empty() => entry.resolve(assignment),
        Some(_) => Err(Error::MalformedPostfix {
            reason: "operands left without an operator",
        }),
        None => Err(Error::MalformedPostfix { reason: "empty expression" }),
    }
}

/// Evaluates an expression tree under `assignment`, short-circuiting `&` and `|`.
///
/// A variable that is skipped by short-circuiting is never looked up, so an
/// incomplete assignment may still succeed.
pub fn evaluate_tree(expr: &Expr, assignment: &Assignment) -> Result<bool> {
    // `value` holds the result of the most recently finished sub-tree.
    enum Task<'a> {
        Eval(&'a Expr),
        Negate,
        AndRhs(&'a Expr),
        OrRhs(&'a Expr),
    }

    let mut value = false;
    let mut tasks = vec![Task::Eval(expr)];

    while let Some(task) = tasks.pop() {
        match task {
            Task::Eval(Expr::Operand(var)) => value = assignment.lookup(*var)?,
            Task::Eval(Expr::Not(inner)) => {
                tasks.push(Task::Negate);
                tasks.push(Task::Eval(inner));
            }
            Task::Eval(Expr::And(lhs, rhs)) => {
                tasks.push(Task::AndRhs(rhs));
                tasks.push(Task::Eval(lhs));
            }
            Task::Eval(Expr::Or(lhs, rhs)) => {
                tasks.push(Task::OrRhs(rhs));
                tasks.push(Task::Eval(lhs));
            }
            Task::Negate => value = !value,
            // A false left operand is already the value of `&`.
            Task::AndRhs(rhs) => {
                if value {
                    tasks.push(Task::Eval(rhs));
                }
            }
            // A true left operand is already the value of `|`.
            Task::OrRhs(rhs) => {
                if !value {
                    tasks.push(Task::Eval(rhs));
                }
            }
        }
    }

    Ok(value)
}

/// Anything that can be evaluated to a boolean under an assignment.
pub trait Eval {
    fn eval(&self, assignment: &Assignment) -> Result<bool>;
}

impl Eval for Postfix {
    fn eval(&self, assignment: &Assignment) -> Result<bool> {
        evaluate_postfix(self, assignment)
    }
}

impl Eval for Expr {
    fn eval(&self, assignment: &Assignment) -> Result<bool> {
        evaluate_tree(self, assignment)
    }
}

impl Eval for Var {
    fn eval(&self, assignment: &Assignment) -> Result<bool> {
        assignment.lookup(*self)
    }
}

impl Assignment {
    pub fn eval(&self, value: &impl Eval) -> Result<bool> {
        value.eval(self)
    }
}
