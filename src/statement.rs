//! Parsed propositional statements.

use log::debug;

use crate::ast::Expr;
use crate::error::Result;
use crate::oracle::Oracle;
use crate::parser::to_postfix;
use crate::symbol::{Postfix, Symbol};
use crate::types::Var;

/// A formula together with everything derived from its text.
///
/// The text is parsed eagerly in [`Statement::new`]; the postfix sequence and
/// the tree are never modified afterwards.
#[derive(Debug, Clone)]
pub struct Statement {
    text: String,
    postfix: Postfix,
    tree: Expr,
    variables: Vec<Var>,
    repeated: bool,
}

impl Statement {
    /// Parses `text` into a statement.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let postfix = to_postfix(&text)?;
        let tree = Expr::from_postfix(&postfix)?;

        // Postfix keeps operands in textual order, so this is first-occurrence order.
        let mut variables = Vec::new();
        let mut repeated = false;
        for symbol in &postfix {
            if let Symbol::Operand(var) = *symbol {
                if variables.contains(&var) {
                    repeated = true;
                } else {
                    variables.push(var);
                }
            }
        }
        debug!("Statement::new({:?}): postfix {}, variables {:?}", text, postfix, variables);

        Ok(Self {
            text,
            postfix,
            tree,
            variables,
            repeated,
        })
    }

    /// The original infix text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn postfix(&self) -> &Postfix {
        &self.postfix
    }

    pub fn tree(&self) -> &Expr {
        &self.tree
    }

    /// Distinct variables in order of first occurrence in the text.
    pub fn variables(&self) -> &[Var] {
        &self.variables
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Whether some variable occurs more than once in the text.
    pub fn has_repeated_variable(&self) -> bool {
        self.repeated
    }

    /// Decides whether this statement is a tautology, with the default oracle.
    pub fn is_tautology(&self) -> Result<bool> {
        Oracle::default().decide(self)
    }
}

impl std::str::FromStr for Statement {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Statement::new(s)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::error::Error;

    #[test]
    fn test_new() {
        let statement = Statement::new("(b & a) | !b").unwrap();
        assert_eq!(statement.text(), "(b & a) | !b");
        assert_eq!(statement.postfix().to_string(), "ba&b!|");
        assert_eq!(statement.tree().to_string(), "((b & a) | !b)");
        assert_eq!(statement.variables(), &[Var::new('b'), Var::new('a')]);
        assert_eq!(statement.num_variables(), 2);
        assert!(statement.has_repeated_variable());
    }

    #[test]
    fn test_unique_variables() {
        let statement: Statement = "a & b | c".parse().unwrap();
        assert!(!statement.has_repeated_variable());
        assert_eq!(statement.num_variables(), 3);
    }

    #[test]
    fn test_new_errors() {
        assert_eq!(
            Statement::new("(a & b").unwrap_err(),
            Error::MismatchedParenthesis { position: 0 }
        );
        assert_eq!(
            Statement::new("a ? b").unwrap_err(),
            Error::InvalidToken { token: '?', position: 2 }
        );
    }

    #[test]
    fn test_is_tautology() {
        assert_eq!(Statement::new("a | !a").unwrap().is_tautology(), Ok(true));
        assert_eq!(Statement::new("a").unwrap().is_tautology(), Ok(false));
    }

    #[test]
    fn test_evaluation_error_is_not_a_verdict() {
        // Variable list out of sync with the tree: `b` is never bound.
        let mut statement = Statement::new("(a & !a) | b").unwrap();
        statement.variables.retain(|&var| var != Var::new('b'));
        assert_eq!(statement.is_tautology(), Err(Error::UnboundVariable(Var::new('b'))));
    }

    #[test]
    fn test_deep_statement_drop() {
        let statement = Statement::new("!".repeat(200_000) + "a").unwrap();
        assert_eq!(statement.num_variables(), 1);
        assert!(!statement.has_repeated_variable());
        drop(statement.clone());
        drop(statement);
    }
}
