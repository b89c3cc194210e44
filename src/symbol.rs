//! Symbols of the formula language and postfix sequences built from them.

use std::fmt;

use crate::types::Var;

/// Operator tokens, including the grouping parentheses.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operator {
    Not,
    And,
    Or,
    LParen,
    RParen,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Not,
        Operator::And,
        Operator::Or,
        Operator::LParen,
        Operator::RParen,
    ];

    /// Returns the operator written as `c`, if any.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '!' => Some(Operator::Not),
            '&' => Some(Operator::And),
            '|' => Some(Operator::Or),
            '(' => Some(Operator::LParen),
            ')' => Some(Operator::RParen),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Operator::Not => '!',
            Operator::And => '&',
            Operator::Or => '|',
            Operator::LParen => '(',
            Operator::RParen => ')',
        }
    }

    /// Binding strength used by the shunting-yard conversion.
    ///
    /// `&` and `|` share a level, so mixed chains group left to right.
    /// `(` is a barrier and is never popped by comparison. `)` never sits on
    /// the operator stack.
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Not => 3,
            Operator::And | Operator::Or => 2,
            Operator::LParen => 1,
            Operator::RParen => 0,
        }
    }

    pub const fn is_right_associative(self) -> bool {
        matches!(self, Operator::Not)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A single token: either a variable occurrence or an operator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Symbol {
    Operand(Var),
    Operator(Operator),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Operand(var) => write!(f, "{}", var),
            Symbol::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// A formula in postfix (reverse Polish) order.
///
/// Produced by [`to_postfix`][crate::parser::to_postfix], so it never contains
/// parentheses. Displays as the concatenation of its symbols, e.g. `abc|&`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct Postfix(Vec<Symbol>);

impl Postfix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, symbol: Symbol) {
        debug_assert!(
            !matches!(symbol, Symbol::Operator(Operator::LParen | Operator::RParen)),
            "Postfix sequences never contain parentheses"
        );
        self.0.push(symbol);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.0.iter()
    }
}

impl FromIterator<Symbol> for Postfix {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut postfix = Postfix::new();
        for symbol in iter {
            postfix.push(symbol);
        }
        postfix
    }
}

impl<'a> IntoIterator for &'a Postfix {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_chars() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_char(op.to_char()), Some(op));
        }
        assert_eq!(Operator::from_char('a'), None);
        assert_eq!(Operator::from_char('^'), None);
    }

    #[test]
    fn test_precedence_table() {
        assert!(Operator::Not.precedence() > Operator::And.precedence());
        assert_eq!(Operator::And.precedence(), Operator::Or.precedence());
        assert!(Operator::And.precedence() > Operator::LParen.precedence());
        assert!(Operator::Not.is_right_associative());
        assert!(!Operator::And.is_right_associative());
        assert!(!Operator::Or.is_right_associative());
    }

    #[test]
    fn test_postfix_display() {
        let postfix: Postfix = [
            Symbol::Operand(Var::new('a')),
            Symbol::Operator(Operator::Not),
            Symbol::Operand(Var::new('b')),
            Symbol::Operator(Operator::And),
        ]
        .into_iter()
        .collect();
        assert_eq!(postfix.len(), 4);
        assert_eq!(postfix.to_string(), "a!b&");
    }
}
