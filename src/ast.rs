//! Expression trees.
//!
//! An [`Expr`] is built once from a postfix sequence and never mutated. Every
//! parent owns its children, so a tree is acyclic by construction.
//!
//! Formulas may nest arbitrarily deep (`!!!...a`, long `&` chains), so no walk
//! over a tree recurses: traversals, `Clone`, `Display` and `Drop` all keep
//! their pending work on the heap.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};
use crate::symbol::{Operator, Postfix, Symbol};
use crate::types::Var;

/// A propositional formula.
pub enum Expr {
    /// Variable occurrence (leaf)
    Operand(Var),
    /// Negation
    Not(Box<Expr>),
    /// Conjunction
    And(Box<Expr>, Box<Expr>),
    /// Disjunction
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn var(name: char) -> Self {
        Expr::Operand(Var::new(name))
    }

    pub fn not(inner: Self) -> Self {
        Expr::Not(Box::new(inner))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    /// Reduces a postfix sequence to a single tree.
    ///
    /// Operands push a leaf, `!` pops one node, `&` and `|` pop two. The first
    /// node popped becomes the right child, so [`Expr::to_postfix`] gives back
    /// the original sequence.
    ///
    /// Fails with [`Error::MalformedPostfix`] on stack underflow or when the
    /// scan does not end with exactly one node.
    pub fn from_postfix(postfix: &Postfix) -> Result<Self> {
        let mut stack: Vec<Expr> = Vec::with_capacity(postfix.len());

        for symbol in postfix {
            let node = match *symbol {
                Symbol::Operand(var) => Expr::Operand(var),
                Symbol::Operator(Operator::Not) => {
                    let inner = pop_operand(&mut stack)?;
                    Expr::not(inner)
                }
                Symbol::Operator(op @ (Operator::And | Operator::Or)) => {
                    let rhs = pop_operand(&mut stack)?;
                    let lhs = pop_operand(&mut stack)?;
                    if op == Operator::And {
                        Expr::and(lhs, rhs)
                    } else {
                        Expr::or(lhs, rhs)
                    }
                }
                Symbol::Operator(Operator::LParen | Operator::RParen) => {
                    return Err(Error::MalformedPostfix {
                        reason: "parenthesis in postfix sequence",
                    });
                }
            };
            stack.push(node);
        }

        match stack.pop() {
            Some(root) if stack.is_empty() => Ok(root),
            Some(_) => Err(Error::MalformedPostfix {
                reason: "operands left without an operator",
            }),
            None => Err(Error::MalformedPostfix { reason: "empty expression" }),
        }
    }

    /// Post-order traversal as a postfix sequence.
    pub fn to_postfix(&self) -> Postfix {
        // Explicit stack so very deep trees do not exhaust the call stack.
        enum Visit<'a> {
            Enter(&'a Expr),
            Exit(Operator),
        }

        let mut output = Postfix::new();
        let mut stack = vec![Visit::Enter(self)];

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Exit(op) => output.push(Symbol::Operator(op)),
                Visit::Enter(Expr::Operand(var)) => output.push(Symbol::Operand(*var)),
                Visit::Enter(Expr::Not(inner)) => {
                    stack.push(Visit::Exit(Operator::Not));
                    stack.push(Visit::Enter(inner));
                }
                Visit::Enter(Expr::And(lhs, rhs)) => {
                    stack.push(Visit::Exit(Operator::And));
                    stack.push(Visit::Enter(rhs));
                    stack.push(Visit::Enter(lhs));
                }
                Visit::Enter(Expr::Or(lhs, rhs)) => {
                    stack.push(Visit::Exit(Operator::Or));
                    stack.push(Visit::Enter(rhs));
                    stack.push(Visit::Enter(lhs));
                }
            }
        }

        output
    }

    /// Distinct variables in order of first (leftmost) occurrence.
    pub fn variables(&self) -> Vec<Var> {
        let mut vars = Vec::new();
        for symbol in &self.to_postfix() {
            if let Symbol::Operand(var) = *symbol {
                if !vars.contains(&var) {
                    vars.push(var);
                }
            }
        }
        vars
    }

    /// Depth of the expression tree (0 for leaves).
    pub fn depth(&self) -> usize {
        self.collapse(|node: Reduced<usize>| match node {
            Reduced::Operand(_) => 0,
            Reduced::Not(d) => 1 + d,
            Reduced::And(l, r) | Reduced::Or(l, r) => 1 + l.max(r),
        })
    }

    /// Size of the expression tree (number of nodes).
    pub fn size(&self) -> usize {
        self.collapse(|node: Reduced<usize>| match node {
            Reduced::Operand(_) => 1,
            Reduced::Not(s) => 1 + s,
            Reduced::And(l, r) | Reduced::Or(l, r) => 1 + l + r,
        })
    }

    /// Bottom-up fold: `f` sees every node once, after both of its children.
    fn collapse<R, F>(&self, mut f: F) -> R
    where
        F: FnMut(Reduced<R>) -> R,
    {
        // Ancestors of the current node that still wait for a result.
        enum Frame<'a, R> {
            Not,
            AndRhs(&'a Expr),
            OrRhs(&'a Expr),
            And(R),
            Or(R),
        }

        let mut frames: Vec<Frame<'_, R>> = Vec::new();
        let mut node = self;

        loop {
            // Descend along left operands to a leaf.
            let mut current = loop {
                match node {
                    Expr::Operand(var) => break f(Reduced::Operand(*var)),
                    Expr::Not(inner) => {
                        frames.push(Frame::Not);
                        node = &**inner;
                    }
                    Expr::And(lhs, rhs) => {
                        frames.push(Frame::AndRhs(rhs));
                        node = &**lhs;
                    }
                    Expr::Or(lhs, rhs) => {
                        frames.push(Frame::OrRhs(rhs));
                        node = &**lhs;
                    }
                }
            };

            // Ascend until some right operand is still unvisited.
            loop {
                match frames.pop() {
                    None => return current,
                    Some(Frame::Not) => current = f(Reduced::Not(current)),
                    Some(Frame::And(lhs)) => current = f(Reduced::And(lhs, current)),
                    Some(Frame::Or(lhs)) => current = f(Reduced::Or(lhs, current)),
                    Some(Frame::AndRhs(rhs)) => {
                        frames.push(Frame::And(current));
                        node = rhs;
                        break;
                    }
                    Some(Frame::OrRhs(rhs)) => {
                        frames.push(Frame::Or(current));
                        node = rhs;
                        break;
                    }
                }
            }
        }
    }
}

/// A node whose children were already folded to `R`.
enum Reduced<R> {
    Operand(Var),
    Not(R),
    And(R, R),
    Or(R, R),
}

fn pop_operand(stack: &mut Vec<Expr>) -> Result<Expr> {
    stack.pop().ok_or(Error::MalformedPostfix {
        reason: "operator is missing an operand",
    })
}

impl Clone for Expr {
    fn clone(&self) -> Self {
        self.collapse(|node| match node {
            Reduced::Operand(var) => Expr::Operand(var),
            Reduced::Not(inner) => Expr::not(inner),
            Reduced::And(lhs, rhs) => Expr::and(lhs, rhs),
            Reduced::Or(lhs, rhs) => Expr::or(lhs, rhs),
        })
    }
}

// Trees are equal exactly when their post-order sequences are, since every
// operator has a fixed number of operands.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.to_postfix() == other.to_postfix()
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_postfix().hash(state);
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        // Each detached node is dropped with leaf children only.
        while let Some(mut expr) = pending.pop() {
            detach_children(&mut expr, &mut pending);
        }
    }
}

/// Moves the composite children of `expr` to `pending`, leaving leaves behind.
fn detach_children(expr: &mut Expr, pending: &mut Vec<Expr>) {
    let mut detach = |child: &mut Expr| {
        if !matches!(child, Expr::Operand(_)) {
            pending.push(std::mem::replace(child, Expr::Operand(Var::new('a'))));
        }
    };
    match expr {
        Expr::Operand(_) => {}
        Expr::Not(inner) => detach(&mut **inner),
        Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
            detach(&mut **lhs);
            detach(&mut **rhs);
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a> {
            Node(&'a Expr),
            Text(&'static str),
        }

        let mut stack = vec![Piece::Node(self)];
        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Node(Expr::Operand(var)) => write!(f, "{}", var)?,
                Piece::Node(Expr::Not(inner)) => {
                    stack.push(Piece::Node(inner));
                    stack.push(Piece::Text("!"));
                }
                Piece::Node(Expr::And(lhs, rhs)) => {
                    stack.extend([
                        Piece::Text(")"),
                        Piece::Node(rhs),
                        Piece::Text(" & "),
                        Piece::Node(lhs),
                        Piece::Text("("),
                    ]);
                }
                Piece::Node(Expr::Or(lhs, rhs)) => {
                    stack.extend([
                        Piece::Text(")"),
                        Piece::Node(rhs),
                        Piece::Text(" | "),
                        Piece::Node(lhs),
                        Piece::Text("("),
                    ]);
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({})", self)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::parser::to_postfix;

    fn build(text: &str) -> Result<Expr> {
        Expr::from_postfix(&to_postfix(text).unwrap())
    }

    #[test]
    fn test_from_postfix_leaf() {
        assert_eq!(build("a").unwrap(), Expr::var('a'));
    }

    #[test]
    fn test_from_postfix_child_order() {
        assert_eq!(build("a & b").unwrap(), Expr::and(Expr::var('a'), Expr::var('b')));
        assert_eq!(
            build("!a | b").unwrap(),
            Expr::or(Expr::not(Expr::var('a')), Expr::var('b'))
        );
    }

    #[test]
    fn test_from_postfix_underflow() {
        let postfix: Postfix = [Symbol::Operand(Var::new('a')), Symbol::Operator(Operator::And)]
            .into_iter()
            .collect();
        assert_eq!(
            Expr::from_postfix(&postfix),
            Err(Error::MalformedPostfix {
                reason: "operator is missing an operand"
            })
        );

        let postfix: Postfix = [Symbol::Operator(Operator::Not)].into_iter().collect();
        assert!(Expr::from_postfix(&postfix).is_err());
    }

    #[test]
    fn test_from_postfix_leftover() {
        let postfix: Postfix = [Symbol::Operand(Var::new('a')), Symbol::Operand(Var::new('b'))]
            .into_iter()
            .collect();
        assert_eq!(
            Expr::from_postfix(&postfix),
            Err(Error::MalformedPostfix {
                reason: "operands left without an operator"
            })
        );
        assert_eq!(
            Expr::from_postfix(&Postfix::new()),
            Err(Error::MalformedPostfix { reason: "empty expression" })
        );
    }

    #[test]
    fn test_round_trip() {
        for text in [
            "a",
            "!a",
            "a & (b | c)",
            "!a & !b",
            "(a & (!b | b)) | (!a & (!b | b))",
            "!!(a | !b) & c | d",
        ] {
            let postfix = to_postfix(text).unwrap();
            let expr = Expr::from_postfix(&postfix).unwrap();
            assert_eq!(expr.to_postfix(), postfix, "round trip of {:?}", text);
        }
    }

    #[test]
    fn test_variables_first_occurrence() {
        let expr = build("(c & a) | (!b & a) | c").unwrap();
        assert_eq!(expr.variables(), vec![Var::new('c'), Var::new('a'), Var::new('b')]);
    }

    #[test]
    fn test_depth_and_size() {
        let expr = build("!a & (b | c)").unwrap();
        assert_eq!(expr.depth(), 2);
        assert_eq!(expr.size(), 6);
        assert_eq!(Expr::var('x').depth(), 0);
        assert_eq!(Expr::var('x').size(), 1);
    }

    #[test]
    fn test_display() {
        let expr = build("!(a | b) & !c").unwrap();
        assert_eq!(expr.to_string(), "(!(a | b) & !c)");
        assert_eq!(format!("{:?}", expr), "Expr((!(a | b) & !c))");
    }

    #[test]
    fn test_clone_and_eq() {
        let expr = build("!(a | b) & (c | !a)").unwrap();
        let copy = expr.clone();
        assert_eq!(copy, expr);
        assert_eq!(copy.to_postfix(), expr.to_postfix());
        assert_ne!(build("a & b").unwrap(), build("b & a").unwrap());
        assert_ne!(build("a & b").unwrap(), build("a | b").unwrap());
    }

    #[test]
    fn test_long_chain() {
        let n = 100_000;
        let expr = build(&vec!["a"; n].join(" & ")).unwrap();
        assert_eq!(expr.size(), 2 * n - 1);
        assert_eq!(expr.depth(), n - 1);
        assert_eq!(expr.to_string().len(), 6 * (n - 1) + 1);
        assert_eq!(expr.variables(), vec![Var::new('a')]);

        let copy = expr.clone();
        assert_eq!(copy, expr);
        drop(copy);
        drop(expr);
    }

    #[test]
    fn test_long_negation_prefix() {
        let n = 200_000;
        let expr = build(&("!".repeat(n) + "a")).unwrap();
        assert_eq!(expr.size(), n + 1);
        assert_eq!(expr.depth(), n);
        let text = expr.to_string();
        assert!(text.ends_with("!!a"));
        assert_eq!(text.len(), n + 1);
        drop(expr);
    }
}
