//! # tautology-rs: brute-force tautology checking
//!
//! **`tautology-rs`** decides whether a propositional formula over single-letter
//! variables is true under every assignment of its variables.
//!
//! ## Formula syntax
//!
//! ```text
//! statement := term (('&' | '|') term)*
//! term      := '!' term | '(' statement ')' | variable
//! variable  := 'a'..'z' | 'A'..'Z'
//! ```
//!
//! `!` binds tightest. `&` and `|` have **equal** precedence and group left to
//! right, so `a | b & c` reads as `(a | b) & c`. Whitespace is ignored.
//!
//! ## Basic Usage
//!
//! ```rust
//! use tautology_rs::{evaluate_postfix, evaluate_tree, is_tautology, parse, simplify, to_postfix};
//! use tautology_rs::{Assignment, Simplified};
//!
//! // 1. Convert to postfix and build the tree
//! let postfix = to_postfix("a & (b | !a)").unwrap();
//! assert_eq!(postfix.to_string(), "aba!|&");
//! let tree = parse("a & (b | !a)").unwrap();
//!
//! // 2. Evaluate under an assignment, both ways
//! let assignment = Assignment::from([('a', true), ('b', false)]);
//! assert_eq!(evaluate_postfix(&postfix, &assignment), Ok(false));
//! assert_eq!(evaluate_tree(&tree, &assignment), Ok(false));
//!
//! // 3. Simplify without assigning anything
//! assert_eq!(simplify(&parse("a | !a").unwrap()), Simplified::Const(true));
//!
//! // 4. Decide
//! assert_eq!(is_tautology("(!a | (a & a))"), Ok(true));
//! assert_eq!(is_tautology("a & b | c"), Ok(false));
//! ```
//!
//! ## Core Components
//!
//! - **[`parser`]**: shunting-yard conversion to [`Postfix`] and tree construction.
//! - **[`eval`]**: postfix and short-circuit tree evaluation.
//! - **[`simplify`][mod@simplify]**: local symbolic simplification.
//! - **[`oracle`]**: the tautology decision procedure, with optional limits.
//!
//! Logging goes through the [`log`] facade; no logger is installed by the library.

pub mod ast;
pub mod error;
pub mod eval;
pub mod oracle;
pub mod parser;
pub mod simplify;
pub mod statement;
pub mod symbol;
pub mod types;

pub use ast::Expr;
pub use error::{Error, Result};
pub use eval::{evaluate_postfix, evaluate_tree, Eval};
pub use oracle::{is_tautology, Oracle, OracleConfig, Verdict};
pub use parser::{parse, to_postfix};
pub use simplify::{simplify, Simplified};
pub use statement::Statement;
pub use symbol::{Operator, Postfix, Symbol};
pub use types::{Assignment, Var};
