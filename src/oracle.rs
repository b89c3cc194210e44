//! Tautology decision by exhaustive enumeration.
//!
//! The [`Oracle`] works in two phases:
//!
//! 1. **Read-once check.** If no variable occurs twice, the formula is
//!    read-once and can never be a tautology: a falsifying assignment is built
//!    directly by pushing the target value down the tree (see
//!    [`read_once_witness`]). The witness is checked before it is reported.
//! 2. **Enumeration.** Otherwise every assignment of the `n` distinct variables
//!    is tried in order `0..2^n`, where bit `k` of the counter is the value of the
//!    `k`-th variable by first occurrence. One [`Assignment`] buffer is reused
//!    across all iterations, and the first falsifying assignment stops the loop.
//!
//! Enumeration is exponential, so [`OracleConfig`] can bound it by an
//! iteration cap or a timeout, and [`Oracle::check_with`] accepts a
//! cancellation predicate. A bounded run that stops early reports
//! [`Verdict::Unknown`].

use std::time::{Duration, Instant};

use log::{debug, trace};
use num_bigint::BigUint;

use crate::ast::Expr;
use crate::error::Result;
use crate::eval::evaluate_tree;
use crate::statement::Statement;
use crate::types::Assignment;

/// Configuration for the [`Oracle`].
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Reject read-once formulas without enumerating (default: true).
    pub fast_reject: bool,
    /// Maximum number of assignments to evaluate (default: unbounded).
    pub max_assignments: Option<u64>,
    /// Wall-clock budget for enumeration (default: unbounded).
    pub timeout: Option<Duration>,
}

impl OracleConfig {
    /// Whether an iteration cap or a timeout can cut enumeration short.
    pub fn is_bounded(&self) -> bool {
        self.max_assignments.is_some() || self.timeout.is_some()
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            fast_reject: true,
            max_assignments: None,
            timeout: None,
        }
    }
}

/// Outcome of a tautology check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Every one of the `checked` assignments satisfies the formula.
    Tautology { checked: u64 },
    /// `counterexample` falsifies the formula. `checked` is the number of
    /// enumerated assignments, 0 when the read-once check decided.
    NotTautology { counterexample: Assignment, checked: u64 },
    /// Enumeration was stopped by a limit or by cancellation after `checked`
    /// assignments, all of which satisfied the formula.
    Unknown { checked: u64 },
}

impl Verdict {
    /// `Some(true)` for a tautology, `Some(false)` for a refuted formula,
    /// `None` if the check was cut short.
    pub fn is_tautology(&self) -> Option<bool> {
        match self {
            Verdict::Tautology { .. } => Some(true),
            Verdict::NotTautology { .. } => Some(false),
            Verdict::Unknown { .. } => None,
        }
    }

    pub fn counterexample(&self) -> Option<&Assignment> {
        match self {
            Verdict::NotTautology { counterexample, .. } => Some(counterexample),
            _ => None,
        }
    }
}

/// Brute-force tautology checker.
#[derive(Debug, Clone, Default)]
pub struct Oracle {
    config: OracleConfig,
}

impl Oracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: OracleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Checks `statement`, honouring the configured limits.
    pub fn check(&self, statement: &Statement) -> Result<Verdict> {
        self.check_with(statement, || false)
    }

    /// Checks `statement`, polling `interrupt` before each assignment.
    ///
    /// Enumeration stops with [`Verdict::Unknown`] as soon as `interrupt`
    /// returns `true`.
    pub fn check_with<F>(&self, statement: &Statement, mut interrupt: F) -> Result<Verdict>
    where
        F: FnMut() -> bool,
    {
        let tree = statement.tree();
        let vars = statement.variables();

        if self.config.fast_reject && !statement.has_repeated_variable() {
            let mut witness = Assignment::new();
            read_once_witness(tree, false, &mut witness);
            if !evaluate_tree(tree, &witness)? {
                debug!("Read-once formula {:?} refuted by {}", statement.text(), witness);
                return Ok(Verdict::NotTautology {
                    counterexample: witness,
                    checked: 0,
                });
            }
        }

        let total: u64 = 1 << vars.len();
        debug!("Enumerating {} assignments of {} variables", total, vars.len());

        let start = Instant::now();
        let mut assignment = Assignment::all_false(vars);

        for bits in 0..total {
            if self.config.max_assignments.is_some_and(|max| bits >= max)
                || self.config.timeout.is_some_and(|timeout| start.elapsed() >= timeout)
                || interrupt()
            {
                debug!("Enumeration stopped after {} of {} assignments", bits, total);
                return Ok(Verdict::Unknown { checked: bits });
            }

            assignment.assign_bits(vars, bits);
            let value = evaluate_tree(tree, &assignment)?;
            trace!("{} -> {}", assignment, value);

            if !value {
                debug!("Counterexample {} after {} assignments", assignment, bits + 1);
                return Ok(Verdict::NotTautology {
                    counterexample: assignment,
                    checked: bits + 1,
                });
            }
        }

        debug!("All {} assignments satisfy {:?}", total, statement.text());
        Ok(Verdict::Tautology { checked: total })
    }

    /// Decides `statement`, ignoring the configured limits.
    ///
    /// Evaluation errors are propagated rather than read as "not a tautology".
    pub fn decide(&self, statement: &Statement) -> Result<bool> {
        let unbounded = Oracle::with_config(OracleConfig {
            fast_reject: self.config.fast_reject,
            ..OracleConfig::default()
        });
        let verdict = unbounded.check(statement)?;
        debug_assert!(verdict.is_tautology().is_some(), "unbounded check cannot be cut short");
        Ok(verdict.is_tautology() == Some(true))
    }

    /// Counts the assignments of the statement's variables that satisfy it.
    ///
    /// Always enumerates all `2^n` assignments; the configured limits do not apply.
    pub fn count_models(&self, statement: &Statement) -> Result<BigUint> {
        let vars = statement.variables();
        let mut assignment = Assignment::all_false(vars);
        let mut count = BigUint::ZERO;

        for bits in 0..(1u64 << vars.len()) {
            assignment.assign_bits(vars, bits);
            if evaluate_tree(statement.tree(), &assignment)? {
                count += 1u32;
            }
        }

        debug!("{:?} has {} models", statement.text(), count);
        Ok(count)
    }
}

/// Extends `assignment` so that the read-once `expr` evaluates to `target`.
///
/// The requirements pushed to the two children of a binary node never
/// conflict because they share no variables. If a variable does occur twice,
/// its last write wins and the result must be re-checked by the caller.
pub fn read_once_witness(expr: &Expr, target: bool, assignment: &mut Assignment) {
    let mut stack = vec![(expr, target)];
    while let Some((expr, target)) = stack.pop() {
        match expr {
            Expr::Operand(var) => assignment.set(*var, target),
            Expr::Not(inner) => stack.push((&**inner, !target)),
            // Both operands at `target` makes `&` and `|` equal to `target`.
            Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                stack.push((&**rhs, target));
                stack.push((&**lhs, target));
            }
        }
    }
}

/// Returns `true` if `text` is a tautology.
///
/// # Examples
///
/// ```
/// use tautology_rs::is_tautology;
///
/// assert_eq!(is_tautology("a | !a"), Ok(true));
/// assert_eq!(is_tautology("a & b | c"), Ok(false));
/// assert!(is_tautology("(a | b").is_err());
/// ```
pub fn is_tautology(text: &str) -> Result<bool> {
    let statement = Statement::new(text)?;
    Oracle::default().decide(&statement)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::error::Error;
    use crate::parser::parse;
    use crate::types::Var;

    fn check(text: &str) -> Verdict {
        Oracle::default().check(&Statement::new(text).unwrap()).unwrap()
    }

    #[test]
    fn test_single_variable() {
        assert_eq!(is_tautology("a"), Ok(false));
        assert_eq!(is_tautology("!a"), Ok(false));
    }

    #[test]
    fn test_excluded_middle() {
        assert_eq!(is_tautology("a | !a"), Ok(true));
        assert_eq!(check("a | !a"), Verdict::Tautology { checked: 2 });
    }

    #[test]
    fn test_parse_error_propagates() {
        assert_eq!(is_tautology("(a | !a"), Err(Error::MismatchedParenthesis { position: 0 }));
        assert_eq!(is_tautology("a)"), Err(Error::MismatchedParenthesis { position: 1 }));
        assert!(matches!(is_tautology(""), Err(Error::MalformedPostfix { .. })));
    }

    #[test]
    fn test_read_once_rejected_without_enumeration() {
        match check("a & b | c") {
            Verdict::NotTautology { counterexample, checked } => {
                assert_eq!(checked, 0);
                assert_eq!(evaluate_tree(&parse("a & b | c").unwrap(), &counterexample), Ok(false));
            }
            other => panic!("expected a refutation, got {:?}", other),
        }
    }

    #[test]
    fn test_read_once_witness() {
        for text in ["a", "!a", "a | b", "!(a | b)", "!(!a & !b) | (c & !d)", "a | b & c | !d"] {
            let expr = parse(text).unwrap();
            for target in [false, true] {
                let mut assignment = Assignment::new();
                read_once_witness(&expr, target, &mut assignment);
                assert_eq!(assignment.len(), expr.variables().len());
                assert_eq!(evaluate_tree(&expr, &assignment), Ok(target), "{} -> {}", text, target);
            }
        }
    }

    #[test]
    fn test_fast_reject_disabled() {
        let oracle = Oracle::with_config(OracleConfig {
            fast_reject: false,
            ..OracleConfig::default()
        });
        let verdict = oracle.check(&Statement::new("a & b | c").unwrap()).unwrap();
        // First assignment is all-false, which already falsifies the formula.
        assert_eq!(
            verdict,
            Verdict::NotTautology {
                counterexample: Assignment::from([('a', false), ('b', false), ('c', false)]),
                checked: 1,
            }
        );
    }

    #[test]
    fn test_counterexample_is_first_in_order() {
        // Bit 0 is `a`, bit 1 is `b`: fails first at a=1, b=0.
        let verdict = check("!a | b | (b & !b)");
        assert_eq!(
            verdict,
            Verdict::NotTautology {
                counterexample: Assignment::from([('a', true), ('b', false)]),
                checked: 2,
            }
        );
        assert_eq!(verdict.is_tautology(), Some(false));
        assert!(verdict.counterexample().is_some());
    }

    #[test]
    fn test_iteration_cap() {
        let oracle = Oracle::with_config(OracleConfig {
            max_assignments: Some(3),
            ..OracleConfig::default()
        });
        let statement = Statement::new("(a | !a) & (b | !b) & (c | !c)").unwrap();
        let verdict = oracle.check(&statement).unwrap();
        assert_eq!(verdict, Verdict::Unknown { checked: 3 });
        assert_eq!(verdict.is_tautology(), None);
        assert_eq!(oracle.decide(&statement), Ok(true));
        assert_eq!(oracle.config().max_assignments, Some(3));
        assert!(oracle.config().is_bounded());
        assert!(!Oracle::default().config().is_bounded());
    }

    #[test]
    fn test_cap_not_reached() {
        let oracle = Oracle::with_config(OracleConfig {
            max_assignments: Some(4),
            ..OracleConfig::default()
        });
        let statement = Statement::new("(a | !a) & (b | !b)").unwrap();
        assert_eq!(oracle.check(&statement), Ok(Verdict::Tautology { checked: 4 }));
    }

    #[test]
    fn test_zero_timeout() {
        let oracle = Oracle::with_config(OracleConfig {
            timeout: Some(Duration::ZERO),
            ..OracleConfig::default()
        });
        let statement = Statement::new("a | !a").unwrap();
        assert_eq!(oracle.check(&statement), Ok(Verdict::Unknown { checked: 0 }));
    }

    #[test]
    fn test_interrupt() {
        let statement = Statement::new("(a | !a) & (b | !b) & (c | !c)").unwrap();
        let mut polls = 0;
        let verdict = Oracle::default()
            .check_with(&statement, || {
                polls += 1;
                polls > 5
            })
            .unwrap();
        assert_eq!(verdict, Verdict::Unknown { checked: 5 });
    }

    #[test]
    fn test_count_models() {
        let oracle = Oracle::default();
        let count = |text: &str| oracle.count_models(&Statement::new(text).unwrap()).unwrap();
        assert_eq!(count("a"), BigUint::from(1u32));
        assert_eq!(count("a | !a"), BigUint::from(2u32));
        assert_eq!(count("a & !a"), BigUint::from(0u32));
        assert_eq!(count("a | b"), BigUint::from(3u32));
        assert_eq!(count("a & b | c"), BigUint::from(5u32));
    }

    #[test]
    fn test_count_models_of_tautology() {
        let text = ('a'..='l')
            .map(|c| format!("({} | !{})", c, c))
            .collect::<Vec<_>>()
            .join(" & ");
        let count = Oracle::default().count_models(&Statement::new(text).unwrap()).unwrap();
        assert_eq!(count, BigUint::from(2u32).pow(12));
    }

    #[test]
    fn test_deep_formulas() {
        let chain = vec!["a"; 100_000].join(" & ");
        assert_eq!(is_tautology(&chain), Ok(false));
        assert_eq!(is_tautology(&(chain + " | !a")), Ok(true));

        // Read-once, so refuted by the witness without enumeration.
        let negations = "!".repeat(100_000) + "a";
        match check(&negations) {
            Verdict::NotTautology { counterexample, checked } => {
                assert_eq!(checked, 0);
                assert_eq!(counterexample, Assignment::from([('a', false)]));
            }
            other => panic!("expected a refutation, got {:?}", other),
        }

        let mut assignment = Assignment::new();
        read_once_witness(&parse(&("!".repeat(100_001) + "a")).unwrap(), false, &mut assignment);
        assert_eq!(assignment, Assignment::from([('a', true)]));
    }

    #[test]
    fn test_variable_order() {
        let statement = Statement::new("(c | !c) & (a | !b) & (b | !a)").unwrap();
        assert_eq!(statement.variables(), &[Var::new('c'), Var::new('a'), Var::new('b')]);
        let verdict = check("(c | !c) & (a | !b) & (b | !a)");
        // c is bit 0, a is bit 1: the first failure is c=0, a=1, b=0.
        assert_eq!(
            verdict.counterexample(),
            Some(&Assignment::from([('a', true), ('b', false), ('c', false)]))
        );
    }
}
