///! Type-safe wrappers for propositional variables and their assignments.
///!
///! Variables are single ASCII letters. Keeping them behind a newtype means a
///! stray operator or digit can never end up as a key in an [`Assignment`].
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// A propositional variable, named by a single ASCII letter.
///
/// # Invariants
///
/// - The name is in `'a'..='z'` or `'A'..='Z'`
/// - Names are case-sensitive: `a` and `A` are distinct variables
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(char);

impl Var {
    /// Creates a new variable with the given name.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not an ASCII letter.
    pub fn new(name: char) -> Self {
        assert!(Var::is_valid_name(name), "Variable names must be ASCII letters, got {:?}", name);
        Var(name)
    }

    /// Returns `true` if `c` can name a variable.
    pub const fn is_valid_name(c: char) -> bool {
        c.is_ascii_alphabetic()
    }

    /// Returns the variable name.
    pub fn name(self) -> char {
        self.0
    }
}

impl TryFrom<char> for Var {
    type Error = char;

    fn try_from(c: char) -> std::result::Result<Self, Self::Error> {
        if Var::is_valid_name(c) {
            Ok(Var(c))
        } else {
            Err(c)
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Var> for char {
    fn from(var: Var) -> Self {
        var.0
    }
}

/// A mapping from variables to boolean values.
///
/// The key set is usually fixed once (one entry per distinct variable of a
/// statement) and only the values change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: HashMap<Var, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an assignment binding every variable in `vars` to `false`.
    pub fn all_false(vars: &[Var]) -> Self {
        vars.iter().map(|&v| (v, false)).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value bound to `var`, if any.
    pub fn get(&self, var: Var) -> Option<bool> {
        self.values.get(&var).copied()
    }

    /// Binds `var` to `value`, replacing any previous binding.
    pub fn set(&mut self, var: Var, value: bool) {
        self.values.insert(var, value);
    }

    /// Returns the value bound to `var`, or [`Error::UnboundVariable`].
    pub fn lookup(&self, var: Var) -> Result<bool> {
        self.get(var).ok_or(Error::UnboundVariable(var))
    }

    /// Overwrites the values of `vars` with the bits of `bits`.
    ///
    /// Bit `k` of `bits` (least significant first) becomes the value of `vars[k]`.
    pub fn assign_bits(&mut self, vars: &[Var], bits: u64) {
        for (k, &var) in vars.iter().enumerate() {
            self.set(var, (bits >> k) & 1 == 1);
        }
    }

    /// Iterates over bindings in variable-name order.
    pub fn iter(&self) -> impl Iterator<Item = (Var, bool)> + '_ {
        let mut pairs: Vec<(Var, bool)> = self.values.iter().map(|(&v, &b)| (v, b)).collect();
        pairs.sort_unstable();
        pairs.into_iter()
    }
}

impl FromIterator<(Var, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Var, bool)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(char, bool); N]> for Assignment {
    fn from(pairs: [(char, bool); N]) -> Self {
        pairs.into_iter().map(|(c, b)| (Var::new(c), b)).collect()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", var, value as u8)?;
        }
        write!(f, "}}")
    }
}
