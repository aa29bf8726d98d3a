//! Literals and variables.
use std::{fmt, ops};

/// The backing type used to represent literals and variables.
pub type LitIdx = u32;

/// A boolean variable.
///
/// Variables are identified by a 0-based index. For user IO a 1-based index is used, to allow
/// denoting negated variables using negative integers, as in the DIMACS CNF format.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Var {
    index: LitIdx,
}

impl Var {
    /// Creates a variable from a 1-based index as used in the DIMCAS CNF encoding.
    #[inline]
    pub fn from_dimacs(number: isize) -> Var {
        debug_assert!(number > 0);
        Var::from_index((number - 1) as usize)
    }

    /// Creates a variable from a 0-based index.
    #[inline]
    pub fn from_index(index: usize) -> Var {
        debug_assert!(index <= Var::max_var().index());
        Var {
            index: index as LitIdx,
        }
    }

    /// The 1-based index representing this variable in the DIMACS CNF encoding.
    #[inline]
    pub fn to_dimacs(self) -> isize {
        (self.index + 1) as isize
    }

    /// The 0-based index representing this variable.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// The variable with largest index that is supported.
    ///
    /// One bit of the backing integer is reserved for the negation flag of `Lit`.
    pub const fn max_var() -> Var {
        Var {
            index: LitIdx::max_value() >> 1,
        }
    }

    /// Creates a literal from this var and a `bool` that is `true` when the literal is negated.
    #[inline]
    pub fn lit(self, negated: bool) -> Lit {
        Lit::new(self, negated)
    }
}

/// Uses the 1-based DIMACS CNF encoding.
impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

/// A boolean literal: a variable together with a negation flag.
///
/// Internally a literal is a single integer, two times the index of its variable plus one when
/// the literal is negated.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Lit {
    code: LitIdx,
}

impl Lit {
    /// Creates a literal from a `Var` and its negation flag.
    #[inline]
    pub fn new(var: Var, negated: bool) -> Lit {
        Lit {
            code: (var.index << 1) | (negated as LitIdx),
        }
    }

    /// Creates a literal from a 0-based variable index and its negation flag.
    #[inline]
    pub fn from_index(index: usize, negated: bool) -> Lit {
        Lit::new(Var::from_index(index), negated)
    }

    /// Creates a literal from a non-zero integer.
    ///
    /// The absolute value is used as 1-based index, a negative sign negates the literal.
    #[inline]
    pub fn from_dimacs(number: isize) -> Lit {
        Lit::new(Var::from_dimacs(number.abs()), number < 0)
    }

    /// 1-based integer representation of the literal, opposite of `from_dimacs`.
    #[inline]
    pub fn to_dimacs(self) -> isize {
        let number = self.var().to_dimacs();
        if self.is_negated() {
            -number
        } else {
            number
        }
    }

    /// 0-based index of the literal's variable.
    #[inline]
    pub fn index(self) -> usize {
        (self.code >> 1) as usize
    }

    /// The literal's variable.
    #[inline]
    pub fn var(self) -> Var {
        Var {
            index: self.code >> 1,
        }
    }

    /// Whether the literal is a negated variable.
    #[inline]
    pub fn is_negated(self) -> bool {
        (self.code & 1) != 0
    }

    /// Truth value of the literal given the value of its variable.
    #[inline]
    pub fn eval(self, value: bool) -> bool {
        value != self.is_negated()
    }
}

impl ops::Not for Lit {
    type Output = Lit;

    #[inline]
    fn not(self) -> Lit {
        Lit {
            code: self.code ^ 1,
        }
    }
}

/// Uses the 1-based DIMACS CNF encoding.
impl fmt::Debug for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
pub mod strategy {
    use super::*;
    use proptest::{prelude::*, *};

    pub fn var(index: impl Strategy<Value = usize>) -> impl Strategy<Value = Var> {
        index.prop_map(Var::from_index)
    }

    pub fn lit(index: impl Strategy<Value = usize>) -> impl Strategy<Value = Lit> {
        (var(index), bool::ANY).prop_map(|(var, negated)| var.lit(negated))
    }
}
