//! 3-CNF formulas.
use std::cmp::max;
use std::fmt;

use crate::lit::Lit;

/// A clause of exactly three literals.
pub type Clause3 = [Lit; 3];

/// A formula in conjunctive normal form where every clause has exactly three literals.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct ThreeCnf {
    var_count: usize,
    clauses: Vec<Clause3>,
}

impl ThreeCnf {
    /// Create an empty formula.
    pub fn new() -> ThreeCnf {
        ThreeCnf::default()
    }

    /// Create an empty formula over `var_count` variables.
    pub fn with_var_count(var_count: usize) -> ThreeCnf {
        ThreeCnf {
            var_count,
            clauses: vec![],
        }
    }

    /// Number of variables in the formula.
    ///
    /// This also counts variables that appear in no clause if a variable with a higher index is
    /// present or the count was set explicitly.
    pub fn var_count(&self) -> usize {
        self.var_count
    }

    /// Number of clauses in the formula.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Appends a clause to the formula.
    pub fn add_clause(&mut self, clause: Clause3) {
        for &lit in clause.iter() {
            self.var_count = max(lit.index() + 1, self.var_count);
        }
        self.clauses.push(clause);
    }

    /// Iterator over all clauses.
    pub fn iter(&self) -> impl Iterator<Item = &Clause3> {
        self.clauses.iter()
    }

    /// Whether every clause has a true literal under the given assignment.
    ///
    /// `value` maps a variable index to its truth value.
    pub fn is_satisfied_by(&self, value: impl Fn(usize) -> bool) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.iter().any(|&lit| lit.eval(value(lit.index()))))
    }

    /// Whether the formula is satisfied by the assignment encoded in the bits of `mask`.
    ///
    /// Bit `i` of the mask is the value of variable `i`. Variables beyond the width of the mask
    /// are false.
    pub fn is_satisfied_by_mask(&self, mask: u64) -> bool {
        self.is_satisfied_by(|index| index < 64 && (mask >> index) & 1 == 1)
    }
}

/// Convert any iterable of three-literal clauses into a formula.
impl<F> From<F> for ThreeCnf
where
    F: IntoIterator<Item = Clause3>,
{
    fn from(clauses: F) -> ThreeCnf {
        let mut formula = ThreeCnf::new();
        for clause in clauses {
            formula.add_clause(clause);
        }
        formula
    }
}

impl fmt::Debug for ThreeCnf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.var_count(), f)?;
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
pub mod strategy {
    use super::*;

    use proptest::{collection::SizeRange, prelude::*, *};

    use crate::lit::strategy::lit;

    /// Random 3-CNF formulas, literals may repeat variables within a clause.
    pub fn three_cnf(
        vars: impl Strategy<Value = usize>,
        clauses: impl Into<SizeRange>,
    ) -> impl Strategy<Value = ThreeCnf> {
        let clauses = clauses.into();

        vars.prop_ind_flat_map(move |vars| {
            collection::vec(
                (lit(0..vars), lit(0..vars), lit(0..vars)).prop_map(|(a, b, c)| [a, b, c]),
                clauses.clone(),
            )
            .prop_map(move |clauses| {
                let mut formula = ThreeCnf::from(clauses);
                formula.var_count = max(formula.var_count, vars);
                formula
            })
        })
    }
}
