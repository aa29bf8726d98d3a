use proptest::{prelude::*, *};

use rand::seq::index;
use rand::Rng;

use crate::cnf::ThreeCnf;
use crate::lit::Lit;

/// Generate a satisfiable 3-CNF formula together with a planted satisfying assignment.
///
/// Clauses use three distinct variables with random polarities. A clause that the planted
/// assignment falsifies gets one of its literals flipped.
pub fn planted_three_cnf(
    vars: impl Strategy<Value = usize>,
    clause_count: impl Strategy<Value = usize>,
) -> impl Strategy<Value = (Vec<bool>, ThreeCnf)> {
    (vars, clause_count).prop_flat_map(|(vars, clause_count)| {
        collection::vec(bool::ANY, vars).prop_perturb(move |planted, mut rng| {
            let mut formula = ThreeCnf::with_var_count(vars);

            for _ in 0..clause_count {
                let chosen = index::sample(&mut rng, vars, 3);
                let mut clause = [Lit::from_index(0, false); 3];
                for (lit, var) in clause.iter_mut().zip(chosen.iter()) {
                    *lit = Lit::from_index(var, rng.gen());
                }
                if !clause.iter().any(|lit| lit.eval(planted[lit.index()])) {
                    let flip = rng.gen_range(0, 3);
                    clause[flip] = !clause[flip];
                }
                formula.add_clause(clause);
            }

            (planted, formula)
        })
    })
}
