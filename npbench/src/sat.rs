//! Exhaustive 3-SAT search with adaptive instance scaling.
use log::{debug, info};

use npbench_instance::{Generator, ThreeCnf};

use crate::budget::TrackBudget;
use crate::config::BenchConfig;
use crate::report::SatResult;

/// Brute force satisfiability check with a cap on explored assignments.
///
/// Assignments are enumerated as bit patterns in increasing numeric order, bit `i` being the
/// value of variable `i`, so the first satisfying assignment found is deterministic.
#[derive(Copy, Clone, Debug)]
pub struct ThreeSatSolver {
    max_nodes: u64,
}

impl ThreeSatSolver {
    /// Create a solver exploring at most `max_nodes` assignments.
    pub fn new(max_nodes: u64) -> ThreeSatSolver {
        ThreeSatSolver { max_nodes }
    }

    /// Solver for `var_count` variables with a cap of `2^min(var_count, max_bits)`.
    pub fn with_node_bits(var_count: usize, max_bits: u32) -> ThreeSatSolver {
        let bits = (var_count as u64).min(max_bits as u64) as u32;
        ThreeSatSolver::new(1u64.checked_shl(bits).unwrap_or(u64::max_value()))
    }

    pub fn max_nodes(&self) -> u64 {
        self.max_nodes
    }

    /// Search for a satisfying assignment.
    ///
    /// Returns `None` when no assignment within the node cap satisfies the formula, which does
    /// not imply unsatisfiability when the cap is below `2^var_count`.
    pub fn solve(&self, formula: &ThreeCnf) -> Option<Vec<bool>> {
        let var_count = formula.var_count();
        let space = 1u64
            .checked_shl(var_count as u32)
            .filter(|_| var_count < 64)
            .unwrap_or(u64::max_value());

        (0..space.min(self.max_nodes))
            .find(|&mask| formula.is_satisfied_by_mask(mask))
            .map(|mask| {
                (0..var_count)
                    .map(|index| index < 64 && (mask >> index) & 1 == 1)
                    .collect()
            })
    }
}

/// Grow random 3-SAT instances until one is not solved within the node cap or time runs out.
pub fn run_track(
    generator: &mut Generator,
    config: &BenchConfig,
    budget: &TrackBudget,
) -> SatResult {
    let mut result = SatResult {
        note: "Exact (exhaustive search, node capped).",
        ..SatResult::default()
    };

    let mut var_count = config.sat_start_vars.max(3);

    while budget.has_time() {
        let clause_count = config.sat_clause_ratio * var_count;
        let formula = generator.three_cnf(var_count, clause_count);
        result.attempted += 1;

        let solver = ThreeSatSolver::with_node_bits(var_count, config.sat_max_node_bits);
        match solver.solve(&formula) {
            Some(_) => {
                debug!("3-SAT: solved n={} m={}", var_count, clause_count);
                result.solved += 1;
                result.max_n = var_count;
                result.max_m = clause_count;
                var_count += 1;
            }
            None => {
                debug!(
                    "3-SAT: no solution for n={} within {} nodes",
                    var_count,
                    solver.max_nodes()
                );
                break;
            }
        }
    }

    result.seconds = budget.elapsed();
    info!(
        "3-SAT: max n={} m={} ({} of {} solved) in {:.3}s",
        result.max_n, result.max_m, result.solved, result.attempted, result.seconds
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use npbench_instance::{cnf3, test::planted_three_cnf};

    use crate::budget::Budget;

    #[test]
    fn first_assignment_in_bit_order() {
        let formula = cnf3![
            1, 2, 3;
            -1, 2, -3;
        ];

        let solver = ThreeSatSolver::new(8);
        assert_eq!(solver.solve(&formula), Some(vec![true, false, false]));
    }

    #[test]
    fn node_cap_stops_search() {
        let formula = cnf3![
            1, 2, 3;
            -1, 2, -3;
        ];

        assert_eq!(ThreeSatSolver::new(1).solve(&formula), None);
        assert_eq!(ThreeSatSolver::new(0).solve(&formula), None);
        assert!(ThreeSatSolver::new(2).solve(&formula).is_some());
    }

    #[test]
    fn unsatisfiable_formula() {
        // All eight sign patterns over three variables.
        let formula = cnf3![
            1, 2, 3;
            1, 2, -3;
            1, -2, 3;
            1, -2, -3;
            -1, 2, 3;
            -1, 2, -3;
            -1, -2, 3;
            -1, -2, -3;
        ];

        assert_eq!(ThreeSatSolver::new(u64::max_value()).solve(&formula), None);
    }

    #[test]
    fn node_cap_from_bits() {
        assert_eq!(ThreeSatSolver::with_node_bits(12, 22).max_nodes(), 1 << 12);
        assert_eq!(ThreeSatSolver::with_node_bits(30, 22).max_nodes(), 1 << 22);
        assert_eq!(
            ThreeSatSolver::with_node_bits(80, 70).max_nodes(),
            u64::max_value()
        );
    }

    #[test]
    fn track_without_budget() {
        let global = Budget::start(0.0);
        let budget = TrackBudget::start(&global, 10.0, 0.25);
        let mut generator = Generator::new(1);

        let result = run_track(&mut generator, &BenchConfig::default(), &budget);
        assert_eq!(result.attempted, 0);
        assert_eq!(result.max_n, 0);
    }

    #[test]
    fn track_scales_up() {
        let global = Budget::start(3600.0);
        let budget = TrackBudget::start(&global, 0.6, 0.25);
        let mut generator = Generator::new(1337);

        let config = BenchConfig {
            sat_start_vars: 5,
            sat_max_node_bits: 12,
            ..BenchConfig::default()
        };

        let result = run_track(&mut generator, &config, &budget);
        assert!(result.attempted >= 1);
        assert!(result.solved <= result.attempted);
        assert!(result.attempted - result.solved <= 1);
        if result.solved > 0 {
            assert_eq!(result.max_n, 5 + result.solved - 1);
            assert_eq!(result.max_m, 4 * result.max_n);
        }
    }

    proptest! {
        #[test]
        fn planted_formulas_are_solved(
            (_planted, formula) in planted_three_cnf(3..14usize, 0..60usize),
        ) {
            let solver = ThreeSatSolver::with_node_bits(formula.var_count(), 22);
            let model = solver.solve(&formula);

            prop_assert!(model.is_some());
            let model = model.unwrap();
            prop_assert_eq!(model.len(), formula.var_count());
            prop_assert!(formula.is_satisfied_by(|index| model[index]));
        }
    }
}
