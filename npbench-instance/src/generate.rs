//! Seeded instance generation.
//!
//! A single [`Generator`] is shared by all benchmark tracks of a run. Every call advances the
//! same random state, so the instances produced for a seed depend on the order and number of
//! preceding calls.
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::cnf::ThreeCnf;
use crate::graph::Graph;
use crate::knapsack::{Item, KnapsackInstance};
use crate::lit::Lit;
use crate::point::Point;

/// Deterministic generator for all supported problem instances.
pub struct Generator {
    rng: StdRng,
}

impl Generator {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Generator {
        Generator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Random 3-CNF formula with `clause_count` clauses over `var_count` variables.
    ///
    /// The three variables of a clause are distinct, which requires `var_count >= 3`. Each
    /// literal is negated with probability 1/2.
    pub fn three_cnf(&mut self, var_count: usize, clause_count: usize) -> ThreeCnf {
        assert!(var_count >= 3, "a 3-CNF clause needs three distinct variables");

        let mut formula = ThreeCnf::with_var_count(var_count);
        for _ in 0..clause_count {
            let vars = index::sample(&mut self.rng, var_count, 3);
            let mut clause = [Lit::from_index(0, false); 3];
            for (lit, var) in clause.iter_mut().zip(vars.iter()) {
                *lit = Lit::from_index(var, self.rng.gen());
            }
            formula.add_clause(clause);
        }
        formula
    }

    /// `count` points with both coordinates uniform in `[0, 1)`.
    pub fn points(&mut self, count: usize) -> Vec<Point> {
        (0..count)
            .map(|_| Point::new(self.rng.gen(), self.rng.gen()))
            .collect()
    }

    /// Graph over `vertex_count` vertices containing each vertex pair with probability `p`.
    ///
    /// Pairs are visited in lexicographic order `(u, v)`, `u < v`.
    pub fn graph(&mut self, vertex_count: usize, p: f64) -> Graph {
        let mut graph = Graph::new(vertex_count);
        for u in 0..vertex_count {
            for v in u + 1..vertex_count {
                if self.rng.gen::<f64>() < p {
                    graph.add_edge(u, v);
                }
            }
        }
        graph
    }

    /// `count` items with weights in `1..=max_weight` and values in `1..=max_value`.
    ///
    /// Both `max_weight` and `max_value` must be at least 1.
    pub fn knapsack(
        &mut self,
        count: usize,
        capacity: u64,
        max_weight: u64,
        max_value: u64,
    ) -> KnapsackInstance {
        debug_assert!(
            max_weight >= 1 && max_value >= 1,
            "knapsack weights and values are drawn from 1..=max"
        );
        let items = (0..count)
            .map(|_| {
                let weight = self.rng.gen_range(1, max_weight + 1);
                let value = self.rng.gen_range(1, max_value + 1);
                Item::new(weight, value)
            })
            .collect();
        KnapsackInstance::new(items, capacity)
    }
}
