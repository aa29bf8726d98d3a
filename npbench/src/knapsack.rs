//! Exact 0/1 knapsack by dynamic programming over the capacity.
use std::time::Instant;

use log::info;

use npbench_instance::{Generator, KnapsackInstance};

use crate::config::BenchConfig;
use crate::report::KnapsackResult;

/// An optimal item selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnapsackSolution {
    pub best_value: u64,
    /// Indices of the picked items in increasing order.
    pub picked: Vec<usize>,
}

/// Flat `items × (capacity + 1)` table of "item taken at this capacity" flags.
struct KeepTable {
    width: usize,
    flags: Vec<bool>,
}

impl KeepTable {
    fn new(items: usize, width: usize) -> KeepTable {
        KeepTable {
            width,
            flags: vec![false; items * width],
        }
    }

    #[inline]
    fn set(&mut self, item: usize, capacity: usize) {
        self.flags[item * self.width + capacity] = true;
    }

    #[inline]
    fn get(&self, item: usize, capacity: usize) -> bool {
        self.flags[item * self.width + capacity]
    }
}

/// Solve a 0/1 knapsack instance exactly.
///
/// Runs in `O(items × capacity)` time and space. The chosen set is reconstructed from the
/// smallest capacity attaining the best value.
pub fn solve(instance: &KnapsackInstance) -> KnapsackSolution {
    let capacity = instance.capacity as usize;
    let width = capacity + 1;
    let items = &instance.items;

    let mut best = vec![0u64; width];
    let mut keep = KeepTable::new(items.len(), width);

    for (index, item) in items.iter().enumerate() {
        let weight = item.weight as usize;
        if weight > capacity {
            continue;
        }
        // Descending capacities so that each item is used at most once.
        for c in (weight..width).rev() {
            let candidate = best[c - weight] + item.value;
            if candidate > best[c] {
                best[c] = candidate;
                keep.set(index, c);
            }
        }
    }

    let best_capacity = (0..width).fold(0, |best_c, c| {
        if best[c] > best[best_c] {
            c
        } else {
            best_c
        }
    });

    let mut picked = vec![];
    let mut c = best_capacity;
    for index in (0..items.len()).rev() {
        if keep.get(index, c) {
            picked.push(index);
            c -= items[index].weight as usize;
        }
    }
    picked.reverse();

    KnapsackSolution {
        best_value: best[best_capacity],
        picked,
    }
}

/// Generate and solve the fixed-size knapsack instance.
pub fn run_track(generator: &mut Generator, config: &BenchConfig) -> KnapsackResult {
    let start = Instant::now();

    let instance = generator.knapsack(
        config.knapsack_items,
        config.knapsack_capacity,
        config.knapsack_max_weight,
        config.knapsack_max_value,
    );
    let solution = solve(&instance);

    let result = KnapsackResult {
        n: instance.items.len(),
        capacity: instance.capacity,
        best_value: solution.best_value,
        picked_count: solution.picked.len(),
        seconds: start.elapsed().as_secs_f64(),
        note: "Exact DP (pseudo-polynomial in capacity).",
    };

    info!(
        "Knapsack: n={} capacity={} best value {} ({} items) in {:.3}s",
        result.n, result.capacity, result.best_value, result.picked_count, result.seconds
    );
    result
}
