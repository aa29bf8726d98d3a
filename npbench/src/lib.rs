//! npbench is a local, deterministic benchmark harness for four classic combinatorial
//! optimization problems: 3-SAT, Euclidean TSP, minimum vertex cover and 0/1 knapsack.
//!
//! A run is driven by a [`BenchConfig`]. All instances are drawn from a single seeded generator
//! and every track adaptively grows its instance size while both the global and its own
//! wall-clock budget have time left. The result is a serializable [`BenchReport`].
//!
//! The harness does not claim to solve NP-hard problems at scale. Exact solvers are capped and
//! the TSP solver is a heuristic.

pub mod accel;
pub mod bench;
pub mod budget;
pub mod config;
pub mod cover;
pub mod knapsack;
pub mod report;
pub mod sat;
pub mod tsp;

pub use npbench_instance as instance;

pub use bench::{run_benchmarks, run_benchmarks_with};
pub use config::{BenchConfig, BenchConfigUpdate};
pub use report::BenchReport;
