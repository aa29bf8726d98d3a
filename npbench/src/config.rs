//! Benchmark configuration.
use serde::Deserialize;
use thiserror::Error;

use npbench_macros::DocDefault;

/// Parameters of a benchmark run.
///
/// The configuration is fixed for the duration of a run. Values are not range checked, a
/// non-positive budget simply makes every track exit before its first iteration.
#[derive(DocDefault, Clone, Debug, PartialEq)]
pub struct BenchConfig {
    /// Seed of the instance generator shared by all tracks. (Default: 1337)
    pub seed: u64,

    /// Global wall-clock budget in minutes. (Default: 5.0)
    pub minutes: f64,

    /// Per-track budget in seconds. If unset a quarter of the global budget, at least one second.
    /// (Default: None)
    pub per_problem_max_seconds: Option<f64>,

    /// Allow accelerated backends for the TSP distance matrix. (Default: true)
    pub use_accelerator: bool,

    /// Minimum remaining time in seconds required to start another iteration. (Default: 0.25)
    pub guard_seconds: f64,

    /// Number of variables of the first 3-SAT instance. (Default: 12)
    pub sat_start_vars: usize,

    /// Number of 3-SAT clauses per variable. (Default: 4)
    pub sat_clause_ratio: usize,

    /// The 3-SAT search explores at most 2^min(n, sat_max_node_bits) assignments. (Default: 22)
    pub sat_max_node_bits: u32,

    /// Number of points of the TSP instance. (Default: 200)
    pub tsp_points: usize,

    /// Maximal number of 2-opt swaps. (Default: 1000)
    pub tsp_max_swaps: usize,

    /// Number of vertices of the first vertex cover instance. (Default: 22)
    pub cover_start_vertices: usize,

    /// Edge probability of vertex cover instances. (Default: 0.2)
    pub cover_edge_probability: f64,

    /// Largest cover size tried before giving up on an instance. (Default: 10)
    pub cover_max_k: usize,

    /// Number of knapsack items. (Default: 300)
    pub knapsack_items: usize,

    /// Knapsack capacity. (Default: 2000)
    pub knapsack_capacity: u64,

    /// Item weights are drawn from 1..=knapsack_max_weight. (Default: 50)
    pub knapsack_max_weight: u64,

    /// Item values are drawn from 1..=knapsack_max_value. (Default: 100)
    pub knapsack_max_value: u64,
}

impl BenchConfig {
    /// The global budget in seconds.
    pub fn budget_seconds(&self) -> f64 {
        self.minutes * 60.0
    }

    /// The budget of a single track in seconds.
    pub fn per_problem_seconds(&self) -> f64 {
        match self.per_problem_max_seconds {
            Some(seconds) => seconds,
            None => (self.budget_seconds() / 4.0).max(1.0),
        }
    }
}

/// Errors while reading a configuration update.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A partial configuration.
///
/// Every field overrides the corresponding field of a [`BenchConfig`] when present.
#[derive(Deserialize, Default, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BenchConfigUpdate {
    pub seed: Option<u64>,
    pub minutes: Option<f64>,
    pub per_problem_max_seconds: Option<f64>,
    pub use_accelerator: Option<bool>,
    pub guard_seconds: Option<f64>,
    pub sat_start_vars: Option<usize>,
    pub sat_clause_ratio: Option<usize>,
    pub sat_max_node_bits: Option<u32>,
    pub tsp_points: Option<usize>,
    pub tsp_max_swaps: Option<usize>,
    pub cover_start_vertices: Option<usize>,
    pub cover_edge_probability: Option<f64>,
    pub cover_max_k: Option<usize>,
    pub knapsack_items: Option<usize>,
    pub knapsack_capacity: Option<u64>,
    pub knapsack_max_weight: Option<u64>,
    pub knapsack_max_value: Option<u64>,
}

macro_rules! for_each_field {
    ($m:ident!($($args:tt)*)) => {
        $m!(
            $($args)*;
            seed,
            minutes,
            per_problem_max_seconds,
            use_accelerator,
            guard_seconds,
            sat_start_vars,
            sat_clause_ratio,
            sat_max_node_bits,
            tsp_points,
            tsp_max_swaps,
            cover_start_vertices,
            cover_edge_probability,
            cover_max_k,
            knapsack_items,
            knapsack_capacity,
            knapsack_max_weight,
            knapsack_max_value
        )
    };
}

macro_rules! merge_fields {
    ($target:ident, $other:ident; $($field:ident),*) => {
        $(
            if $other.$field.is_some() {
                $target.$field = $other.$field;
            }
        )*
    };
}

macro_rules! apply_fields {
    ($update:ident, $config:ident; $($field:ident),*) => {
        $(
            if let Some(value) = $update.$field {
                apply_fields!(@set $config, $field, value);
            }
        )*
    };
    (@set $config:ident, per_problem_max_seconds, $value:ident) => {
        $config.per_problem_max_seconds = Some($value);
    };
    (@set $config:ident, $field:ident, $value:ident) => {
        $config.$field = $value;
    };
}

impl BenchConfigUpdate {
    /// Create an empty config update.
    pub fn new() -> BenchConfigUpdate {
        BenchConfigUpdate::default()
    }

    /// Parse a config update from TOML, e.g. a config file or a single `key = value` option.
    pub fn from_toml(input: &str) -> Result<BenchConfigUpdate, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Merge in another update; fields set in `other` take precedence.
    pub fn merge(&mut self, other: BenchConfigUpdate) {
        let target = self;
        for_each_field!(merge_fields!(target, other));
    }

    /// Apply the update to a configuration.
    pub fn apply(&self, config: &mut BenchConfig) {
        let update = self;
        for_each_field!(apply_fields!(update, config));
    }
}
