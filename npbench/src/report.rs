//! Serializable benchmark results.
use serde::Serialize;

use crate::accel::{Accelerators, Backend};

/// Result of the 3-SAT scaling track.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SatResult {
    /// Largest number of variables of a solved instance.
    pub max_n: usize,
    /// Number of clauses of that instance.
    pub max_m: usize,
    pub solved: usize,
    pub attempted: usize,
    pub seconds: f64,
    pub note: &'static str,
}

/// Result of the TSP track.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TspResult {
    /// Number of points, zero if no instance was solved.
    pub n: usize,
    /// Length of the nearest-neighbor tour.
    pub base_len: f64,
    /// Length after 2-opt refinement.
    pub improved_len: f64,
    pub improvement: f64,
    pub swaps: usize,
    /// Backend that computed the nearest-neighbor construction.
    pub backend: Backend,
    pub seconds: f64,
    pub note: &'static str,
}

/// Result of the vertex cover scaling track.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CoverResult {
    /// Number of vertices of the largest solved instance.
    pub n: usize,
    /// Cover size found for that instance.
    pub k: usize,
    /// Number of edges of that instance.
    pub m: usize,
    pub found: bool,
    pub seconds: f64,
    pub note: &'static str,
}

/// Result of the knapsack track.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct KnapsackResult {
    pub n: usize,
    pub capacity: u64,
    pub best_value: u64,
    pub picked_count: usize,
    pub seconds: f64,
    pub note: &'static str,
}

/// Per-track results; tracks skipped for lack of budget are absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Problems {
    #[serde(rename = "3sat", skip_serializing_if = "Option::is_none")]
    pub three_sat: Option<SatResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsp: Option<TspResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertex_cover: Option<CoverResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knapsack: Option<KnapsackResult>,
}

impl Problems {
    /// Number of tracks that ran.
    pub fn len(&self) -> usize {
        self.three_sat.is_some() as usize
            + self.tsp.is_some() as usize
            + self.vertex_cover.is_some() as usize
            + self.knapsack.is_some() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The complete report of a benchmark run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BenchReport {
    pub seed: u64,
    pub minutes: f64,
    pub use_accelerator: bool,
    pub accelerators: Accelerators,
    pub problems: Problems,
    pub seconds_total: f64,
    pub completed: bool,
}
