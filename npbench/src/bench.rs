//! Sequencing of the benchmark tracks under the global budget.
use std::fmt;

use log::info;

use npbench_instance::Generator;

use crate::accel::Accelerators;
use crate::budget::{Budget, TrackBudget};
use crate::config::BenchConfig;
use crate::report::{BenchReport, Problems};
use crate::tsp::TspSolver;
use crate::{cover, knapsack, sat, tsp};

/// The benchmark tracks in the order they are run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Track {
    ThreeSat,
    Tsp,
    VertexCover,
    Knapsack,
}

impl Track {
    pub const ALL: [Track; 4] = [
        Track::ThreeSat,
        Track::Tsp,
        Track::VertexCover,
        Track::Knapsack,
    ];

    /// Key of the track in the report.
    pub fn key(self) -> &'static str {
        match self {
            Track::ThreeSat => "3sat",
            Track::Tsp => "tsp",
            Track::VertexCover => "vertex_cover",
            Track::Knapsack => "knapsack",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Run all tracks with a freshly probed set of accelerators.
pub fn run_benchmarks(config: &BenchConfig) -> BenchReport {
    run_benchmarks_with(config, Accelerators::probe())
}

/// Run all tracks using the given accelerator probe results.
///
/// Tracks run one after another and share a single instance generator. Once the global budget
/// is exhausted the remaining tracks are skipped and absent from the report.
pub fn run_benchmarks_with(config: &BenchConfig, accelerators: Accelerators) -> BenchReport {
    let global = Budget::start(config.budget_seconds());
    let mut generator = Generator::new(config.seed);

    let candidates = if config.use_accelerator {
        accelerators.candidates()
    } else {
        vec![]
    };
    let tsp_solver = TspSolver::new(candidates, config.tsp_max_swaps);

    info!(
        "Running benchmarks: seed={} budget={:.1}s per track={:.1}s",
        config.seed,
        global.seconds(),
        config.per_problem_seconds()
    );

    let mut problems = Problems::default();

    for &track in Track::ALL.iter() {
        if !global.has_time(config.guard_seconds) {
            info!("Global budget exhausted, skipping {} and later tracks", track);
            break;
        }

        let budget = TrackBudget::start(&global, config.per_problem_seconds(), config.guard_seconds);

        match track {
            Track::ThreeSat => {
                problems.three_sat = Some(sat::run_track(&mut generator, config, &budget));
            }
            Track::Tsp => {
                problems.tsp = Some(tsp::run_track(&mut generator, config, &budget, &tsp_solver));
            }
            Track::VertexCover => {
                problems.vertex_cover = Some(cover::run_track(&mut generator, config, &budget));
            }
            Track::Knapsack => {
                problems.knapsack = Some(knapsack::run_track(&mut generator, config));
            }
        }
    }

    let seconds_total = global.elapsed();
    info!(
        "Finished {} of {} tracks in {:.3}s",
        problems.len(),
        Track::ALL.len(),
        seconds_total
    );

    BenchReport {
        seed: config.seed,
        minutes: config.minutes,
        use_accelerator: config.use_accelerator,
        accelerators,
        problems,
        seconds_total,
        completed: true,
    }
}
