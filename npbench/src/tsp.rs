//! Euclidean tour construction and 2-opt refinement.
use log::{debug, info, warn};
use ordered_float::OrderedFloat;

use npbench_instance::{Generator, Point};

use crate::accel::{Backend, DistanceMatrix};
use crate::budget::TrackBudget;
use crate::config::BenchConfig;
use crate::report::TspResult;

/// Minimal gain for a 2-opt move to count as an improvement.
const MIN_GAIN: f64 = 1e-12;

/// Length of the closed tour visiting `points` in the order given by `tour`.
pub fn tour_length(points: &[Point], tour: &[usize]) -> f64 {
    let n = tour.len();
    (0..n)
        .map(|i| points[tour[i]].distance(&points[tour[(i + 1) % n]]))
        .sum()
}

/// Greedy nearest-neighbor tour starting at `start`.
///
/// `distance(a, b)` is queried for every candidate step. Among equally distant unvisited
/// vertices the one with the lowest index is chosen.
pub fn nearest_neighbor_by(
    size: usize,
    start: usize,
    distance: impl Fn(usize, usize) -> f64,
) -> Vec<usize> {
    let mut tour = Vec::with_capacity(size);
    if size == 0 {
        return tour;
    }

    let mut visited = vec![false; size];
    visited[start] = true;
    tour.push(start);

    let mut last = start;
    while let Some(next) = (0..size)
        .filter(|&candidate| !visited[candidate])
        .min_by_key(|&candidate| OrderedFloat(distance(last, candidate)))
    {
        visited[next] = true;
        tour.push(next);
        last = next;
    }

    tour
}

/// Nearest-neighbor tour computing distances on the fly.
pub fn nearest_neighbor(points: &[Point], start: usize) -> Vec<usize> {
    nearest_neighbor_by(points.len(), start, |a, b| points[a].distance(&points[b]))
}

/// Nearest-neighbor tour reading distances from a precomputed matrix.
pub fn nearest_neighbor_matrix(matrix: &DistanceMatrix, start: usize) -> Vec<usize> {
    nearest_neighbor_by(matrix.size(), start, |a, b| matrix.get(a, b))
}

/// Improve `tour` in place using 2-opt moves, returning the number of applied swaps.
///
/// The edges `(i, i + 1)` and `(k, k + 1)` are replaced by `(i, k)` and `(i + 1, k + 1)` by
/// reversing the segment `i + 1..=k` whenever that shortens the tour by more than [`MIN_GAIN`].
/// After each swap the scan restarts. The search ends when a full scan finds no improving move
/// or after `max_swaps` swaps. The tour length never increases.
pub fn two_opt(points: &[Point], tour: &mut [usize], max_swaps: usize) -> usize {
    let n = tour.len();
    if n < 4 {
        return 0;
    }

    let distance = |a: usize, b: usize| points[a].distance(&points[b]);
    let mut swaps = 0;

    'scan: while swaps < max_swaps {
        for i in 0..n - 1 {
            // For i = 0 the edge (n - 1, 0) shares vertex 0.
            let k_end = if i == 0 { n - 1 } else { n };
            for k in i + 2..k_end {
                let (a, b) = (tour[i], tour[i + 1]);
                let (c, d) = (tour[k], tour[(k + 1) % n]);
                let gain = (distance(a, b) + distance(c, d)) - (distance(a, c) + distance(b, d));
                if gain > MIN_GAIN {
                    tour[i + 1..=k].reverse();
                    swaps += 1;
                    continue 'scan;
                }
            }
        }
        break;
    }

    swaps
}

/// A constructed and refined tour.
#[derive(Clone, Debug)]
pub struct TspSolution {
    pub tour: Vec<usize>,
    pub base_len: f64,
    pub improved_len: f64,
    pub swaps: usize,
    /// Backend used for the construction.
    pub backend: Backend,
}

/// Nearest-neighbor construction followed by 2-opt.
#[derive(Clone, Debug)]
pub struct TspSolver {
    candidates: Vec<Backend>,
    max_swaps: usize,
}

impl TspSolver {
    /// Create a solver trying the given accelerated backends in order before the CPU path.
    pub fn new(candidates: Vec<Backend>, max_swaps: usize) -> TspSolver {
        TspSolver {
            candidates,
            max_swaps,
        }
    }

    /// Nearest-neighbor tour from vertex 0 and the backend that produced it.
    pub fn construct(&self, points: &[Point]) -> (Vec<usize>, Backend) {
        for &backend in self.candidates.iter() {
            match backend.distance_matrix(points) {
                Ok(matrix) => return (nearest_neighbor_matrix(&matrix, 0), backend),
                Err(err) => warn!(
                    "TSP: backend {} failed, falling back: {}",
                    backend.name(),
                    err
                ),
            }
        }
        (nearest_neighbor(points, 0), Backend::Cpu)
    }

    pub fn solve(&self, points: &[Point]) -> TspSolution {
        let (mut tour, backend) = self.construct(points);
        let base_len = tour_length(points, &tour);
        let swaps = two_opt(points, &mut tour, self.max_swaps);
        let improved_len = tour_length(points, &tour);

        TspSolution {
            tour,
            base_len,
            improved_len,
            swaps,
            backend,
        }
    }
}

/// Solve one random instance if the budget allows it.
pub fn run_track(
    generator: &mut Generator,
    config: &BenchConfig,
    budget: &TrackBudget,
    solver: &TspSolver,
) -> TspResult {
    let mut result = TspResult {
        n: 0,
        base_len: 0.0,
        improved_len: 0.0,
        improvement: 0.0,
        swaps: 0,
        backend: Backend::Cpu,
        seconds: 0.0,
        note: "Heuristic (nearest-neighbor + 2-opt).",
    };

    if budget.has_time() {
        let points = generator.points(config.tsp_points);
        let solution = solver.solve(&points);
        debug!(
            "TSP: n={} base={:.6} improved={:.6} swaps={}",
            points.len(),
            solution.base_len,
            solution.improved_len,
            solution.swaps
        );

        result.n = points.len();
        result.base_len = solution.base_len;
        result.improved_len = solution.improved_len;
        result.improvement = (solution.base_len - solution.improved_len).max(0.0);
        result.swaps = solution.swaps;
        result.backend = solution.backend;
    }

    result.seconds = budget.elapsed();
    info!(
        "TSP: n={} length {:.4} -> {:.4} via {} in {:.3}s",
        result.n,
        result.base_len,
        result.improved_len,
        result.backend.name(),
        result.seconds
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use npbench_instance::point::strategy::points;

    fn is_permutation(tour: &[usize], size: usize) -> bool {
        let mut seen = vec![false; size];
        tour.len() == size
            && tour
                .iter()
                .all(|&vertex| vertex < size && !std::mem::replace(&mut seen[vertex], true))
    }

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ]
    }

    #[test]
    fn nearest_neighbor_ties_pick_lowest_index() {
        // Vertices 1 and 2 are both at distance 1 from vertex 0.
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(5.0, 5.0),
        ];
        assert_eq!(nearest_neighbor(&points, 0), vec![0, 1, 2, 3]);
    }

    #[test]
    fn two_opt_uncrosses_square() {
        let points = square();
        let mut tour = vec![0, 1, 2, 3];
        let crossed = tour_length(&points, &tour);

        let swaps = two_opt(&points, &mut tour, 1000);
        let uncrossed = tour_length(&points, &tour);

        assert_eq!(swaps, 1);
        assert!((uncrossed - 4.0).abs() < 1e-12);
        assert!(uncrossed < crossed);
        assert!(is_permutation(&tour, 4));
    }

    #[test]
    fn two_opt_respects_swap_limit() {
        let points = square();
        let mut tour = vec![0, 1, 2, 3];
        assert_eq!(two_opt(&points, &mut tour, 0), 0);
        assert_eq!(tour, vec![0, 1, 2, 3]);
    }

    #[test]
    fn tiny_instances() {
        assert!(nearest_neighbor(&[], 0).is_empty());
        assert_eq!(tour_length(&[], &[]), 0.0);

        let points = vec![Point::new(0.0, 0.0), Point::new(0.0, 0.5)];
        let mut tour = nearest_neighbor(&points, 0);
        assert_eq!(tour, vec![0, 1]);
        assert_eq!(two_opt(&points, &mut tour, 10), 0);
        assert!((tour_length(&points, &tour) - 1.0).abs() < 1e-12);
    }

    #[cfg(not(feature = "cuda"))]
    #[test]
    fn failing_backend_falls_back() {
        let points = square();

        let solver = TspSolver::new(vec![Backend::Cuda], 1000);
        assert_eq!(
            solver.construct(&points),
            (nearest_neighbor(&points, 0), Backend::Cpu)
        );

        let solver = TspSolver::new(vec![Backend::Cuda, Backend::Parallel], 1000);
        assert_eq!(
            solver.construct(&points),
            (nearest_neighbor(&points, 0), Backend::Parallel)
        );
    }

    proptest! {
        #[test]
        fn two_opt_never_worsens(points in points(0..80)) {
            let solver = TspSolver::new(vec![], 1000);
            let solution = solver.solve(&points);

            prop_assert!(is_permutation(&solution.tour, points.len()));
            prop_assert!(solution.improved_len <= solution.base_len + 1e-9);
            prop_assert_eq!(solution.backend, Backend::Cpu);
        }

        #[test]
        fn matrix_path_matches_cpu(points in points(1..80)) {
            let cpu = nearest_neighbor(&points, 0);
            for &backend in [Backend::Cpu, Backend::Parallel].iter() {
                let matrix = backend.distance_matrix(&points).unwrap();
                prop_assert_eq!(&nearest_neighbor_matrix(&matrix, 0), &cpu);
            }

            let solver = TspSolver::new(vec![Backend::Parallel], 1000);
            prop_assert_eq!(&solver.construct(&points).0, &cpu);
        }
    }
}
