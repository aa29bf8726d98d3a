//! Exact vertex cover search for small cover sizes.
use log::{debug, info};

use npbench_instance::{Generator, Graph};

use crate::budget::TrackBudget;
use crate::config::BenchConfig;
use crate::report::CoverResult;

/// Complete include/exclude search for vertex covers of bounded size.
///
/// Vertices are decided in index order, excluding before including. A branch is cut once it
/// selects more than `k` vertices or once excluding a vertex leaves an edge to an already
/// excluded vertex uncovered.
pub struct VertexCoverSolver<'a> {
    graph: &'a Graph,
    /// For every vertex its neighbors with a smaller index.
    lower_neighbors: Vec<Vec<usize>>,
}

impl<'a> VertexCoverSolver<'a> {
    pub fn new(graph: &'a Graph) -> VertexCoverSolver<'a> {
        let mut lower_neighbors = vec![vec![]; graph.vertex_count()];
        for &(u, v) in graph.edges() {
            lower_neighbors[v].push(u);
        }
        VertexCoverSolver {
            graph,
            lower_neighbors,
        }
    }

    /// Find a cover with at most `k` vertices.
    ///
    /// Returns the cover as a membership vector indexed by vertex.
    pub fn find_cover(&self, k: usize) -> Option<Vec<bool>> {
        let mut cover = vec![false; self.graph.vertex_count()];
        if self.search(0, 0, k, &mut cover) {
            Some(cover)
        } else {
            None
        }
    }

    /// Try `k = 0, 1, …, min(n, max_k)` and return the first `k` admitting a cover.
    ///
    /// `None` means that no cover of size at most `max_k` exists, not that the graph has no
    /// cover at all.
    pub fn smallest_cover(&self, max_k: usize) -> Option<(usize, Vec<bool>)> {
        let max_k = max_k.min(self.graph.vertex_count());
        (0..=max_k).find_map(|k| self.find_cover(k).map(|cover| (k, cover)))
    }

    fn search(&self, vertex: usize, chosen: usize, k: usize, cover: &mut [bool]) -> bool {
        if chosen > k {
            return false;
        }
        if vertex == cover.len() {
            return self.graph.is_covered_by(cover);
        }

        let lower_covered = self.lower_neighbors[vertex]
            .iter()
            .all(|&neighbor| cover[neighbor]);
        if lower_covered && self.search(vertex + 1, chosen, k, cover) {
            return true;
        }

        cover[vertex] = true;
        if self.search(vertex + 1, chosen + 1, k, cover) {
            return true;
        }
        cover[vertex] = false;

        false
    }
}

/// Grow random graphs until no cover within the size cap is found or time runs out.
pub fn run_track(
    generator: &mut Generator,
    config: &BenchConfig,
    budget: &TrackBudget,
) -> CoverResult {
    let mut result = CoverResult {
        note: "Exact (bruteforce) on small n; bounded k search.",
        ..CoverResult::default()
    };

    let mut vertex_count = config.cover_start_vertices;

    while budget.has_time() {
        let graph = generator.graph(vertex_count, config.cover_edge_probability);
        let solver = VertexCoverSolver::new(&graph);

        match solver.smallest_cover(config.cover_max_k) {
            Some((k, cover)) => {
                debug_assert!(graph.is_covered_by(&cover));
                debug!(
                    "Vertex cover: n={} m={} k={}",
                    vertex_count,
                    graph.edge_count(),
                    k
                );
                result.n = vertex_count;
                result.k = k;
                result.m = graph.edge_count();
                result.found = true;
                vertex_count += 1;
            }
            None => {
                debug!(
                    "Vertex cover: no cover of size <= {} for n={} m={}",
                    config.cover_max_k,
                    vertex_count,
                    graph.edge_count()
                );
                break;
            }
        }
    }

    result.seconds = budget.elapsed();
    info!(
        "Vertex cover: n={} k={} m={} in {:.3}s",
        result.n, result.k, result.m, result.seconds
    );
    result
}
