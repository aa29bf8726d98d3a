//! Undirected graphs as edge lists.

/// An undirected edge `(u, v)` with `u < v`.
pub type Edge = (usize, usize);

/// An undirected graph over `vertex_count` vertices without self-loops or duplicate edges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    vertex_count: usize,
    edges: Vec<Edge>,
}

impl Graph {
    /// Create a graph without edges.
    pub fn new(vertex_count: usize) -> Graph {
        Graph {
            vertex_count,
            edges: vec![],
        }
    }

    /// Create a graph from a list of edges.
    ///
    /// Edges are normalized so that the smaller endpoint comes first. The caller is responsible
    /// for not passing self-loops or duplicates.
    pub fn from_edges(vertex_count: usize, edges: impl IntoIterator<Item = Edge>) -> Graph {
        let mut graph = Graph::new(vertex_count);
        for (u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    /// Appends an edge.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        debug_assert!(u != v);
        debug_assert!(u < self.vertex_count && v < self.vertex_count);
        self.edges.push((u.min(v), u.max(v)));
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Whether every edge has at least one endpoint in `cover`.
    ///
    /// `cover` is indexed by vertex.
    pub fn is_covered_by(&self, cover: &[bool]) -> bool {
        self.edges.iter().all(|&(u, v)| cover[u] || cover[v])
    }
}

#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
pub mod strategy {
    use super::*;
    use proptest::{prelude::*, *};

    /// Erdős–Rényi style graphs where each vertex pair is an edge with probability `p`.
    pub fn graph(vertices: impl Strategy<Value = usize>, p: f64) -> impl Strategy<Value = Graph> {
        vertices.prop_flat_map(move |n| {
            collection::vec(bool::weighted(p), n * n.saturating_sub(1) / 2).prop_map(move |present| {
                let pairs = (0..n).flat_map(|u| (u + 1..n).map(move |v| (u, v)));
                Graph::from_edges(
                    n,
                    pairs
                        .zip(present)
                        .filter(|&(_, present)| present)
                        .map(|(edge, _)| edge),
                )
            })
        })
    }
}
