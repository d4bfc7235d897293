use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::algorithms::landmark::Distance;
use crate::types::graph_query::GraphQuery;
use crate::types::EdgeListGraph;

/// A-B, B-C, C-D, D-A, A-C plus an isolated X; ids follow A=0 .. D=3, X=4.
pub(crate) fn diamond_graph() -> EdgeListGraph {
    EdgeListGraph::from_edges(vec![
        ("A", "B"),
        ("B", "C"),
        ("C", "D"),
        ("D", "A"),
        ("A", "C"),
        ("X", "X"),
    ])
}

/// Erdos-Renyi graph whose labels are "0".."n-1", interned so that label `i`
/// has id `i`.
pub(crate) fn random_graph(seed: u64, vertex_count: usize, edge_probability: f64) -> EdgeListGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = (0..vertex_count)
        .map(|v| (v.to_string(), v.to_string()))
        .collect::<Vec<_>>();
    for src in 0..vertex_count {
        for dst in src + 1..vertex_count {
            if rng.gen_bool(edge_probability) {
                edges.push((src.to_string(), dst.to_string()));
            }
        }
    }
    EdgeListGraph::from_edges(edges)
}

/// Plain BFS distances from `source`; `None` for unreachable vertices.
pub(crate) fn bfs_distances<G: GraphQuery>(graph: &G, source: usize) -> Vec<Option<Distance>> {
    let mut distances = vec![None; graph.vertex_count()];
    let mut queue = VecDeque::new();
    distances[source] = Some(0);
    queue.push_back(source);
    while let Some(current) = queue.pop_front() {
        let next = distances[current].map(|d| d + 1);
        for &neighbor in graph.read_neighbor(current) {
            if distances[neighbor].is_none() {
                distances[neighbor] = next;
                queue.push_back(neighbor);
            }
        }
    }
    distances
}

/// Counts every triangle `a < b < c` by direct adjacency checks.
pub(crate) fn brute_force_triangles<G: GraphQuery>(graph: &G) -> (u64, Vec<u64>) {
    let mut per_vertex = vec![0u64; graph.vertex_count()];
    let mut total = 0;
    for a in graph.vertex_list() {
        for b in a + 1..graph.vertex_count() {
            if !graph.has_edge(a, b) {
                continue;
            }
            for c in b + 1..graph.vertex_count() {
                if graph.has_edge(b, c) && graph.has_edge(a, c) {
                    total += 1;
                    per_vertex[a] += 1;
                    per_vertex[b] += 1;
                    per_vertex[c] += 1;
                }
            }
        }
    }
    (total, per_vertex)
}
