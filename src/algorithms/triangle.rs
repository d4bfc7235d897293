use std::collections::BTreeMap;

use log::{debug, warn};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::DEFAULT_THREAD_NUM;
use crate::types::graph_query::GraphQuery;
use crate::util::{progress_bar, split_dense};

/// Configuration for triangle counting.
///
/// # Fields
/// * `thread_num` - Number of threads for the heavy-vertex phase
/// * `show_progress` - Draw a progress bar over the light-vertex phase
#[derive(Debug, Clone, Copy)]
pub struct TriangleConfig {
    pub thread_num: usize,
    pub show_progress: bool,
}

impl Default for TriangleConfig {
    fn default() -> Self {
        Self {
            thread_num: DEFAULT_THREAD_NUM,
            show_progress: false,
        }
    }
}

/// Number of triangles every vertex takes part in.
///
/// Each triangle adds one to each of its three vertices, so the counts sum to
/// three times the number of triangles. Vertices the counts hold nothing for
/// (a stale import) read as zero. Imported ids far beyond the number of stored
/// vertices are kept in `detached` instead of being padded into `counts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriangleCounts {
    counts: Vec<u64>,
    detached: BTreeMap<usize, u64>,
}

impl TriangleCounts {
    pub fn get(&self, vertex_id: usize) -> u64 {
        self.counts
            .get(vertex_id)
            .or_else(|| self.detached.get(&vertex_id))
            .copied()
            .unwrap_or(0)
    }

    pub fn vertex_count(&self) -> usize {
        self.counts.len() + self.detached.len()
    }

    /// Counts of the densely stored vertices `0..n`.
    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    /// Number of distinct triangles in the graph.
    pub fn total_triangles(&self) -> u64 {
        self.counts
            .iter()
            .chain(self.detached.values())
            .fold(0u64, |sum, &count| sum.saturating_add(count))
            / 3
    }
}

impl From<BTreeMap<usize, u64>> for TriangleCounts {
    fn from(raw: BTreeMap<usize, u64>) -> Self {
        let (counts, detached) = split_dense(raw);
        Self { counts, detached }
    }
}

/// Serialized as `{"<vertex>": count}`.
impl Serialize for TriangleCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let detached = self.detached.iter().map(|(&vertex_id, count)| (vertex_id, count));
        serializer.collect_map(self.counts.iter().enumerate().chain(detached))
    }
}

impl<'de> Deserialize<'de> for TriangleCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<usize, u64>::deserialize(deserializer).map(Self::from)
    }
}

/// Total order used by the light phase: degree first, vertex id second.
fn ranks_below<G: GraphQuery>(graph: &G, a: usize, b: usize) -> bool {
    (graph.degree(a), a) < (graph.degree(b), b)
}

/// Counts the ordered heavy triples `(v, u, w)` with `v->u`, `u->w` and `w->v`,
/// credited to `v` only.
///
/// Every first vertex is independent of the others, so the outer loop runs on
/// a dedicated rayon pool. The result is aligned with `heavy`.
fn count_heavy_cycles<G: GraphQuery + Sync>(graph: &G, heavy: &[usize], thread_num: usize) -> Vec<u64> {
    let cycles_from = |&v: &usize| -> u64 {
        let mut found = 0u64;
        for &u in heavy {
            if !graph.has_edge(v, u) {
                continue;
            }
            for &w in heavy {
                if graph.has_edge(u, w) && graph.has_edge(w, v) {
                    found += 1;
                }
            }
        }
        found
    };

    match ThreadPoolBuilder::new().num_threads(thread_num).build() {
        Ok(pool) => pool.install(|| heavy.par_iter().map(&cycles_from).collect()),
        Err(err) => {
            warn!("failed to build a thread pool ({}), counting heavy vertices sequentially", err);
            heavy.iter().map(&cycles_from).collect()
        }
    }
}

/// Computes the exact triangle count of every vertex.
///
/// Vertices with degree above `sqrt(m)` are heavy and handled by a cubic
/// enumeration restricted to the heavy set; there are at most `2 * sqrt(m)` of
/// them. Every other vertex is light and handled by rank-ordered neighbor
/// intersection, which only counts triangles whose lowest-ranked vertex is
/// light. A triangle with a light vertex always has a light lowest-ranked
/// vertex, so the two phases partition the triangles.
///
/// Both phases see every triangle twice (once per orientation), hence the
/// final halving.
///
/// # Arguments
/// * `graph` - The graph to count triangles in
/// * `triangle_config` - Thread count and progress reporting
///
/// # Returns
/// The per-vertex `TriangleCounts`
pub fn count_triangles<G: GraphQuery + Sync>(graph: &G, triangle_config: TriangleConfig) -> TriangleCounts {
    let mut trias = vec![0u64; graph.vertex_count()];

    // Step 1: partition vertices around the sqrt(m) threshold
    let threshold = (graph.edge_count() as f64).sqrt();
    let (heavy, light): (Vec<usize>, Vec<usize>) = graph
        .vertex_list()
        .partition(|&v| graph.degree(v) as f64 > threshold);
    debug!(
        "triangle threshold {:.3}: {} heavy, {} light vertices",
        threshold,
        heavy.len(),
        light.len()
    );

    // Step 2: heavy-vertex phase
    let heavy_cycles = count_heavy_cycles(graph, &heavy, triangle_config.thread_num);
    for (&v, cycles) in heavy.iter().zip(heavy_cycles) {
        trias[v] += cycles;
    }

    // Step 3: light-vertex phase
    let pb = progress_bar(light.len() as u64, "Triangle Counting.", triangle_config.show_progress);
    for &v in &light {
        let neighbors = graph.read_neighbor(v);
        for &w in neighbors {
            if !ranks_below(graph, v, w) {
                continue;
            }
            for &u in neighbors {
                if graph.has_edge(u, w) && ranks_below(graph, v, u) {
                    trias[v] += 1;
                    trias[w] += 1;
                    trias[u] += 1;
                }
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    // Step 4: both phases counted every triangle twice
    for count in trias.iter_mut() {
        *count /= 2;
    }

    TriangleCounts {
        counts: trias,
        detached: BTreeMap::new(),
    }
}

#[cfg(test)]
mod test_triangle {
    use super::*;
    use crate::test_util::{brute_force_triangles, diamond_graph, random_graph};
    use crate::types::EdgeListGraph;

    fn count(graph: &EdgeListGraph) -> TriangleCounts {
        count_triangles(graph, TriangleConfig { thread_num: 2, show_progress: false })
    }

    #[test]
    fn test_diamond_counts() {
        let graph = diamond_graph();
        let trias = count(&graph);
        assert_eq!(trias.as_slice(), &[2, 1, 2, 1, 0]);
        assert_eq!(trias.total_triangles(), 2);
        assert_eq!(trias.as_slice().iter().sum::<u64>(), 6);
    }

    /// In K5 every vertex is heavy (degree 4 > sqrt(10)), so only the cubic
    /// phase runs.
    #[test]
    fn test_all_heavy_clique() {
        let mut edges = Vec::new();
        for a in 0..5 {
            for b in a + 1..5 {
                edges.push((a.to_string(), b.to_string()));
            }
        }
        let graph = EdgeListGraph::from_edges(edges);
        let trias = count(&graph);
        assert_eq!(trias.as_slice(), &[6, 6, 6, 6, 6]);
        assert_eq!(trias.total_triangles(), 10);
    }

    /// A hub joined to a ring mixes heavy and light vertices in one triangle.
    #[test]
    fn test_wheel_mixes_phases() {
        let rim = 8;
        let mut edges = Vec::new();
        for i in 0..rim {
            edges.push(("hub".to_string(), format!("r{}", i)));
            edges.push((format!("r{}", i), format!("r{}", (i + 1) % rim)));
        }
        let graph = EdgeListGraph::from_edges(edges);
        let trias = count(&graph);
        let hub = graph.index_of("hub").unwrap();
        assert_eq!(trias.get(hub), 8);
        for i in 0..rim {
            let r = graph.index_of(&format!("r{}", i)).unwrap();
            assert_eq!(trias.get(r), 2);
        }
    }

    #[test]
    fn test_matches_brute_force() {
        for (seed, vertex_count, edge_probability) in [(5, 40, 0.2), (6, 60, 0.1), (7, 30, 0.5)] {
            let graph = random_graph(seed, vertex_count, edge_probability);
            let trias = count(&graph);
            let (total, per_vertex) = brute_force_triangles(&graph);
            assert_eq!(trias.as_slice(), per_vertex.as_slice(), "seed {}", seed);
            assert_eq!(trias.as_slice().iter().sum::<u64>(), 3 * total);
        }
    }

    /// The heavy phase gives the same answer on one thread as on several.
    #[test]
    fn test_thread_count_does_not_change_counts() {
        let graph = random_graph(8, 50, 0.4);
        let single = count_triangles(&graph, TriangleConfig { thread_num: 1, show_progress: false });
        let many = count_triangles(&graph, TriangleConfig { thread_num: 4, show_progress: false });
        assert_eq!(single, many);
    }

    #[test]
    fn test_triangle_free_graph() {
        let graph = EdgeListGraph::from_edges(vec![("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")]);
        let trias = count(&graph);
        assert!(trias.as_slice().iter().all(|&c| c == 0));
        assert_eq!(trias.get(42), 0);
    }
}
