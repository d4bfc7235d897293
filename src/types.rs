use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::config::READ_BUFFER_SIZE;
use crate::error::{GraphError, Result};
use crate::types::graph_query::GraphQuery;

pub mod graph_query;

/// Assigns dense indices to vertex labels in first-seen order.
#[derive(Debug, Default)]
struct LabelInterner {
    /// Label of every interned vertex, indexed by its dense id
    labels: Vec<String>,
    /// Reverse lookup from label to dense id
    label_index: FxHashMap<String, usize>,
}

impl LabelInterner {
    fn intern(&mut self, label: &str) -> usize {
        if let Some(&vertex_id) = self.label_index.get(label) {
            return vertex_id;
        }
        let vertex_id = self.labels.len();
        self.labels.push(label.to_owned());
        self.label_index.insert(label.to_owned(), vertex_id);
        vertex_id
    }
}

/// An undirected, unweighted graph in CSR (Compressed Sparse Row) form, built
/// once from an edge list and never mutated afterwards.
///
/// Every undirected edge is stored in both adjacency lists, each list is sorted
/// so adjacency tests are a binary search, and duplicate edges and self-loops
/// are dropped while building. A self-loop line still interns its label, which
/// is how an isolated vertex can be declared in an edge list.
#[derive(Debug)]
pub struct EdgeListGraph {
    /// Total number of vertices in the graph
    pub vertex_count: usize,

    /// Number of distinct undirected edges
    pub edge_count: usize,

    /// Offset array of length `vertex_count + 1`.
    /// For each vertex i, its neighbors are stored in neighbor_list[offsets[i]..offsets[i + 1]]
    pub offsets: Vec<usize>,

    /// Flattened, per-vertex sorted adjacency lists
    pub neighbor_list: Vec<usize>,

    /// Bijective mapping between labels and dense ids
    interner: LabelInterner,
}

impl GraphQuery for EdgeListGraph {
    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn read_neighbor(&self, vertex_id: usize) -> &[usize] {
        if vertex_id >= self.vertex_count {
            return &[];
        }
        &self.neighbor_list[self.offsets[vertex_id]..self.offsets[vertex_id + 1]]
    }

    fn has_edge(&self, src_id: usize, dst_id: usize) -> bool {
        self.read_neighbor(src_id).binary_search(&dst_id).is_ok()
    }

    fn index_of(&self, label: &str) -> Option<usize> {
        self.interner.label_index.get(label).copied()
    }

    fn label_of(&self, vertex_id: usize) -> Option<&str> {
        self.interner.labels.get(vertex_id).map(String::as_str)
    }
}

impl EdgeListGraph {
    /// Loads a graph from a text edge list.
    ///
    /// # Format
    /// Every line is tested against `pattern`, which has to match at the start of
    /// the line; lines that don't match (comments, headers, blank lines) are skipped.
    /// A matching line is split by `split` and its first two non-empty fields are
    /// the labels of the edge's endpoints.
    ///
    /// # Arguments
    /// * `file_path` - Path to the edge list
    /// * `pattern` - Regex selecting edge lines
    /// * `split` - Regex separating the two labels of an edge line
    ///
    /// # Errors
    /// * `GraphError::InvalidPattern` if either regex fails to compile
    /// * `GraphError::Io` if the file cannot be opened or read
    /// * `GraphError::MalformedEdge` if a matching line does not yield two labels
    pub fn from_edge_file(
        file_path: impl AsRef<Path>,
        pattern: &str,
        split: &str,
    ) -> Result<EdgeListGraph> {
        let file_path = file_path.as_ref();
        let edge_regex = Regex::new(pattern)?;
        let split_regex = Regex::new(split)?;

        let graph_file = File::open(file_path).map_err(|e| GraphError::io(file_path, e))?;
        let graph_reader = BufReader::with_capacity(READ_BUFFER_SIZE, graph_file);

        let mut interner = LabelInterner::default();
        let mut edges = Vec::new();
        let mut skipped = 0usize;

        for (line_idx, line) in graph_reader.lines().enumerate() {
            let line = line.map_err(|e| GraphError::io(file_path, e))?;
            let line = line.trim_end_matches('\r');

            // Only lines matching the edge pattern from their first character are edges
            if !edge_regex.find(line).map_or(false, |m| m.start() == 0) {
                skipped += 1;
                continue;
            }

            let mut fields = split_regex
                .split(line)
                .map(str::trim)
                .filter(|field| !field.is_empty());
            match (fields.next(), fields.next()) {
                (Some(src), Some(dst)) => {
                    edges.push((interner.intern(src), interner.intern(dst)));
                }
                _ => {
                    return Err(GraphError::MalformedEdge {
                        line: line_idx + 1,
                        content: line.to_owned(),
                    });
                }
            }
        }

        if skipped > 0 {
            debug!("skipped {} lines not matching '{}'", skipped, pattern);
        }
        let graph = Self::from_interned_edges(interner, edges);
        info!(
            "loaded {} vertices and {} edges from '{}'",
            graph.vertex_count,
            graph.edge_count,
            file_path.display()
        );
        Ok(graph)
    }

    /// Builds a graph from in-memory `(label, label)` pairs, interning labels in
    /// the order they first appear.
    pub fn from_edges<I, S>(edges: I) -> EdgeListGraph
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut interner = LabelInterner::default();
        let edges = edges
            .into_iter()
            .map(|(src, dst)| (interner.intern(src.as_ref()), interner.intern(dst.as_ref())))
            .collect::<Vec<_>>();
        Self::from_interned_edges(interner, edges)
    }

    fn from_interned_edges(interner: LabelInterner, edges: Vec<(usize, usize)>) -> EdgeListGraph {
        let vertex_count = interner.labels.len();

        // Step 1: normalise every edge to (low, high), drop self-loops and duplicates
        let mut undirected = edges
            .into_iter()
            .filter(|(src, dst)| src != dst)
            .map(|(src, dst)| if src < dst { (src, dst) } else { (dst, src) })
            .collect::<Vec<_>>();
        undirected.sort_unstable();
        undirected.dedup();

        // Step 2: degrees, then offsets as their prefix sums
        let mut degrees = vec![0usize; vertex_count];
        for &(src, dst) in &undirected {
            degrees[src] += 1;
            degrees[dst] += 1;
        }
        let mut offsets = vec![0usize; vertex_count + 1];
        for v in 0..vertex_count {
            offsets[v + 1] = offsets[v] + degrees[v];
        }

        // Step 3: scatter both directions of every edge into its slot
        let mut cursor = offsets[..vertex_count].to_vec();
        let mut neighbor_list = vec![0usize; offsets[vertex_count]];
        for &(src, dst) in &undirected {
            neighbor_list[cursor[src]] = dst;
            cursor[src] += 1;
            neighbor_list[cursor[dst]] = src;
            cursor[dst] += 1;
        }
        for v in 0..vertex_count {
            neighbor_list[offsets[v]..offsets[v + 1]].sort_unstable();
        }

        Self {
            vertex_count,
            edge_count: undirected.len(),
            offsets,
            neighbor_list,
            interner,
        }
    }
}
