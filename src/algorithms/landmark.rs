use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::graph_query::GraphQuery;
use crate::util::{progress_bar, split_dense};

/// Hop distance between two vertices.
pub type Distance = u32;

/// Tentative distance of a vertex the current round has not discovered.
pub const UNREACHED: Distance = Distance::MAX;

static EMPTY_LABEL_SET: LabelSet = LabelSet { entries: Vec::new() };

/// Configuration for building the landmark label index.
///
/// # Fields
/// * `pruning` - Stop expanding a vertex once earlier landmarks already cover its distance
/// * `show_progress` - Draw a progress bar ticking once per landmark
#[derive(Debug, Clone, Copy)]
pub struct LabelConfig {
    pub pruning: bool,
    pub show_progress: bool,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            pruning: true,
            show_progress: false,
        }
    }
}

/// The label set of one vertex: landmark id to hop distance.
///
/// Landmarks are labeled in ascending order, so entries are appended already
/// sorted by landmark and lookups and intersections work on the sorted vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    entries: Vec<(usize, Distance)>,
}

impl LabelSet {
    /// Distance recorded for `landmark`, if this vertex was labeled by it.
    pub fn get(&self, landmark: usize) -> Option<Distance> {
        self.entries
            .binary_search_by_key(&landmark, |&(w, _)| w)
            .ok()
            .map(|pos| self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(landmark, distance)` entries in ascending landmark order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Distance)> + '_ {
        self.entries.iter().copied()
    }

    pub(crate) fn as_slice(&self) -> &[(usize, Distance)] {
        &self.entries
    }

    fn push(&mut self, landmark: usize, distance: Distance) {
        debug_assert!(self.entries.last().map_or(true, |&(w, _)| w < landmark));
        self.entries.push((landmark, distance));
    }
}

impl Serialize for LabelSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(w, d)| (w, d)))
    }
}

/// Summary of a label index, reported after it is built or imported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexStats {
    pub vertex_count: usize,
    pub total_entries: usize,
    pub max_label_size: usize,
    pub average_label_size: f64,
}

/// The 2-hop distance labeling of a graph: one `LabelSet` per vertex.
///
/// An imported index is not checked against the graph it is queried with; a
/// vertex id it holds no entry for simply has an empty label set. Imported ids
/// far beyond the number of stored vertices are kept in `detached` instead of
/// being padded into `label_sets`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelIndex {
    label_sets: Vec<LabelSet>,
    detached: BTreeMap<usize, LabelSet>,
}

impl LabelIndex {
    /// Number of vertices this index holds label sets for, counting the
    /// empty sets a sparse import pads with.
    pub fn vertex_count(&self) -> usize {
        self.label_sets.len() + self.detached.len()
    }

    pub fn label_set(&self, vertex_id: usize) -> &LabelSet {
        self.label_sets
            .get(vertex_id)
            .or_else(|| self.detached.get(&vertex_id))
            .unwrap_or(&EMPTY_LABEL_SET)
    }

    fn all_label_sets(&self) -> impl Iterator<Item = &LabelSet> + '_ {
        self.label_sets.iter().chain(self.detached.values())
    }

    pub fn stats(&self) -> IndexStats {
        let vertex_count = self.vertex_count();
        let total_entries = self.all_label_sets().map(LabelSet::len).sum::<usize>();
        let max_label_size = self.all_label_sets().map(LabelSet::len).max().unwrap_or(0);
        let average_label_size = if vertex_count == 0 {
            0.0
        } else {
            total_entries as f64 / vertex_count as f64
        };
        IndexStats {
            vertex_count,
            total_entries,
            max_label_size,
            average_label_size,
        }
    }
}

impl From<BTreeMap<usize, BTreeMap<usize, Distance>>> for LabelIndex {
    fn from(raw: BTreeMap<usize, BTreeMap<usize, Distance>>) -> Self {
        let raw: BTreeMap<usize, LabelSet> = raw
            .into_iter()
            .map(|(vertex_id, labels)| (vertex_id, LabelSet { entries: labels.into_iter().collect() }))
            .collect();
        let (label_sets, detached) = split_dense(raw);
        Self { label_sets, detached }
    }
}

/// Serialized as `{"<vertex>": {"<landmark>": distance}}`.
///
/// Padding left by a sparse import is skipped; a built index never has an
/// empty label set because every vertex labels itself.
impl Serialize for LabelIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let dense = self.label_sets.iter().enumerate().filter(|(_, labels)| !labels.is_empty());
        let detached = self.detached.iter().map(|(&vertex_id, labels)| (vertex_id, labels));
        serializer.collect_map(dense.chain(detached))
    }
}

impl<'de> Deserialize<'de> for LabelIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<usize, BTreeMap<usize, Distance>>::deserialize(deserializer).map(Self::from)
    }
}

/// Shortest distance between the current landmark and `vertex`, as far as the
/// labels of earlier landmarks can tell.
///
/// `root_labels` holds the landmark's own finalized labels, densely indexed by
/// landmark id with `UNREACHED` for absent entries.
fn covered_distance(vertex_labels: &LabelSet, root_labels: &[Distance]) -> Distance {
    vertex_labels
        .iter()
        .filter(|&(w, _)| root_labels[w] != UNREACHED)
        .map(|(w, d)| d.saturating_add(root_labels[w]))
        .min()
        .unwrap_or(UNREACHED)
}

/// Builds the landmark label index of `graph`.
///
/// Vertices act as landmarks in ascending id order. Each round runs a BFS from
/// the landmark; with pruning enabled a dequeued vertex whose distance is
/// already covered by earlier landmarks is not expanded any further. Every
/// vertex the round visits, pruned or not, is labeled with its BFS distance to
/// the landmark when the round ends.
///
/// With pruning disabled every label set becomes the full BFS distance table
/// of its vertex.
///
/// # Arguments
/// * `graph` - The graph to index
/// * `label_config` - Pruning switch and progress reporting
///
/// # Returns
/// The finished `LabelIndex`, one label set per vertex of `graph`
pub fn build_label_index<G: GraphQuery>(graph: &G, label_config: LabelConfig) -> LabelIndex {
    let vertex_count = graph.vertex_count();
    let mut label_sets = vec![LabelSet::default(); vertex_count];

    // Per-call scratch, reset after every round
    let mut tentative = vec![UNREACHED; vertex_count];
    let mut root_labels = vec![UNREACHED; vertex_count];
    let mut queue = VecDeque::new();
    let mut visited = Vec::new();

    let pb = progress_bar(vertex_count as u64, "Landmark Labeling.", label_config.show_progress);

    for landmark in graph.vertex_list() {
        // Step 1: expose the landmark's own labels for O(1) lookup this round
        for (w, d) in label_sets[landmark].iter() {
            root_labels[w] = d;
        }

        // Step 2: BFS from the landmark
        tentative[landmark] = 0;
        queue.push_back(landmark);
        while let Some(current) = queue.pop_front() {
            visited.push(current);
            let distance = tentative[current];

            if label_config.pruning
                && covered_distance(&label_sets[current], &root_labels) <= distance
            {
                continue;
            }

            for &neighbor in graph.read_neighbor(current) {
                if tentative[neighbor] == UNREACHED {
                    tentative[neighbor] = distance + 1;
                    queue.push_back(neighbor);
                }
            }
        }

        // Step 3: finalize the round's labels and reset the scratch state
        for &vertex in &visited {
            label_sets[vertex].push(landmark, tentative[vertex]);
            tentative[vertex] = UNREACHED;
        }
        visited.clear();
        for (w, _) in label_sets[landmark].iter() {
            root_labels[w] = UNREACHED;
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    LabelIndex {
        label_sets,
        detached: BTreeMap::new(),
    }
}
