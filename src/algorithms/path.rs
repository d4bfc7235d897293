use std::cmp::Ordering;
use std::fmt;

use crate::algorithms::landmark::{Distance, LabelIndex};
use crate::error::{GraphError, Result};
use crate::types::graph_query::GraphQuery;

/// Outcome of a shortest-path query.
///
/// An unreachable pair is a regular answer, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceAnswer {
    /// The pair is connected; `via` is the landmark the minimum was found through.
    Reachable { distance: Distance, via: usize },
    /// The two label sets share no landmark.
    Unreachable,
}

impl DistanceAnswer {
    pub fn distance(&self) -> Option<Distance> {
        match self {
            DistanceAnswer::Reachable { distance, .. } => Some(*distance),
            DistanceAnswer::Unreachable => None,
        }
    }

    pub fn via(&self) -> Option<usize> {
        match self {
            DistanceAnswer::Reachable { via, .. } => Some(*via),
            DistanceAnswer::Unreachable => None,
        }
    }
}

impl fmt::Display for DistanceAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceAnswer::Reachable { distance, via } => write!(f, "{} (via {})", distance, via),
            DistanceAnswer::Unreachable => write!(f, "inf (via (none))"),
        }
    }
}

/// `DistanceOracle` answers point-to-point distance queries against a built or
/// imported `LabelIndex`.
///
/// It only borrows the index, so any number of oracles can serve queries over
/// the same index.
pub struct DistanceOracle<'a> {
    /// The label index queries are answered from.
    label_index: &'a LabelIndex,
}

impl<'a> DistanceOracle<'a> {
    pub fn new(label_index: &'a LabelIndex) -> Self {
        Self { label_index }
    }

    /// Shortest distance between two vertex ids.
    ///
    /// Both label sets are sorted by landmark, so their common landmarks are
    /// found with a single merge pass. Among landmarks reaching the same minimum
    /// the one with the smallest id wins.
    ///
    /// # Arguments
    /// - `source_vertex`: Dense id of the first vertex.
    /// - `destination_vertex`: Dense id of the second vertex.
    ///
    /// # Returns
    /// The minimal `d(source, w) + d(w, destination)` over common landmarks `w`,
    /// or `DistanceAnswer::Unreachable` when there is none.
    pub fn query(&self, source_vertex: usize, destination_vertex: usize) -> DistanceAnswer {
        let source_labels = self.label_index.label_set(source_vertex).as_slice();
        let destination_labels = self.label_index.label_set(destination_vertex).as_slice();

        let mut best = DistanceAnswer::Unreachable;
        let (mut i, mut j) = (0, 0);
        while i < source_labels.len() && j < destination_labels.len() {
            let (source_landmark, source_distance) = source_labels[i];
            let (destination_landmark, destination_distance) = destination_labels[j];
            match source_landmark.cmp(&destination_landmark) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    let distance = source_distance.saturating_add(destination_distance);
                    if best.distance().map_or(true, |current| distance < current) {
                        best = DistanceAnswer::Reachable { distance, via: source_landmark };
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        best
    }

    /// Shortest distance between two vertices named by their labels.
    ///
    /// # Errors
    /// `GraphError::UnknownVertex` if either label is not part of `graph`.
    pub fn query_by_label<G: GraphQuery>(
        &self,
        graph: &G,
        source_label: &str,
        destination_label: &str,
    ) -> Result<DistanceAnswer> {
        let source_vertex = graph
            .index_of(source_label)
            .ok_or_else(|| GraphError::UnknownVertex(source_label.to_owned()))?;
        let destination_vertex = graph
            .index_of(destination_label)
            .ok_or_else(|| GraphError::UnknownVertex(destination_label.to_owned()))?;
        Ok(self.query(source_vertex, destination_vertex))
    }
}
