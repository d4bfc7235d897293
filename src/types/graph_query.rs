use std::ops::Range;

/// A trait that defines the read-only query operations the graph algorithms need.
///
/// Vertices are dense indices in `0..vertex_count()`. Every operation is a pure
/// read over immutable state, so an implementation can be shared freely across
/// the index builder, the triangle counter and the query front-ends.
pub trait GraphQuery {
    /// Number of vertices in the graph.
    fn vertex_count(&self) -> usize;

    /// Number of distinct undirected edges in the graph.
    fn edge_count(&self) -> usize;

    /// Retrieves all vertex ids, in ascending order.
    fn vertex_list(&self) -> Range<usize> {
        0..self.vertex_count()
    }

    /// Retrieves all neighbors of a given vertex, sorted ascending.
    ///
    /// # Parameters
    ///
    /// * `vertex_id` - The vertex whose neighbors are being queried.
    ///
    /// # Returns
    ///
    /// A slice of neighbor ids; empty for an out-of-range vertex.
    fn read_neighbor(&self, vertex_id: usize) -> &[usize];

    /// Number of edges incident to `vertex_id`.
    fn degree(&self, vertex_id: usize) -> usize {
        self.read_neighbor(vertex_id).len()
    }

    /// Determines if an edge exists from `src_id` to `dst_id`.
    ///
    /// The adjacency is symmetric for undirected graphs, but callers that
    /// reason about orientation (the triangle counter) only rely on this
    /// directed form.
    fn has_edge(&self, src_id: usize, dst_id: usize) -> bool;

    /// Resolves an external vertex label to its dense index.
    fn index_of(&self, label: &str) -> Option<usize>;

    /// Returns the external label of a dense vertex index.
    fn label_of(&self, vertex_id: usize) -> Option<&str>;
}
