use crate::algorithms::triangle::TriangleCounts;
use crate::error::{GraphError, Result};
use crate::types::graph_query::GraphQuery;

/// Local clustering coefficient of a vertex id.
///
/// The fraction of the vertex's neighbor pairs that are themselves adjacent:
/// `triangles(v) / C(degree(v), 2)`. Vertices of degree 0 or 1 have no
/// neighbor pair, so their coefficient is NaN.
pub fn vertex_clustering_coefficient<G: GraphQuery>(
    graph: &G,
    vertex_id: usize,
    triangle_counts: &TriangleCounts,
) -> f64 {
    let degree = graph.degree(vertex_id);
    if degree < 2 {
        return f64::NAN;
    }
    let neighbor_pairs = (degree * (degree - 1) / 2) as f64;
    triangle_counts.get(vertex_id) as f64 / neighbor_pairs
}

/// Local clustering coefficient of the vertex named `label`.
///
/// # Arguments
///
/// * `graph` - The graph the triangle counts were computed on
/// * `label` - External label of the vertex
/// * `triangle_counts` - Per-vertex triangle counts
///
/// # Returns
///
/// * `Result<f64>` - The coefficient in `[0, 1]`, NaN below degree 2, or
///   `GraphError::UnknownVertex` if the label is not part of `graph`
pub fn local_clustering_coefficient<G: GraphQuery>(
    graph: &G,
    label: &str,
    triangle_counts: &TriangleCounts,
) -> Result<f64> {
    let vertex_id = graph
        .index_of(label)
        .ok_or_else(|| GraphError::UnknownVertex(label.to_owned()))?;
    Ok(vertex_clustering_coefficient(graph, vertex_id, triangle_counts))
}

/// Mean local clustering coefficient over the vertices where it is defined.
///
/// NaN when no vertex has degree 2 or more.
pub fn average_clustering_coefficient<G: GraphQuery>(graph: &G, triangle_counts: &TriangleCounts) -> f64 {
    let (sum, defined) = graph
        .vertex_list()
        .map(|v| vertex_clustering_coefficient(graph, v, triangle_counts))
        .filter(|coefficient| !coefficient.is_nan())
        .fold((0.0, 0usize), |(sum, defined), coefficient| (sum + coefficient, defined + 1));
    if defined == 0 {
        f64::NAN
    } else {
        sum / defined as f64
    }
}
