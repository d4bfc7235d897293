/// What a single run asks for, independent of how the command line was parsed.
///
/// The label index and the triangle counts are only produced when some query
/// or cache option needs them.
///
/// # Fields
/// * `shortest_paths` - Distance queries as `(from, to)` label pairs
/// * `clustering` - Vertices to report the local clustering coefficient of
/// * `average_clustering` - Report the average local clustering coefficient
/// * `import_labels` / `save_labels` - A label index cache is read / written
/// * `import_triangles` / `save_triangles` - A triangle count cache is read / written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunPlan {
    pub shortest_paths: Vec<(String, String)>,
    pub clustering: Vec<String>,
    pub average_clustering: bool,
    pub import_labels: bool,
    pub save_labels: bool,
    pub import_triangles: bool,
    pub save_triangles: bool,
}

impl RunPlan {
    pub fn needs_label_index(&self) -> bool {
        !self.shortest_paths.is_empty() || self.import_labels || self.save_labels
    }

    pub fn needs_triangle_counts(&self) -> bool {
        !self.clustering.is_empty()
            || self.average_clustering
            || self.import_triangles
            || self.save_triangles
    }
}

/// Groups a flat list of repeated `FROM TO` values into query pairs.
///
/// A trailing value without a partner is dropped.
pub fn pair_queries(values: &[String]) -> Vec<(String, String)> {
    values
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}
