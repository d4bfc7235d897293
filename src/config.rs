/// Capacity of the buffered readers and writers used for edge lists and cache files.
pub const READ_BUFFER_SIZE: usize = 4 * 1024 * 1024;

/// Default regex a line must match (at its start) to be read as an edge.
pub const DEFAULT_EDGE_PATTERN: &str = r"\d+\t\d+";

/// Default regex separating the two vertex labels of an edge line.
pub const DEFAULT_SPLIT_PATTERN: &str = r"\t";

/// Template shared by every progress bar in the crate.
pub const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// Worker count for the parallel phases when none is given.
pub const DEFAULT_THREAD_NUM: usize = 4;
