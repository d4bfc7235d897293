pub mod algorithms;
pub mod config;
pub mod error;
pub mod persistence;
pub mod plan;
pub mod types;
pub mod util;

#[cfg(test)]
mod test_util;

pub use error::{GraphError, Result};
pub use types::EdgeListGraph;
pub use types::graph_query::GraphQuery;
