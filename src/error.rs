use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading graphs, reading caches or resolving queries.
#[derive(Error, Debug)]
pub enum GraphError {
    /// The input graph or a cache file could not be opened, read or written
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The edge or split pattern is not a valid regular expression
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A line matched the edge pattern but did not split into two labels
    #[error("malformed edge on line {line}: '{content}'")]
    MalformedEdge { line: usize, content: String },

    /// A cache file is not valid JSON of the expected shape
    #[error("malformed cache file '{path}': {source}")]
    MalformedCache {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded as a JSON cache file
    #[error("failed to serialize cache file '{path}': {source}")]
    CacheSerialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A query named a vertex label that is not part of the graph
    #[error("unknown vertex '{0}'")]
    UnknownVertex(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;

impl GraphError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GraphError::Io { path: path.into(), source }
    }
}
