//! JSON cache files for label indexes and triangle counts.
//!
//! Both formats are pretty-printed objects keyed by stringified vertex ids.
//! Imported data is never checked against the graph it is later used with.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::algorithms::landmark::LabelIndex;
use crate::algorithms::triangle::TriangleCounts;
use crate::config::READ_BUFFER_SIZE;
use crate::error::{GraphError, Result};

pub fn export_label_index(path: impl AsRef<Path>, label_index: &LabelIndex) -> Result<()> {
    write_json(path.as_ref(), label_index)
}

pub fn import_label_index(path: impl AsRef<Path>) -> Result<LabelIndex> {
    read_json(path.as_ref())
}

pub fn export_triangle_counts(path: impl AsRef<Path>, triangle_counts: &TriangleCounts) -> Result<()> {
    write_json(path.as_ref(), triangle_counts)
}

pub fn import_triangle_counts(path: impl AsRef<Path>) -> Result<TriangleCounts> {
    read_json(path.as_ref())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(|e| GraphError::io(path, e))?;
    let mut writer = BufWriter::with_capacity(READ_BUFFER_SIZE, file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| {
        if e.is_io() {
            GraphError::io(path, io::Error::from(e))
        } else {
            GraphError::CacheSerialization { path: path.to_path_buf(), source: e }
        }
    })?;
    writer.flush().map_err(|e| GraphError::io(path, e))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| GraphError::io(path, e))?;
    let reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
    serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            GraphError::io(path, io::Error::from(e))
        } else {
            GraphError::MalformedCache { path: path.to_path_buf(), source: e }
        }
    })
}

#[cfg(test)]
mod test_persistence {
    use std::fs;

    use super::*;
    use crate::algorithms::landmark::{build_label_index, LabelConfig};
    use crate::algorithms::triangle::{count_triangles, TriangleConfig};
    use crate::test_util::{diamond_graph, random_graph};

    #[test]
    fn test_label_index_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.json");
        let graph = random_graph(31, 40, 0.1);
        let index = build_label_index(&graph, LabelConfig::default());

        export_label_index(&path, &index).unwrap();
        let imported = import_label_index(&path).unwrap();
        assert_eq!(imported, index);
    }

    /// The file is an object of objects keyed by stringified ids.
    #[test]
    fn test_label_index_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.json");
        let index = build_label_index(&diamond_graph(), LabelConfig::default());
        export_label_index(&path, &index).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'), "cache files are pretty-printed");
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["0"]["0"], 0);
        assert_eq!(value["3"]["1"], 2);
        assert_eq!(value["4"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_triangle_counts_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trias.json");
        let trias = count_triangles(&diamond_graph(), TriangleConfig::default());

        export_triangle_counts(&path, &trias).unwrap();
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["0"], 2);
        assert_eq!(value["1"], 1);

        assert_eq!(import_triangle_counts(&path).unwrap(), trias);
    }

    /// Caches written by hand or by another graph load without validation.
    #[test]
    fn test_foreign_cache_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foreign.json");
        fs::write(&path, r#"{"7": {"2": 3, "7": 0}}"#).unwrap();
        let index = import_label_index(&path).unwrap();
        assert_eq!(index.vertex_count(), 1);
        assert_eq!(index.label_set(7).get(2), Some(3));
        assert!(index.label_set(0).is_empty());

        fs::write(&path, r#"{"0": 1, "2": 5}"#).unwrap();
        let trias = import_triangle_counts(&path).unwrap();
        assert_eq!(trias.get(0), 1);
        assert_eq!(trias.get(1), 0);
        assert_eq!(trias.get(2), 5);
    }

    /// Ids far beyond the graph do not size the in-memory storage.
    #[test]
    fn test_cache_with_huge_vertex_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.json");

        fs::write(&path, r#"{"18446744073709551615": 1}"#).unwrap();
        let trias = import_triangle_counts(&path).unwrap();
        assert_eq!(trias.vertex_count(), 1);
        assert_eq!(trias.get(u64::MAX as usize), 1);
        assert_eq!(trias.get(0), 0);

        fs::write(&path, r#"{"1000000000000000": {"0": 1}}"#).unwrap();
        let index = import_label_index(&path).unwrap();
        assert_eq!(index.vertex_count(), 1);
        assert_eq!(index.label_set(1_000_000_000_000_000).get(0), Some(1));
        assert_eq!(index.stats().total_entries, 1);

        // Written back out, the far ids survive unchanged
        let resaved = dir.path().join("resaved.json");
        export_label_index(&resaved, &index).unwrap();
        assert_eq!(import_label_index(&resaved).unwrap(), index);
        export_triangle_counts(&resaved, &trias).unwrap();
        assert_eq!(import_triangle_counts(&resaved).unwrap(), trias);
    }

    /// A value JSON cannot represent is a serialization error, not an I/O error.
    #[test]
    fn test_unserializable_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuple_keys.json");
        let value = std::collections::BTreeMap::from([((0u32, 1u32), 2u32)]);
        assert!(matches!(
            write_json(&path, &value),
            Err(GraphError::CacheSerialization { .. })
        ));
    }

    #[test]
    fn test_malformed_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"0\": {\"0\": ").unwrap();
        assert!(matches!(import_label_index(&path), Err(GraphError::MalformedCache { .. })));

        fs::write(&path, r#"{"zero": 1}"#).unwrap();
        assert!(matches!(import_triangle_counts(&path), Err(GraphError::MalformedCache { .. })));
    }

    #[test]
    fn test_missing_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(import_label_index(&path), Err(GraphError::Io { .. })));
    }
}
