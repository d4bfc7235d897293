use std::collections::BTreeMap;

use indicatif::{ProgressBar, ProgressStyle};

use crate::config::PROGRESS_TEMPLATE;

/// Creates a progress bar of `len` steps labelled with `message`.
///
/// When `visible` is false a hidden bar is returned, so callers can tick it
/// unconditionally without drawing anything.
///
/// # Example
///
/// let pb = progress_bar(100, "Landmark Labeling.", true);
/// pb.inc(1);
/// pb.finish_and_clear();
///
pub fn progress_bar(len: u64, message: &'static str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    // The template is a crate constant, so a parse failure falls back to the default style.
    let style = ProgressStyle::default_bar()
        .template(PROGRESS_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");
    pb.set_style(style);
    pb.set_message(message);
    pb
}

/// Splits an imported id-keyed map into a dense prefix and a sparse remainder.
///
/// Ids below the number of keys land in the returned vector, padded with
/// `T::default()` for ids the map does not hold. Every other id stays in the
/// map, so the dense part never grows past the size of the input.
pub(crate) fn split_dense<T: Default>(mut raw: BTreeMap<usize, T>) -> (Vec<T>, BTreeMap<usize, T>) {
    let key_count = raw.len();
    let detached = raw.split_off(&key_count);
    let dense_len = raw.keys().next_back().map_or(0, |&v| v + 1);
    let mut dense = Vec::with_capacity(dense_len);
    dense.resize_with(dense_len, T::default);
    for (vertex_id, value) in raw {
        dense[vertex_id] = value;
    }
    (dense, detached)
}
