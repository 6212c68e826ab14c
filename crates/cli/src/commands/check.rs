//! `docsync check`: show how paths would be classified

use crate::absolutize;
use docsync_aggregator::{PathFilter, Verdict};
use docsync_core::DocLayout;
use std::path::{Path, PathBuf};

/// Classify each path against the layout rooted at `root`
///
/// Relative paths are taken relative to `root`. Files need not exist.
pub fn check_paths(root: &Path, paths: &[PathBuf]) -> Vec<(PathBuf, Verdict)> {
    let filter = PathFilter::new(DocLayout::new(root));
    paths
        .iter()
        .map(|path| {
            let path = absolutize(root, path);
            let verdict = filter.classify(&path);
            (path, verdict)
        })
        .collect()
}

/// One line per path: verdict, then the path
pub fn format_report(results: &[(PathBuf, Verdict)]) -> String {
    results
        .iter()
        .map(|(path, verdict)| format!("{verdict:<30} {}", path.display()))
        .collect::<Vec<_>>()
        .join("\n")
}
