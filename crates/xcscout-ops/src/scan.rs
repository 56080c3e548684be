//! Directory walking utilities.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::OpsResult;

/// Collect every path under a root directory, recursively.
///
/// Used by the walk-based scheme discovery strategy: the classifier
/// predicates are applied to the full listing afterwards. Walk failures
/// are surfaced, not skipped.
pub fn files_under(root: &Path) -> OpsResult<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        paths.push(entry.into_path());
    }
    Ok(paths)
}
