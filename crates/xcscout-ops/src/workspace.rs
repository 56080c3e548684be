//! Workspace reference resolution.
//!
//! Extracts member-project paths from a workspace bundle's
//! `contents.xcworkspacedata` descriptor. This is a best-effort scan,
//! not a strict XML parser: each reference spans two lines, a `<FileRef`
//! marker line followed by a `location = "<type>:<relpath>.xcodeproj"`
//! line. Only the line immediately following a marker counts.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use xcscout_core::{WORKSPACE_DESCRIPTOR, XCODEPROJ_EXT};

use crate::error::{OpsError, OpsResult};

static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"location = "(.+):(.+)\.xcodeproj""#).expect("location pattern is valid")
});

/// Scanner state for the two-line reference pairing.
enum ScanState {
    AwaitingMarker,
    AwaitingLocation,
}

/// List the absolute project paths referenced by a workspace bundle.
///
/// Fails with [`OpsError::DescriptorNotFound`] when the workspace
/// descriptor is absent. Marked lines without a parseable `location`
/// attribute are silently skipped. Output is sorted and deduplicated.
pub fn workspace_project_references(workspace: &Path) -> OpsResult<Vec<PathBuf>> {
    let descriptor = workspace.join(WORKSPACE_DESCRIPTOR);
    if !descriptor.exists() {
        return Err(OpsError::DescriptorNotFound { path: descriptor });
    }

    let workspace_dir = workspace.parent().unwrap_or_else(|| Path::new(""));
    let content = std::fs::read_to_string(&descriptor)?;

    let mut projects = Vec::new();
    let mut state = ScanState::AwaitingMarker;

    for line in content.lines() {
        if line.contains("<FileRef") {
            state = ScanState::AwaitingLocation;
            continue;
        }

        if let ScanState::AwaitingLocation = state {
            state = ScanState::AwaitingMarker;
            if let Some(captures) = LOCATION_RE.captures(line) {
                let relative = &captures[2];
                let project = workspace_dir.join(format!("{}{}", relative, XCODEPROJ_EXT));
                projects.push(project);
            }
        }
    }

    projects.sort();
    projects.dedup();

    debug!(
        workspace = %workspace.display(),
        count = projects.len(),
        "Resolved workspace project references"
    );

    Ok(projects)
}
