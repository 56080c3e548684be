//! Scheme discovery and content inspection.
//!
//! Two discovery strategies are preserved as alternative entry points:
//!
//! - **Glob-based** (canonical): direct patterns rooted at a single
//!   project or workspace bundle. Workspace aggregation happens
//!   explicitly over [`workspace_project_references`].
//! - **Walk-based**: recursive walk of the whole tree with the path
//!   classifier applied to every discovered path. Also works for
//!   workspaces containing nested project bundles.
//!
//! Both produce the same logical set for well-formed bundles. Output is
//! always sorted; scheme names are never deduplicated at this layer, so
//! duplicate names across member projects are preserved.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use xcscout_core::{
    is_shared_scheme_path, is_user_scheme_path, scheme_name_from_path, Scheme, SchemeKind,
};

use crate::error::OpsResult;
use crate::scan::files_under;
use crate::workspace::workspace_project_references;

const SHARED_SCHEME_GLOB: &str = "xcshareddata/xcschemes/*.xcscheme";
const USER_SCHEME_GLOB: &str = "xcuserdata/*.xcuserdatad/xcschemes/*.xcscheme";

static TEST_BUILDABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"BuildableName = ".+\.xctest""#).expect("buildable name pattern is valid")
});

// =============================================================================
// Glob-based discovery (canonical)
// =============================================================================

/// Find shared scheme files inside a single bundle via glob.
pub fn glob_shared_scheme_paths(bundle: &Path) -> OpsResult<Vec<PathBuf>> {
    glob_scheme_paths(bundle, SHARED_SCHEME_GLOB)
}

/// Find user scheme files inside a single bundle via glob.
pub fn glob_user_scheme_paths(bundle: &Path) -> OpsResult<Vec<PathBuf>> {
    glob_scheme_paths(bundle, USER_SCHEME_GLOB)
}

fn glob_scheme_paths(bundle: &Path, pattern: &str) -> OpsResult<Vec<PathBuf>> {
    let full_pattern = bundle.join(pattern);
    let mut paths = Vec::new();
    for entry in glob::glob(&full_pattern.to_string_lossy())? {
        paths.push(entry?);
    }
    paths.sort();
    Ok(paths)
}

// =============================================================================
// Walk-based discovery (alternative entry point)
// =============================================================================

/// Find shared scheme files by walking the tree under `root`.
///
/// Unlike the glob strategy this recurses into nested project bundles,
/// so it can be pointed at a workspace directory directly.
pub fn walk_shared_scheme_paths(root: &Path) -> OpsResult<Vec<PathBuf>> {
    walk_scheme_paths(root, is_shared_scheme_path)
}

/// Find user scheme files by walking the tree under `root`.
pub fn walk_user_scheme_paths(root: &Path) -> OpsResult<Vec<PathBuf>> {
    walk_scheme_paths(root, is_user_scheme_path)
}

fn walk_scheme_paths(root: &Path, matches: fn(&str) -> bool) -> OpsResult<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = files_under(root)?
        .into_iter()
        .filter(|p| matches(&p.to_string_lossy()))
        .collect();
    paths.sort();
    Ok(paths)
}

// =============================================================================
// Per-project operations
// =============================================================================

/// Shared scheme file paths of a single project bundle, sorted.
pub fn project_shared_scheme_paths(project: &Path) -> OpsResult<Vec<PathBuf>> {
    glob_shared_scheme_paths(project)
}

/// User scheme file paths of a single project bundle, sorted.
pub fn project_user_scheme_paths(project: &Path) -> OpsResult<Vec<PathBuf>> {
    glob_user_scheme_paths(project)
}

/// Shared scheme names of a single project bundle, sorted.
pub fn project_shared_schemes(project: &Path) -> OpsResult<Vec<String>> {
    Ok(scheme_names(&project_shared_scheme_paths(project)?))
}

/// User scheme names of a single project bundle, sorted.
pub fn project_user_schemes(project: &Path) -> OpsResult<Vec<String>> {
    Ok(scheme_names(&project_user_scheme_paths(project)?))
}

/// All schemes of a single project bundle as classified [`Scheme`]s,
/// sorted by path.
pub fn project_schemes(project: &Path) -> OpsResult<Vec<Scheme>> {
    let mut schemes = Vec::new();
    collect_schemes(project, &mut schemes)?;
    schemes.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(schemes)
}

// =============================================================================
// Workspace-level operations
// =============================================================================

/// Shared scheme file paths of a workspace: the workspace bundle itself
/// plus every member project, merged and sorted. Fails fast on the
/// first member-project error.
pub fn workspace_shared_scheme_paths(workspace: &Path) -> OpsResult<Vec<PathBuf>> {
    aggregate_scheme_paths(workspace, glob_shared_scheme_paths)
}

/// User scheme file paths of a workspace and its member projects.
pub fn workspace_user_scheme_paths(workspace: &Path) -> OpsResult<Vec<PathBuf>> {
    aggregate_scheme_paths(workspace, glob_user_scheme_paths)
}

/// Shared scheme names of a workspace and its member projects, sorted.
/// Duplicate names across projects are preserved.
pub fn workspace_shared_schemes(workspace: &Path) -> OpsResult<Vec<String>> {
    Ok(scheme_names(&workspace_shared_scheme_paths(workspace)?))
}

/// User scheme names of a workspace and its member projects, sorted.
pub fn workspace_user_schemes(workspace: &Path) -> OpsResult<Vec<String>> {
    Ok(scheme_names(&workspace_user_scheme_paths(workspace)?))
}

/// All schemes of a workspace and its member projects as classified
/// [`Scheme`]s, sorted by path.
pub fn workspace_schemes(workspace: &Path) -> OpsResult<Vec<Scheme>> {
    let mut schemes = Vec::new();
    collect_schemes(workspace, &mut schemes)?;
    for project in workspace_project_references(workspace)? {
        collect_schemes(&project, &mut schemes)?;
    }
    schemes.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(schemes)
}

fn aggregate_scheme_paths(
    workspace: &Path,
    per_bundle: fn(&Path) -> OpsResult<Vec<PathBuf>>,
) -> OpsResult<Vec<PathBuf>> {
    let mut paths = per_bundle(workspace)?;
    for project in workspace_project_references(workspace)? {
        paths.extend(per_bundle(&project)?);
    }
    paths.sort();
    debug!(
        workspace = %workspace.display(),
        count = paths.len(),
        "Aggregated workspace scheme paths"
    );
    Ok(paths)
}

fn collect_schemes(bundle: &Path, out: &mut Vec<Scheme>) -> OpsResult<()> {
    for path in glob_shared_scheme_paths(bundle)? {
        let name = scheme_name_from_path(&path.to_string_lossy());
        out.push(Scheme {
            name,
            path,
            kind: SchemeKind::Shared,
        });
    }
    for path in glob_user_scheme_paths(bundle)? {
        let name = scheme_name_from_path(&path.to_string_lossy());
        out.push(Scheme {
            name,
            path,
            kind: SchemeKind::User,
        });
    }
    Ok(())
}

fn scheme_names(paths: &[PathBuf]) -> Vec<String> {
    let mut names: Vec<String> = paths
        .iter()
        .map(|p| scheme_name_from_path(&p.to_string_lossy()))
        .collect();
    names.sort();
    names
}

// =============================================================================
// Content inspection
// =============================================================================

/// Scan scheme XML content for a test-bundle buildable reference.
///
/// Line-by-line scan for `BuildableName = "<name>.xctest"`; true on the
/// first match. A well-formed scheme with no match is a normal `false`.
pub fn scheme_content_contains_test_action(content: &str) -> bool {
    content.lines().any(|line| TEST_BUILDABLE_RE.is_match(line))
}

/// Read a scheme file and scan it for a test-bundle buildable reference.
pub fn scheme_file_contains_test_action(path: &Path) -> OpsResult<bool> {
    let content = std::fs::read_to_string(path)?;
    Ok(scheme_content_contains_test_action(&content))
}
