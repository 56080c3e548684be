//! Xcscout Operations Layer
//!
//! This crate provides a typed API over Xcode project and workspace
//! bundles: scheme discovery and classification, workspace reference
//! resolution, native-target extraction from `project.pbxproj`, and
//! user-scheme regeneration. It is consumed by the CLI and can be
//! embedded by CI tooling directly.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use xcscout_ops::{workspace_shared_schemes, project_target_test_map};
//!
//! fn main() -> xcscout_ops::OpsResult<()> {
//!     let schemes = workspace_shared_schemes(Path::new("App.xcworkspace"))?;
//!     println!("{} shared schemes", schemes.len());
//!
//!     let test_map = project_target_test_map(Path::new("App.xcodeproj"))?;
//!     for (target, contains_test) in &test_map {
//!         println!("{target}: {contains_test}");
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod pbxproj;
mod regenerate;
mod scan;
mod schemes;
mod workspace;

// Re-export public API
pub use error::{OpsError, OpsResult};
pub use pbxproj::{
    content_target_names, content_target_test_map, parse_native_targets,
    parse_target_dependencies, project_target_test_map, project_targets, target_test_map,
    workspace_targets,
};
pub use regenerate::{
    recreate_user_schemes, recreate_user_schemes_with, recreate_workspace_user_schemes,
    DEFAULT_BUNDLE_COMMAND,
};
pub use scan::files_under;
pub use schemes::{
    glob_shared_scheme_paths, glob_user_scheme_paths, project_schemes,
    project_shared_scheme_paths, project_shared_schemes, project_user_scheme_paths,
    project_user_schemes, scheme_content_contains_test_action, scheme_file_contains_test_action,
    walk_shared_scheme_paths, walk_user_scheme_paths, workspace_schemes,
    workspace_shared_scheme_paths, workspace_shared_schemes, workspace_user_scheme_paths,
    workspace_user_schemes,
};
pub use workspace::workspace_project_references;
