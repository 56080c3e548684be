//! Recreate-user-schemes command implementation.

use std::path::Path;

use anyhow::Result;

use xcscout_ops::{recreate_user_schemes_with, workspace_project_references};

use super::BundleKind;
use crate::config::Config;

/// Execute the recreate-user-schemes command. For a workspace every
/// member project is regenerated, stopping at the first failure.
pub fn execute(config: &Config, path: &Path) -> Result<()> {
    let projects = match BundleKind::detect(path)? {
        BundleKind::Project => vec![path.to_path_buf()],
        BundleKind::Workspace => workspace_project_references(path)?,
    };

    for project in &projects {
        println!("🔄 Recreating user schemes for {}", project.display());
        recreate_user_schemes_with(project, &config.bundle_command)?;
    }

    println!("✅ Recreated user schemes for {} project(s)", projects.len());
    Ok(())
}
