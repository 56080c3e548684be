//! Status command implementation.
//!
//! One-screen overview of a bundle: kind, member projects, scheme
//! counts by storage class, and native target count.

use std::path::Path;

use anyhow::Result;

use xcscout_core::SchemeKind;
use xcscout_ops::{
    project_schemes, project_targets, workspace_project_references, workspace_schemes,
    workspace_targets,
};

use super::BundleKind;

/// Execute the status command.
pub fn execute(path: &Path) -> Result<()> {
    let kind = BundleKind::detect(path)?;

    println!("📊 Xcscout Status");
    println!("{:─<50}", "");
    println!();
    println!("📍 Path:    {}", path.display());

    let (schemes, targets) = match kind {
        BundleKind::Project => {
            println!("🔍 Kind:    project");
            (project_schemes(path)?, project_targets(path)?)
        }
        BundleKind::Workspace => {
            println!("🔍 Kind:    workspace");
            let projects = workspace_project_references(path)?;
            println!();
            println!("📦 Member projects:");
            for project in &projects {
                println!("   • {}", project.display());
            }
            (workspace_schemes(path)?, workspace_targets(path)?)
        }
    };

    let shared = schemes.iter().filter(|s| s.kind == SchemeKind::Shared).count();
    let user = schemes.len() - shared;

    println!();
    println!("🗂  Schemes: {} shared, {} user", shared, user);
    println!("🎯 Targets: {}", targets.len());
    Ok(())
}
