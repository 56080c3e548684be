//! Targets command implementation.
//!
//! Lists the native targets of a project or workspace bundle together
//! with a contains-test flag per target. Workspace output is grouped by
//! member project since target names are only unique within a project.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use xcscout_ops::{project_target_test_map, workspace_project_references};

use super::BundleKind;

/// Targets of one project bundle in command output.
#[derive(Debug, Serialize)]
struct ProjectTargets {
    project: PathBuf,
    targets: BTreeMap<String, bool>,
}

/// Execute the targets command.
pub fn execute(path: &Path, json: bool) -> Result<()> {
    let projects = match BundleKind::detect(path)? {
        BundleKind::Project => vec![path.to_path_buf()],
        BundleKind::Workspace => workspace_project_references(path)?,
    };

    let mut reports = Vec::new();
    for project in projects {
        let targets = project_target_test_map(&project)?;
        reports.push(ProjectTargets { project, targets });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        println!("📦 {}", report.project.display());
        if report.targets.is_empty() {
            println!("   (no native targets)");
        }
        for (name, contains_test) in &report.targets {
            let marker = if *contains_test { " [tests]" } else { "" };
            println!("   • {}{}", name, marker);
        }
    }
    Ok(())
}
