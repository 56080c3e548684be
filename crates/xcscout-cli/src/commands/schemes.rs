//! Schemes command implementation.
//!
//! Lists the schemes of a project or workspace bundle, classified as
//! shared or user, optionally annotated with whether each scheme file
//! references a test bundle.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use serde::Serialize;

use xcscout_core::{Scheme, SchemeKind};
use xcscout_ops::{project_schemes, scheme_file_contains_test_action, workspace_schemes};

use super::BundleKind;

/// Which scheme kinds to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    Shared,
    User,
    All,
}

impl FromStr for KindFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "shared" => Ok(Self::Shared),
            "user" => Ok(Self::User),
            "all" => Ok(Self::All),
            other => anyhow::bail!("unknown scheme kind: {} (expected shared, user, or all)", other),
        }
    }
}

impl KindFilter {
    fn accepts(self, kind: SchemeKind) -> bool {
        match self {
            Self::Shared => kind == SchemeKind::Shared,
            Self::User => kind == SchemeKind::User,
            Self::All => true,
        }
    }
}

/// One scheme in command output.
#[derive(Debug, Serialize)]
struct SchemeReport {
    name: String,
    path: PathBuf,
    kind: SchemeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    contains_test: Option<bool>,
}

/// Execute the schemes command.
pub fn execute(path: &Path, kind: KindFilter, with_tests: bool, json: bool) -> Result<()> {
    let schemes = match BundleKind::detect(path)? {
        BundleKind::Project => project_schemes(path)?,
        BundleKind::Workspace => workspace_schemes(path)?,
    };

    let mut reports = Vec::new();
    for scheme in schemes {
        if !kind.accepts(scheme.kind) {
            continue;
        }
        reports.push(report_for(scheme, with_tests)?);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if reports.is_empty() {
        println!("(no schemes found)");
        return Ok(());
    }

    println!("🗂  {} schemes", reports.len());
    for report in &reports {
        let test_marker = match report.contains_test {
            Some(true) => " [tests]",
            Some(false) => " [no tests]",
            None => "",
        };
        println!("   • {} ({}){}", report.name, report.kind, test_marker);
    }
    Ok(())
}

fn report_for(scheme: Scheme, with_tests: bool) -> Result<SchemeReport> {
    let contains_test = if with_tests {
        Some(scheme_file_contains_test_action(&scheme.path)?)
    } else {
        None
    };
    Ok(SchemeReport {
        name: scheme.name,
        path: scheme.path,
        kind: scheme.kind,
        contains_test,
    })
}
