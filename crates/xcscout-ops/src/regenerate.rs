//! User scheme regeneration through the `xcodeproj` Ruby gem.
//!
//! Xcode materializes per-user schemes lazily; on a fresh checkout a
//! project may have none at all. The gem's `recreate_user_schemes` is
//! the only reliable way to force them into existence without opening
//! the IDE, so this module shells out to a scratch Ruby environment:
//! a throwaway directory holding a Gemfile and a small script, driven
//! by `bundle install` followed by `bundle exec ruby`.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;
use tracing::{debug, info};

use crate::error::{OpsError, OpsResult};
use crate::workspace::workspace_project_references;

/// Executable used to install and run the gem environment.
pub const DEFAULT_BUNDLE_COMMAND: &str = "bundle";

const GEMFILE: &str = "source 'https://rubygems.org'\n\ngem 'xcodeproj'\n";

const RECREATE_SCRIPT: &str = r#"require 'xcodeproj'

begin
  project_path = ENV['project_path']
  project = Xcodeproj::Project.open(project_path)
  project.recreate_user_schemes
  project.save
rescue => e
  puts e.to_s
  exit 1
end
"#;

/// Run a prepared command, returning its combined trimmed output.
///
/// A non-zero exit with captured output surfaces that output as the
/// error text, since the tool's own message beats a bare exit status.
fn run_and_capture(command: &mut Command) -> OpsResult<String> {
    let output = command.output()?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    let combined = combined.trim().to_string();

    if !output.status.success() {
        let output = if combined.is_empty() {
            format!("command exited with {}", output.status)
        } else {
            combined
        };
        return Err(OpsError::ExternalTool { output });
    }
    Ok(combined)
}

/// Recreate the user schemes of a single project bundle, invoking the
/// given bundler executable.
///
/// The gem environment lives in a scratch directory that is removed
/// when the call returns. The script runs from the project's parent
/// directory and receives the bundle name through the `project_path`
/// environment variable.
pub fn recreate_user_schemes_with(project: &Path, bundle_command: &str) -> OpsResult<()> {
    let scratch = TempDir::new()?;
    let gemfile = scratch.path().join("Gemfile");
    let script = scratch.path().join("recreate_user_schemes.rb");
    std::fs::write(&gemfile, GEMFILE)?;
    std::fs::write(&script, RECREATE_SCRIPT)?;

    let project_dir = project.parent().unwrap_or_else(|| Path::new("."));
    let project_name = project
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!(project = %project.display(), "Installing gem environment");
    run_and_capture(
        Command::new(bundle_command)
            .arg("install")
            .current_dir(project_dir)
            .env("BUNDLE_GEMFILE", &gemfile)
            .env("LC_ALL", "en_US.UTF-8"),
    )?;

    debug!(project = %project.display(), "Recreating user schemes");
    run_and_capture(
        Command::new(bundle_command)
            .arg("exec")
            .arg("ruby")
            .arg(&script)
            .current_dir(project_dir)
            .env("BUNDLE_GEMFILE", &gemfile)
            .env("LC_ALL", "en_US.UTF-8")
            .env("project_path", &project_name),
    )?;

    info!(project = %project.display(), "Recreated user schemes");
    Ok(())
}

/// Recreate the user schemes of a single project bundle with the
/// default bundler executable.
pub fn recreate_user_schemes(project: &Path) -> OpsResult<()> {
    recreate_user_schemes_with(project, DEFAULT_BUNDLE_COMMAND)
}

/// Recreate user schemes for every member project of a workspace,
/// stopping at the first failure.
pub fn recreate_workspace_user_schemes(workspace: &Path) -> OpsResult<()> {
    for project in workspace_project_references(workspace)? {
        recreate_user_schemes(&project)?;
    }
    Ok(())
}
