//! Integration tests for the xcs CLI.
//!
//! Run with: `cargo test --package xcscout-cli --test cli_integration`

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Helper to run the xcs CLI with given arguments.
fn run_xcs(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xcs"))
        .args(args)
        .output()
        .expect("Failed to execute xcs command")
}

const PBXPROJ_FIXTURE: &str = r#"// !$*UTF8*$!
{
	objects = {

/* Begin PBXNativeTarget section */
		BAC384091BA9F569005CFE20 /* SampleApp */ = {
			isa = PBXNativeTarget;
			dependencies = (
			);
			name = SampleApp;
			productReference = BAC3840A1BA9F569005CFE20 /* SampleApp.app */;
			productType = "com.apple.product-type.application";
		};
		BAC384221BA9F569005CFE20 /* SampleAppTests */ = {
			isa = PBXNativeTarget;
			dependencies = (
				BAC384251BA9F569005CFE20 /* PBXTargetDependency */,
			);
			name = SampleAppTests;
			productReference = BAC384231BA9F569005CFE20 /* SampleAppTests.xctest */;
			productType = "com.apple.product-type.bundle.unit-test";
		};
/* End PBXNativeTarget section */

/* Begin PBXTargetDependency section */
		BAC384251BA9F569005CFE20 /* PBXTargetDependency */ = {
			isa = PBXTargetDependency;
			target = BAC384091BA9F569005CFE20 /* SampleApp */;
		};
/* End PBXTargetDependency section */
	};
}
"#;

const TEST_SCHEME_FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Scheme version = "1.3">
   <TestAction>
      <Testables>
         <TestableReference skipped = "NO">
            <BuildableReference
               BuildableName = "SampleAppTests.xctest"
               BlueprintName = "SampleAppTests">
            </BuildableReference>
         </TestableReference>
      </Testables>
   </TestAction>
</Scheme>
"#;

/// Create a project bundle with a descriptor, one shared scheme, and
/// one user scheme.
fn create_project(dir: &Path, name: &str) -> PathBuf {
    let project = dir.join(format!("{}.xcodeproj", name));
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join("project.pbxproj"), PBXPROJ_FIXTURE).unwrap();

    let shared = project.join("xcshareddata/xcschemes");
    fs::create_dir_all(&shared).unwrap();
    fs::write(shared.join(format!("{}.xcscheme", name)), TEST_SCHEME_FIXTURE).unwrap();

    let user = project.join("xcuserdata/ci.xcuserdatad/xcschemes");
    fs::create_dir_all(&user).unwrap();
    fs::write(user.join(format!("{}Local.xcscheme", name)), "<Scheme/>").unwrap();

    project
}

/// Create a workspace bundle referencing the given project names.
fn create_workspace(dir: &Path, name: &str, projects: &[&str]) -> PathBuf {
    let workspace = dir.join(format!("{}.xcworkspace", name));
    fs::create_dir_all(&workspace).unwrap();

    let mut descriptor = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Workspace version = \"1.0\">\n");
    for project in projects {
        descriptor.push_str(&format!(
            "   <FileRef\n      location = \"group:{}.xcodeproj\">\n   </FileRef>\n",
            project
        ));
    }
    descriptor.push_str("</Workspace>\n");
    fs::write(workspace.join("contents.xcworkspacedata"), descriptor).unwrap();
    workspace
}

// =============================================================================
// Schemes Command Tests
// =============================================================================

#[test]
fn test_schemes_lists_project_schemes() {
    let temp = TempDir::new().unwrap();
    let project = create_project(temp.path(), "Sample");

    let output = run_xcs(&["schemes", project.to_str().unwrap()]);

    assert!(output.status.success(), "xcs schemes should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sample (shared)"));
    assert!(stdout.contains("SampleLocal (user)"));
}

#[test]
fn test_schemes_kind_filter() {
    let temp = TempDir::new().unwrap();
    let project = create_project(temp.path(), "Sample");

    let output = run_xcs(&["schemes", project.to_str().unwrap(), "--kind", "shared"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sample (shared)"));
    assert!(!stdout.contains("SampleLocal"));
}

#[test]
fn test_schemes_with_tests_annotation() {
    let temp = TempDir::new().unwrap();
    let project = create_project(temp.path(), "Sample");

    let output = run_xcs(&[
        "schemes",
        project.to_str().unwrap(),
        "--kind",
        "shared",
        "--with-tests",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sample (shared) [tests]"));
}

#[test]
fn test_schemes_json_output() {
    let temp = TempDir::new().unwrap();
    let project = create_project(temp.path(), "Sample");

    let output = run_xcs(&["schemes", project.to_str().unwrap(), "--json"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let schemes = parsed.as_array().expect("JSON array");
    assert_eq!(schemes.len(), 2);
    assert!(schemes
        .iter()
        .any(|s| s["name"] == "Sample" && s["kind"] == "shared"));
    assert!(schemes
        .iter()
        .any(|s| s["name"] == "SampleLocal" && s["kind"] == "user"));
}

#[test]
fn test_schemes_aggregates_workspace() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path(), "One");
    create_project(temp.path(), "Two");
    let workspace = create_workspace(temp.path(), "App", &["One", "Two"]);

    let output = run_xcs(&["schemes", workspace.to_str().unwrap(), "--kind", "shared"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("One (shared)"));
    assert!(stdout.contains("Two (shared)"));
}

#[test]
fn test_schemes_rejects_non_bundle_path() {
    let output = run_xcs(&["schemes", "/tmp/not-a-bundle"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not an Xcode bundle"));
}

// =============================================================================
// Targets Command Tests
// =============================================================================

#[test]
fn test_targets_flags_test_targets() {
    let temp = TempDir::new().unwrap();
    let project = create_project(temp.path(), "Sample");

    let output = run_xcs(&["targets", project.to_str().unwrap()]);

    assert!(output.status.success(), "xcs targets should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("• SampleApp\n"));
    assert!(stdout.contains("• SampleAppTests [tests]"));
}

#[test]
fn test_targets_json_output() {
    let temp = TempDir::new().unwrap();
    let project = create_project(temp.path(), "Sample");

    let output = run_xcs(&["targets", project.to_str().unwrap(), "--json"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let targets = &parsed.as_array().expect("JSON array")[0]["targets"];
    assert_eq!(targets["SampleApp"], false);
    assert_eq!(targets["SampleAppTests"], true);
}

#[test]
fn test_targets_fails_on_missing_descriptor() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("Empty.xcodeproj");
    fs::create_dir_all(&project).unwrap();

    let output = run_xcs(&["targets", project.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("descriptor does not exist"));
}

// =============================================================================
// Status Command Tests
// =============================================================================

#[test]
fn test_status_reports_project_overview() {
    let temp = TempDir::new().unwrap();
    let project = create_project(temp.path(), "Sample");

    let output = run_xcs(&["status", project.to_str().unwrap()]);

    assert!(output.status.success(), "xcs status should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Kind:    project"));
    assert!(stdout.contains("1 shared, 1 user"));
    assert!(stdout.contains("Targets: 2"));
}

#[test]
fn test_status_lists_workspace_members() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path(), "One");
    create_project(temp.path(), "Two");
    let workspace = create_workspace(temp.path(), "App", &["One", "Two"]);

    let output = run_xcs(&["status", workspace.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Kind:    workspace"));
    assert!(stdout.contains("One.xcodeproj"));
    assert!(stdout.contains("Two.xcodeproj"));
    assert!(stdout.contains("Targets: 4"));
}
