//! Target extraction from `project.pbxproj` descriptors.
//!
//! The descriptor is a brace-nested, semicolon-terminated object graph
//! with named sections delimited by comment markers. This module does
//! not parse the full grammar: it isolates the `PBXNativeTarget` and
//! `PBXTargetDependency` sections by marker-line scanning and extracts
//! only the fields it needs with per-record regexes, by key token
//! rather than position. A future full-grammar parser can replace this
//! behind the same public functions.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use xcscout_core::{
    is_test_bundle_product_type, NativeTarget, TargetDependency, PROJECT_DESCRIPTOR,
};

use crate::error::{OpsError, OpsResult};
use crate::workspace::workspace_project_references;

const NATIVE_TARGET_SECTION: &str = "PBXNativeTarget";
const TARGET_DEPENDENCY_SECTION: &str = "PBXTargetDependency";

static RECORD_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9A-Za-z]+)\s*(?:/\*.*\*/\s*)?= \{\s*$").expect("record pattern is valid")
});

static ISA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*isa = (\w+);").expect("isa pattern is valid"));

// Greedy up to the final semicolon: names may contain internal
// punctuation and must not be truncated at whitespace.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*name = (.+);").expect("name pattern is valid"));

static PRODUCT_REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*productReference = ([0-9A-Za-z]+) /\* (.+) \*/;")
        .expect("productReference pattern is valid")
});

static PRODUCT_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*productType = "?([^";]+)"?;"#).expect("productType pattern is valid")
});

static DEPENDENCY_TARGET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*target = ([0-9A-Za-z]+)").expect("target pattern is valid")
});

static LIST_ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9A-Za-z]+)\s*(?:/\*.*\*/)?\s*,?\s*$").expect("list entry pattern is valid")
});

// =============================================================================
// Section isolation
// =============================================================================

/// Collect the lines between a section's begin and end markers.
/// A missing section yields an empty slice, not an error.
fn section_lines<'a>(content: &'a str, section: &str) -> Vec<&'a str> {
    let begin = format!("/* Begin {} section */", section);
    let end = format!("/* End {} section */", section);

    let mut lines = Vec::new();
    let mut in_section = false;
    for line in content.lines() {
        let trimmed = line.trim();
        if in_section && trimmed == end {
            break;
        }
        if trimmed == begin {
            in_section = true;
            continue;
        }
        if in_section {
            lines.push(line);
        }
    }
    lines
}

/// One brace-delimited record inside a section: the opening key plus
/// the body lines at record depth.
struct RawRecord {
    id: String,
    lines: Vec<String>,
}

/// Split a section's lines into records. Records open on
/// `<id> /* comment */ = {` and close at the matching `};`; nested
/// braces inside a record are kept as body lines.
fn section_records(lines: &[&str]) -> Vec<RawRecord> {
    let mut records = Vec::new();
    let mut current: Option<RawRecord> = None;
    let mut depth = 0usize;

    for line in lines {
        let trimmed = line.trim();
        if depth == 0 {
            if let Some(captures) = RECORD_OPEN_RE.captures(line) {
                current = Some(RawRecord {
                    id: captures[1].to_string(),
                    lines: Vec::new(),
                });
                depth = 1;
            }
            continue;
        }

        if trimmed == "};" {
            depth -= 1;
            if depth == 0 {
                if let Some(record) = current.take() {
                    records.push(record);
                }
                continue;
            }
        } else if trimmed.ends_with('{') {
            depth += 1;
        }

        if let Some(record) = current.as_mut() {
            record.lines.push((*line).to_string());
        }
    }
    records
}

// =============================================================================
// Record field extraction
// =============================================================================

/// Strip surrounding quotes from a field value. Values are quoted in
/// the source when they contain special characters.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse the `PBXNativeTarget` section of a descriptor into targets.
///
/// Field order within a record is not guaranteed; fields are located by
/// key token. A record missing its `name` or `productType` is a hard
/// [`OpsError::Parse`] failure: test detection downstream would be
/// meaningless without them. A missing section yields an empty list.
pub fn parse_native_targets(content: &str) -> OpsResult<Vec<NativeTarget>> {
    let lines = section_lines(content, NATIVE_TARGET_SECTION);
    let mut targets = Vec::new();

    for record in section_records(&lines) {
        let mut name = None;
        let mut product_path = None;
        let mut product_type = None;
        let mut dependency_ids = Vec::new();
        let mut isa = None;
        let mut in_dependencies = false;

        for line in &record.lines {
            let trimmed = line.trim();

            if in_dependencies {
                if trimmed.starts_with(");") || trimmed == ")" {
                    in_dependencies = false;
                } else if let Some(captures) = LIST_ENTRY_RE.captures(line) {
                    dependency_ids.push(captures[1].to_string());
                }
                continue;
            }

            if let Some(captures) = ISA_RE.captures(line) {
                isa = Some(captures[1].to_string());
            } else if let Some(captures) = NAME_RE.captures(line) {
                name = Some(unquote(&captures[1]).to_string());
            } else if let Some(captures) = PRODUCT_REFERENCE_RE.captures(line) {
                product_path = Some(captures[2].to_string());
            } else if let Some(captures) = PRODUCT_TYPE_RE.captures(line) {
                product_type = Some(captures[1].to_string());
            } else if trimmed.starts_with("dependencies = (") {
                if !trimmed.contains(')') {
                    in_dependencies = true;
                }
                // Single-line lists are either empty or hold inline ids.
                if let Some(rest) = trimmed
                    .strip_prefix("dependencies = (")
                    .filter(|_| trimmed.contains(')'))
                {
                    let inline = rest.split(')').next().unwrap_or("");
                    for id in inline.split(',') {
                        let id = id.trim();
                        if !id.is_empty() {
                            dependency_ids.push(id.to_string());
                        }
                    }
                }
            }
        }

        if isa.as_deref() != Some(NATIVE_TARGET_SECTION) {
            continue;
        }

        let name = name.ok_or_else(|| {
            OpsError::parse(
                PROJECT_DESCRIPTOR,
                format!("native target {} is missing its name field", record.id),
            )
        })?;
        let product_type = product_type.ok_or_else(|| {
            OpsError::parse(
                PROJECT_DESCRIPTOR,
                format!("native target {} is missing its productType field", name),
            )
        })?;

        targets.push(NativeTarget {
            id: record.id,
            name,
            product_path: product_path.unwrap_or_default(),
            product_type,
            dependency_ids,
        });
    }

    Ok(targets)
}

/// Parse the `PBXTargetDependency` section into dependency edges.
///
/// Records without a `target` field are skipped: they behave exactly
/// like dangling references, which are tolerated. A missing section
/// yields an empty list.
pub fn parse_target_dependencies(content: &str) -> Vec<TargetDependency> {
    let lines = section_lines(content, TARGET_DEPENDENCY_SECTION);
    let mut dependencies = Vec::new();

    for record in section_records(&lines) {
        for line in &record.lines {
            if let Some(captures) = DEPENDENCY_TARGET_RE.captures(line) {
                dependencies.push(TargetDependency {
                    id: record.id,
                    target_id: captures[1].to_string(),
                });
                break;
            }
        }
    }
    dependencies
}

// =============================================================================
// Cross-referencing
// =============================================================================

/// Map each target name to whether it contains or represents a test
/// action: true when any directly depended-upon target's product type
/// denotes a test bundle, or when the target's own product path ends in
/// `.xctest`. Dangling dependency references are ignored.
pub fn target_test_map(
    targets: &[NativeTarget],
    dependencies: &[TargetDependency],
) -> BTreeMap<String, bool> {
    let targets_by_id: HashMap<&str, &NativeTarget> =
        targets.iter().map(|t| (t.id.as_str(), t)).collect();
    let dependency_targets: HashMap<&str, &str> = dependencies
        .iter()
        .map(|d| (d.id.as_str(), d.target_id.as_str()))
        .collect();

    targets
        .iter()
        .map(|target| {
            let depends_on_test_bundle = target.dependency_ids.iter().any(|dep_id| {
                dependency_targets
                    .get(dep_id.as_str())
                    .and_then(|target_id| targets_by_id.get(target_id))
                    .map(|dep| is_test_bundle_product_type(&dep.product_type))
                    .unwrap_or(false)
            });
            let contains_test = depends_on_test_bundle || target.has_test_product();
            (target.name.clone(), contains_test)
        })
        .collect()
}

/// Extract the sorted target names from descriptor content.
pub fn content_target_names(content: &str) -> OpsResult<Vec<String>> {
    let mut names: Vec<String> = parse_native_targets(content)?
        .into_iter()
        .map(|t| t.name)
        .collect();
    names.sort();
    Ok(names)
}

/// Extract the name → contains-test mapping from descriptor content.
pub fn content_target_test_map(content: &str) -> OpsResult<BTreeMap<String, bool>> {
    let targets = parse_native_targets(content)?;
    let dependencies = parse_target_dependencies(content);
    Ok(target_test_map(&targets, &dependencies))
}

// =============================================================================
// Per-project and workspace operations
// =============================================================================

/// Read a project's descriptor, failing with
/// [`OpsError::DescriptorNotFound`] when it is absent.
fn read_project_descriptor(project: &Path) -> OpsResult<String> {
    let descriptor = project.join(PROJECT_DESCRIPTOR);
    if !descriptor.exists() {
        return Err(OpsError::DescriptorNotFound { path: descriptor });
    }
    Ok(std::fs::read_to_string(&descriptor)?)
}

/// Re-point a content-level parse error at the descriptor on disk.
fn with_descriptor_path(err: OpsError, project: &Path) -> OpsError {
    match err {
        OpsError::Parse { message, .. } => OpsError::parse(project.join(PROJECT_DESCRIPTOR), message),
        other => other,
    }
}

/// List a project's target names, sorted.
pub fn project_targets(project: &Path) -> OpsResult<Vec<String>> {
    let content = read_project_descriptor(project)?;
    content_target_names(&content).map_err(|e| with_descriptor_path(e, project))
}

/// Map a project's target names to their contains-test flags.
pub fn project_target_test_map(project: &Path) -> OpsResult<BTreeMap<String, bool>> {
    let content = read_project_descriptor(project)?;
    content_target_test_map(&content).map_err(|e| with_descriptor_path(e, project))
}

/// List target names across every member project of a workspace,
/// merged and sorted. Fails fast on the first member-project error.
pub fn workspace_targets(workspace: &Path) -> OpsResult<Vec<String>> {
    let mut targets = Vec::new();
    for project in workspace_project_references(workspace)? {
        targets.extend(project_targets(&project)?);
    }
    targets.sort();
    debug!(
        workspace = %workspace.display(),
        count = targets.len(),
        "Aggregated workspace targets"
    );
    Ok(targets)
}
