//! Core domain types shared across the xcscout workspace.
//!
//! Everything here is transient: schemes and targets are reconstructed
//! from file content on every call, nothing is cached or persisted.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub mod paths;

pub use paths::{
    filter_shared_scheme_paths, filter_user_scheme_paths, is_shared_scheme_path,
    is_user_scheme_path, is_xcodeproj, is_xcworkspace, scheme_name_from_path,
};

/// Extension of an Xcode workspace bundle.
pub const XCWORKSPACE_EXT: &str = ".xcworkspace";
/// Extension of an Xcode project bundle.
pub const XCODEPROJ_EXT: &str = ".xcodeproj";
/// Extension of a scheme file.
pub const XCSCHEME_EXT: &str = ".xcscheme";
/// Extension of a built test bundle.
pub const XCTEST_EXT: &str = ".xctest";

/// Descriptor file inside a workspace bundle.
pub const WORKSPACE_DESCRIPTOR: &str = "contents.xcworkspacedata";
/// Descriptor file inside a project bundle.
pub const PROJECT_DESCRIPTOR: &str = "project.pbxproj";

/// Product type strings that mark a target's build output as a test bundle.
pub const TEST_BUNDLE_PRODUCT_TYPES: &[&str] = &[
    "com.apple.product-type.bundle.unit-test",
    "com.apple.product-type.bundle.ui-testing",
];

/// Check if a product type string denotes a test bundle (unit or UI test).
pub fn is_test_bundle_product_type(product_type: &str) -> bool {
    TEST_BUNDLE_PRODUCT_TYPES.contains(&product_type)
}

/// Storage class of a scheme file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeKind {
    /// Checked into version control under `xcshareddata/`.
    Shared,
    /// Local-only, under `xcuserdata/<user>.xcuserdatad/`.
    User,
}

impl std::fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemeKind::Shared => write!(f, "shared"),
            SchemeKind::User => write!(f, "user"),
        }
    }
}

/// A scheme file discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    /// Scheme name (filename without the `.xcscheme` extension).
    pub name: String,
    /// Filesystem path of the scheme file.
    pub path: PathBuf,
    /// Shared or user-local.
    pub kind: SchemeKind,
}

impl Scheme {
    /// Classify a path and derive the scheme name.
    ///
    /// Returns `None` for paths that are neither shared nor user scheme
    /// locations, or whose basename carries the wrong extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let text = path.to_string_lossy();
        let kind = if is_shared_scheme_path(&text) {
            SchemeKind::Shared
        } else if is_user_scheme_path(&text) {
            SchemeKind::User
        } else {
            return None;
        };
        let name = scheme_name_from_path(&text);
        if name.is_empty() {
            return None;
        }
        Some(Scheme { name, path, kind })
    }
}

/// A buildable unit parsed from the `PBXNativeTarget` section of a
/// project descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeTarget {
    /// Opaque record key from the object graph.
    pub id: String,
    /// Human-readable target name. May contain spaces.
    pub name: String,
    /// Built artifact filename (from the `productReference` comment).
    pub product_path: String,
    /// Product type string, e.g. `com.apple.product-type.application`.
    pub product_type: String,
    /// Ordered `PBXTargetDependency` record keys. May be empty.
    pub dependency_ids: Vec<String>,
}

impl NativeTarget {
    /// Check if the target's own build output is a test bundle.
    pub fn has_test_product(&self) -> bool {
        self.product_path.ends_with(XCTEST_EXT)
            || is_test_bundle_product_type(&self.product_type)
    }
}

/// A dependency edge parsed from the `PBXTargetDependency` section,
/// linking a dependency record key to the depended-upon target's key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDependency {
    /// Opaque record key of the dependency record itself.
    pub id: String,
    /// Record key of the depended-upon native target.
    pub target_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_product_types() {
        assert!(is_test_bundle_product_type(
            "com.apple.product-type.bundle.unit-test"
        ));
        assert!(is_test_bundle_product_type(
            "com.apple.product-type.bundle.ui-testing"
        ));
        assert!(!is_test_bundle_product_type(
            "com.apple.product-type.application"
        ));
        assert!(!is_test_bundle_product_type("com.apple.product-type.bundle"));
    }

    #[test]
    fn test_native_target_test_product() {
        let mut target = NativeTarget {
            id: "BAC384091BA9F569005CFE20".to_string(),
            name: "Sample".to_string(),
            product_path: "Sample.app".to_string(),
            product_type: "com.apple.product-type.application".to_string(),
            dependency_ids: vec![],
        };
        assert!(!target.has_test_product());

        target.product_path = "SampleTests.xctest".to_string();
        assert!(target.has_test_product());

        target.product_path = "Sample.app".to_string();
        target.product_type = "com.apple.product-type.bundle.unit-test".to_string();
        assert!(target.has_test_product());
    }

    #[test]
    fn test_scheme_from_path() {
        let scheme = Scheme::from_path("App.xcodeproj/xcshareddata/xcschemes/App.xcscheme")
            .expect("shared scheme path should classify");
        assert_eq!(scheme.name, "App");
        assert_eq!(scheme.kind, SchemeKind::Shared);

        let scheme =
            Scheme::from_path("App.xcodeproj/xcuserdata/ci.xcuserdatad/xcschemes/AppTest.xcscheme")
                .expect("user scheme path should classify");
        assert_eq!(scheme.name, "AppTest");
        assert_eq!(scheme.kind, SchemeKind::User);

        assert!(Scheme::from_path("App.xcodeproj/project.pbxproj").is_none());
        assert!(Scheme::from_path("xcshareddata/xcschemes/.xcscheme").is_none());
    }
}
