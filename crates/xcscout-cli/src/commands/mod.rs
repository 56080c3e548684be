//! CLI command implementations.

use std::path::Path;

use anyhow::{bail, Result};

use xcscout_core::{is_xcodeproj, is_xcworkspace};

pub mod recreate;
pub mod schemes;
pub mod status;
pub mod targets;

/// Kind of Xcode bundle a command operates on, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleKind {
    Project,
    Workspace,
}

impl BundleKind {
    /// Classify a path as a project or workspace bundle.
    pub fn detect(path: &Path) -> Result<Self> {
        let text = path.to_string_lossy();
        if is_xcworkspace(&text) {
            Ok(Self::Workspace)
        } else if is_xcodeproj(&text) {
            Ok(Self::Project)
        } else {
            bail!(
                "not an Xcode bundle: {} (expected a .xcodeproj or .xcworkspace path)",
                path.display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    #[test]
    fn test_bundle_kind_detection() {
        assert_eq!(
            BundleKind::detect(&PathBuf::from("App.xcodeproj")).unwrap(),
            BundleKind::Project
        );
        assert_eq!(
            BundleKind::detect(&PathBuf::from("path/to/App.xcworkspace")).unwrap(),
            BundleKind::Workspace
        );
        assert!(BundleKind::detect(&PathBuf::from("App")).is_err());
    }
}
