//! Error types for the operations layer.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Errors that can occur during scheme and target operations.
#[derive(Debug, Error)]
pub enum OpsError {
    /// An expected descriptor file is missing (no `contents.xcworkspacedata`
    /// in a workspace bundle, no `project.pbxproj` in a project bundle).
    #[error("descriptor does not exist at: {path}")]
    DescriptorNotFound { path: PathBuf },

    /// IO error during file reads or directory walks.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk failure.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Invalid glob pattern (indicates a malformed bundle path).
    #[error("glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Glob iteration failure.
    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),

    /// A record section exists but a required field is missing mid-record.
    /// Downstream test detection would be meaningless without it.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The external scheme regenerator returned non-zero. Carries the
    /// tool's combined output when it printed any, since that is more
    /// informative than a bare exit status.
    #[error("scheme regeneration failed:\n{output}")]
    ExternalTool { output: String },
}

impl OpsError {
    /// Create a parse error for a descriptor file.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
