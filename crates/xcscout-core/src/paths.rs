//! Pure path predicates for scheme and bundle classification.
//!
//! These are total functions over strings: no filesystem access. The
//! patterns are compiled once since the predicates run per-path inside
//! walk and filter loops.

use std::sync::LazyLock;

use regex::Regex;

use crate::{XCODEPROJ_EXT, XCSCHEME_EXT, XCWORKSPACE_EXT};

static SHARED_SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"xcshareddata/xcschemes/.+\.xcscheme$").expect("shared scheme pattern is valid")
});

static USER_SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // The username segment before `.xcuserdatad` may be empty.
    Regex::new(r"xcuserdata/.*\.xcuserdatad/xcschemes/.+\.xcscheme$")
        .expect("user scheme pattern is valid")
});

/// Check if a path points at an Xcode project bundle.
pub fn is_xcodeproj(path: &str) -> bool {
    path.ends_with(XCODEPROJ_EXT)
}

/// Check if a path points at an Xcode workspace bundle.
pub fn is_xcworkspace(path: &str) -> bool {
    path.ends_with(XCWORKSPACE_EXT)
}

/// Check if a path is a shared scheme file
/// (`.../xcshareddata/xcschemes/<name>.xcscheme`, non-empty name).
pub fn is_shared_scheme_path(path: &str) -> bool {
    SHARED_SCHEME_RE.is_match(path)
}

/// Check if a path is a user scheme file
/// (`.../xcuserdata/<user>.xcuserdatad/xcschemes/<name>.xcscheme`).
pub fn is_user_scheme_path(path: &str) -> bool {
    USER_SCHEME_RE.is_match(path)
}

/// Derive the scheme name from a scheme file path.
///
/// Returns the basename with the `.xcscheme` extension stripped, or an
/// empty string when the extension is missing or the name is empty.
pub fn scheme_name_from_path(path: &str) -> String {
    let basename = path.rsplit('/').next().unwrap_or(path);
    match basename.strip_suffix(XCSCHEME_EXT) {
        Some(name) => name.to_string(),
        None => String::new(),
    }
}

/// Filter a path list down to shared scheme files, sorted.
pub fn filter_shared_scheme_paths<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    let mut filtered: Vec<String> = paths
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| is_shared_scheme_path(p))
        .map(|p| p.to_string())
        .collect();
    filtered.sort();
    filtered
}

/// Filter a path list down to user scheme files, sorted.
pub fn filter_user_scheme_paths<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    let mut filtered: Vec<String> = paths
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| is_user_scheme_path(p))
        .map(|p| p.to_string())
        .collect();
    filtered.sort();
    filtered
}
