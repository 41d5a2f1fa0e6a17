//! Path building and normalization for DAV-style resource paths.

use crate::error::{CoreError, CoreResult};

/// ## Summary
/// Joins path segments into a single path, collapsing repeated slashes.
/// Segments may themselves contain slashes; empty segments are skipped.
/// The result starts with `/` and ends with `/` only when `ends_with_slash`
/// is set.
///
/// Examples:
/// - `build_path(false, &["/a//", "b", "/c"])` -> `/a/b/c`
/// - `build_path(true, &["a", "b"])` -> `/a/b/`
#[must_use]
pub fn build_path(ends_with_slash: bool, segments: &[&str]) -> String {
    let mut path = String::new();

    for segment in segments {
        for part in segment.split('/').filter(|p| !p.is_empty()) {
            path.push('/');
            path.push_str(part);
        }
    }

    if path.is_empty() {
        path.push('/');
    } else if ends_with_slash {
        path.push('/');
    } else {
        // Already normalized without a trailing slash
    }

    path
}

/// ## Summary
/// Normalizes a request path: ensures a leading `/`, collapses repeated
/// slashes, resolves `.` and `..` segments.
///
/// ## Errors
/// Returns `CoreError::InvalidPath` if a `..` segment would back up past
/// the root.
pub fn fix_path(path: &str) -> CoreResult<String> {
    let mut resolved: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if resolved.pop().is_none() {
                    return Err(CoreError::InvalidPath(format!(
                        "path backs up past root: {path}"
                    )));
                }
            }
            _ => resolved.push(segment),
        }
    }

    let mut fixed = String::with_capacity(path.len());
    for segment in &resolved {
        fixed.push('/');
        fixed.push_str(segment);
    }
    if fixed.is_empty() {
        fixed.push('/');
    }

    Ok(fixed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_path_simple() {
        assert_eq!(build_path(false, &["a", "b", "c"]), "/a/b/c");
    }

    #[test]
    fn test_build_path_collapses_slashes() {
        assert_eq!(build_path(false, &["/a//", "b", "//c/"]), "/a/b/c");
    }

    #[test]
    fn test_build_path_trailing_slash() {
        assert_eq!(build_path(true, &["a", "b"]), "/a/b/");
    }

    #[test]
    fn test_build_path_empty() {
        assert_eq!(build_path(false, &[]), "/");
        assert_eq!(build_path(true, &["", "//"]), "/");
    }

    #[test]
    fn test_fix_path_normalizes() {
        assert_eq!(fix_path("/a/./b//c").expect("valid"), "/a/b/c");
        assert_eq!(fix_path("a/b").expect("valid"), "/a/b");
    }

    #[test]
    fn test_fix_path_resolves_dotdot() {
        assert_eq!(fix_path("/a/b/../c").expect("valid"), "/a/c");
        assert_eq!(fix_path("/a/..").expect("valid"), "/");
    }

    #[test]
    fn test_fix_path_rejects_escape() {
        assert!(fix_path("/a/../..").is_err());
        assert!(fix_path("/..").is_err());
        assert!(fix_path("../a").is_err());
    }
}
