//! Relative path validation.
//!
//! A file reference supplied by the host is a path relative to its storage
//! box's location. Before joining the two, the reference is normalized and
//! checked so that it can never address anything outside the location.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Validates and normalizes a relative file reference.
///
/// Walks the path component-wise: `.` and leading `/` are dropped, `..`
/// pops the previous component and is rejected once it would climb above
/// the storage location. Null bytes and Windows drive/UNC prefixes are
/// rejected outright, as is anything that normalizes to an empty path.
///
/// # Returns
///
/// The normalized path, or [`InvalidPath`](crate::error::ErrorKind::InvalidPath).
///
/// # Examples
///
/// ```
/// use hsmstat_status::validate_path;
/// use std::path::Path;
///
/// assert_eq!(
///     validate_path("dataset-1//./raw/../raw/sample.dat").unwrap(),
///     Path::new("dataset-1/raw/sample.dat"),
/// );
/// assert!(validate_path("../outside.dat").is_err());
/// assert!(validate_path("a/../../b").is_err());
/// assert!(validate_path("").is_err());
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let raw = path.as_ref();
    let mut normalized = PathBuf::new();
    let mut depth = 0usize;
    for component in raw.components() {
        match component {
            Component::Normal(part) => {
                // Null bytes survive Path::components() on Unix but truncate
                // C-based syscalls. Reject them explicitly.
                if part.as_encoded_bytes().contains(&0) {
                    exn::bail!(ErrorKind::InvalidPath(raw.to_path_buf()));
                }
                normalized.push(part);
                depth += 1;
            }
            Component::CurDir | Component::RootDir => {}
            Component::Prefix(_) => exn::bail!(ErrorKind::InvalidPath(raw.to_path_buf())),
            Component::ParentDir => {
                if depth == 0 {
                    exn::bail!(ErrorKind::InvalidPath(raw.to_path_buf()));
                }
                normalized.pop();
                depth -= 1;
            }
        }
    }
    if depth == 0 {
        exn::bail!(ErrorKind::InvalidPath(raw.to_path_buf()));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_references_pass_through() {
        assert_eq!(validate("sample.dat").unwrap(), Path::new("sample.dat"));
        assert_eq!(
            validate("dataset-1/raw/sample.dat").unwrap(),
            Path::new("dataset-1/raw/sample.dat"),
        );
    }

    #[test]
    fn test_normalization() {
        assert_eq!(validate("a//b///c").unwrap(), Path::new("a/b/c"));
        assert_eq!(validate("./a/./b").unwrap(), Path::new("a/b"));
        assert_eq!(validate("a/b/").unwrap(), Path::new("a/b"));
        // Parent references that stay within the location are resolved
        assert_eq!(validate("a/b/../c").unwrap(), Path::new("a/c"));
        // A leading slash does not make the reference absolute
        assert_eq!(validate("/a/b").unwrap(), Path::new("a/b"));
    }

    #[test]
    fn test_location_escapes_rejected() {
        assert!(validate("..").is_err());
        assert!(validate("../etc/passwd").is_err());
        assert!(validate("a/../../b").is_err());
        assert!(validate("a/b/../../../c").is_err());
    }

    #[test]
    fn test_null_bytes_rejected() {
        assert!(validate("a\0b").is_err());
        assert!(validate("\0").is_err());
    }

    #[test]
    fn test_empty_results_rejected() {
        assert!(validate("").is_err());
        assert!(validate(".").is_err());
        assert!(validate("./.").is_err());
        assert!(validate("a/..").is_err());
    }
}
