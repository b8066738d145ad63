//! Confining sanitized paths to a base directory.
//!
//! [`sanitize_path`](super::sanitize_path) only rewrites text: a relative
//! result may still start with `..`, and a symlink inside the tree may
//! point anywhere. [`safe_join`] closes both gaps before a caller touches
//! the file system:
//!
//! 1. the untrusted path is sanitized without navigation prefixes
//! 2. absolute results and results that climb out through `..` are refused
//! 3. the joined path is canonicalized (resolving symlinks) and must stay
//!    under the canonical base
//!
//! Nothing here creates files or directories.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::{PARENT_DIR, sanitize_path};
use crate::security::error::{Result, SanitizeError};

/// Sanitize `untrusted` and join it onto `base_dir`.
///
/// # Errors
///
/// - any error from [`sanitize_path`](super::sanitize_path)
/// - [`AbsolutePath`](SanitizeError::AbsolutePath) if the sanitized path is
///   rooted
/// - [`EscapesBaseDirectory`](SanitizeError::EscapesBaseDirectory) if it
///   climbs out through `..` or through a symlink
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sanitext::security::safe_join;
///
/// let path = safe_join(Path::new("/srv/uploads"), "photos/<img>.JPG")?;
/// assert!(path.ends_with("photos/img.jpg"));
/// # Ok::<(), sanitext::security::SanitizeError>(())
/// ```
pub fn safe_join(base_dir: &Path, untrusted: &str) -> Result<PathBuf> {
    let sanitized = sanitize_path(untrusted, false)?;

    if sanitized.starts_with('/') {
        warn!(
            security_event = "path_traversal_attempt",
            path = %sanitized,
            reason = "absolute_path",
            "Blocked absolute path"
        );
        return Err(SanitizeError::AbsolutePath);
    }

    if sanitized.split('/').any(|component| component == PARENT_DIR) {
        warn!(
            security_event = "path_traversal_attempt",
            path = %sanitized,
            reason = "parent_navigation",
            "Blocked path escaping base directory"
        );
        return Err(SanitizeError::EscapesBaseDirectory);
    }

    validate_path_within_base(base_dir, Path::new(sanitized.trim_end_matches('/')))
}

/// Canonicalize the longest existing prefix of `path` and re-append the
/// missing components.
///
/// Existence is probed without following symlinks, so a dangling link is
/// an existing entry whose canonicalization fails. A missing tail ending in
/// `..` cannot be resolved and is refused.
fn canonicalize_nearest(path: &Path) -> Result<PathBuf> {
    let mut existing = path;
    let mut missing = Vec::new();
    while fs::symlink_metadata(existing).is_err() {
        let name = existing
            .file_name()
            .ok_or(SanitizeError::EscapesBaseDirectory)?;
        missing.push(name);
        existing = existing
            .parent()
            .ok_or(SanitizeError::EscapesBaseDirectory)?;
    }

    let mut resolved = existing
        .canonicalize()
        .map_err(|_| SanitizeError::EscapesBaseDirectory)?;
    for name in missing.iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

/// Validate that a path stays within a base directory after canonicalization.
///
/// This prevents symlink-based path traversal attacks (TOCTOU).
///
/// # Arguments
/// * `base_dir` - The base directory (will be canonicalized)
/// * `file_path` - The path to validate (relative to `base_dir`)
///
/// # Returns
/// * `Ok(canonical_path)` - The canonicalized full path if it's within `base_dir`
/// * `Err(SanitizeError::EscapesBaseDirectory)` - If the path escapes via symlink
///   or the base cannot be resolved
///
/// Components that do not exist yet are resolved through their nearest
/// existing ancestor, so a symlinked directory anywhere along the path is
/// caught even when the leaf and its parents are still missing.
///
/// # Errors
///
/// See Returns.
pub fn validate_path_within_base(base_dir: &Path, file_path: &Path) -> Result<PathBuf> {
    let full_path = base_dir.join(file_path);
    let canonical = canonicalize_nearest(&full_path)?;

    let canonical_base = base_dir
        .canonicalize()
        .map_err(|_| SanitizeError::EscapesBaseDirectory)?;

    if !canonical.starts_with(&canonical_base) {
        warn!(
            security_event = "path_traversal_attempt",
            path = %file_path.display(),
            reason = "symlink_escape",
            "Blocked path resolving outside base directory"
        );
        return Err(SanitizeError::EscapesBaseDirectory);
    }

    Ok(canonical)
}
