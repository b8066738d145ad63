//! Path sanitization.
//!
//! [`sanitize_path`] rebuilds a path from its components: navigation markers
//! (`.` and `..`) pass through, the final component goes through the file
//! name rule when it carries an extension, and every other component goes
//! through the directory name rule. Components that cannot be sanitized are
//! dropped; [`sanitize_path_report`] lists them.
//!
//! The result always uses `/` as separator and ends with `/` unless it
//! names a file.
//!
//! # Examples
//!
//! ```
//! use sanitext::security::sanitize_path;
//!
//! assert_eq!(sanitize_path("path/to/dir", false).unwrap(), "path/to/dir/");
//! assert_eq!(sanitize_path("path/to/file.txt", false).unwrap(), "path/to/file.txt");
//! assert_eq!(sanitize_path("./path/../to/file.txt", true).unwrap(), "./to/file.txt");
//! assert_eq!(sanitize_path("./path/../to/file.txt", false).unwrap(), "to/file.txt");
//! ```

mod base;

pub use base::{safe_join, validate_path_within_base};

use serde::Serialize;
use tracing::{debug, warn};

use super::charset::SEPARATORS;
use super::component::{sanitize_dir_name, sanitize_file_name};
use super::error::{Result, SanitizeError};
use super::extension::has_file_extension;

/// Maximum length of a sanitized path, in bytes.
pub const MAX_PATH_LENGTH: usize = 4096;

const CURRENT_DIR: &str = ".";
const PARENT_DIR: &str = "..";

/// A path component removed because it could not be sanitized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedComponent {
    /// Position among the `/`-separated components of the input.
    pub index: usize,
    /// The component as it appeared in the input.
    pub component: String,
    /// Why the component was rejected.
    #[serde(serialize_with = "serialize_reason")]
    pub reason: SanitizeError,
}

fn serialize_reason<S: serde::Serializer>(
    reason: &SanitizeError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&reason.to_string())
}

/// Sanitized path plus the components dropped on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizedPath {
    pub path: String,
    pub dropped: Vec<DroppedComponent>,
}

impl SanitizedPath {
    /// Whether the path names a file (no trailing separator).
    pub fn is_file(&self) -> bool {
        !self.path.ends_with('/')
    }
}

/// Role of a component while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Navigation,
    Directory,
    File,
}

fn classify(component: &str, is_last: bool) -> Role {
    if component == CURRENT_DIR || component == PARENT_DIR {
        Role::Navigation
    } else if is_last && has_file_extension(component) {
        Role::File
    } else {
        Role::Directory
    }
}

/// Leading navigation prefix of the raw input, if any.
fn leading_navigation(raw: &str) -> Option<&'static str> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('.'), Some(sep), _) if SEPARATORS.contains(&sep) => Some(CURRENT_DIR),
        (Some('.'), Some('.'), Some(sep)) if SEPARATORS.contains(&sep) => Some(PARENT_DIR),
        _ => None,
    }
}

/// Resolve `.` and `..` against their siblings.
///
/// Rooted paths cannot climb above the root, so their leading `..` vanish;
/// relative paths keep them.
fn clean_components<'a>(components: &[&'a str], absolute: bool) -> Vec<&'a str> {
    let mut stack: Vec<&str> = Vec::with_capacity(components.len());
    for &component in components {
        match component {
            CURRENT_DIR => {},
            PARENT_DIR => match stack.last() {
                Some(&last) if last != PARENT_DIR => {
                    stack.pop();
                },
                _ if absolute => {},
                _ => stack.push(PARENT_DIR),
            },
            _ => stack.push(component),
        }
    }
    stack
}

/// Sanitize a file system path.
///
/// Separators are normalized to `/` and every component is sanitized on
/// its own. After `.` and `..` are resolved, an absolute input stays
/// absolute. With `allow_nav`, a leading `./` or `../` that cleaning
/// removed is put back. Directory results end with `/`.
///
/// A rooted path cannot climb above the root: its leading `..` are
/// discarded while resolving, not kept and re-rooted. `/../etc/passwd`
/// becomes `/etc/passwd/`, never `/../etc/passwd/`. Relative paths keep
/// their leading `..`.
///
/// Components that fail sanitization are dropped rather than failing the
/// whole path; use [`sanitize_path_report`] to see what was removed.
///
/// # Errors
///
/// - [`EmptyInput`](SanitizeError::EmptyInput) - path is blank
/// - [`EmptySanitizedValue`](SanitizeError::EmptySanitizedValue) - nothing
///   but the current directory or the root is left
/// - [`TooLong`](SanitizeError::TooLong) - result exceeds [`MAX_PATH_LENGTH`]
pub fn sanitize_path(path: &str, allow_nav: bool) -> Result<String> {
    sanitize_path_report(path, allow_nav).map(|report| report.path)
}

/// Like [`sanitize_path`], but also reports the dropped components.
///
/// # Errors
///
/// Same as [`sanitize_path`].
///
/// # Examples
///
/// ```
/// use sanitext::security::sanitize_path_report;
///
/// let report = sanitize_path_report("docs/<>/CON/notes.txt", false).unwrap();
/// assert_eq!(report.path, "docs/notes.txt");
/// assert_eq!(report.dropped.len(), 2);
/// assert_eq!(report.dropped[0].component, "<>");
/// ```
pub fn sanitize_path_report(path: &str, allow_nav: bool) -> Result<SanitizedPath> {
    let leading_nav = leading_navigation(path);

    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(SanitizeError::EmptyInput);
    }

    let slashed = trimmed.replace(SEPARATORS, "/");
    let absolute = slashed.starts_with('/');

    let raw_components: Vec<&str> = slashed.split('/').collect();
    let last_index = raw_components.len() - 1;

    let mut kept: Vec<String> = Vec::with_capacity(raw_components.len());
    let mut dropped = Vec::new();

    for (index, component) in raw_components.iter().enumerate() {
        if component.is_empty() {
            continue;
        }
        let sanitized = match classify(component, index == last_index) {
            Role::Navigation => Ok((*component).to_string()),
            Role::File => sanitize_file_name(component),
            Role::Directory => sanitize_dir_name(component),
        };
        match sanitized {
            Ok(value) => kept.push(value),
            Err(reason) => {
                warn!(
                    security_event = "path_component_dropped",
                    index,
                    component = %component.escape_debug(),
                    reason = reason.kind(),
                    "Dropped unsafe path component"
                );
                dropped.push(DroppedComponent {
                    index,
                    component: (*component).to_string(),
                    reason,
                });
            },
        }
    }

    let refs: Vec<&str> = kept.iter().map(String::as_str).collect();
    let cleaned = clean_components(&refs, absolute);
    if cleaned.is_empty() {
        return Err(SanitizeError::empty("path"));
    }

    let mut result = cleaned.join("/");
    if absolute {
        result.insert(0, '/');
    }

    if allow_nav && let Some(prefix) = leading_nav {
        let first = cleaned[0];
        let already_navigates = first == prefix || first == PARENT_DIR;
        if !absolute && !already_navigates {
            result = format!("{prefix}/{result}");
        }
    }

    let last = cleaned[cleaned.len() - 1];
    if last == CURRENT_DIR || last == PARENT_DIR || !has_file_extension(last) {
        result.push('/');
    }

    if result.len() > MAX_PATH_LENGTH {
        warn!(
            security_event = "path_too_long",
            path_len = result.len(),
            max = MAX_PATH_LENGTH,
            "Rejected over-long path"
        );
        return Err(SanitizeError::TooLong {
            actual: result.len(),
            max: MAX_PATH_LENGTH,
        });
    }

    debug!(
        input_len = path.len(),
        output = %result,
        dropped = dropped.len(),
        "Sanitized path"
    );
    Ok(SanitizedPath {
        path: result,
        dropped,
    })
}
