//! File and directory name sanitization.
//!
//! Both rules share one character whitelist (Unicode letters and digits,
//! `_` and `-`), collapse underscore runs, refuse reserved device names and
//! cap the result at [`MAX_NAME_LENGTH`] bytes. File names additionally keep
//! a normalized extension, which is never cut when the name is truncated.
//!
//! # Examples
//!
//! ```
//! use sanitext::security::{sanitize_dir_name, sanitize_file_name};
//!
//! assert_eq!(sanitize_file_name("my<file>.TXT").unwrap(), "myfile.txt");
//! assert!(sanitize_file_name("con.txt").is_err());
//!
//! assert_eq!(sanitize_dir_name("my/dir<test>").unwrap(), "mydirtest");
//! assert_eq!(sanitize_dir_name(".config").unwrap(), "dir_config");
//! ```

use tracing::warn;

use super::charset::{SEPARATORS, clean_name, split_extension, truncate_bytes};
use super::error::{Result, SanitizeError};
use super::extension::sanitize_extension;

/// Maximum length of a single file or directory name, in bytes.
pub const MAX_NAME_LENGTH: usize = 255;

/// Device names that are unusable as a base name on Windows, whatever the
/// extension: `CON`, `PRN`, `AUX`, `NUL`, `COM1`-`COM9` and `LPT1`-`LPT9`.
pub const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Whether `base` (a name without extension) is a reserved device name.
///
/// The comparison ignores ASCII case: `"con"`, `"Con"` and `"CON"` all match.
pub fn is_reserved_name(base: &str) -> bool {
    RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(base))
}

fn reject_reserved(kind: &'static str, base: &str) -> Result<()> {
    if is_reserved_name(base) {
        warn!(
            security_event = "reserved_name_blocked",
            kind,
            name = %base,
            reason = "reserved_device_name",
            "Blocked reserved device name"
        );
        return Err(SanitizeError::reserved(base));
    }
    Ok(())
}

/// Sanitize a file name for use on Linux, macOS and Windows.
///
/// The name is split at its last dot into base and extension. The base is
/// trimmed, stripped down to letters, digits, `_` and `-`, and has its
/// underscore runs collapsed; the extension goes through
/// [`sanitize_extension`]. Results longer than [`MAX_NAME_LENGTH`] bytes
/// lose characters from the end of the base, never from the extension.
///
/// # Errors
///
/// - [`EmptyInput`](SanitizeError::EmptyInput) - name is blank
/// - [`EmptySanitizedValue`](SanitizeError::EmptySanitizedValue) - name is
///   `"."`, has an empty base (`".bashrc"`), or nothing safe is left
/// - [`ReservedName`](SanitizeError::ReservedName) - base is a device name
/// - [`TooLong`](SanitizeError::TooLong) - the extension alone fills the limit
pub fn sanitize_file_name(filename: &str) -> Result<String> {
    if filename.trim().is_empty() {
        return Err(SanitizeError::EmptyInput);
    }
    if filename == "." {
        return Err(SanitizeError::empty("filename"));
    }

    let (raw_base, raw_ext) = split_extension(filename);
    let raw_base = raw_base.trim();
    if raw_base.is_empty() {
        return Err(SanitizeError::empty("filename"));
    }

    let base = clean_name(raw_base);
    if base.is_empty() {
        return Err(SanitizeError::empty("filename"));
    }
    reject_reserved("file", &base)?;

    let ext = if raw_ext.is_empty() {
        String::new()
    } else {
        sanitize_extension(raw_ext)?
    };

    if base.len() + ext.len() <= MAX_NAME_LENGTH {
        return Ok(base + &ext);
    }

    // Cut the base so the full extension still fits
    let budget = MAX_NAME_LENGTH.saturating_sub(ext.len());
    let truncated = truncate_bytes(&base, budget).trim_end_matches('_');
    if truncated.is_empty() {
        return Err(SanitizeError::TooLong {
            actual: base.len() + ext.len(),
            max: MAX_NAME_LENGTH,
        });
    }
    reject_reserved("file", truncated)?;
    Ok(format!("{truncated}{ext}"))
}

/// Sanitize a directory name for use on Linux, macOS and Windows.
///
/// Surrounding whitespace and separators are removed. A leading dot would
/// make the directory hidden, so `".cache"` becomes `"dir_cache"`. The rest
/// follows the file base rules; there is no extension handling.
///
/// # Errors
///
/// - [`EmptyInput`](SanitizeError::EmptyInput) - nothing but whitespace and
///   separators
/// - [`EmptySanitizedValue`](SanitizeError::EmptySanitizedValue) - nothing
///   safe is left
/// - [`ReservedName`](SanitizeError::ReservedName) - name is a device name
pub fn sanitize_dir_name(dirname: &str) -> Result<String> {
    let trimmed = dirname.trim().trim_matches(SEPARATORS);
    if trimmed.is_empty() {
        return Err(SanitizeError::EmptyInput);
    }

    let name = if trimmed.starts_with('.') {
        clean_name(&format!("dir_{}", trimmed.trim_start_matches('.')))
    } else {
        clean_name(trimmed)
    };
    if name.is_empty() {
        return Err(SanitizeError::empty("directory name"));
    }
    reject_reserved("directory", &name)?;

    if name.len() > MAX_NAME_LENGTH {
        return Ok(truncate_bytes(&name, MAX_NAME_LENGTH)
            .trim_end_matches('_')
            .to_string());
    }
    Ok(name)
}
