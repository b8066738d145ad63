//! File extension normalization.

use super::charset::{SEPARATORS, is_extension_char, split_extension};
use super::error::{Result, SanitizeError};

/// Fallback content type for unknown or missing extensions.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Normalize a file extension (e.g. `"TXT"` -> `".txt"`, `".文档"` -> `".文档"`).
///
/// The extension is trimmed and lower-cased, everything except Unicode
/// letters, digits and dots is removed, and a single leading dot is
/// ensured. When several dots remain only the last segment survives, so
/// `"a.b.c"` becomes `".c"`.
///
/// # Errors
///
/// Returns [`SanitizeError::EmptySanitizedValue`] if the result is just `"."`.
///
/// # Examples
///
/// ```
/// use sanitext::security::sanitize_extension;
///
/// assert_eq!(sanitize_extension("TXT").unwrap(), ".txt");
/// assert_eq!(sanitize_extension("a.b.c").unwrap(), ".c");
/// assert!(sanitize_extension(".").is_err());
/// ```
pub fn sanitize_extension(ext: &str) -> Result<String> {
    let lowered = ext.trim().to_lowercase();
    let kept: String = lowered.chars().filter(|&c| is_extension_char(c)).collect();

    let normalized = match kept.rsplit_once('.') {
        Some((_, last)) => format!(".{last}"),
        None => format!(".{kept}"),
    };

    if normalized == "." {
        return Err(SanitizeError::empty("extension"));
    }
    Ok(normalized)
}

/// Whether `name` ends in a non-empty extension that is not its whole last
/// component.
///
/// `"file.txt"` and `"archive.tar.gz"` have extensions; `"file"`, `"."`
/// and `".hidden"` do not.
///
/// Only the last path component is inspected, with both `/` and `\`
/// counting as separators: `"a.b\\c"`, `"dir.d/file"` and `"dir/.hidden"`
/// have no extension.
pub fn has_file_extension(name: &str) -> bool {
    let (stem, ext) = split_extension(name);
    !ext.is_empty() && !stem.is_empty() && !stem.ends_with(SEPARATORS)
}

/// Content type for a file name, looked up by its sanitized extension.
///
/// Names without a usable extension map to [`DEFAULT_CONTENT_TYPE`].
///
/// # Examples
///
/// ```
/// use sanitext::security::content_type_for;
///
/// assert_eq!(content_type_for("Report.PDF"), "application/pdf");
/// assert_eq!(content_type_for("README"), "application/octet-stream");
/// ```
pub fn content_type_for(name: &str) -> String {
    let (_, ext) = split_extension(name);
    if ext.is_empty() {
        return DEFAULT_CONTENT_TYPE.to_string();
    }
    match sanitize_extension(ext) {
        Ok(ext) => mime_guess::from_ext(&ext[1..])
            .first_raw()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string(),
        Err(_) => DEFAULT_CONTENT_TYPE.to_string(),
    }
}
