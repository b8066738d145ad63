//! Free-text and hostname sanitization.

use super::charset::{UNSAFE_TEXT_SYMBOLS, is_hostname_char};
use super::error::{Result, SanitizeError};

/// Sanitize free text for storage or display.
///
/// Removes every control character, replaces `< > { } | \ ^ ~` with a
/// space, trims both ends and collapses each whitespace run into a single
/// space.
///
/// # Errors
///
/// Returns [`SanitizeError::EmptySanitizedValue`] if nothing is left.
///
/// # Examples
///
/// ```
/// use sanitext::security::sanitize_string;
///
/// assert_eq!(sanitize_string("Hello\t<World>  !").unwrap(), "Hello World !");
/// assert!(sanitize_string("<>{}").is_err());
/// ```
pub fn sanitize_string(input: &str) -> Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;

    for c in input.chars() {
        if c.is_control() {
            continue;
        }
        if c.is_whitespace() || UNSAFE_TEXT_SYMBOLS.contains(&c) {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    if out.is_empty() {
        return Err(SanitizeError::empty("string"));
    }
    Ok(out)
}

/// Sanitize a hostname or IP address.
///
/// Runs [`sanitize_string`] first, then requires the result to consist only
/// of ASCII letters, digits, dots and hyphens. Internationalized hostnames
/// are rejected; convert them to punycode before calling.
///
/// # Errors
///
/// - [`SanitizeError::EmptySanitizedValue`] if the text sanitizes to nothing
/// - [`SanitizeError::InvalidFormat`] if any other character remains
///
/// # Examples
///
/// ```
/// use sanitext::security::sanitize_hostname;
///
/// assert_eq!(sanitize_hostname(" example.com ").unwrap(), "example.com");
/// assert!(sanitize_hostname("exa mple.com").is_err());
/// assert!(sanitize_hostname("héllo.com").is_err());
/// ```
pub fn sanitize_hostname(input: &str) -> Result<String> {
    let host = sanitize_string(input)?;
    if !host.chars().all(is_hostname_char) {
        return Err(SanitizeError::invalid("hostname"));
    }
    Ok(host)
}
