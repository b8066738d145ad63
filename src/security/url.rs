//! URL validation.
//!
//! Accepted shape, checked character by character:
//!
//! ```text
//! [http:// | https://] host [ /path [ ?query ] ]
//! ```
//!
//! - `host`: ASCII letters, digits, `.` and `-` (at least one)
//! - `path`: Unicode letters and digits, `_ . / -`
//! - `query`: the path alphabet plus `& = ?`
//!
//! Ports, userinfo, fragments and percent-encoding are rejected.

use super::charset::{is_hostname_char, is_url_path_char, is_url_query_char, strip_controls};
use super::error::{Result, SanitizeError};

const SCHEMES: [&str; 2] = ["http://", "https://"];

/// Whether a URL must carry an `http://` or `https://` scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UrlPolicy {
    #[default]
    RequireProtocol,
    AllowMissingProtocol,
}

impl UrlPolicy {
    pub fn from_require_protocol(require: bool) -> Self {
        if require {
            Self::RequireProtocol
        } else {
            Self::AllowMissingProtocol
        }
    }
}

/// Length of the scheme prefix. Only lower-case schemes are recognized.
fn scheme_len(url: &str) -> Option<usize> {
    SCHEMES
        .iter()
        .find(|scheme| url.starts_with(*scheme))
        .map(|scheme| scheme.len())
}

fn is_well_formed(rest: &str) -> bool {
    let (host, tail) = match rest.find('/') {
        Some(pos) => rest.split_at(pos),
        None => (rest, ""),
    };
    if host.is_empty() || !host.chars().all(is_hostname_char) {
        return false;
    }

    let (path, query) = match tail.find('?') {
        Some(pos) => (&tail[..pos], &tail[pos + 1..]),
        None => (tail, ""),
    };
    path.chars().all(is_url_path_char) && query.chars().all(is_url_query_char)
}

/// Sanitize and validate a URL.
///
/// Control characters are removed and surrounding whitespace trimmed; the
/// rest must already be well formed, nothing else is rewritten.
///
/// # Errors
///
/// - [`EmptyInput`](SanitizeError::EmptyInput) - nothing left after cleaning
/// - [`InvalidFormat`](SanitizeError::InvalidFormat) - not of the accepted shape
/// - [`MissingProtocol`](SanitizeError::MissingProtocol) - no scheme under
///   [`UrlPolicy::RequireProtocol`]
///
/// # Examples
///
/// ```
/// use sanitext::security::{UrlPolicy, sanitize_url};
///
/// let url = sanitize_url("https://example.com/path", UrlPolicy::default()).unwrap();
/// assert_eq!(url, "https://example.com/path");
///
/// assert!(sanitize_url("example.com", UrlPolicy::RequireProtocol).is_err());
/// assert!(sanitize_url("example.com", UrlPolicy::AllowMissingProtocol).is_ok());
/// ```
pub fn sanitize_url(input: &str, policy: UrlPolicy) -> Result<String> {
    let cleaned = strip_controls(input);
    let url = cleaned.trim();
    if url.is_empty() {
        return Err(SanitizeError::EmptyInput);
    }

    let scheme = scheme_len(url);
    let rest = &url[scheme.unwrap_or(0)..];
    if !is_well_formed(rest) {
        return Err(SanitizeError::invalid("url"));
    }

    if policy == UrlPolicy::RequireProtocol && scheme.is_none() {
        return Err(SanitizeError::MissingProtocol);
    }
    Ok(url.to_string())
}
