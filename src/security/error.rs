//! Error types for sanitization failures.
//!
//! Every sanitizer returns [`SanitizeError`] when its input cannot be turned
//! into a safe value. The variants describe *why* the input was rejected,
//! never echo control characters back, and are cheap to clone so callers
//! can collect them (see [`DroppedComponent`](super::DroppedComponent)).

/// Result type for sanitization operations.
pub type Result<T> = std::result::Result<T, SanitizeError>;

/// Error type for rejected input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SanitizeError {
    /// Input was empty, or only whitespace.
    #[error("input is empty")]
    EmptyInput,

    /// Nothing safe was left after stripping unsafe content.
    #[error("sanitized {what} is empty or invalid")]
    EmptySanitizedValue { what: &'static str },

    /// Base name collides with a reserved device name (CON, NUL, COM1, ...).
    #[error("'{name}' is a reserved device name")]
    ReservedName { name: String },

    /// Structural validation failed.
    #[error("invalid {what} format")]
    InvalidFormat { what: &'static str },

    /// URL lacks a required `http://` or `https://` scheme.
    #[error("url must start with http:// or https://")]
    MissingProtocol,

    /// Path is rooted where a relative path is required.
    #[error("absolute paths are not allowed")]
    AbsolutePath,

    /// Path leaves its base directory through `..` or a symlink.
    #[error("path escapes the base directory")]
    EscapesBaseDirectory,

    /// Result exceeds the maximum length (in bytes).
    #[error("sanitized value is too long: {actual} exceeds maximum {max}")]
    TooLong { actual: usize, max: usize },
}

impl SanitizeError {
    pub(crate) fn empty(what: &'static str) -> Self {
        Self::EmptySanitizedValue { what }
    }

    pub(crate) fn invalid(what: &'static str) -> Self {
        Self::InvalidFormat { what }
    }

    pub(crate) fn reserved(name: impl Into<String>) -> Self {
        Self::ReservedName { name: name.into() }
    }

    /// Short machine-readable name of the error kind.
    ///
    /// Used in structured log fields and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::EmptySanitizedValue { .. } => "empty_sanitized_value",
            Self::ReservedName { .. } => "reserved_name",
            Self::InvalidFormat { .. } => "invalid_format",
            Self::MissingProtocol => "missing_protocol",
            Self::AbsolutePath => "absolute_path",
            Self::EscapesBaseDirectory => "escapes_base_directory",
            Self::TooLong { .. } => "too_long",
        }
    }
}
