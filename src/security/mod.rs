//! Sanitizers for untrusted input.
//!
//! Each function takes an untrusted string and returns a value that is safe
//! to store, display, or use as a file system or network identifier, or a
//! [`SanitizeError`] explaining why no safe value exists.
//!
//! # Overview
//!
//! The sanitizers build on each other, leaves first:
//!
//! - [`sanitize_string`] - free text: control characters and `<>{}|\^~` removed
//! - [`sanitize_hostname`] - free text restricted to `[A-Za-z0-9.-]`
//! - [`sanitize_extension`] - lower-cased, single leading dot, last segment only
//! - [`sanitize_file_name`] / [`sanitize_dir_name`] - one path component
//! - [`sanitize_path`] - a whole path, component by component
//! - [`sanitize_url`] - an `http(s)` URL of a restricted shape
//!
//! All of them are pure: no shared state, no caches, safe to call from any
//! thread. Every successful result is a fixed point, so sanitizing it again
//! returns it unchanged.
//!
//! # Examples
//!
//! ```
//! use sanitext::security::{sanitize_file_name, sanitize_path, sanitize_string};
//!
//! assert_eq!(sanitize_string("Hello\t<World>  !").unwrap(), "Hello World !");
//! assert_eq!(sanitize_file_name("Résumé (final).PDF").unwrap(), "Résuméfinal.pdf");
//! assert_eq!(sanitize_path("uploads/../docs/a.txt", false).unwrap(), "docs/a.txt");
//! ```

mod charset;
mod component;
mod error;
mod extension;
mod path;
mod text;
mod url;

pub use component::{
    MAX_NAME_LENGTH, RESERVED_NAMES, is_reserved_name, sanitize_dir_name, sanitize_file_name,
};
pub use error::{Result, SanitizeError};
pub use extension::{DEFAULT_CONTENT_TYPE, content_type_for, has_file_extension, sanitize_extension};
pub use path::{
    DroppedComponent, MAX_PATH_LENGTH, SanitizedPath, safe_join, sanitize_path,
    sanitize_path_report, validate_path_within_base,
};
pub use text::{sanitize_hostname, sanitize_string};
pub use url::{UrlPolicy, sanitize_url};
