//! sanitext - sanitizers for untrusted text, names, paths and URLs.
//!
//! The [`security`] module holds the sanitizers. The remaining modules back
//! the `sanitext` command line tool.

pub mod commands;
pub mod config;
pub mod logging;
pub mod security;
