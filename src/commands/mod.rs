//! CLI command implementations for sanitext.
//!
//! - single-value commands (`string`, `file-name`, `path`, ...) sanitize one
//!   argument and print the result
//! - [`batch`] sanitizes one value per line from a file or stdin
//!
//! Both print either plain text or one JSON object per value.

pub mod batch;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::security::{
    self, DroppedComponent, SanitizeError, UrlPolicy, has_file_extension,
};

/// Which sanitizer to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    String,
    Hostname,
    Extension,
    FileName,
    DirName,
    Path,
    Url,
    HasExt,
    ContentType,
}

/// Policy switches shared by all commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub allow_nav: bool,
    pub url_policy: UrlPolicy,
}

/// Outcome of sanitizing one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<DroppedComponent>,
}

impl Outcome {
    fn ok(input: &str, output: String, dropped: Vec<DroppedComponent>) -> Self {
        Self {
            input: input.to_string(),
            output: Some(output),
            error: None,
            error_kind: None,
            dropped,
        }
    }

    fn failed(input: &str, err: &SanitizeError) -> Self {
        Self {
            input: input.to_string(),
            output: None,
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
            dropped: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.output.is_some()
    }
}

/// Run the sanitizer for `kind` on one value.
pub fn apply(kind: Kind, input: &str, options: Options) -> Outcome {
    let result = match kind {
        Kind::String => security::sanitize_string(input),
        Kind::Hostname => security::sanitize_hostname(input),
        Kind::Extension => security::sanitize_extension(input),
        Kind::FileName => security::sanitize_file_name(input),
        Kind::DirName => security::sanitize_dir_name(input),
        Kind::Url => security::sanitize_url(input, options.url_policy),
        Kind::HasExt => Ok(has_file_extension(input).to_string()),
        Kind::ContentType => Ok(security::content_type_for(input)),
        Kind::Path => {
            return match security::sanitize_path_report(input, options.allow_nav) {
                Ok(report) => Outcome::ok(input, report.path, report.dropped),
                Err(err) => Outcome::failed(input, &err),
            };
        },
    };

    match result {
        Ok(output) => Outcome::ok(input, output, Vec::new()),
        Err(err) => Outcome::failed(input, &err),
    }
}

/// Print one outcome. Values go to stdout, problems to stderr.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_outcome(outcome: &Outcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(outcome)?);
        return Ok(());
    }

    for dropped in &outcome.dropped {
        eprintln!(
            "warning: dropped component #{} {:?}: {}",
            dropped.index, dropped.component, dropped.reason
        );
    }
    match (&outcome.output, &outcome.error) {
        (Some(output), _) => println!("{output}"),
        (None, Some(error)) => eprintln!("Error: {error} (input: {:?})", outcome.input),
        (None, None) => {},
    }
    Ok(())
}

/// Sanitize a single value and print it.
///
/// Returns whether the value was accepted.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn execute(kind: Kind, input: &str, options: Options, json: bool) -> Result<bool> {
    let outcome = apply(kind, input, options);
    print_outcome(&outcome, json)?;
    Ok(outcome.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_each_kind() {
        let options = Options::default();
        let cases = [
            (Kind::String, "a  <b>", "a b"),
            (Kind::Hostname, "example.com", "example.com"),
            (Kind::Extension, "TXT", ".txt"),
            (Kind::FileName, "my<file>.txt", "myfile.txt"),
            (Kind::DirName, ".git", "dir_git"),
            (Kind::Path, "a/b.txt", "a/b.txt"),
            (Kind::Url, "https://example.com", "https://example.com"),
            (Kind::HasExt, "a.txt", "true"),
            (Kind::HasExt, ".hidden", "false"),
            (Kind::ContentType, "index.HTML", "text/html"),
        ];
        for (kind, input, expected) in cases {
            let outcome = apply(kind, input, options);
            assert_eq!(outcome.output.as_deref(), Some(expected), "{kind:?} {input:?}");
        }
    }

    #[test]
    fn test_apply_failure_records_kind() {
        let outcome = apply(Kind::FileName, "CON", Options::default());
        assert!(!outcome.is_ok());
        assert_eq!(outcome.error_kind, Some("reserved_name"));
    }

    #[test]
    fn test_apply_honors_options() {
        let lenient = Options {
            allow_nav: true,
            url_policy: UrlPolicy::AllowMissingProtocol,
        };
        assert_eq!(
            apply(Kind::Path, "./a", lenient).output.as_deref(),
            Some("./a/")
        );
        assert_eq!(
            apply(Kind::Url, "example.com", lenient).output.as_deref(),
            Some("example.com")
        );
        assert!(!apply(Kind::Url, "example.com", Options::default()).is_ok());
    }

    #[test]
    fn test_path_outcome_lists_dropped() {
        let outcome = apply(Kind::Path, "a/<>/b", Options::default());
        assert_eq!(outcome.output.as_deref(), Some("a/b/"));
        assert_eq!(outcome.dropped.len(), 1);
        assert_eq!(outcome.dropped[0].index, 1);
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = apply(Kind::Path, "a/<>/b", Options::default());
        let value: serde_json::Value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["output"], "a/b/");
        assert_eq!(value["dropped"][0]["component"], "<>");
        assert_eq!(
            value["dropped"][0]["reason"],
            "sanitized directory name is empty or invalid"
        );
        assert!(value.get("error").is_none());

        let failed = apply(Kind::Hostname, "bad host", Options::default());
        let value: serde_json::Value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["error_kind"], "invalid_format");
        assert!(value.get("output").is_none());
    }
}
