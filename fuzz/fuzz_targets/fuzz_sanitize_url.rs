//! Fuzz target for `sanitize_url`.
//!
//! This fuzzer tests that:
//! 1. No input causes a panic
//! 2. Accepted URLs have no whitespace, control characters or dangerous
//!    punctuation
//! 3. The protocol policy is honored
//!
//! Run with: `cargo +nightly fuzz run fuzz_sanitize_url`

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sanitext::security::{SanitizeError, UrlPolicy, sanitize_url};

#[derive(Arbitrary, Debug)]
enum Scheme {
    None,
    Http,
    Https,
    Upper,
    Other,
}

#[derive(Arbitrary, Debug)]
struct UrlInput {
    scheme: Scheme,
    rest: String,
    require_protocol: bool,
}

impl UrlInput {
    fn build(&self) -> String {
        let scheme = match self.scheme {
            Scheme::None => "",
            Scheme::Http => "http://",
            Scheme::Https => "https://",
            Scheme::Upper => "HTTPS://",
            Scheme::Other => "javascript://",
        };
        format!("{scheme}{}", self.rest)
    }
}

fuzz_target!(|data: UrlInput| {
    let url = data.build();
    let policy = UrlPolicy::from_require_protocol(data.require_protocol);

    match sanitize_url(&url, policy) {
        Ok(sanitized) => {
            assert!(
                !sanitized.chars().any(|c| c.is_control() || c.is_whitespace()),
                "whitespace or control char in {sanitized:?}"
            );
            assert!(
                !sanitized.contains(['<', '>', '"', '\'', '#', '%', '@', '\\']),
                "dangerous punctuation in {sanitized:?}"
            );

            let has_scheme =
                sanitized.starts_with("http://") || sanitized.starts_with("https://");
            if data.require_protocol {
                assert!(has_scheme, "scheme missing in {sanitized:?}");
            }
            assert!(
                !matches!(data.scheme, Scheme::Upper | Scheme::Other),
                "foreign scheme accepted: {sanitized:?}"
            );
            // The only colon allowed is the one in the scheme
            let colons = sanitized.matches(':').count();
            assert_eq!(colons, usize::from(has_scheme), "stray colon in {sanitized:?}");

            assert_eq!(sanitize_url(&sanitized, policy), Ok(sanitized.clone()));
        },
        Err(SanitizeError::MissingProtocol) => {
            assert!(data.require_protocol, "scheme required without policy");
        },
        Err(_) => {},
    }
});
