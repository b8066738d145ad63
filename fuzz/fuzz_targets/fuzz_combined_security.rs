//! Combined fuzz target for the sanitizers.
//!
//! This fuzzer feeds the same input, raw or wrapped in an adversarial
//! pattern, to every sanitizer and checks the invariants they share.
//!
//! Run with: `cargo +nightly fuzz run fuzz_combined_security`

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sanitext::security::{
    has_file_extension, is_reserved_name, sanitize_dir_name, sanitize_extension,
    sanitize_file_name, sanitize_hostname, sanitize_path, sanitize_string,
};

/// Combined security input for testing multiple functions.
#[derive(Arbitrary, Debug)]
struct SecurityInput {
    /// Input string to test
    input: String,
    /// Optional adversarial wrapping
    pattern: Option<AdversarialPattern>,
}

#[derive(Arbitrary, Debug)]
enum AdversarialPattern {
    /// Unicode lookalikes for `.` and `/`
    UnicodeLookalikes,
    /// Mixed case for reserved names (CoN vs CON)
    CaseVariation,
    /// Null byte before the extension
    NullByteInjection,
    /// Very long path segment
    LongSegment,
    /// Many path components
    ManyComponents,
    /// Mixed separators (/ and \)
    MixedSeparators,
    /// Trailing/leading dots
    DotManipulation,
    /// Space padding
    SpacePadding,
}

impl SecurityInput {
    fn build(&self) -> String {
        let Some(pattern) = &self.pattern else {
            return self.input.clone();
        };
        match pattern {
            // U+2024 ONE DOT LEADER, U+2215 DIVISION SLASH
            AdversarialPattern::UnicodeLookalikes => {
                format!("\u{2024}\u{2024}\u{2215}{}", self.input)
            },
            AdversarialPattern::CaseVariation => format!("CoN.{}", self.input),
            AdversarialPattern::NullByteInjection => format!("{}\0.txt", self.input),
            AdversarialPattern::LongSegment => format!("{}/{}", "a".repeat(300), self.input),
            AdversarialPattern::ManyComponents => {
                let components = (0..50).map(|i| format!("d{i}")).collect::<Vec<_>>().join("/");
                format!("{components}/{}", self.input)
            },
            AdversarialPattern::MixedSeparators => format!("a/b\\c/{}", self.input),
            AdversarialPattern::DotManipulation => format!(".../{}/...", self.input),
            AdversarialPattern::SpacePadding => format!("  {}  ", self.input),
        }
    }
}

fuzz_target!(|data: SecurityInput| {
    let input = data.build();

    if let Ok(text) = sanitize_string(&input) {
        // INVARIANT: single spaces, trimmed, no unsafe symbols
        assert!(!text.starts_with(' ') && !text.ends_with(' '), "untrimmed {text:?}");
        assert!(!text.contains("  "), "double space in {text:?}");
        assert!(
            !text.contains(['<', '>', '{', '}', '|', '\\', '^', '~']),
            "unsafe symbol in {text:?}"
        );
        assert!(!text.chars().any(char::is_control), "control char in {text:?}");

        // Hostnames are strings with a narrower alphabet
        if let Ok(host) = sanitize_hostname(&input) {
            assert_eq!(host, text, "hostname differs from string");
        }
    }

    if let Ok(ext) = sanitize_extension(&input) {
        assert!(ext.starts_with('.') && ext.len() > 1, "bad extension {ext:?}");
        assert!(!ext[1..].contains('.'), "several dots in {ext:?}");
        assert!(has_file_extension(&format!("x{ext}")), "extension not detected");
    }

    for name in [sanitize_file_name(&input), sanitize_dir_name(&input)]
        .into_iter()
        .flatten()
    {
        let base = name.split('.').next().unwrap_or(&name);
        assert!(!is_reserved_name(base), "reserved name {name:?}");
        assert!(!name.contains(['/', '\\']), "separator in {name:?}");
    }

    // A file name on its own is also a valid single-file path
    if let Ok(name) = sanitize_file_name(&input) {
        if has_file_extension(&name) {
            assert_eq!(sanitize_path(&name, false).as_deref(), Ok(name.as_str()));
        }
    }
});
