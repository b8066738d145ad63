//! Fuzz target for `sanitize_path` - path traversal prevention.
//!
//! This fuzzer tests that:
//! 1. No input causes a panic
//! 2. Valid outputs are normalized (`/` only, no `.` components, bounded)
//! 3. Valid outputs are fixed points
//!
//! Run with: `cargo +nightly fuzz run fuzz_sanitize_path`

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sanitext::security::{MAX_PATH_LENGTH, is_reserved_name, sanitize_path_report};

/// Structured input for more targeted fuzzing.
#[derive(Arbitrary, Debug)]
struct PathInput {
    /// Raw path string to test
    path: String,
    /// Keep a leading `./` or `../`
    allow_nav: bool,
    /// Whether to inject null bytes
    inject_null: bool,
    /// Number of `..` components to inject
    traversal_depth: u8,
    /// Use `\` instead of `/` for injected components
    backslashes: bool,
}

impl PathInput {
    /// Build the final path string for testing.
    fn build(&self) -> String {
        let mut result = self.path.clone();

        if self.inject_null {
            let mut pos = result.len() / 2;
            while !result.is_char_boundary(pos) {
                pos -= 1;
            }
            result.insert(pos, '\0');
        }

        let sep = if self.backslashes { "\\" } else { "/" };
        let traversal = format!("..{sep}").repeat(self.traversal_depth as usize);
        format!("{traversal}{result}")
    }
}

fuzz_target!(|data: PathInput| {
    let path = data.build();

    // The function must never panic
    let Ok(report) = sanitize_path_report(&path, data.allow_nav) else {
        return;
    };
    let sanitized = &report.path;

    // INVARIANT 1: Output is non-empty and bounded
    assert!(!sanitized.is_empty(), "empty path for input {path:?}");
    assert!(
        sanitized.len() <= MAX_PATH_LENGTH,
        "path too long: {} bytes",
        sanitized.len()
    );

    // INVARIANT 2: Only `/` separators, no empty or `.` components
    assert!(!sanitized.contains('\\'), "backslash in {sanitized:?}");
    assert!(!sanitized.contains("//"), "empty component in {sanitized:?}");
    let inner = sanitized.strip_prefix("./").unwrap_or(sanitized);
    for component in inner.split('/').filter(|c| !c.is_empty()) {
        assert!(component != ".", "current-dir component in {sanitized:?}");
        let base = component.split('.').next().unwrap_or(component);
        assert!(
            !is_reserved_name(base),
            "reserved name {component:?} in {sanitized:?}"
        );
    }

    // INVARIANT 3: No control characters survive
    assert!(
        !sanitized.chars().any(char::is_control),
        "control char in {sanitized:?}"
    );

    // INVARIANT 4: Rooted paths never climb above the root
    if sanitized.starts_with('/') {
        assert!(!sanitized.starts_with("/.."), "absolute escape {sanitized:?}");
    }

    // INVARIANT 5: Sanitizing again is a no-op
    let again = sanitize_path_report(sanitized, data.allow_nav)
        .expect("sanitized path must be accepted again");
    assert_eq!(&again.path, sanitized, "not idempotent for input {path:?}");
    assert!(again.dropped.is_empty(), "second pass dropped components");
});
