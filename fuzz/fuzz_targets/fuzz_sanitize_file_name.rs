//! Fuzz target for `sanitize_file_name` and `sanitize_dir_name`.
//!
//! This fuzzer tests that:
//! 1. No input causes a panic
//! 2. Valid names contain no separators, control characters or reserved bases
//! 3. Valid names fit in 255 bytes and are fixed points
//!
//! Run with: `cargo +nightly fuzz run fuzz_sanitize_file_name`

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sanitext::security::{
    MAX_NAME_LENGTH, is_reserved_name, sanitize_dir_name, sanitize_file_name,
};

#[derive(Arbitrary, Debug)]
struct NameInput {
    base: String,
    extension: Option<String>,
    /// Prefix with a dot to make the name hidden
    hidden: bool,
    /// Repeat the base to exercise truncation
    repeat: u8,
}

impl NameInput {
    fn build(&self) -> String {
        let mut name = String::new();
        if self.hidden {
            name.push('.');
        }
        name.push_str(&self.base.repeat(usize::from(self.repeat % 64) + 1));
        if let Some(ext) = &self.extension {
            name.push('.');
            name.push_str(ext);
        }
        name
    }
}

fn check_name(kind: &str, input: &str, name: &str) {
    assert!(!name.is_empty(), "{kind}: empty name for {input:?}");
    assert!(
        name.len() <= MAX_NAME_LENGTH,
        "{kind}: {} bytes for {input:?}",
        name.len()
    );
    assert!(
        !name.contains(['/', '\\']),
        "{kind}: separator in {name:?}"
    );
    assert!(
        !name.chars().any(char::is_control),
        "{kind}: control char in {name:?}"
    );
    assert!(!name.starts_with('.'), "{kind}: hidden name {name:?}");

    let base = name.split('.').next().unwrap_or(name);
    assert!(!is_reserved_name(base), "{kind}: reserved name {name:?}");
}

fuzz_target!(|data: NameInput| {
    let input = data.build();

    if let Ok(name) = sanitize_file_name(&input) {
        check_name("file", &input, &name);
        assert!(name.matches('.').count() <= 1, "file: several dots in {name:?}");
        assert_eq!(
            sanitize_file_name(&name).as_deref(),
            Ok(name.as_str()),
            "file: not idempotent"
        );
    }

    if let Ok(name) = sanitize_dir_name(&input) {
        check_name("dir", &input, &name);
        assert!(!name.contains('.'), "dir: dot in {name:?}");
        assert_eq!(
            sanitize_dir_name(&name).as_deref(),
            Ok(name.as_str()),
            "dir: not idempotent"
        );
    }
});
