//! Property-based tests for the sanitizers.
//!
//! These tests verify INVARIANTS that must always hold, regardless of input.
//!
//! # Tested Invariants
//!
//! - Sanitizers never panic on arbitrary input
//! - Every accepted value is a fixed point (sanitizing it again is a no-op)
//! - No control character survives
//! - Names only contain letters, digits, `_`, `-` and one extension dot
//! - Reserved device names are rejected in any case, with any extension
//! - Names never exceed 255 bytes, paths never exceed 4096 bytes
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test property_tests
//! ```

use std::sync::LazyLock;

use proptest::prelude::*;
use regex::Regex;

use sanitext::security::{
    MAX_NAME_LENGTH, MAX_PATH_LENGTH, RESERVED_NAMES, SanitizeError, UrlPolicy,
    has_file_extension, sanitize_dir_name, sanitize_extension, sanitize_file_name,
    sanitize_hostname, sanitize_path, sanitize_string, sanitize_url,
};

// =============================================================================
// Test Strategies - Input Generation
// =============================================================================

/// Characters that exercise every rule: separators, dots, unsafe symbols,
/// whitespace, controls, non-Latin letters, combining marks and
/// letter-like symbols.
const PATH_ALPHABET: &[char] = &[
    'a', 'b', 'C', '1', '_', '-', '.', '.', '/', '/', '\\', ' ', '\t', '<', '>', ':', '*', '?',
    '|', '\0', '\u{7f}', 'é', '文', 'Ж', '\u{902}', '\u{301}', 'ⓐ',
];

fn alphabet_string(alphabet: &'static [char], max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(alphabet), 0..max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

fn path_strategy() -> impl Strategy<Value = String> {
    alphabet_string(PATH_ALPHABET, 48)
}

/// A reserved name in random case, optionally with an extension.
fn reserved_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(RESERVED_NAMES),
        prop::collection::vec(any::<bool>(), 4),
        prop::option::of("[a-zA-Z0-9]{1,5}"),
    )
        .prop_map(|(name, upper, ext)| {
            let mixed: String = name
                .chars()
                .zip(upper.iter().cycle())
                .map(|(c, &up)| {
                    if up {
                        c.to_ascii_uppercase()
                    } else {
                        c.to_ascii_lowercase()
                    }
                })
                .collect();
            match ext {
                Some(ext) => format!("{mixed}.{ext}"),
                None => mixed,
            }
        })
}

/// Letters and numbers by general category, plus `_` and `-`.
static NAME_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{N}_-]$").unwrap());

fn is_name_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    NAME_CHAR.is_match(c.encode_utf8(&mut buf))
}

// =============================================================================
// Robustness
// =============================================================================

proptest! {
    /// Invariant: no input makes a sanitizer panic.
    #[test]
    fn sanitizers_never_panic(input in any::<String>(), allow_nav in any::<bool>()) {
        let _ = sanitize_string(&input);
        let _ = sanitize_hostname(&input);
        let _ = sanitize_extension(&input);
        let _ = sanitize_file_name(&input);
        let _ = sanitize_dir_name(&input);
        let _ = sanitize_path(&input, allow_nav);
        let _ = sanitize_url(&input, UrlPolicy::AllowMissingProtocol);
        let _ = has_file_extension(&input);
    }

    /// Invariant: no control character survives any sanitizer.
    #[test]
    fn outputs_have_no_control_characters(input in any::<String>()) {
        let outputs = [
            sanitize_string(&input),
            sanitize_file_name(&input),
            sanitize_dir_name(&input),
            sanitize_path(&input, true),
            sanitize_url(&input, UrlPolicy::AllowMissingProtocol),
        ];
        for output in outputs.into_iter().flatten() {
            prop_assert!(!output.chars().any(char::is_control), "{:?}", output);
        }
    }
}

// =============================================================================
// Idempotence
// =============================================================================

proptest! {
    #[test]
    fn string_is_idempotent(input in any::<String>()) {
        if let Ok(once) = sanitize_string(&input) {
            prop_assert_eq!(sanitize_string(&once), Ok(once.clone()));
            prop_assert!(!once.starts_with(' ') && !once.ends_with(' '));
            prop_assert!(!once.contains("  "));
        }
    }

    #[test]
    fn file_name_is_idempotent(input in path_strategy()) {
        if let Ok(once) = sanitize_file_name(&input) {
            prop_assert_eq!(sanitize_file_name(&once), Ok(once.clone()));
        }
    }

    #[test]
    fn dir_name_is_idempotent(input in path_strategy()) {
        if let Ok(once) = sanitize_dir_name(&input) {
            prop_assert_eq!(sanitize_dir_name(&once), Ok(once.clone()));
        }
    }

    #[test]
    fn path_is_idempotent(input in path_strategy(), allow_nav in any::<bool>()) {
        if let Ok(once) = sanitize_path(&input, allow_nav) {
            prop_assert_eq!(sanitize_path(&once, allow_nav), Ok(once.clone()));
        }
    }

    #[test]
    fn url_is_idempotent(input in "(https?://)?[a-z0-9.-]{0,12}(/[a-z0-9_./-]{0,12})?") {
        if let Ok(once) = sanitize_url(&input, UrlPolicy::AllowMissingProtocol) {
            prop_assert_eq!(
                sanitize_url(&once, UrlPolicy::AllowMissingProtocol),
                Ok(once.clone())
            );
        }
    }
}

// =============================================================================
// Whitelists and Limits
// =============================================================================

proptest! {
    /// Invariant: a file name is a clean base plus at most one extension.
    #[test]
    fn file_name_whitelist(input in path_strategy()) {
        if let Ok(name) = sanitize_file_name(&input) {
            prop_assert!(name.len() <= MAX_NAME_LENGTH);
            prop_assert!(name.matches('.').count() <= 1);
            let base = name.split('.').next().unwrap_or_default();
            prop_assert!(!base.is_empty());
            prop_assert!(base.chars().all(is_name_char), "{:?}", name);
            prop_assert!(!base.starts_with('_') && !base.ends_with('_'));
        }
    }

    #[test]
    fn dir_name_whitelist(input in path_strategy()) {
        if let Ok(name) = sanitize_dir_name(&input) {
            prop_assert!(name.len() <= MAX_NAME_LENGTH);
            prop_assert!(name.chars().all(is_name_char), "{:?}", name);
        }
    }

    #[test]
    fn extension_shape(input in any::<String>()) {
        if let Ok(ext) = sanitize_extension(&input) {
            prop_assert!(ext.starts_with('.'));
            prop_assert!(ext.len() > 1);
            prop_assert_eq!(ext.matches('.').count(), 1);
        }
    }

    #[test]
    fn hostname_is_ascii(input in any::<String>()) {
        if let Ok(host) = sanitize_hostname(&input) {
            prop_assert!(host.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-'));
        }
    }

    /// Invariant: sanitized paths use `/` only and never contain `.` components.
    #[test]
    fn path_shape(input in path_strategy(), allow_nav in any::<bool>()) {
        if let Ok(path) = sanitize_path(&input, allow_nav) {
            prop_assert!(path.len() <= MAX_PATH_LENGTH);
            prop_assert!(!path.contains('\\'));
            prop_assert!(!path.contains("//"));
            let inner = path.trim_start_matches("./");
            prop_assert!(!inner.split('/').any(|c| c == "."), "{:?}", path);
            if !allow_nav {
                prop_assert!(!path.starts_with("./"));
            }
        }
    }

    #[test]
    fn long_names_are_capped(base in "[a-z]{200,400}", ext in "[a-z]{1,8}") {
        let name = sanitize_file_name(&format!("{base}.{ext}")).unwrap();
        prop_assert!(name.len() <= MAX_NAME_LENGTH);
        let expected_ext = format!(".{}", ext);
        prop_assert!(name.ends_with(&expected_ext));

        let dir = sanitize_dir_name(&base).unwrap();
        prop_assert!(dir.len() <= MAX_NAME_LENGTH);
    }
}

// =============================================================================
// Reserved Names
// =============================================================================

proptest! {
    #[test]
    fn reserved_file_names_rejected(name in reserved_strategy()) {
        prop_assert!(
            matches!(sanitize_file_name(&name), Err(SanitizeError::ReservedName { .. })),
            "{:?}",
            name
        );
    }

    #[test]
    fn reserved_dir_names_rejected(name in reserved_strategy()) {
        let base = name.split('.').next().unwrap_or_default().to_string();
        prop_assert!(
            matches!(sanitize_dir_name(&base), Err(SanitizeError::ReservedName { .. })),
            "{:?}",
            base
        );
    }

    /// Reserved names as path components are dropped, never emitted.
    #[test]
    fn reserved_names_never_in_paths(name in reserved_strategy(), prefix in "[a-z]{1,8}") {
        if let Ok(path) = sanitize_path(&format!("{prefix}/{name}/x.txt"), false) {
            for component in path.split('/') {
                let base = component.split('.').next().unwrap_or_default();
                prop_assert!(
                    !RESERVED_NAMES.iter().any(|r| r.eq_ignore_ascii_case(base)),
                    "{:?}",
                    path
                );
            }
        }
    }
}
