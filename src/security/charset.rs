//! Character classes shared by every sanitizer.
//!
//! Letters and digits are matched by Unicode general category (`L` and
//! `N`), so non-Latin names survive intact while combining marks and
//! letter-like symbols (`ⓐ`, `℗`) do not. The category table is one fixed
//! pattern compiled on first use and only read afterwards.

use regex::Regex;
use std::sync::LazyLock;

/// Unicode letters and numbers, by general category.
static LETTER_OR_DIGIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{N}]$").expect("letter/digit class should compile - static pattern")
});

/// Characters replaced with a space in free text.
pub const UNSAFE_TEXT_SYMBOLS: &[char] = &['<', '>', '{', '}', '|', '\\', '^', '~'];

/// Path separators recognized on input. Output always uses `/`.
pub const SEPARATORS: [char; 2] = ['/', '\\'];

pub fn is_letter_or_digit(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric();
    }
    let mut buf = [0u8; 4];
    LETTER_OR_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Allowed in file base names and directory names.
pub fn is_name_char(c: char) -> bool {
    is_letter_or_digit(c) || c == '_' || c == '-'
}

/// Allowed in file extensions (before dot collapsing).
pub fn is_extension_char(c: char) -> bool {
    is_letter_or_digit(c) || c == '.'
}

/// C0 control bytes and DEL.
pub fn is_raw_control(c: char) -> bool {
    (c as u32) < 0x20 || c == '\u{7f}'
}

pub fn is_hostname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-'
}

pub fn is_url_path_char(c: char) -> bool {
    is_letter_or_digit(c) || matches!(c, '_' | '.' | '/' | '-')
}

pub fn is_url_query_char(c: char) -> bool {
    is_url_path_char(c) || matches!(c, '&' | '=' | '?')
}

/// Remove every Unicode control character.
pub fn strip_controls(input: &str) -> String {
    input.chars().filter(|c| !c.is_control()).collect()
}

/// Keep only name characters, then collapse underscore runs and trim
/// underscores from both ends.
pub fn clean_name(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if !is_name_char(c) || is_raw_control(c) {
            continue;
        }
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('_').to_string()
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a char.
pub fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Split a name into `(base, extension)` at the last dot of its final
/// component. The extension keeps its dot; it is empty when there is none.
///
/// `"a.tar.gz"` -> `("a.tar", ".gz")`, `".hidden"` -> `("", ".hidden")`,
/// `"dir.d/file"` -> `("dir.d/file", "")`.
pub fn split_extension(name: &str) -> (&str, &str) {
    for (i, c) in name.char_indices().rev() {
        if SEPARATORS.contains(&c) {
            break;
        }
        if c == '.' {
            return name.split_at(i);
        }
    }
    (name, "")
}
