//! Display markup for the session log.
//!
//! Tools return plain text in `out` and, where it helps, an ANSI-marked copy
//! in `rendered`. Only the plain form ever reaches pipes or files.

const MATCH_START: &str = "\x1b[1;31m";
const DIR_START: &str = "\x1b[1;34m";
const RESET: &str = "\x1b[0m";

/// Wrap every occurrence of `needle` in `line` with match highlighting.
///
/// With `ignore_case`, ASCII letters match regardless of case and the
/// original spelling is kept.
pub fn highlight_literal(line: &str, needle: &str, ignore_case: bool) -> String {
    if needle.is_empty() {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + 16);
    let mut rest = line;
    while let Some(at) = find_literal(rest, needle, ignore_case) {
        let end = at + needle.len();
        out.push_str(&rest[..at]);
        out.push_str(MATCH_START);
        out.push_str(&rest[at..end]);
        out.push_str(RESET);
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}

/// Byte offset of the first occurrence of `needle` in `haystack`.
pub fn find_literal(haystack: &str, needle: &str, ignore_case: bool) -> Option<usize> {
    if !ignore_case {
        return haystack.find(needle);
    }
    let hay = haystack.as_bytes();
    let pat = needle.as_bytes();
    if pat.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - pat.len())
        .filter(|&i| haystack.is_char_boundary(i) && haystack.is_char_boundary(i + pat.len()))
        .find(|&i| hay[i..i + pat.len()].eq_ignore_ascii_case(pat))
}

/// Colour a directory name for listings.
pub fn directory(name: &str) -> String {
    format!("{DIR_START}{name}{RESET}")
}

/// Remove ANSI escape sequences.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
