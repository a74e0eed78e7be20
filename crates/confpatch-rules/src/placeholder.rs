//! Host configuration placeholders.
//!
//! A placeholder has the form `{{ config.<path> }}`: the `{{` and `}}`
//! delimiters each allow one optional whitespace character, and the path is
//! made of word characters, dots and hyphens. Rule authors write the path in
//! snake case while the host configuration keys are camel case, so each path
//! segment is converted with [`camel_case`] before lookup.

use regex_lite::{NoExpand, Regex};
use std::ops::Range;
use std::sync::OnceLock;

const PLACEHOLDER_PATTERN: &str = r"\{\{\s?config\.([\w.-]+)\s?\}\}";

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid"))
}

/// The first placeholder found in a rule value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Full placeholder text, delimiters included.
    pub token: &'a str,

    /// Dotted path between `config.` and the closing delimiter.
    pub path: &'a str,

    /// Byte range of `token` inside the value.
    pub range: Range<usize>,
}

impl Placeholder<'_> {
    /// Path segments converted to the host configuration's key convention.
    pub fn lookup_segments(&self) -> Vec<String> {
        self.path.split('.').map(camel_case).collect()
    }
}

/// Find the first placeholder in `value`.
pub fn find_placeholder(value: &str) -> Option<Placeholder<'_>> {
    let caps = placeholder_regex().captures(value)?;
    let token = caps.get(0)?;
    let path = caps.get(1)?;

    Some(Placeholder {
        token: token.as_str(),
        path: path.as_str(),
        range: token.range(),
    })
}

/// Replace every placeholder in `value` with `replacement`.
///
/// The replacement is inserted verbatim; `$` has no special meaning.
pub fn substitute(value: &str, replacement: &str) -> String {
    placeholder_regex()
        .replace_all(value, NoExpand(replacement))
        .into_owned()
}

/// Convert a snake, kebab or dotted identifier to upper camel case.
///
/// Letters following `_`, `-`, `.`, a space or a digit are uppercased, the
/// delimiters are dropped, and any other non-alphanumeric character is
/// removed.
pub fn camel_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut cap_next = true;

    for c in segment.trim().chars() {
        if c.is_ascii_alphabetic() {
            out.push(if cap_next { c.to_ascii_uppercase() } else { c });
            cap_next = false;
        } else if c.is_ascii_digit() {
            out.push(c);
            cap_next = true;
        } else {
            cap_next = matches!(c, '_' | '-' | '.' | ' ');
        }
    }

    out
}
