//! Character inspection: code points, Unicode names and scripts.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use unicode_script::{Script, UnicodeScript};

use crate::error::{Error, Result};

/// Placeholder for a character with no name or script.
pub const UNDEFINED: &str = "<UNDEF>";

static CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\\[uU]|[uU]\+?)([0-9a-fA-F]{4,6})$").expect("code point regex")
});

/// Names used in place of the Unicode ones; the character column is left
/// blank for these so the table stays one row per line.
fn hardwired_name(c: char) -> Option<&'static str> {
    match c {
        '\n' => Some("NEWLINE"),
        '\t' => Some("TAB"),
        _ => None,
    }
}

/// `\uXXXX` notation, at least four uppercase hex digits.
pub fn code_for(c: char) -> String {
    format!("\\u{:04X}", c as u32)
}

pub fn name_for(c: char) -> String {
    if let Some(name) = hardwired_name(c) {
        return name.to_string();
    }
    match unicode_names2::name(c) {
        Some(name) => name.to_string(),
        None if c.is_control() => "<control>".to_string(),
        None => UNDEFINED.to_string(),
    }
}

pub fn script_for(c: char) -> &'static str {
    match c.script() {
        Script::Unknown => UNDEFINED,
        script => script.full_name(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharInfo {
    pub character: char,
    pub code: String,
    pub name: String,
    pub script: &'static str,
}

impl CharInfo {
    pub fn new(c: char) -> Self {
        Self {
            character: c,
            code: code_for(c),
            name: name_for(c),
            script: script_for(c),
        }
    }

    /// Tab-separated row: character, code, name, script.
    pub fn to_line(&self) -> String {
        let shown = if hardwired_name(self.character).is_some() {
            String::new()
        } else {
            self.character.to_string()
        };
        format!("{}\t{}\t{}\t{}", shown, self.code, self.name, self.script)
    }
}

/// One entry per character of `s`, in order.
pub fn describe(s: &str) -> Vec<CharInfo> {
    s.chars().map(CharInfo::new).collect()
}

/// Space-separated `\uXXXX` codes for each character of `s`.
pub fn to_codes(s: &str) -> String {
    s.chars().map(code_for).collect::<Vec<_>>().join(" ")
}

/// Parse `\u0416`, `U+0416`, `u0416` and similar into a character.
///
/// Returns `Ok(None)` when `s` is not in code notation at all.
pub fn parse_code(s: &str) -> Result<Option<char>> {
    let Some(caps) = CODE_RE.captures(s) else {
        return Ok(None);
    };
    let invalid = || {
        Error::validation_invalid_argument(
            "code",
            format!("'{}' is not a valid Unicode code point", s),
            Some(s.to_string()),
            None,
        )
    };
    let value = u32::from_str_radix(&caps[1], 16).map_err(|_| invalid())?;
    char::from_u32(value).map(Some).ok_or_else(invalid)
}

/// Replace each space-separated chunk written as `\uXXXX` or `U+XXXX` by
/// its character, leaving other chunks alone. The bare `uXXXX` form is not
/// decoded here since it collides with words like `ubade`.
pub fn decode_codes(s: &str) -> Result<String> {
    let chunks = s
        .split(' ')
        .map(|chunk| {
            let marked = chunk.starts_with('\\') || chunk.contains('+');
            let decoded = if marked { parse_code(chunk)? } else { None };
            Ok(match decoded {
                Some(c) => c.to_string(),
                None => chunk.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(chunks.join(" "))
}

/// Search string for a character given literally or in code notation.
pub fn resolve_needle(s: &str) -> Result<String> {
    if s.is_empty() {
        return Err(Error::validation_invalid_argument(
            "char",
            "Search character cannot be empty",
            None,
            None,
        ));
    }
    Ok(match parse_code(s)? {
        Some(c) => c.to_string(),
        None => s.to_string(),
    })
}

/// Number of characters, not bytes.
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}
