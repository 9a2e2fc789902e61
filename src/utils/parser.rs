//! Parsing primitives for line-oriented text and small argument lists.

use crate::error::{Error, Result};

/// Convert content into a Vec of owned line strings.
///
/// Splits on `\n`, drops a trailing `\r` from each line, and does not produce
/// a phantom empty line for a trailing newline.
pub fn lines_to_vec(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|s| s.trim_end_matches('\r').to_string())
        .collect()
}

/// Split a line into fields on `separator`.
pub fn split_fields<'a>(line: &'a str, separator: &str) -> Vec<&'a str> {
    line.split(separator).collect()
}

/// Parse a comma-separated list of 1-based field numbers (e.g. `3,1`).
///
/// Returns zero-based indices in the given order.
pub fn parse_field_list(list: &str) -> Result<Vec<usize>> {
    let mut indices = Vec::new();

    for part in list.split(',') {
        let trimmed = part.trim();
        let number: usize = trimmed.parse().map_err(|_| {
            Error::validation_invalid_argument(
                "fields",
                format!("Couldn't parse field number '{}' in '{}'", trimmed, list),
                None,
                None,
            )
        })?;

        if number == 0 {
            return Err(Error::validation_invalid_argument(
                "fields",
                "Field numbers start at 1",
                Some(list.to_string()),
                None,
            ));
        }

        indices.push(number - 1);
    }

    Ok(indices)
}

/// Interpret common escape sequences in a separator argument (`\t`, `\n`, `\\`).
pub fn unescape_separator(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
