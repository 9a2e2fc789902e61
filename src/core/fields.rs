//! Column-oriented operations on separator-delimited lines.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::parser;

/// Pick fields by zero-based index, in the order given, and re-join them.
///
/// `line_number` is one-based and only used for error reporting.
pub fn select_fields(
    line: &str,
    indices: &[usize],
    separator: &str,
    line_number: usize,
) -> Result<String> {
    let fields = parser::split_fields(line, separator);
    let mut picked = Vec::with_capacity(indices.len());

    for &index in indices {
        let field = fields
            .get(index)
            .ok_or_else(|| Error::field_out_of_range(line_number, index + 1, fields.len()))?;
        picked.push(*field);
    }

    Ok(picked.join(separator))
}

/// Transpose rows and columns. Row `i` of the output holds field `i` of every
/// input line that has one, so ragged input gives shorter output rows.
pub fn rotate<S: AsRef<str>>(lines: &[S], separator: &str) -> Vec<String> {
    let mut rows: Vec<Vec<&str>> = Vec::new();

    for line in lines {
        for (index, field) in line.as_ref().split(separator).enumerate() {
            if rows.len() <= index {
                rows.resize_with(index + 1, Vec::new);
            }
            rows[index].push(field);
        }
    }

    rows.into_iter().map(|row| row.join(separator)).collect()
}

#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub ignore_case: bool,
    pub trim: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResult {
    pub lines: Vec<String>,
    /// Number of requested values that matched at least one column.
    pub matched: usize,
    /// Requested values with no matching line, in request order.
    pub missing: Vec<String>,
}

/// Print the content lines whose field at any of `columns` (zero-based)
/// equals one of `values`.
///
/// Output follows the order of `values`; for each value, columns are tried
/// in the order given and matching lines come out in file order.
pub fn filter_by_column<S: AsRef<str>, V: AsRef<str>>(
    content: &[S],
    columns: &[usize],
    values: &[V],
    separator: &str,
    options: &FilterOptions,
) -> FilterResult {
    let normalize = |s: &str| -> String {
        let s = if options.trim { s.trim() } else { s };
        if options.ignore_case {
            s.to_uppercase()
        } else {
            s.to_string()
        }
    };

    let mut index: HashMap<usize, HashMap<String, Vec<String>>> = HashMap::new();
    for line in content {
        let line = line.as_ref();
        let line = if options.trim { line.trim() } else { line };
        for (column, field) in line.split(separator).enumerate() {
            if !columns.contains(&column) {
                continue;
            }
            index
                .entry(column)
                .or_default()
                .entry(normalize(field))
                .or_default()
                .push(line.to_string());
        }
    }

    let mut result = FilterResult::default();
    for value in values {
        let raw = value.as_ref();
        let key = normalize(raw);
        let mut found = false;

        for column in columns {
            if let Some(lines) = index.get(column).and_then(|by_value| by_value.get(&key)) {
                found = true;
                result.lines.extend(lines.iter().cloned());
            }
        }

        if found {
            result.matched += 1;
        } else {
            result.missing.push(raw.to_string());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_reorders_fields() {
        assert_eq!(select_fields("a\tb\tc", &[2, 0], "\t", 1).unwrap(), "c\ta");
        assert_eq!(select_fields("a;b", &[1, 1], ";", 1).unwrap(), "b;b");
    }

    #[test]
    fn select_out_of_range_names_line_and_field() {
        let err = select_fields("a\tb", &[4], "\t", 7).unwrap_err();
        assert_eq!(err.code.as_str(), "data.field_out_of_range");
        assert_eq!(err.details["line"], 7);
        assert_eq!(err.details["field"], 5);
        assert_eq!(err.details["available"], 2);
    }

    #[test]
    fn rotate_transposes() {
        let lines = ["a\tb\tc", "1\t2\t3"];
        assert_eq!(rotate(&lines, "\t"), vec!["a\t1", "b\t2", "c\t3"]);
    }

    #[test]
    fn rotate_ragged_rows() {
        let lines = ["a\tb\tc", "1"];
        assert_eq!(rotate(&lines, "\t"), vec!["a\t1", "b", "c"]);
        assert!(rotate::<&str>(&[], "\t").is_empty());
    }

    #[test]
    fn filter_follows_value_order() {
        let content = ["1\tapa", "2\tbepa", "3\tapa", "4\tcepa"];
        let result = filter_by_column(
            &content,
            &[1],
            &["cepa", "apa", "depa"],
            "\t",
            &FilterOptions::default(),
        );
        assert_eq!(result.lines, vec!["4\tcepa", "1\tapa", "3\tapa"]);
        assert_eq!(result.matched, 2);
        assert_eq!(result.missing, vec!["depa"]);
    }

    #[test]
    fn filter_ignore_case_and_trim() {
        let content = ["1\tApa ", "2\tbepa"];
        let options = FilterOptions {
            ignore_case: true,
            trim: true,
        };
        let result = filter_by_column(&content, &[1], &[" APA"], "\t", &options);
        assert_eq!(result.lines, vec!["1\tApa"]);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn filter_checks_every_listed_column() {
        let content = ["x\ty", "y\tz"];
        let result = filter_by_column(&content, &[0, 1], &["y"], "\t", &FilterOptions::default());
        assert_eq!(result.lines, vec!["y\tz", "x\ty"]);
    }
}
