//! Comparison of two texts, position by position or as sets of lines, and
//! byte-level comparison of many files pairwise.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct CompareOptions {
    pub ignore_case: bool,
    pub trim: bool,
}

/// Which lines a comparison prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Text of lines found only in the first input.
    F1,
    /// Text of lines found only in the second input.
    F2,
    /// Text of lines found in both.
    Both,
    /// Labelled mismatching lines.
    #[default]
    Diff,
    /// Every line, labelled.
    All,
    /// Summary only.
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStatus {
    Match,
    Diff,
    /// The first file has a line here, the second has ended.
    OnlyInFirst,
    /// The second file has a line here, the first has ended.
    OnlyInSecond,
}

impl LineStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LineStatus::Match => "MATCH",
            LineStatus::Diff => "DIFF",
            LineStatus::OnlyInFirst => "F1 after F2",
            LineStatus::OnlyInSecond => "F2 after F1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineComparison {
    /// One-based line number.
    pub line: usize,
    pub status: LineStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<String>,
}

impl LineComparison {
    pub fn to_line(&self) -> String {
        let mut parts = vec![self.status.label().to_string(), format!("L{}", self.line)];
        parts.extend(self.first.iter().cloned());
        parts.extend(self.second.iter().cloned());
        parts.join("\t")
    }

    /// Output lines for this position under `mode`.
    pub fn render(&self, mode: OutputMode) -> Vec<String> {
        let first = self.first.iter().cloned();
        let second = self.second.iter().cloned();

        match (mode, self.status) {
            (OutputMode::All, _) => vec![self.to_line()],
            (OutputMode::Diff, LineStatus::Match) => Vec::new(),
            (OutputMode::Diff, _) => vec![self.to_line()],
            (OutputMode::Both, LineStatus::Match) => first.collect(),
            (OutputMode::F1, LineStatus::Diff | LineStatus::OnlyInFirst) => first.collect(),
            (OutputMode::F2, LineStatus::Diff | LineStatus::OnlyInSecond) => second.collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareSummary {
    pub first_lines: usize,
    pub second_lines: usize,
    pub size_diff: usize,
    pub mismatches: usize,
}

impl CompareSummary {
    pub fn is_identical(&self) -> bool {
        self.size_diff == 0 && self.mismatches == 0
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResult {
    pub lines: Vec<LineComparison>,
    pub summary: CompareSummary,
}

/// Compare two line lists position by position.
///
/// Every position is reported, matches included; callers filter for display.
pub fn compare_lines<A: AsRef<str>, B: AsRef<str>>(
    first: &[A],
    second: &[B],
    options: CompareOptions,
) -> CompareResult {
    let longest = first.len().max(second.len());
    let mut lines = Vec::with_capacity(longest);
    let mut summary = CompareSummary {
        first_lines: first.len(),
        second_lines: second.len(),
        ..CompareSummary::default()
    };

    for index in 0..longest {
        let left = first.get(index).map(|s| prepare(s.as_ref(), options));
        let right = second.get(index).map(|s| prepare(s.as_ref(), options));

        let status = match (&left, &right) {
            (Some(l), Some(r)) if equal(l, r, options) => LineStatus::Match,
            (Some(_), Some(_)) => {
                summary.mismatches += 1;
                LineStatus::Diff
            }
            (Some(_), None) => {
                summary.size_diff += 1;
                LineStatus::OnlyInFirst
            }
            (None, _) => {
                summary.size_diff += 1;
                LineStatus::OnlyInSecond
            }
        };

        lines.push(LineComparison {
            line: index + 1,
            status,
            first: left,
            second: right,
        });
    }

    CompareResult { lines, summary }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetStatus {
    Both,
    OnlyInFirst,
    OnlyInSecond,
}

impl SetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SetStatus::Both => "F1 & F2",
            SetStatus::OnlyInFirst => "F1 not F2",
            SetStatus::OnlyInSecond => "F2 not F1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLine {
    pub status: SetStatus,
    pub text: String,
}

impl SetLine {
    pub fn to_line(&self) -> String {
        format!("{}\t{}", self.status.label(), self.text)
    }

    pub fn render(&self, mode: OutputMode) -> Option<String> {
        match (mode, self.status) {
            (OutputMode::All, _) => Some(self.to_line()),
            (OutputMode::Diff, SetStatus::OnlyInFirst | SetStatus::OnlyInSecond) => {
                Some(self.to_line())
            }
            (OutputMode::Both, SetStatus::Both)
            | (OutputMode::F1, SetStatus::OnlyInFirst)
            | (OutputMode::F2, SetStatus::OnlyInSecond) => Some(self.text.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSummary {
    pub first_lines: usize,
    pub second_lines: usize,
    pub size_diff: usize,
    pub only_in_first: usize,
    pub only_in_second: usize,
    pub in_both: usize,
    pub total_diff: usize,
}

impl SetSummary {
    pub fn is_identical(&self) -> bool {
        self.total_diff == 0
    }

    pub fn to_lines(&self) -> Vec<String> {
        vec![
            format!("F1 LINES READ:  {:8} lines", self.first_lines),
            format!("F2 LINES READ:  {:8} lines", self.second_lines),
            format!("FILE SIZE DIFF: {:8} lines", self.size_diff),
            format!("F1 not F2       {:8} lines", self.only_in_first),
            format!("F2 not F1       {:8} lines", self.only_in_second),
            format!("F1  &  F2       {:8} lines", self.in_both),
            format!("TOTAL DIFF      {:8} lines", self.total_diff),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetComparison {
    pub lines: Vec<SetLine>,
    pub summary: SetSummary,
}

/// Compare two inputs as collections of lines, ignoring order.
///
/// Lines of the second input come first, in their order, marked as found in
/// both or only in the second. Lines of the first input never seen in the
/// second follow in their own order.
pub fn compare_sets<A: AsRef<str>, B: AsRef<str>>(
    first: &[A],
    second: &[B],
    options: CompareOptions,
) -> SetComparison {
    let key = |s: &str| -> String {
        let s = prepare(s, options);
        if options.ignore_case {
            s.to_lowercase()
        } else {
            s
        }
    };

    let mut index: HashMap<String, Vec<String>> = HashMap::new();
    for line in first {
        index
            .entry(key(line.as_ref()))
            .or_default()
            .push(prepare(line.as_ref(), options));
    }

    let mut summary = SetSummary {
        first_lines: first.len(),
        second_lines: second.len(),
        size_diff: first.len().abs_diff(second.len()),
        ..SetSummary::default()
    };
    let mut lines = Vec::new();
    let mut found: HashSet<String> = HashSet::new();

    for line in second {
        let line_key = key(line.as_ref());
        let status = if index.contains_key(&line_key) {
            summary.in_both += 1;
            found.insert(line_key);
            SetStatus::Both
        } else {
            summary.only_in_second += 1;
            SetStatus::OnlyInSecond
        };
        lines.push(SetLine {
            status,
            text: prepare(line.as_ref(), options),
        });
    }

    for line in first {
        if !found.contains(&key(line.as_ref())) {
            summary.only_in_first += 1;
            lines.push(SetLine {
                status: SetStatus::OnlyInFirst,
                text: prepare(line.as_ref(), options),
            });
        }
    }

    summary.total_diff = summary.only_in_first + summary.only_in_second;
    SetComparison { lines, summary }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePair {
    pub first: String,
    pub second: String,
    pub identical: bool,
}

impl FilePair {
    pub fn to_line(&self) -> String {
        let verdict = if self.identical { "are identical" } else { "differ" };
        format!("Files {} and {} {}", self.first, self.second, verdict)
    }
}

/// Compare every pair of files byte for byte, each unordered pair once.
///
/// Pairs keep argument order; repeated arguments are not compared with
/// themselves.
pub fn compare_files_pairwise(paths: &[String]) -> Result<Vec<FilePair>> {
    let mut contents: HashMap<&str, Vec<u8>> = HashMap::new();
    for path in paths {
        if !contents.contains_key(path.as_str()) {
            contents.insert(path.as_str(), crate::io::read_bytes(path)?);
        }
    }

    let mut compared: HashSet<(&str, &str)> = HashSet::new();
    let mut pairs = Vec::new();

    for (i, first) in paths.iter().enumerate() {
        for second in &paths[i + 1..] {
            if first == second {
                continue;
            }
            let id = if first < second {
                (first.as_str(), second.as_str())
            } else {
                (second.as_str(), first.as_str())
            };
            if !compared.insert(id) {
                continue;
            }

            pairs.push(FilePair {
                first: first.clone(),
                second: second.clone(),
                identical: contents.get(first.as_str()) == contents.get(second.as_str()),
            });
        }
    }

    Ok(pairs)
}

fn prepare(s: &str, options: CompareOptions) -> String {
    if options.trim {
        s.trim().to_string()
    } else {
        s.to_string()
    }
}

fn equal(a: &str, b: &str, options: CompareOptions) -> bool {
    if options.ignore_case {
        a.to_lowercase() == b.to_lowercase()
    } else {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(result: &CompareResult) -> Vec<LineStatus> {
        result.lines.iter().map(|l| l.status).collect()
    }

    #[test]
    fn identical_inputs_match_everywhere() {
        let result = compare_lines(&["a", "b"], &["a", "b"], CompareOptions::default());
        assert_eq!(statuses(&result), vec![LineStatus::Match, LineStatus::Match]);
        assert!(result.summary.is_identical());
    }

    #[test]
    fn reports_diffs_and_length_mismatch() {
        let result = compare_lines(&["a", "b", "c"], &["a", "x"], CompareOptions::default());
        assert_eq!(
            statuses(&result),
            vec![LineStatus::Match, LineStatus::Diff, LineStatus::OnlyInFirst]
        );
        assert_eq!(
            result.summary,
            CompareSummary {
                first_lines: 3,
                second_lines: 2,
                size_diff: 1,
                mismatches: 1,
            }
        );
        assert_eq!(result.lines[1].to_line(), "DIFF\tL2\tb\tx");
        assert_eq!(result.lines[2].to_line(), "F1 after F2\tL3\tc");
    }

    #[test]
    fn second_longer() {
        let result = compare_lines(&["a"], &["a", "b"], CompareOptions::default());
        assert_eq!(result.lines[1].status, LineStatus::OnlyInSecond);
        assert_eq!(result.lines[1].to_line(), "F2 after F1\tL2\tb");
    }

    #[test]
    fn render_modes_for_positions() {
        let result = compare_lines(&["a", "b", "c"], &["a", "x"], CompareOptions::default());
        let render = |mode| -> Vec<String> {
            result.lines.iter().flat_map(|l| l.render(mode)).collect()
        };

        assert_eq!(render(OutputMode::F1), vec!["b", "c"]);
        assert_eq!(render(OutputMode::F2), vec!["x"]);
        assert_eq!(render(OutputMode::Both), vec!["a"]);
        assert_eq!(render(OutputMode::Diff), vec!["DIFF\tL2\tb\tx", "F1 after F2\tL3\tc"]);
        assert_eq!(render(OutputMode::All).len(), 3);
        assert!(render(OutputMode::Stats).is_empty());
    }

    #[test]
    fn sets_ignore_order() {
        let result = compare_sets(&["a", "b", "c"], &["c", "a"], CompareOptions::default());
        let labelled: Vec<String> = result.lines.iter().map(SetLine::to_line).collect();
        assert_eq!(labelled, vec!["F1 & F2\tc", "F1 & F2\ta", "F1 not F2\tb"]);
        assert_eq!(
            result.summary,
            SetSummary {
                first_lines: 3,
                second_lines: 2,
                size_diff: 1,
                only_in_first: 1,
                only_in_second: 0,
                in_both: 2,
                total_diff: 1,
            }
        );
        assert!(!result.summary.is_identical());
    }

    #[test]
    fn sets_render_modes() {
        let options = CompareOptions {
            ignore_case: true,
            trim: false,
        };
        let result = compare_sets(&["a", "b"], &["B", "z"], options);
        let render = |mode| -> Vec<String> {
            result.lines.iter().filter_map(|l| l.render(mode)).collect()
        };

        assert_eq!(render(OutputMode::Both), vec!["B"]);
        assert_eq!(render(OutputMode::F2), vec!["z"]);
        assert_eq!(render(OutputMode::F1), vec!["a"]);
        assert_eq!(render(OutputMode::Diff), vec!["F2 not F1\tz", "F1 not F2\ta"]);
    }

    #[test]
    fn shuffled_sets_are_identical() {
        let options = CompareOptions {
            ignore_case: false,
            trim: true,
        };
        let result = compare_sets(&["x ", "y"], &["y", " x"], options);
        assert!(result.summary.is_identical());
        assert_eq!(result.summary.to_lines()[6], format!("TOTAL DIFF      {:8} lines", 0));
    }

    #[test]
    fn pairwise_reports_each_pair_once() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, content: &str| {
            let path = dir.path().join(name);
            std::fs::write(&path, content).unwrap();
            path.display().to_string()
        };
        let a = write("a.txt", "same\n");
        let b = write("b.txt", "same\n");
        let c = write("c.txt", "other\n");

        let pairs = compare_files_pairwise(&[a.clone(), b.clone(), c.clone(), a.clone()]).unwrap();
        let verdicts: Vec<(&str, &str, bool)> = pairs
            .iter()
            .map(|p| (p.first.as_str(), p.second.as_str(), p.identical))
            .collect();
        assert_eq!(
            verdicts,
            vec![
                (a.as_str(), b.as_str(), true),
                (a.as_str(), c.as_str(), false),
                (b.as_str(), c.as_str(), false),
            ]
        );
        assert_eq!(pairs[0].to_line(), format!("Files {} and {} are identical", a, b));
        assert_eq!(pairs[1].to_line(), format!("Files {} and {} differ", a, c));
    }

    #[test]
    fn pairwise_missing_file_is_input_error() {
        let paths = vec!["/nonexistent/a".to_string(), "/nonexistent/b".to_string()];
        let err = compare_files_pairwise(&paths).unwrap_err();
        assert_eq!(err.code.as_str(), "input.not_found");
    }

    #[test]
    fn ignore_case_and_trim() {
        let options = CompareOptions {
            ignore_case: true,
            trim: true,
        };
        let result = compare_lines(&[" Snöa "], &["SNÖA"], options);
        assert!(result.summary.is_identical());

        let strict = compare_lines(&[" Snöa "], &["SNÖA"], CompareOptions::default());
        assert_eq!(strict.summary.mismatches, 1);
    }
}
