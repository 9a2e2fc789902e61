use clap::{Args, ValueEnum};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

use textkit::compare::{self, CompareOptions, CompareResult, OutputMode, SetComparison};

use super::CmdResult;
use crate::output::{self, TextOutput};

#[derive(Args)]
pub struct CompareArgs {
    /// First file (`-` for stdin)
    pub first: String,

    /// Second file (`-` for stdin)
    pub second: String,

    /// Compare as sets of lines, ignoring line order
    #[arg(long)]
    pub sets: bool,

    /// Which lines to print
    #[arg(long, short = 'm', value_enum, default_value_t = Mode::Diff)]
    pub mode: Mode,

    /// Compare ignoring letter case
    #[arg(long, short = 'i')]
    pub ignore_case: bool,

    /// Trim whitespace before comparing
    #[arg(long, short = 't')]
    pub trim: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Mode {
    /// Lines in the first file only
    F1,
    /// Lines in the second file only
    F2,
    /// Lines occurring in both files
    Both,
    /// Mismatching lines, labelled
    Diff,
    /// All lines, labelled
    All,
    /// Summary statistics only
    Stats,
}

impl From<Mode> for OutputMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::F1 => OutputMode::F1,
            Mode::F2 => OutputMode::F2,
            Mode::Both => OutputMode::Both,
            Mode::Diff => OutputMode::Diff,
            Mode::All => OutputMode::All,
            Mode::Stats => OutputMode::Stats,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Comparison {
    Lines(CompareResult),
    Sets(SetComparison),
}

impl Comparison {
    fn is_identical(&self) -> bool {
        match self {
            Comparison::Lines(result) => result.summary.is_identical(),
            Comparison::Sets(result) => result.summary.is_identical(),
        }
    }

    fn summary_lines(&self) -> Vec<String> {
        match self {
            Comparison::Lines(result) => {
                let summary = &result.summary;
                vec![
                    format!("LINES READ\t{}\t{}", summary.first_lines, summary.second_lines),
                    format!("SIZE DIFF\t{}", summary.size_diff),
                    format!("MISMATCHES\t{}", summary.mismatches),
                ]
            }
            Comparison::Sets(result) => result.summary.to_lines(),
        }
    }

    fn rendered_lines(&self, mode: OutputMode) -> Vec<String> {
        match self {
            Comparison::Lines(result) => {
                result.lines.iter().flat_map(|line| line.render(mode)).collect()
            }
            Comparison::Sets(result) => {
                result.lines.iter().filter_map(|line| line.render(mode)).collect()
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompareOutput {
    pub command: &'static str,
    pub mode: OutputMode,
    #[serde(flatten)]
    pub comparison: Comparison,
}

impl TextOutput for CompareOutput {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.mode == OutputMode::Stats {
            return output::write_lines(out, self.comparison.summary_lines());
        }
        output::write_lines(out, self.comparison.rendered_lines(self.mode))
    }
}

pub fn run(args: CompareArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<CompareOutput> {
    if same_input(&args.first, &args.second) {
        return Err(textkit::Error::validation_invalid_argument(
            "second",
            "Cannot compare a file with itself",
            Some(args.second.clone()),
            None,
        ));
    }

    let first = textkit::io::read_lines(std::slice::from_ref(&args.first))?;
    let second = textkit::io::read_lines(std::slice::from_ref(&args.second))?;

    let options = CompareOptions {
        ignore_case: args.ignore_case,
        trim: args.trim,
    };
    let comparison = if args.sets {
        Comparison::Sets(compare::compare_sets(&first, &second, options))
    } else {
        Comparison::Lines(compare::compare_lines(&first, &second, options))
    };

    let mode = OutputMode::from(args.mode);
    if mode != OutputMode::Stats {
        for line in comparison.summary_lines() {
            textkit::log_status!("compare", "{}", line);
        }
    }

    let exit_code = if comparison.is_identical() { 0 } else { 1 };

    Ok((
        CompareOutput {
            command: "compare",
            mode,
            comparison,
        },
        exit_code,
    ))
}

/// Two arguments naming the same file, or both naming stdin.
fn same_input(first: &str, second: &str) -> bool {
    if first == second {
        return true;
    }
    match (Path::new(first).canonicalize(), Path::new(second).canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn text(output: &CompareOutput) -> String {
        let mut buf = Vec::new();
        output.write_text(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn same_file_through_different_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "x\n").unwrap();
        let dotted = dir.path().join(".").join("a.txt");

        assert!(same_input(&path.display().to_string(), &dotted.display().to_string()));
        assert!(same_input("-", "-"));
    }

    #[test]
    fn different_files_are_not_same() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "x\n").unwrap();
        fs::write(&b, "x\n").unwrap();

        assert!(!same_input(&a.display().to_string(), &b.display().to_string()));
    }

    #[test]
    fn diff_mode_hides_matches() {
        let result = compare::compare_lines(&["a", "b"], &["a", "c"], CompareOptions::default());
        let output = CompareOutput {
            command: "compare",
            mode: OutputMode::Diff,
            comparison: Comparison::Lines(result),
        };
        assert_eq!(text(&output), "DIFF\tL2\tb\tc\n");
    }

    #[test]
    fn stats_mode_prints_summary_only() {
        let result = compare::compare_lines(&["a", "b"], &["a", "c"], CompareOptions::default());
        let output = CompareOutput {
            command: "compare",
            mode: OutputMode::Stats,
            comparison: Comparison::Lines(result),
        };
        assert_eq!(text(&output), "LINES READ\t2\t2\nSIZE DIFF\t0\nMISMATCHES\t1\n");
    }

    #[test]
    fn set_mode_prints_lines_of_second_missing_from_first() {
        let result = compare::compare_sets(&["a", "b"], &["b", "c"], CompareOptions::default());
        let output = CompareOutput {
            command: "compare",
            mode: OutputMode::F2,
            comparison: Comparison::Sets(result),
        };
        assert!(!output.comparison.is_identical());
        assert_eq!(text(&output), "c\n");
    }
}
