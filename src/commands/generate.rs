use clap::{Args, ValueEnum};
use serde::Serialize;
use std::io::{self, Write};

use textkit::defaults;
use textkit::generator::{self, Template};

use super::CmdResult;
use crate::output::{self, TextOutput};

#[derive(Args)]
pub struct GenerateArgs {
    /// Template file, one slot per line; `-` or none reads stdin
    #[arg(value_name = "FILE", conflicts_with = "slots")]
    pub file: Option<String>,

    /// Inline slot with alternatives split by the alternative separator (repeatable)
    #[arg(long = "slot", short = 's', value_name = "ALTERNATIVES")]
    pub slots: Vec<String>,

    /// Template file format
    #[arg(long, value_enum, default_value_t = TemplateFormat::Text)]
    pub format: TemplateFormat,

    /// Separator between alternatives in a slot line (default from textkit.json)
    #[arg(long, value_name = "SEP")]
    pub alt_sep: Option<String>,

    /// Separator between rendered entries (default from textkit.json)
    #[arg(long, value_name = "SEP")]
    pub separator: Option<String>,

    /// Skip this many combinations
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Print at most this many combinations
    #[arg(long)]
    pub limit: Option<usize>,

    /// Only report the number of combinations
    #[arg(long, conflicts_with_all = ["index", "limit"])]
    pub count: bool,

    /// Print only the combination at this zero-based index
    #[arg(long, conflicts_with = "limit")]
    pub index: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TemplateFormat {
    /// One slot per line, alternatives split by a separator
    Text,
    /// JSON array of string arrays
    Json,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    pub command: &'static str,
    pub slots: usize,
    /// Total combinations; absent when the product overflows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<String>>,
}

impl TextOutput for GenerateOutput {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        match &self.lines {
            Some(lines) => output::write_lines(out, lines),
            None => match self.total {
                Some(total) => writeln!(out, "{}", total),
                None => writeln!(out, "overflow"),
            },
        }
    }
}

pub fn run(args: GenerateArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<GenerateOutput> {
    let config = defaults::load_defaults().generator;
    let alt_sep = resolve_separator(args.alt_sep.as_deref(), config.alternative_separator);
    let separator = resolve_separator(args.separator.as_deref(), config.separator);

    let template = load_template(&args, &alt_sep)?;
    let total = template.count();

    let mut result = GenerateOutput {
        command: "generate",
        slots: template.slot_count(),
        total,
        lines: None,
    };

    if args.count {
        return Ok((result, 0));
    }

    if let Some(index) = args.index {
        let combination = template.combination_at(index).ok_or_else(|| {
            textkit::Error::validation_invalid_argument(
                "index",
                format!("Index {} is past the last combination", index),
                Some(index.to_string()),
                None,
            )
        })?;
        result.lines = Some(vec![combination.render(&separator)]);
        return Ok((result, 0));
    }

    let planned = planned_lines(total, args.offset, args.limit);
    match planned {
        Some(n) if n <= config.max_combinations => {}
        _ => {
            return Err(textkit::Error::template_too_large(
                total,
                config.max_combinations,
            ))
        }
    }

    if let Some(total) = total {
        textkit::log_status!("generate", "{} combinations", total);
    }

    let lines = template
        .combinations_from(args.offset)
        .take(args.limit.unwrap_or(usize::MAX))
        .map(|combination| combination.render(&separator))
        .collect();
    result.lines = Some(lines);

    Ok((result, 0))
}

fn load_template(args: &GenerateArgs, alt_sep: &str) -> textkit::Result<Template> {
    if !args.slots.is_empty() {
        return generator::parse_slots(&args.slots, alt_sep);
    }

    let path = args.file.as_deref().unwrap_or(textkit::io::STDIN_PATH);
    if path == textkit::io::STDIN_PATH && crate::tty::is_stdin_tty() {
        crate::tty::status("Reading template from stdin (Ctrl-D to finish)");
    }
    let content = textkit::io::read_input(path)?;

    match args.format {
        TemplateFormat::Text => generator::parse_template(&content, alt_sep),
        TemplateFormat::Json => generator::parse_template_json(&content),
    }
}

/// Command-line separator with escapes like `\t` expanded, else the configured one.
fn resolve_separator(arg: Option<&str>, configured: String) -> String {
    arg.map(textkit::parser::unescape_separator)
        .unwrap_or(configured)
}

/// Number of lines a paged run would print, `None` when unbounded by both
/// the template and the limit.
fn planned_lines(total: Option<usize>, offset: usize, limit: Option<usize>) -> Option<usize> {
    let remaining = total.map(|total| total.saturating_sub(offset));
    match (remaining, limit) {
        (Some(remaining), Some(limit)) => Some(remaining.min(limit)),
        (Some(remaining), None) => Some(remaining),
        (None, Some(limit)) => Some(limit),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_bounds_an_overflowing_template() {
        assert_eq!(planned_lines(None, 0, Some(10)), Some(10));
        assert_eq!(planned_lines(None, 5, None), None);
    }

    #[test]
    fn offset_reduces_planned_lines() {
        assert_eq!(planned_lines(Some(24), 20, None), Some(4));
        assert_eq!(planned_lines(Some(24), 30, Some(5)), Some(0));
        assert_eq!(planned_lines(Some(24), 2, Some(5)), Some(5));
    }

    #[test]
    fn escaped_tab_alt_sep_splits_tsv_slots() {
        let alt_sep = resolve_separator(Some("\\t"), "|".to_string());
        assert_eq!(alt_sep, "\t");

        let template = generator::parse_template("a\tb\nc\td\n", &alt_sep).unwrap();
        assert_eq!(template.count(), Some(4));
        let lines: Vec<String> = template.combinations().map(|c| c.render(" ")).collect();
        assert_eq!(lines, vec!["a c", "a d", "b c", "b d"]);
    }

    #[test]
    fn configured_separator_used_without_flag() {
        assert_eq!(resolve_separator(None, "|".to_string()), "|");
    }

    #[test]
    fn count_output_prints_total() {
        let output = GenerateOutput {
            command: "generate",
            slots: 5,
            total: Some(24),
            lines: None,
        };
        let mut buf = Vec::new();
        output.write_text(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "24\n");
    }
}
