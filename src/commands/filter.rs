use clap::Args;
use serde::Serialize;
use std::io::{self, Write};

use textkit::fields::{self, FilterOptions, FilterResult};

use super::{CmdResult, InputArgs, SeparatorArgs};
use crate::output::{self, TextOutput};

#[derive(Args)]
pub struct FilterArgs {
    /// Comma-separated 1-based columns to match against (e.g. `1,3`)
    #[arg(long, short = 'c', value_name = "COLUMNS", default_value = "1")]
    pub columns: String,

    /// File holding the values to look for, one per line
    #[arg(long, value_name = "FILE", required_unless_present = "values")]
    pub values_file: Option<String>,

    /// Value to look for (repeatable)
    #[arg(long = "value", short = 'v', value_name = "VALUE")]
    pub values: Vec<String>,

    /// Compare ignoring letter case
    #[arg(long, short = 'i')]
    pub ignore_case: bool,

    /// Trim whitespace from lines and values before comparing
    #[arg(long, short = 't')]
    pub trim: bool,

    #[command(flatten)]
    pub separator: SeparatorArgs,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOutput {
    pub command: &'static str,
    #[serde(flatten)]
    pub result: FilterResult,
}

impl TextOutput for FilterOutput {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        output::write_lines(out, &self.result.lines)
    }
}

pub fn run(args: FilterArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<FilterOutput> {
    let columns = textkit::parser::parse_field_list(&args.columns)?;
    let separator = args.separator.resolve()?;

    let mut values = args.values.clone();
    if let Some(path) = &args.values_file {
        values.extend(textkit::io::read_lines(std::slice::from_ref(path))?);
    }

    let content = args.input.read_lines()?;
    let options = FilterOptions {
        ignore_case: args.ignore_case,
        trim: args.trim,
    };
    let result = fields::filter_by_column(&content, &columns, &values, &separator, &options);

    for value in &result.missing {
        textkit::log_status!("filter", "No lines for value: {}", value);
    }

    Ok((
        FilterOutput {
            command: "filter",
            result,
        },
        0,
    ))
}
