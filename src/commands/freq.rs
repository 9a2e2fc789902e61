use clap::Args;
use serde::Serialize;
use std::io::{self, Write};

use textkit::stats::{self, FrequencyEntry, FrequencyLayout};

use super::{CmdResult, InputArgs};
use crate::output::TextOutput;

#[derive(Args)]
pub struct FreqArgs {
    /// Print the count after the value
    #[arg(long, short = 'r')]
    pub count_right: bool,

    /// Add a percentage column
    #[arg(long, short = 'p')]
    pub percentage: bool,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize)]
pub struct FreqOutput {
    pub command: &'static str,
    pub total: usize,
    pub entries: Vec<FrequencyEntry>,
    #[serde(skip)]
    layout: FrequencyLayout,
}

impl TextOutput for FreqOutput {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(out, "{}", stats::format_frequency(entry, self.layout))?;
        }
        Ok(())
    }
}

pub fn run(args: FreqArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<FreqOutput> {
    let lines = args.input.read_lines()?;
    let entries = stats::frequencies(&lines);

    Ok((
        FreqOutput {
            command: "freq",
            total: lines.len(),
            entries,
            layout: FrequencyLayout {
                count_right: args.count_right,
                percentage: args.percentage,
            },
        },
        0,
    ))
}
