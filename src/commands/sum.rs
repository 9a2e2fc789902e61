use clap::Args;
use serde::Serialize;
use std::io::{self, Write};

use textkit::stats::{self, SumResult};

use super::{CmdResult, InputArgs};
use crate::output::{self, TextOutput};

#[derive(Args)]
pub struct SumArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize)]
pub struct SumOutput {
    pub command: &'static str,
    #[serde(flatten)]
    pub result: SumResult,
}

impl TextOutput for SumOutput {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        output::write_lines(out, self.result.to_lines())
    }
}

pub fn run(args: SumArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<SumOutput> {
    let lines = args.input.read_lines()?;
    let result = stats::sum(&lines)?;

    Ok((
        SumOutput {
            command: "sum",
            result,
        },
        0,
    ))
}
