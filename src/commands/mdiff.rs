use clap::Args;
use serde::Serialize;
use std::io::{self, Write};

use textkit::compare::{self, FilePair};

use super::CmdResult;
use crate::output::TextOutput;

#[derive(Args)]
pub struct MdiffArgs {
    /// Files to compare with each other
    #[arg(value_name = "FILE", num_args = 2.., required = true)]
    pub files: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MdiffOutput {
    pub command: &'static str,
    pub pairs: Vec<FilePair>,
}

impl TextOutput for MdiffOutput {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        for pair in &self.pairs {
            writeln!(out, "{}", pair.to_line())?;
        }
        Ok(())
    }
}

pub fn run(args: MdiffArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<MdiffOutput> {
    let pairs = compare::compare_files_pairwise(&args.files)?;
    let exit_code = if pairs.iter().all(|pair| pair.identical) {
        0
    } else {
        1
    };

    Ok((
        MdiffOutput {
            command: "mdiff",
            pairs,
        },
        exit_code,
    ))
}
