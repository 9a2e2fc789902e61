use clap::Args;

use super::{CmdResult, InputArgs, LinesOutput};

#[derive(Args)]
pub struct ReverseArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub fn run(args: ReverseArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<LinesOutput> {
    let lines = args
        .input
        .read_lines()?
        .iter()
        .map(|line| textkit::case::reverse(line))
        .collect();

    Ok((LinesOutput::new("reverse", lines), 0))
}
