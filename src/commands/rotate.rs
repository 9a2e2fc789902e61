use clap::Args;

use super::{CmdResult, InputArgs, LinesOutput, SeparatorArgs};

#[derive(Args)]
pub struct RotateArgs {
    #[command(flatten)]
    pub separator: SeparatorArgs,

    #[command(flatten)]
    pub input: InputArgs,
}

pub fn run(args: RotateArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<LinesOutput> {
    let separator = args.separator.resolve()?;
    let lines = args.input.read_lines()?;

    Ok((
        LinesOutput::new("rotate", textkit::fields::rotate(&lines, &separator)),
        0,
    ))
}
