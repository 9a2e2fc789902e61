use clap::Args;

use super::{CmdResult, InputArgs, LinesOutput};

#[derive(Args)]
pub struct LenArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub fn run(args: LenArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<LinesOutput> {
    let lines = count_lines(&args.input.read_lines()?);
    Ok((LinesOutput::new("len", lines), 0))
}

/// `count<TAB>line` for each non-empty line, counting characters.
fn count_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| format!("{}\t{}", textkit::unicode::char_count(line), line))
        .collect()
}
