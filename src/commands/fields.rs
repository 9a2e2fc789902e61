use clap::Args;

use textkit::fields;

use super::{CmdResult, InputArgs, LinesOutput, SeparatorArgs};

#[derive(Args)]
pub struct FieldsArgs {
    /// Comma-separated 1-based field numbers, in output order (e.g. `3,1`)
    #[arg(value_name = "FIELDS")]
    pub fields: String,

    #[command(flatten)]
    pub separator: SeparatorArgs,

    #[command(flatten)]
    pub input: InputArgs,
}

pub fn run(args: FieldsArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<LinesOutput> {
    let indices = textkit::parser::parse_field_list(&args.fields)?;
    let separator = args.separator.resolve()?;

    let lines = args
        .input
        .read_lines()?
        .iter()
        .enumerate()
        .map(|(offset, line)| fields::select_fields(line, &indices, &separator, offset + 1))
        .collect::<textkit::Result<Vec<_>>>()?;

    Ok((LinesOutput::new("fields", lines), 0))
}
