use clap::Args;

use textkit::transliterate::{self, Options, Scheme};

use super::{collect_inputs, CmdResult, LinesOutput};

#[derive(Args)]
pub struct Cyr2latArgs {
    /// Files to transliterate; arguments that are not files are taken as text
    #[arg(value_name = "FILE_OR_TEXT")]
    pub inputs: Vec<String>,

    /// Swedish (TT) transcription instead of the international road-sign table
    #[arg(long, short = 's')]
    pub swedish: bool,

    /// Print the input before the output, separated by a tab
    #[arg(long, short = 'e')]
    pub echo: bool,

    /// Copy characters outside the table instead of failing
    #[arg(long)]
    pub passthrough: bool,
}

pub fn run(args: Cyr2latArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<LinesOutput> {
    let options = Options {
        scheme: if args.swedish {
            Scheme::Swedish
        } else {
            Scheme::International
        },
        passthrough: args.passthrough,
    };

    let mut lines = Vec::new();
    for input in collect_inputs(&args.inputs)? {
        let output = transliterate::transliterate(&input, options)?;
        lines.push(if args.echo {
            format!("{}\t{}", input, output)
        } else {
            output
        });
    }

    Ok((LinesOutput::new("cyr2lat", lines), 0))
}
