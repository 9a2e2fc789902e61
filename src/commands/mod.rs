use clap::Args;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

use crate::output::{self, TextOutput};

pub type CmdResult<T> = textkit::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    /// Wrap output in the JSON response envelope.
    pub json: bool,
}

/// Input files shared by the line-oriented commands.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Input files, read in order; none or `-` reads stdin
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,
}

impl InputArgs {
    pub fn read_lines(&self) -> textkit::Result<Vec<String>> {
        if self.files.is_empty() && crate::tty::is_stdin_tty() {
            crate::tty::status("Reading stdin (Ctrl-D to finish)");
        }
        textkit::io::read_lines(&self.files)
    }
}

/// Expand arguments into input lines: files and `-` are read, anything else
/// is a literal line. No arguments reads stdin.
pub fn collect_inputs(inputs: &[String]) -> textkit::Result<Vec<String>> {
    if inputs.is_empty() {
        return textkit::io::read_lines(&[]);
    }

    let mut lines = Vec::new();
    for input in inputs {
        if input == textkit::io::STDIN_PATH || Path::new(input).is_file() {
            lines.extend(textkit::io::read_lines(std::slice::from_ref(input))?);
        } else {
            lines.push(input.clone());
        }
    }
    Ok(lines)
}

/// Field separator shared by the column-oriented commands.
#[derive(Args, Debug, Default)]
pub struct SeparatorArgs {
    /// Field separator (escapes like `\t` are understood); defaults to textkit.json
    #[arg(long, short = 'd', value_name = "SEP")]
    pub separator: Option<String>,
}

impl SeparatorArgs {
    pub fn resolve(&self) -> textkit::Result<String> {
        let separator = match &self.separator {
            Some(raw) => textkit::parser::unescape_separator(raw),
            None => textkit::defaults::load_defaults().fields.separator,
        };
        if separator.is_empty() {
            return Err(textkit::Error::validation_invalid_argument(
                "separator",
                "Field separator cannot be empty",
                None,
                None,
            ));
        }
        Ok(separator)
    }
}

/// Plain list of output lines, the common result shape.
#[derive(Debug, Serialize)]
pub struct LinesOutput {
    pub command: &'static str,
    pub lines: Vec<String>,
}

impl LinesOutput {
    pub fn new(command: &'static str, lines: Vec<String>) -> Self {
        Self { command, lines }
    }
}

impl TextOutput for LinesOutput {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        output::write_lines(out, &self.lines)
    }
}

pub mod case;
pub mod compare;
pub mod config;
pub mod cyr2lat;
pub mod fields;
pub mod filter;
pub mod freq;
pub mod generate;
pub mod len;
pub mod mdiff;
pub mod reverse;
pub mod rotate;
pub mod sum;
pub mod tokenize;
pub mod unicode;

/// Print a command result in the selected mode and return its exit code.
fn emit<T: Serialize + TextOutput>(result: CmdResult<T>, global: &GlobalArgs) -> i32 {
    if !global.json {
        return output::print_text_result(result);
    }

    let (json_result, exit_code) = output::map_cmd_result_to_json(result);
    match output::print_json_result(json_result) {
        Ok(()) => exit_code,
        Err(_) => 1,
    }
}

/// Dispatch a command to its handler and print the result.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        emit($module::run($args, $global), $global)
    };
}

pub(crate) fn run(command: crate::Commands, global: &GlobalArgs) -> i32 {
    match command {
        crate::Commands::Generate(args) => dispatch!(args, global, generate),
        crate::Commands::Case(args) => dispatch!(args, global, case),
        crate::Commands::Reverse(args) => dispatch!(args, global, reverse),
        crate::Commands::Tokenize(args) => dispatch!(args, global, tokenize),
        crate::Commands::Cyr2lat(args) => dispatch!(args, global, cyr2lat),
        crate::Commands::Fields(args) => dispatch!(args, global, fields),
        crate::Commands::Rotate(args) => dispatch!(args, global, rotate),
        crate::Commands::Filter(args) => dispatch!(args, global, filter),
        crate::Commands::Sum(args) => dispatch!(args, global, sum),
        crate::Commands::Freq(args) => dispatch!(args, global, freq),
        crate::Commands::Compare(args) => dispatch!(args, global, compare),
        crate::Commands::Mdiff(args) => dispatch!(args, global, mdiff),
        crate::Commands::Unicode(args) => dispatch!(args, global, unicode),
        crate::Commands::Len(args) => dispatch!(args, global, len),
        crate::Commands::Config(args) => dispatch!(args, global, config),

        // Special case: List prints help directly
        crate::Commands::List => {
            let err = textkit::Error::validation_invalid_argument(
                "output_mode",
                "List command uses raw output mode",
                None,
                None,
            );
            emit::<LinesOutput>(Err(err), global)
        }
    }
}
