use clap::Args;
use serde::Serialize;
use std::io::{self, Write};

use textkit::defaults;
use textkit::tokenizer::{RegexpTokenizer, Token};

use super::{CmdResult, InputArgs};
use crate::output::TextOutput;

#[derive(Args)]
pub struct TokenizeArgs {
    /// Delimiter regex (default from textkit.json)
    #[arg(long, short = 'p', value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Print delimiter runs as tokens too
    #[arg(long)]
    pub keep_delimiters: bool,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenizeOutput {
    pub command: &'static str,
    pub pattern: String,
    /// Tokens per input line.
    pub lines: Vec<Vec<Token>>,
    #[serde(skip)]
    keep_delimiters: bool,
}

impl TextOutput for TokenizeOutput {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        for token in self.lines.iter().flatten() {
            if token.is_delimiter && !self.keep_delimiters {
                continue;
            }
            writeln!(out, "{}", token.text)?;
        }
        Ok(())
    }
}

pub fn run(args: TokenizeArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<TokenizeOutput> {
    let pattern = args
        .pattern
        .unwrap_or_else(|| defaults::load_defaults().tokenizer.delimiter_pattern);
    let tokenizer = RegexpTokenizer::new(&pattern)?;

    let lines = args
        .input
        .read_lines()?
        .iter()
        .map(|line| tokenizer.owned_tokens(line))
        .collect();

    Ok((
        TokenizeOutput {
            command: "tokenize",
            pattern,
            lines,
            keep_delimiters: args.keep_delimiters,
        },
        0,
    ))
}
