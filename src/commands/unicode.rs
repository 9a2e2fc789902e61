use clap::{Args, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

use textkit::unicode::{self, CharInfo};

use super::{collect_inputs, CmdResult};
use crate::output::{self, TextOutput};

#[derive(Args)]
pub struct UnicodeArgs {
    #[command(subcommand)]
    command: UnicodeCommand,
}

#[derive(Subcommand)]
enum UnicodeCommand {
    /// One row per character: character, code, name, script
    Info {
        /// Files to inspect; arguments that are not files are taken as text
        #[arg(value_name = "FILE_OR_TEXT")]
        inputs: Vec<String>,

        /// Decode space-separated `\uXXXX` and `U+XXXX` chunks first
        #[arg(long, short = 'u')]
        from_codes: bool,
    },
    /// Print each line as `\uXXXX` codes
    Codes {
        /// Files to convert; arguments that are not files are taken as text
        #[arg(value_name = "FILE_OR_TEXT")]
        inputs: Vec<String>,
    },
    /// Report for each line whether it contains a character
    Find {
        /// Character, or its code as `\uXXXX`, `uXXXX` or `U+XXXX`
        #[arg(value_name = "CHAR")]
        needle: String,

        /// Files to search; arguments that are not files are taken as text
        #[arg(value_name = "FILE_OR_TEXT")]
        inputs: Vec<String>,
    },
}

#[derive(Debug, Serialize)]
pub struct UnicodeOutput {
    pub command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<Vec<CharInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<String>>,
}

impl TextOutput for UnicodeOutput {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        if let Some(characters) = &self.characters {
            output::write_lines(out, characters.iter().map(CharInfo::to_line))?;
        }
        if let Some(lines) = &self.lines {
            output::write_lines(out, lines)?;
        }
        Ok(())
    }
}

pub fn run(args: UnicodeArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<UnicodeOutput> {
    match args.command {
        UnicodeCommand::Info { inputs, from_codes } => info(&inputs, from_codes),
        UnicodeCommand::Codes { inputs } => codes(&inputs),
        UnicodeCommand::Find { needle, inputs } => find(&needle, &inputs),
    }
}

fn info(inputs: &[String], from_codes: bool) -> CmdResult<UnicodeOutput> {
    let mut characters = Vec::new();
    for text in collect_texts(inputs)? {
        let text = if from_codes {
            unicode::decode_codes(&text)?
        } else {
            text
        };
        characters.extend(unicode::describe(&text));
    }

    Ok((
        UnicodeOutput {
            command: "unicode.info",
            characters: Some(characters),
            lines: None,
        },
        0,
    ))
}

fn codes(inputs: &[String]) -> CmdResult<UnicodeOutput> {
    let lines = collect_inputs(inputs)?
        .iter()
        .map(|line| unicode::to_codes(line))
        .collect();

    Ok((
        UnicodeOutput {
            command: "unicode.codes",
            characters: None,
            lines: Some(lines),
        },
        0,
    ))
}

fn find(needle: &str, inputs: &[String]) -> CmdResult<UnicodeOutput> {
    let needle = unicode::resolve_needle(needle)?;
    let lines = collect_inputs(inputs)?
        .into_iter()
        .map(|line| {
            let found = line.contains(&needle);
            format!("{}\t{}", line, found)
        })
        .collect();

    Ok((
        UnicodeOutput {
            command: "unicode.find",
            characters: None,
            lines: Some(lines),
        },
        0,
    ))
}

/// Whole texts to inspect: file contents with their line breaks, or the
/// literal arguments. No arguments reads stdin.
fn collect_texts(inputs: &[String]) -> textkit::Result<Vec<String>> {
    if inputs.is_empty() {
        return Ok(vec![textkit::io::read_input(textkit::io::STDIN_PATH)?]);
    }

    inputs
        .iter()
        .map(|input| {
            if input == textkit::io::STDIN_PATH || Path::new(input).is_file() {
                textkit::io::read_input(input)
            } else {
                Ok(input.clone())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn text(output: &UnicodeOutput) -> String {
        let mut buf = Vec::new();
        output.write_text(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn file_contents_keep_their_newlines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("word.txt");
        fs::write(&path, "å\n").unwrap();

        let (output, code) = info(&[path.display().to_string()], false).unwrap();
        assert_eq!(code, 0);
        assert_eq!(
            text(&output),
            "å\t\\u00E5\tLATIN SMALL LETTER A WITH RING ABOVE\tLatin\n\
             \t\\u000A\tNEWLINE\tCommon\n"
        );
    }

    #[test]
    fn info_decodes_codes_on_request() {
        let (output, _) = info(&["U+0416".to_string()], true).unwrap();
        let characters = output.characters.unwrap();
        assert_eq!(characters.len(), 1);
        assert_eq!(characters[0].name, "CYRILLIC CAPITAL LETTER ZHE");
    }

    #[test]
    fn codes_per_line() {
        let (output, _) = codes(&["ab".to_string()]).unwrap();
        assert_eq!(text(&output), "\\u0061 \\u0062\n");
    }

    #[test]
    fn find_marks_each_line() {
        let (output, _) = find(
            "\\u00E5",
            &["blåbär".to_string(), "lingon".to_string()],
        )
        .unwrap();
        assert_eq!(text(&output), "blåbär\ttrue\nlingon\tfalse\n");
    }
}
