mod response;

pub use response::{map_cmd_result_to_json, print_json_result, print_text_result};

use std::io::{self, Write};

/// Plain-text rendering of a command's output, used when `--json` is off.
pub trait TextOutput {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Write each item on its own line.
pub fn write_lines<I, S>(out: &mut dyn Write, lines: I) -> io::Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
    }
    Ok(())
}
