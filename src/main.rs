use clap::{CommandFactory, Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{
    case, compare, config, cyr2lat, fields, filter, freq, generate, len, mdiff, reverse, rotate,
    sum, tokenize, unicode,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "textkit")]
#[command(version = VERSION)]
#[command(about = "Line-oriented text tools built around a template expander")]
struct Cli {
    /// Print results as a JSON envelope instead of plain lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a template into every combination of its slots
    #[command(visible_alias = "gen")]
    Generate(generate::GenerateArgs),
    /// Change letter case of each line
    Case(case::CaseArgs),
    /// Reverse the characters of each line
    Reverse(reverse::ReverseArgs),
    /// Split lines into tokens on a delimiter regex
    Tokenize(tokenize::TokenizeArgs),
    /// Transliterate Cyrillic text to Latin script
    Cyr2lat(cyr2lat::Cyr2latArgs),
    /// Select and reorder fields of each line
    Fields(fields::FieldsArgs),
    /// Swap rows and columns
    Rotate(rotate::RotateArgs),
    /// Print lines whose column matches one of the given values
    Filter(filter::FilterArgs),
    /// Sum one number per line
    Sum(sum::SumArgs),
    /// Count identical lines
    Freq(freq::FreqArgs),
    /// Compare two files line by line or as sets of lines
    Compare(compare::CompareArgs),
    /// Report which of several files are byte-identical
    Mdiff(mdiff::MdiffArgs),
    /// Show code point, name and script of characters
    Unicode(unicode::UnicodeArgs),
    /// Print the character count of each non-empty line
    Len(len::LenArgs),
    /// Manage textkit.json configuration
    Config(config::ConfigArgs),
    /// List available commands (alias for --help)
    List,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    if matches!(cli.command, Commands::List) {
        let mut cmd = Cli::command();
        if cmd.print_help().is_err() {
            return std::process::ExitCode::FAILURE;
        }
        println!();
        return std::process::ExitCode::SUCCESS;
    }

    let global = GlobalArgs { json: cli.json };
    let exit_code = commands::run(cli.command, &global);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
