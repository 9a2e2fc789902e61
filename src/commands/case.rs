use clap::{Args, ValueEnum};

use textkit::case::{self, CaseStyle};

use super::{CmdResult, InputArgs, LinesOutput};

#[derive(Args)]
pub struct CaseArgs {
    /// Target letter case
    #[arg(value_enum)]
    pub style: Style,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Style {
    /// UPPER CASE
    Upper,
    /// lower case
    Lower,
    /// First character upper, rest lower
    Initial,
    /// First character upper, rest untouched
    InitialKeep,
    /// Upper-case initial on every word (Jean-Luc O'Neil)
    Capitalize,
    /// snake_case
    Snake,
    /// kebab-case
    Kebab,
    /// camelCase
    Camel,
    /// PascalCase
    Pascal,
    /// SHOUTY_SNAKE_CASE
    ShoutySnake,
    /// Title Case
    Title,
}

impl From<Style> for CaseStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Upper => CaseStyle::Upper,
            Style::Lower => CaseStyle::Lower,
            Style::Initial => CaseStyle::Initial,
            Style::InitialKeep => CaseStyle::InitialKeep,
            Style::Capitalize => CaseStyle::Capitalize,
            Style::Snake => CaseStyle::Snake,
            Style::Kebab => CaseStyle::Kebab,
            Style::Camel => CaseStyle::Camel,
            Style::Pascal => CaseStyle::Pascal,
            Style::ShoutySnake => CaseStyle::ShoutySnake,
            Style::Title => CaseStyle::Title,
        }
    }
}

pub fn run(args: CaseArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<LinesOutput> {
    let style = CaseStyle::from(args.style);
    let lines = args
        .input
        .read_lines()?
        .iter()
        .map(|line| case::convert(line, style))
        .collect::<textkit::Result<Vec<_>>>()?;

    Ok((LinesOutput::new("case", lines), 0))
}
