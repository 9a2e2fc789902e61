//! Cyrillic to Latin transliteration.
//!
//! The base table is the international road-sign romanization of Russian.
//! Swedish mode rewrites the result into the TT news agency conventions
//! (`zh` → `zj`, `ch` → `tj`, word-final `ky` → `kij`, ...).

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::case::{upcase, upcase_initial};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    #[default]
    International,
    Swedish,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub scheme: Scheme,
    /// Copy characters outside the table instead of failing.
    pub passthrough: bool,
}

const INTERNATIONAL: &[(&str, &str)] = &[
    ("а", "a"),
    ("б", "b"),
    ("в", "v"),
    ("г", "g"),
    ("д", "d"),
    ("е", "e"),
    ("ё", "e"),
    ("ж", "zh"),
    ("з", "z"),
    ("и", "i"),
    ("й", "y"),
    ("к", "k"),
    ("л", "l"),
    ("м", "m"),
    ("н", "n"),
    ("о", "o"),
    ("п", "p"),
    ("р", "r"),
    ("с", "s"),
    ("т", "t"),
    ("у", "u"),
    ("ф", "f"),
    ("х", "kh"),
    ("ц", "ts"),
    ("ч", "ch"),
    ("ш", "sh"),
    ("щ", "shch"),
    ("ъ", "’"),
    ("ы", "y"),
    ("ь", "’"),
    ("э", "e"),
    ("ю", "yu"),
    ("я", "ya"),
];

const SWEDISH: &[(&str, &str)] = &[
    ("zh", "zj"),
    ("kh", "ch"),
    ("ch", "tj"),
    ("sh", "sj"),
    ("yu", "ju"),
    ("ya", "ja"),
    ("ye", "je"),
];

const COMMON_CHARS: &[char] = &[' ', ',', '.', '?', '!', '–', '-', ':', ';'];

static INTERNATIONAL_ALL: LazyLock<Vec<(String, String)>> =
    LazyLock::new(|| with_case_variants(INTERNATIONAL));

static SWEDISH_ALL: LazyLock<Vec<(String, String)>> =
    LazyLock::new(|| with_case_variants(SWEDISH));

// Applied in order after the Swedish pair rewrite; case-insensitive, word-final.
static SWEDISH_ENDINGS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)ky\b", "kij"),
        (r"(?i)gy\b", "gij"),
        (r"(?i)ay\b", "aj"),
        (r"(?i)ey\b", "ej"),
        (r"(?i)y\b", "yj"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Each pair in lower-case, initial-capital and all-caps form, in that order.
fn with_case_variants(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .flat_map(|&(from, to)| {
            [
                (from.to_string(), to.to_string()),
                (upcase_initial(from, true), upcase_initial(to, true)),
                (upcase(from), upcase(to)),
            ]
        })
        .collect()
}

/// Transliterate one line of Cyrillic text.
pub fn transliterate(s: &str, options: Options) -> Result<String> {
    let international = replace_pairs(s, &INTERNATIONAL_ALL, !options.passthrough)?;

    match options.scheme {
        Scheme::International => Ok(international),
        Scheme::Swedish => {
            let mut swedish = replace_pairs(&international, &SWEDISH_ALL, false)?;
            for (pattern, replacement) in SWEDISH_ENDINGS.iter() {
                swedish = pattern.replace_all(&swedish, *replacement).into_owned();
            }
            Ok(swedish)
        }
    }
}

/// Scan left to right, replacing the first pair whose source is a prefix of
/// the remaining text. Common punctuation is copied as is.
fn replace_pairs(s: &str, pairs: &[(String, String)], require_all_mapped: bool) -> Result<String> {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    let mut position = 0;

    while let Some(head) = rest.chars().next() {
        if COMMON_CHARS.contains(&head) {
            out.push(head);
            rest = &rest[head.len_utf8()..];
            position += 1;
            continue;
        }

        if let Some((from, to)) = pairs.iter().find(|(from, _)| rest.starts_with(from.as_str())) {
            out.push_str(to);
            rest = &rest[from.len()..];
            position += from.chars().count();
            continue;
        }

        if require_all_mapped {
            return Err(Error::transliteration_unmapped(s, head, position));
        }
        out.push(head);
        rest = &rest[head.len_utf8()..];
        position += 1;
    }

    Ok(out)
}
