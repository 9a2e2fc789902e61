//! Letter case conversion for single lines of text.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToTitleCase,
    ToUpperCamelCase,
};
use serde::Serialize;

use crate::error::{Error, Result};

/// Characters that end a token for [`capitalize_tokens`]. The delimiter stays
/// attached to the end of the token it closes.
const TOKEN_DELIMITERS: &[char] = &[
    ' ', '\t', '(', ')', '{', '}', '"', '”', '<', '>', '\'', '-', '/', '&', ';', '.', '!', '?',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStyle {
    Upper,
    Lower,
    /// First character upper, rest lower.
    Initial,
    /// First character upper, rest untouched.
    InitialKeep,
    /// Every token gets an upper-case initial.
    Capitalize,
    Snake,
    Kebab,
    Camel,
    Pascal,
    ShoutySnake,
    Title,
}

pub fn upcase(s: &str) -> String {
    s.to_uppercase()
}

pub fn downcase(s: &str) -> String {
    s.to_lowercase()
}

/// Upper-case the first character; lower-case the remainder when `downcase_rest`.
pub fn upcase_initial(s: &str, downcase_rest: bool) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let head: String = first.to_uppercase().collect();
            let tail = chars.as_str();
            if downcase_rest {
                head + &tail.to_lowercase()
            } else {
                head + tail
            }
        }
    }
}

/// Split after each delimiter character. Concatenating the tokens gives back `s`.
pub fn simple_tokenize(s: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (offset, ch) in s.char_indices() {
        if TOKEN_DELIMITERS.contains(&ch) {
            let end = offset + ch.len_utf8();
            tokens.push(&s[start..end]);
            start = end;
        }
    }

    if start < s.len() {
        tokens.push(&s[start..]);
    }

    tokens
}

/// Capitalize each token of `s` (`jean-luc o'neil` becomes `Jean-Luc O'Neil`).
///
/// Fails when the result differs from the input by more than letter case,
/// which happens for characters whose upper-case form is longer (e.g. `ß`).
pub fn capitalize_tokens(s: &str) -> Result<String> {
    let result: String = simple_tokenize(s)
        .into_iter()
        .map(|token| upcase_initial(token, true))
        .collect();

    if !equal_fold(s, &result) {
        return Err(Error::case_round_trip_failed(s, result));
    }

    Ok(result)
}

/// Reverse the characters of `s`.
pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

pub fn convert(s: &str, style: CaseStyle) -> Result<String> {
    let converted = match style {
        CaseStyle::Upper => upcase(s),
        CaseStyle::Lower => downcase(s),
        CaseStyle::Initial => upcase_initial(s, true),
        CaseStyle::InitialKeep => upcase_initial(s, false),
        CaseStyle::Capitalize => return capitalize_tokens(s),
        CaseStyle::Snake => s.to_snake_case(),
        CaseStyle::Kebab => s.to_kebab_case(),
        CaseStyle::Camel => s.to_lower_camel_case(),
        CaseStyle::Pascal => s.to_upper_camel_case(),
        CaseStyle::ShoutySnake => s.to_shouty_snake_case(),
        CaseStyle::Title => s.to_title_case(),
    };
    Ok(converted)
}

fn equal_fold(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count() && a.to_lowercase() == b.to_lowercase()
}
