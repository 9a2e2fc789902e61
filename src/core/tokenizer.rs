//! Regex-delimited tokenization that keeps the delimiters.

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

/// Splits text at every match of a delimiter pattern.
///
/// Delimiter runs come back as tokens of their own, so joining the tokens
/// always reproduces the input.
#[derive(Debug, Clone)]
pub struct RegexpTokenizer {
    delimiter: Regex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub text: String,
    pub is_delimiter: bool,
}

impl RegexpTokenizer {
    pub fn new(pattern: &str) -> Result<Self> {
        let delimiter = Regex::new(pattern).map_err(|e| {
            Error::validation_invalid_argument(
                "pattern",
                format!("Invalid regex pattern: {}", e),
                Some(pattern.to_string()),
                None,
            )
        })?;
        Ok(Self { delimiter })
    }

    pub fn split<'a>(&self, s: &'a str) -> Vec<&'a str> {
        self.tokens(s).into_iter().map(|(text, _)| text).collect()
    }

    /// Tokens with a flag telling delimiter runs from words.
    pub fn tokens<'a>(&self, s: &'a str) -> Vec<(&'a str, bool)> {
        let mut tokens = Vec::new();
        let mut last = 0;

        for m in self.delimiter.find_iter(s) {
            if m.start() > last {
                tokens.push((&s[last..m.start()], false));
            }
            if !m.as_str().is_empty() {
                tokens.push((m.as_str(), true));
            }
            last = m.end();
        }

        if last < s.len() {
            tokens.push((&s[last..], false));
        }

        tokens
    }

    pub fn owned_tokens(&self, s: &str) -> Vec<Token> {
        self.tokens(s)
            .into_iter()
            .map(|(text, is_delimiter)| Token {
                text: text.to_string(),
                is_delimiter,
            })
            .collect()
    }
}
