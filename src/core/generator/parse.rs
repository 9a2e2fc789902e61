use super::{Slot, Template};
use crate::error::{Error, Result};

/// Parse the line-oriented template grammar.
///
/// Each non-blank line that does not start with `#` is one slot. Alternatives
/// are separated by `separator` and trimmed; an empty alternative is kept
/// (`inte|` makes a slot optional). A backslash before the separator makes it
/// literal.
pub fn parse_template(content: &str, separator: &str) -> Result<Template> {
    check_separator(separator)?;

    let slots: Vec<Slot> = content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|line| Slot::new(split_alternatives(line, separator)))
        .collect();

    Template::new(slots)
}

/// Build a template from inline slot strings, one per slot.
///
/// Unlike [`parse_template`], nothing is skipped: an empty string is a slot
/// with a single empty alternative.
pub fn parse_slots<S: AsRef<str>>(slots: &[S], separator: &str) -> Result<Template> {
    check_separator(separator)?;

    Template::new(
        slots
            .iter()
            .map(|slot| Slot::new(split_alternatives(slot.as_ref(), separator)))
            .collect(),
    )
}

/// Parse a JSON template: an array of slots, each an array of strings.
pub fn parse_template_json(content: &str) -> Result<Template> {
    let slots: Vec<Vec<String>> = serde_json::from_str(content).map_err(|e| {
        Error::validation_invalid_json(e, Some("parse JSON template".to_string()))
    })?;

    Template::from_alternatives(slots)
}

fn check_separator(separator: &str) -> Result<()> {
    if separator.is_empty() {
        return Err(Error::validation_invalid_argument(
            "alternative_separator",
            "Alternative separator cannot be empty",
            None,
            None,
        ));
    }
    Ok(())
}

fn split_alternatives(line: &str, separator: &str) -> Vec<String> {
    let escaped = format!("\\{}", separator);
    let mut alternatives = Vec::new();
    let mut current = String::new();
    let mut rest = line;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(escaped.as_str()) {
            current.push_str(separator);
            rest = after;
        } else if let Some(after) = rest.strip_prefix(separator) {
            alternatives.push(current.trim().to_string());
            current.clear();
            rest = after;
        } else {
            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                current.push(ch);
            }
            rest = chars.as_str();
        }
    }

    alternatives.push(current.trim().to_string());
    alternatives
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alternatives(template: &Template) -> Vec<Vec<&str>> {
        template
            .slots()
            .iter()
            .map(|slot| slot.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn parses_one_slot_per_line() {
        let content = "idag | imorgon\nska|kan|kommer\ndet\ninte|\nregna|snöa\n";
        let template = parse_template(content, "|").unwrap();
        assert_eq!(
            alternatives(&template),
            vec![
                vec!["idag", "imorgon"],
                vec!["ska", "kan", "kommer"],
                vec!["det"],
                vec!["inte", ""],
                vec!["regna", "snöa"],
            ]
        );
        assert_eq!(template.count(), Some(24));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let content = "# weather\n\nidag|imorgon\r\n   \n# verbs\nska\n";
        let template = parse_template(content, "|").unwrap();
        assert_eq!(alternatives(&template), vec![vec!["idag", "imorgon"], vec!["ska"]]);
    }

    #[test]
    fn escaped_separator_is_literal() {
        let template = parse_template(r"a\|b|c", "|").unwrap();
        assert_eq!(alternatives(&template), vec![vec!["a|b", "c"]]);
    }

    #[test]
    fn multi_char_separator() {
        let template = parse_template("blåsa upp ;; storma", ";;").unwrap();
        assert_eq!(alternatives(&template), vec![vec!["blåsa upp", "storma"]]);
    }

    #[test]
    fn inline_slots_keep_comment_like_text() {
        let template = parse_slots(&["# one|two", "", "tre"], "|").unwrap();
        assert_eq!(
            alternatives(&template),
            vec![vec!["# one", "two"], vec![""], vec!["tre"]]
        );
        assert_eq!(template.count(), Some(2));
    }

    #[test]
    fn empty_content_is_invalid_template() {
        let err = parse_template("# nothing here\n\n", "|").unwrap_err();
        assert_eq!(err.code.as_str(), "template.invalid");
    }

    #[test]
    fn empty_separator_rejected() {
        assert!(parse_template("a|b", "").is_err());
    }

    #[test]
    fn parses_json_template() {
        let template = parse_template_json(r#"[["idag","imorgon"],["ska"],["inte",""]]"#).unwrap();
        assert_eq!(template.count(), Some(4));
        assert_eq!(template.slots()[2].alternatives(), &["inte", ""]);
    }

    #[test]
    fn json_empty_slot_reports_index() {
        let err = parse_template_json(r#"[["a"],[]]"#).unwrap_err();
        assert_eq!(err.code.as_str(), "template.empty_slot");
        assert_eq!(err.details["slot"], 1);
    }

    #[test]
    fn json_syntax_error_is_validation_error() {
        let err = parse_template_json("[[").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_json");
    }
}
