//! Template expansion: the Cartesian product of an ordered list of slots.
//!
//! A [`Template`] is a sequence of [`Slot`]s, each holding interchangeable
//! alternatives. Expanding it yields every [`Combination`] picking one
//! alternative per slot, in slot order, with the last slot varying fastest:
//!
//! ```
//! use textkit::generator::Template;
//!
//! let template = Template::from_alternatives(vec![
//!     vec!["idag", "imorgon"],
//!     vec!["ska"],
//!     vec!["inte", ""],
//!     vec!["regna"],
//! ])
//! .unwrap();
//!
//! let rendered: Vec<String> = template.combinations().map(|c| c.render(" ")).collect();
//! assert_eq!(rendered[0], "idag ska inte regna");
//! assert_eq!(rendered[1], "idag ska regna");
//! assert_eq!(rendered.len(), 4);
//! ```

mod combinations;
mod parse;

pub use combinations::Combinations;
pub use parse::{parse_slots, parse_template, parse_template_json};

use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};

/// One position in a template: a non-empty list of interchangeable alternatives.
///
/// Alternatives may be empty strings (the slot contributes nothing when that
/// alternative is chosen) and may repeat; order is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Slot {
    alternatives: Vec<String>,
}

impl Slot {
    pub fn new<I, S>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            alternatives: alternatives.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.alternatives.iter()
    }
}

/// An ordered, validated sequence of slots.
///
/// Construction is the only fallible step: a template has at least one slot
/// and every slot has at least one alternative, so expansion never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Template {
    slots: Vec<Slot>,
}

impl Template {
    pub fn new(slots: Vec<Slot>) -> Result<Self> {
        if slots.is_empty() {
            return Err(Error::template_invalid("template has no slots"));
        }

        if let Some(index) = slots.iter().position(Slot::is_empty) {
            return Err(Error::template_empty_slot(index, slots.len()));
        }

        Ok(Self { slots })
    }

    /// Build a template from nested sequences of strings, one inner sequence per slot.
    pub fn from_alternatives<I, J, S>(slots: I) -> Result<Self>
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(slots.into_iter().map(Slot::new).collect())
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Alternative counts per slot, the radixes of the combination index.
    pub fn radixes(&self) -> Vec<usize> {
        self.slots.iter().map(Slot::len).collect()
    }

    /// Number of combinations, or `None` when the product overflows `usize`.
    pub fn count(&self) -> Option<usize> {
        self.slots
            .iter()
            .try_fold(1usize, |acc, slot| acc.checked_mul(slot.len()))
    }

    /// Materialize every combination.
    ///
    /// Memory grows with the product of slot sizes; prefer [`Template::combinations`]
    /// for large templates.
    pub fn expand(&self) -> Vec<Combination> {
        let mut acc: Vec<Vec<String>> = vec![Vec::new()];

        for slot in &self.slots {
            let mut next = Vec::with_capacity(acc.len().saturating_mul(slot.len()));
            for partial in &acc {
                for alternative in slot.iter() {
                    let mut extended = Vec::with_capacity(partial.len() + 1);
                    extended.extend_from_slice(partial);
                    extended.push(alternative.clone());
                    next.push(extended);
                }
            }
            acc = next;
        }

        acc.into_iter().map(Combination).collect()
    }

    /// Lazily iterate combinations in expansion order, one at a time.
    pub fn combinations(&self) -> Combinations<'_> {
        Combinations::new(self)
    }

    /// Lazily iterate combinations starting at `index` (zero-based).
    pub fn combinations_from(&self, index: usize) -> Combinations<'_> {
        Combinations::starting_at(self, index)
    }

    /// The combination at `index` in expansion order, decoded as a
    /// mixed-radix number whose most significant digit is the first slot.
    pub fn combination_at(&self, index: usize) -> Option<Combination> {
        let digits = self.digits_of(index)?;
        Some(self.pick(&digits))
    }

    pub(crate) fn digits_of(&self, index: usize) -> Option<Vec<usize>> {
        let mut digits = vec![0; self.slots.len()];
        let mut rest = index;

        for (digit, slot) in digits.iter_mut().zip(&self.slots).rev() {
            *digit = rest % slot.len();
            rest /= slot.len();
        }

        if rest == 0 {
            Some(digits)
        } else {
            None
        }
    }

    pub(crate) fn pick(&self, digits: &[usize]) -> Combination {
        Combination(
            digits
                .iter()
                .zip(&self.slots)
                .map(|(&digit, slot)| slot.alternatives[digit].clone())
                .collect(),
        )
    }
}

/// One resolved choice per slot, in slot order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Combination(Vec<String>);

impl Combination {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    /// Join non-empty entries with `separator`.
    pub fn render(&self, separator: &str) -> String {
        render(&self.0, separator)
    }
}

impl From<Vec<String>> for Combination {
    fn from(entries: Vec<String>) -> Self {
        Self(entries)
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(" "))
    }
}

/// Drop empty entries, join the rest with `separator`, trim surrounding whitespace.
///
/// Empty alternatives are how optional slots are expressed, so they must not
/// leave doubled or dangling separators behind.
pub fn render<S: AsRef<str>>(entries: &[S], separator: &str) -> String {
    let kept: Vec<&str> = entries
        .iter()
        .map(AsRef::as_ref)
        .filter(|entry| !entry.is_empty())
        .collect();

    kept.join(separator).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather_template() -> Template {
        Template::from_alternatives(vec![
            vec!["idag", "imorgon"],
            vec!["ska", "kan", "kommer"],
            vec!["det"],
            vec!["inte", ""],
            vec!["regna", "snöa"],
        ])
        .unwrap()
    }

    fn words(combination: &Combination) -> Vec<&str> {
        combination.as_slice().iter().map(String::as_str).collect()
    }

    #[test]
    fn expand_count_matches_product_of_slot_sizes() {
        let template = Template::from_alternatives(vec![
            vec!["idag", "imorgon", "på fredag", "nästa vecka"],
            vec!["ska", "kan", "kommer"],
            vec!["det"],
            vec!["inte", "kanske", ""],
            vec![
                "regna",
                "snöa",
                "brinna",
                "hagla",
                "dugga",
                "blåsa",
                "storma",
                "blåsa upp till orkan",
                "vara uppehåll",
                "vara fint väder",
                "vara hög brandrisk i alla län",
            ],
        ])
        .unwrap();

        let expanded = template.expand();
        assert_eq!(expanded.len(), 396);
        assert_eq!(template.count(), Some(396));
        assert!(expanded.iter().all(|c| c.len() == 5));
    }

    #[test]
    fn expand_orders_last_slot_fastest() {
        let expanded = weather_template().expand();
        let rendered: Vec<Vec<&str>> = expanded.iter().map(words).collect();

        let expected: Vec<Vec<&str>> = [
            "idag ska det inte regna",
            "idag ska det inte snöa",
            "idag ska det  regna",
            "idag ska det  snöa",
            "idag kan det inte regna",
            "idag kan det inte snöa",
            "idag kan det  regna",
            "idag kan det  snöa",
            "idag kommer det inte regna",
            "idag kommer det inte snöa",
            "idag kommer det  regna",
            "idag kommer det  snöa",
            "imorgon ska det inte regna",
            "imorgon ska det inte snöa",
            "imorgon ska det  regna",
            "imorgon ska det  snöa",
            "imorgon kan det inte regna",
            "imorgon kan det inte snöa",
            "imorgon kan det  regna",
            "imorgon kan det  snöa",
            "imorgon kommer det inte regna",
            "imorgon kommer det inte snöa",
            "imorgon kommer det  regna",
            "imorgon kommer det  snöa",
        ]
        .iter()
        .map(|line| line.split(' ').collect())
        .collect();

        assert_eq!(rendered, expected);
    }

    #[test]
    fn first_and_last_pick_first_and_last_alternatives() {
        let expanded = weather_template().expand();
        assert_eq!(
            words(&expanded[0]),
            vec!["idag", "ska", "det", "inte", "regna"]
        );
        assert_eq!(
            words(expanded.last().unwrap()),
            vec!["imorgon", "kommer", "det", "", "snöa"]
        );
    }

    #[test]
    fn every_alternative_appears_in_its_position() {
        let template = weather_template();
        let expanded = template.expand();

        for (position, slot) in template.slots().iter().enumerate() {
            for alternative in slot.iter() {
                assert!(
                    expanded
                        .iter()
                        .any(|c| &c.as_slice()[position] == alternative),
                    "missing {:?} at slot {}",
                    alternative,
                    position
                );
            }
        }
    }

    #[test]
    fn duplicate_alternatives_are_not_deduplicated() {
        let template = Template::from_alternatives(vec![vec!["a", "a"], vec!["b"]]).unwrap();
        let expanded = template.expand();
        assert_eq!(expanded.len(), 2);
        assert_eq!(expanded[0], expanded[1]);
    }

    #[test]
    fn zero_slots_is_invalid_template() {
        let err = Template::new(Vec::new()).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::TemplateInvalid);
    }

    #[test]
    fn empty_slot_is_rejected_with_its_index() {
        let err = Template::from_alternatives(vec![vec!["a"], vec![], vec!["c"]]).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::TemplateEmptySlot);
        assert_eq!(err.details["slot"], 1);
    }

    #[test]
    fn render_elides_empty_entries() {
        let combination = Combination::from(
            ["idag", "ska", "det", "", "regna"]
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>(),
        );
        assert_eq!(combination.render(" "), "idag ska det regna");
        assert_eq!(combination.to_string(), "idag ska det regna");
    }

    #[test]
    fn render_has_no_leading_or_trailing_separator() {
        assert_eq!(render(&["", "a", "", "b", ""], " "), "a b");
        assert_eq!(render(&["", "a", "", "b", ""], ", "), "a, b");
        assert_eq!(render(&["", ""], " "), "");
        assert_eq!(render::<&str>(&[], " "), "");
    }

    #[test]
    fn render_is_repeatable() {
        let combination = weather_template().expand().remove(6);
        let first = combination.render("_");
        assert_eq!(first, "idag_kan_det_regna");
        assert_eq!(combination.render("_"), first);
    }

    #[test]
    fn weather_scenario_end_to_end() {
        let expanded = weather_template().expand();
        assert_eq!(expanded.len(), 24);
        assert_eq!(expanded[0].render(" "), "idag ska det inte regna");
        assert_eq!(expanded[2].render(" "), "idag ska det regna");
    }

    #[test]
    fn combination_at_decodes_mixed_radix_index() {
        let template = weather_template();
        let expanded = template.expand();

        for (index, expected) in expanded.iter().enumerate() {
            assert_eq!(template.combination_at(index).as_ref(), Some(expected));
        }
        assert_eq!(template.combination_at(expanded.len()), None);
    }

    #[test]
    fn count_reports_overflow() {
        let slot: Vec<String> = (0..1024).map(|i| i.to_string()).collect();
        let template = Template::from_alternatives(vec![slot; 8]).unwrap();
        assert_eq!(template.count(), None);
        assert!(template.combination_at(usize::MAX).is_some());
    }
}
