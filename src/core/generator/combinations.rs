use std::iter::FusedIterator;

use super::{Combination, Template};

/// Lazy iterator over a template's combinations.
///
/// Keeps one digit per slot and advances them like an odometer, rightmost
/// digit first, so only the current combination is ever held in memory.
/// Yields exactly what [`Template::expand`] returns, in the same order.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    template: &'a Template,
    digits: Vec<usize>,
    remaining: Option<usize>,
    done: bool,
}

impl<'a> Combinations<'a> {
    pub(super) fn new(template: &'a Template) -> Self {
        Self {
            template,
            digits: vec![0; template.slot_count()],
            remaining: template.count(),
            done: false,
        }
    }

    pub(super) fn starting_at(template: &'a Template, index: usize) -> Self {
        match template.digits_of(index) {
            Some(digits) => Self {
                template,
                digits,
                remaining: template.count().map(|total| total - index),
                done: false,
            },
            None => Self {
                template,
                digits: vec![0; template.slot_count()],
                remaining: Some(0),
                done: true,
            },
        }
    }

    /// Move the odometer forward by `steps`, carrying into more significant slots.
    /// Returns false when the odometer runs past the last combination.
    fn advance_by_steps(&mut self, steps: usize) -> bool {
        let mut carry = steps;

        for (digit, slot) in self.digits.iter_mut().zip(self.template.slots()).rev() {
            if carry == 0 {
                return true;
            }
            let radix = slot.len();
            let sum = *digit + carry % radix;
            *digit = sum % radix;
            carry = carry / radix + sum / radix;
        }

        carry == 0
    }

    fn consume(&mut self, n: usize) {
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(n);
        }
    }
}

impl Iterator for Combinations<'_> {
    type Item = Combination;

    fn next(&mut self) -> Option<Combination> {
        if self.done {
            return None;
        }

        let current = self.template.pick(&self.digits);
        self.consume(1);
        if !self.advance_by_steps(1) {
            self.done = true;
        }
        Some(current)
    }

    fn nth(&mut self, n: usize) -> Option<Combination> {
        if self.done {
            return None;
        }

        if n > 0 {
            if !self.advance_by_steps(n) {
                self.done = true;
                self.remaining = Some(0);
                return None;
            }
            self.consume(n);
        }

        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        match self.remaining {
            Some(remaining) => (remaining, Some(remaining)),
            None => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Combinations<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> Template {
        Template::from_alternatives(vec![
            vec!["idag", "imorgon", "på fredag"],
            vec!["ska", "kan"],
            vec!["det"],
            vec!["inte", "kanske", ""],
            vec!["regna", "snöa"],
        ])
        .unwrap()
    }

    #[test]
    fn lazy_matches_eager_exactly() {
        let template = template();
        let lazy: Vec<Combination> = template.combinations().collect();
        assert_eq!(lazy, template.expand());
    }

    #[test]
    fn size_hint_counts_down() {
        let template = template();
        let mut iter = template.combinations();
        assert_eq!(iter.size_hint(), (36, Some(36)));
        iter.next();
        assert_eq!(iter.size_hint(), (35, Some(35)));
        assert_eq!(iter.by_ref().count(), 35);
        assert_eq!(iter.size_hint(), (0, Some(0)));
        assert!(iter.next().is_none());
    }

    #[test]
    fn nth_jumps_without_walking() {
        let template = template();
        let expanded = template.expand();

        let mut iter = template.combinations();
        assert_eq!(iter.nth(7).as_ref(), Some(&expanded[7]));
        assert_eq!(iter.next().as_ref(), Some(&expanded[8]));
        assert_eq!(iter.nth(26).as_ref(), Some(&expanded[35]));
        assert!(iter.next().is_none());
    }

    #[test]
    fn nth_past_the_end_exhausts() {
        let template = template();
        let mut iter = template.combinations();
        assert!(iter.nth(36).is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn starting_at_skips_prefix() {
        let template = template();
        let expanded = template.expand();

        let tail: Vec<Combination> = template.combinations_from(30).collect();
        assert_eq!(tail, expanded[30..].to_vec());
        assert_eq!(template.combinations_from(36).count(), 0);
    }

    #[test]
    fn single_slot_template() {
        let template = Template::from_alternatives(vec![vec!["a", "", "c"]]).unwrap();
        let rendered: Vec<String> = template.combinations().map(|c| c.render(" ")).collect();
        assert_eq!(rendered, vec!["a", "", "c"]);
    }

    #[test]
    fn take_on_huge_template_stays_lazy() {
        let slot: Vec<String> = (0..1000).map(|i| i.to_string()).collect();
        let template = Template::from_alternatives(vec![slot; 10]).unwrap();
        assert_eq!(template.count(), None);

        let mut iter = template.combinations();
        assert_eq!(iter.size_hint(), (usize::MAX, None));
        let first: Vec<String> = iter.by_ref().take(2).map(|c| c.render("-")).collect();
        assert_eq!(first, vec!["0-0-0-0-0-0-0-0-0-0", "0-0-0-0-0-0-0-0-0-1"]);
    }
}
