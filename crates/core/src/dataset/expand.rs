//! Cartesian product expansion of filled templates

use crate::dataset::{FilledTemplate, Slot, Word};

/// One concrete choice of word per template position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpandedUtterance<'a> {
    words: Vec<&'a Word>,
}

impl<'a> ExpandedUtterance<'a> {
    /// Chosen words in template order
    pub fn words(&self) -> &[&'a Word] {
        &self.words
    }

    /// Number of template positions
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the utterance has no positions
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Iterator over every combination of a template's slots
///
/// Standard product order: the rightmost slot varies fastest.
#[derive(Clone, Debug)]
pub struct Permutations<'a> {
    slots: &'a [Slot],
    indices: Vec<usize>,
    done: bool,
}

impl<'a> Permutations<'a> {
    /// Start enumerating a filled template
    pub fn new(template: &'a FilledTemplate) -> Self {
        let slots = template.slots();
        Self {
            slots,
            indices: vec![0; slots.len()],
            // An empty template, or any empty slot, has no combinations
            done: slots.is_empty() || slots.iter().any(|slot| slot.is_empty()),
        }
    }

    fn advance(&mut self) {
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.slots[pos].len() {
                return;
            }
            self.indices[pos] = 0;
        }
        self.done = true;
    }
}

impl<'a> Iterator for Permutations<'a> {
    type Item = ExpandedUtterance<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let words = self
            .indices
            .iter()
            .zip(self.slots)
            .map(|(&idx, slot)| &slot[idx])
            .collect();

        self.advance();
        Some(ExpandedUtterance { words })
    }
}

/// Expand all templates of one intent into a flat list, template by template
pub fn expand_intent(templates: &[FilledTemplate]) -> Vec<ExpandedUtterance<'_>> {
    templates.iter().flat_map(Permutations::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(utterance: &ExpandedUtterance<'_>) -> Vec<String> {
        utterance.words().iter().map(|w| w.text.clone()).collect()
    }

    #[test]
    fn test_product_order() {
        let template = FilledTemplate::new(vec![
            vec![Word::new("a", 1), Word::new("b", 1)],
            vec![Word::literal("x")],
            vec![Word::new("1", 2), Word::new("2", 2), Word::new("3", 2)],
        ]);

        let all: Vec<Vec<String>> = Permutations::new(&template).map(|u| texts(&u)).collect();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], vec!["a", "x", "1"]);
        assert_eq!(all[1], vec!["a", "x", "2"]);
        assert_eq!(all[2], vec!["a", "x", "3"]);
        assert_eq!(all[3], vec!["b", "x", "1"]);
        assert_eq!(all[5], vec!["b", "x", "3"]);
    }

    #[test]
    fn test_literal_only_template() {
        let template = FilledTemplate::new(vec![vec![Word::literal("hello")], vec![Word::literal("there")]]);
        let all: Vec<_> = Permutations::new(&template).collect();
        assert_eq!(all.len(), 1);
        assert_eq!(texts(&all[0]), vec!["hello", "there"]);
    }

    #[test]
    fn test_empty_template_yields_nothing() {
        let template = FilledTemplate::new(Vec::new());
        assert_eq!(Permutations::new(&template).count(), 0);
    }

    #[test]
    fn test_empty_slot_yields_nothing() {
        let template = FilledTemplate::new(vec![vec![Word::literal("play")], Vec::new()]);
        assert_eq!(Permutations::new(&template).count(), 0);
    }

    #[test]
    fn test_expand_intent_concatenates() {
        let templates = vec![
            FilledTemplate::new(vec![vec![Word::new("a", 1), Word::new("b", 1)]]),
            FilledTemplate::new(Vec::new()),
            FilledTemplate::new(vec![vec![Word::literal("c")], vec![Word::literal("d")]]),
        ];
        let expanded = expand_intent(&templates);
        assert_eq!(expanded.len(), 3);
        assert_eq!(texts(&expanded[0]), vec!["a"]);
        assert_eq!(texts(&expanded[1]), vec!["b"]);
        assert_eq!(texts(&expanded[2]), vec!["c", "d"]);
    }
}
