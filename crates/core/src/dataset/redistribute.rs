//! Split multi-word entity values into per-word labels

use crate::dataset::{EntityId, ExpandedUtterance, Word};

/// An utterance with exactly one label per word
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledUtterance {
    words: Vec<Word>,
}

impl LabeledUtterance {
    /// Create from words
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// Split each chosen value on whitespace; every piece inherits the
    /// value's label. Blank values contribute no words.
    pub fn from_expanded(utterance: &ExpandedUtterance<'_>) -> Self {
        let words = utterance
            .words()
            .iter()
            .filter(|word| !word.is_blank())
            .flat_map(|word| {
                word.text
                    .split_whitespace()
                    .map(move |piece| Word::new(piece, word.label))
            })
            .collect();
        Self { words }
    }

    /// Words in order
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Words joined by single spaces
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Labels aligned with [`LabeledUtterance::words`]
    pub fn labels(&self) -> Vec<EntityId> {
        self.words.iter().map(|w| w.label).collect()
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if every position was blank
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Redistribute labels across one intent's expanded utterances, keeping order
pub fn redistribute(expanded: &[ExpandedUtterance<'_>]) -> Vec<LabeledUtterance> {
    expanded.iter().map(LabeledUtterance::from_expanded).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{expand_intent, FilledTemplate};

    #[test]
    fn test_multi_word_value_splits() {
        let template = FilledTemplate::new(vec![
            vec![Word::literal("play")],
            vec![Word::new("let it be", 1)],
        ]);
        let expanded = expand_intent(std::slice::from_ref(&template));
        let labeled = redistribute(&expanded);

        assert_eq!(labeled.len(), 1);
        assert_eq!(labeled[0].text(), "play let it be");
        assert_eq!(labeled[0].labels(), vec![0, 1, 1, 1]);
    }

    #[test]
    fn test_blank_value_dropped() {
        let template = FilledTemplate::new(vec![
            vec![Word::literal("weather")],
            vec![Word::literal("in")],
            vec![Word::new("", 2)],
        ]);
        let expanded = expand_intent(std::slice::from_ref(&template));
        let labeled = redistribute(&expanded);

        assert_eq!(labeled[0].text(), "weather in");
        assert_eq!(labeled[0].labels(), vec![0, 0]);
    }

    #[test]
    fn test_all_blank_is_empty() {
        let template = FilledTemplate::new(vec![vec![Word::new("", 3)]]);
        let expanded = expand_intent(std::slice::from_ref(&template));
        let labeled = redistribute(&expanded);
        assert_eq!(labeled.len(), 1);
        assert!(labeled[0].is_empty());
        assert_eq!(labeled[0].text(), "");
    }
}
