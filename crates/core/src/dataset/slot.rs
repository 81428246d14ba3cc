//! Slot filling: substitute entity values for template placeholders

use crate::dataset::{tokenize, EntityGroup, IntentGroup, Token, Word};
use crate::error::{Error, Result};
use indexmap::IndexMap;

/// Candidate words for one template position
pub type Slot = Vec<Word>;

/// A template with every position replaced by its candidate words
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilledTemplate {
    slots: Vec<Slot>,
}

impl FilledTemplate {
    /// Create from slots
    pub fn new(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    /// Slots in template order
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of positions
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the template had no tokens
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of utterances the template expands to, `None` on overflow
    pub fn expansion_size(&self) -> Option<usize> {
        if self.slots.is_empty() {
            return Some(0);
        }
        self.slots
            .iter()
            .try_fold(1usize, |acc, slot| acc.checked_mul(slot.len()))
    }
}

/// Fills intent templates from a set of entity groups
#[derive(Clone, Copy, Debug)]
pub struct SlotFiller<'a> {
    entities: &'a IndexMap<String, EntityGroup>,
}

impl<'a> SlotFiller<'a> {
    /// Create a slot filler over the loaded entity groups
    pub fn new(entities: &'a IndexMap<String, EntityGroup>) -> Self {
        Self { entities }
    }

    /// Fill a single template belonging to `intent`
    pub fn fill(&self, intent: &str, template: &str) -> Result<FilledTemplate> {
        let slots = tokenize(template)
            .into_iter()
            .map(|token| match token {
                Token::Literal(word) => Ok(vec![Word::literal(word)]),
                Token::Placeholder(name) => self
                    .entities
                    .get(&name)
                    .map(|group| group.values.clone())
                    .ok_or_else(|| Error::UnknownEntityReference {
                        intent: intent.to_string(),
                        entity: name,
                    }),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FilledTemplate::new(slots))
    }

    /// Fill every template of an intent, in template order
    pub fn fill_intent(&self, intent: &IntentGroup) -> Result<Vec<FilledTemplate>> {
        intent
            .templates
            .iter()
            .map(|template| self.fill(&intent.name, template))
            .collect()
    }
}
