//! Words and their entity labels

use serde::{Deserialize, Serialize};

/// Entity label attached to a word
pub type EntityId = u32;

/// Label reserved for words that came from literal template tokens
pub const LITERAL_LABEL: EntityId = 0;

/// A word (or, before redistribution, a whole entity value) with its label
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    /// Surface text
    pub text: String,

    /// Entity label, [`LITERAL_LABEL`] for literal words
    pub label: EntityId,
}

impl Word {
    /// Create a new labeled word
    pub fn new(text: impl Into<String>, label: EntityId) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    /// Create a literal (non-entity) word
    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(text, LITERAL_LABEL)
    }

    /// Whether this word carries the literal label
    pub fn is_literal(&self) -> bool {
        self.label == LITERAL_LABEL
    }

    /// Whether the text is empty (an intentionally blank entity value)
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}
