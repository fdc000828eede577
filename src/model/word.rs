use serde::{Deserialize, Serialize};

/// A single token of a sentence, as produced by a tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    text: String,
    /// Whether a separator follows this word in its surface form
    #[serde(default)]
    space_after: bool,
}

impl Word {
    pub fn new(text: impl Into<String>, space_after: bool) -> Self {
        Word {
            text: text.into(),
            space_after,
        }
    }

    /// A word followed by a space
    pub fn spaced(text: impl Into<String>) -> Self {
        Word::new(text, true)
    }

    /// A word glued to whatever follows it
    pub fn joined(text: impl Into<String>) -> Self {
        Word::new(text, false)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn space_after(&self) -> bool {
        self.space_after
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
