use super::{Alignment, Sentence, Tag, Word};
use crate::projection::render;
use serde::Serialize;

/// Target words linked to their source sentence by an alignment
///
/// A translation starts out without tags. Projection fills `tags` exactly
/// once, sorted by anchor, in the order they must be emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    words: Vec<Word>,
    #[serde(skip)]
    source: Sentence,
    alignment: Option<Alignment>,
    tags: Vec<Tag>,
    #[serde(skip)]
    projected: bool,
}

impl Translation {
    /// Create an untagged translation of `source`.
    ///
    /// `alignment` is `None` when the producer has no alignment information.
    pub fn new(words: Vec<Word>, source: Sentence, alignment: Option<Alignment>) -> Self {
        Translation {
            words,
            source,
            alignment,
            tags: Vec::new(),
            projected: false,
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn source(&self) -> &Sentence {
        &self.source
    }

    pub fn alignment(&self) -> Option<&Alignment> {
        self.alignment.as_ref()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }

    pub fn is_projected(&self) -> bool {
        self.projected
    }

    pub(crate) fn attach_tags(&mut self, tags: Vec<Tag>) {
        self.tags = tags;
        self.projected = true;
    }

    /// Render the translation; see [`render::render`] for the flag meanings
    pub fn to_string_with(&self, include_tags: bool, include_whitespace: bool) -> String {
        render::render(&self.words, &self.tags, include_tags, include_whitespace)
    }
}

impl std::fmt::Display for Translation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_with(true, true))
    }
}
