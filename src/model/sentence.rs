use super::{Tag, Word};
use crate::error::{ProjectionError, ProjectionResult};
use crate::projection::render;
use serde::Serialize;

/// Ordered words plus the markup interleaved with them
///
/// `tags` keep their declaration order, which is not necessarily sorted by
/// anchor. Declaration order drives open/close pairing and breaks ties
/// between tags sharing an anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sentence {
    words: Vec<Word>,
    tags: Vec<Tag>,
}

impl Sentence {
    /// Build a sentence, rejecting tags anchored past the last word
    pub fn new(words: Vec<Word>, tags: Vec<Tag>) -> ProjectionResult<Self> {
        if let Some(tag) = tags.iter().find(|tag| tag.anchor() > words.len()) {
            return Err(ProjectionError::AnchorOutOfRange {
                text: tag.text().to_string(),
                anchor: tag.anchor(),
                word_count: words.len(),
            });
        }

        Ok(Sentence { words, tags })
    }

    /// A sentence without markup
    pub fn from_words(words: Vec<Word>) -> Self {
        Sentence {
            words,
            tags: Vec::new(),
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
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

    pub fn has_words(&self) -> bool {
        !self.words.is_empty()
    }

    /// Render the sentence; see [`render::render`] for the flag meanings
    pub fn to_string_with(&self, include_tags: bool, include_whitespace: bool) -> String {
        render::render(&self.words, &self.tags, include_tags, include_whitespace)
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_with(true, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_end_of_sentence_anchor() {
        let sentence = Sentence::new(
            vec![Word::joined("Test")],
            vec![Tag::new("<br/>", 1)],
        )
        .unwrap();
        assert_eq!(sentence.word_count(), 1);
        assert!(sentence.has_tags());
    }

    #[test]
    fn test_new_rejects_out_of_range_anchor() {
        let result = Sentence::new(vec![Word::joined("Test")], vec![Tag::new("<b>", 2)]);
        assert_eq!(
            result,
            Err(ProjectionError::AnchorOutOfRange {
                text: "<b>".to_string(),
                anchor: 2,
                word_count: 1,
            })
        );
    }

    #[test]
    fn test_tag_only_sentence() {
        let sentence =
            Sentence::new(vec![], vec![Tag::new("<a>", 0), Tag::new("</a>", 0)]).unwrap();
        assert!(!sentence.has_words());
        assert_eq!(sentence.to_string(), "<a></a>");
        assert_eq!(sentence.to_string_with(false, true), "");
    }

    #[test]
    fn test_display_orders_tags_by_anchor() {
        // declaration order differs from anchor order
        let sentence = Sentence::new(
            vec![Word::spaced("hello"), Word::joined("world")],
            vec![Tag::new("<br/>", 2), Tag::new("<i>", 0), Tag::new("</i>", 1)],
        )
        .unwrap();
        assert_eq!(sentence.to_string(), "<i>hello</i> world<br/>");
    }
}
