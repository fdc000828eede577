//! Inline markup tokens
//!
//! A tag is opaque markup text sitting at a word boundary of its sentence.
//! The only structure the engine reads from the text is whether the tag
//! opens a region, closes one, or stands alone. That classification happens
//! once, when the tag is created.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Markup that carries its own terminator: complete comments, CDATA
/// sections, processing instructions and empty elements.
static SELF_CONTAINED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?:<!--.*-->|<!\[CDATA\[.*\]\]>|<\?.*\?>|<[^!?/][^>]*/>)$")
        .expect("self-contained markup pattern")
});

/// Declarations such as `<!DOCTYPE ...>` or `<!ENTITY ...>`
static DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^<[!?][^>]*>$").expect("declaration pattern"));

/// Structural role of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    /// Opens a region: `<b>`, a bare `<!--`, `<![CDATA[`
    Open,
    /// Closes the most recent open region: `</b>`, a bare `-->`, `]]>`
    Close,
    /// Stands alone: `<br/>`, `<!-- note -->`, `<!ENTITY ...>`
    SelfClosed,
}

impl TagKind {
    /// Classify raw markup text
    ///
    /// ```ignore
    /// assert_eq!(TagKind::classify("<b>"), TagKind::Open);
    /// assert_eq!(TagKind::classify("</b>"), TagKind::Close);
    /// assert_eq!(TagKind::classify("<br/>"), TagKind::SelfClosed);
    /// assert_eq!(TagKind::classify("<!--"), TagKind::Open);
    /// ```
    pub fn classify(text: &str) -> Self {
        let text = text.trim();

        if SELF_CONTAINED.is_match(text) {
            TagKind::SelfClosed
        } else if text.starts_with("<!--") || text.starts_with("<![CDATA[") {
            TagKind::Open
        } else if text.starts_with("</") || text.ends_with("-->") || text.ends_with("]]>") {
            TagKind::Close
        } else if DECLARATION.is_match(text) {
            TagKind::SelfClosed
        } else {
            TagKind::Open
        }
    }
}

/// A piece of markup anchored before `word[anchor]` of its sentence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    text: String,
    kind: TagKind,
    /// No whitespace is emitted on the way into this tag
    right_attach: bool,
    /// Literal whitespace forced right after the tag
    trailing_space: Option<String>,
    anchor: usize,
}

impl Tag {
    /// Create a tag, classifying its kind from the text.
    ///
    /// Closing tags start out attached to the text before them; everything
    /// else starts out detached.
    pub fn new(text: impl Into<String>, anchor: usize) -> Self {
        let text = text.into();
        let kind = TagKind::classify(&text);

        Tag {
            text,
            kind,
            right_attach: kind == TagKind::Close,
            trailing_space: None,
            anchor,
        }
    }

    /// Override the classified kind. The attachment default follows the
    /// new kind, so call [`Tag::with_right_attach`] afterwards to change it.
    pub fn with_kind(mut self, kind: TagKind) -> Self {
        self.kind = kind;
        self.right_attach = kind == TagKind::Close;
        self
    }

    pub fn with_right_attach(mut self, right_attach: bool) -> Self {
        self.right_attach = right_attach;
        self
    }

    pub fn with_trailing_space(mut self, space: impl Into<String>) -> Self {
        self.trailing_space = Some(space.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> TagKind {
        self.kind
    }

    pub fn is_opening(&self) -> bool {
        self.kind == TagKind::Open
    }

    pub fn is_closing(&self) -> bool {
        self.kind == TagKind::Close
    }

    pub fn right_attach(&self) -> bool {
        self.right_attach
    }

    pub fn trailing_space(&self) -> Option<&str> {
        self.trailing_space.as_deref()
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Copy of this tag placed at another anchor
    pub(crate) fn relocated(&self, anchor: usize) -> Tag {
        Tag {
            anchor,
            ..self.clone()
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_elements() {
        assert_eq!(TagKind::classify("<b>"), TagKind::Open);
        assert_eq!(TagKind::classify("<a href=\"x\">"), TagKind::Open);
        assert_eq!(TagKind::classify("</b>"), TagKind::Close);
        assert_eq!(TagKind::classify("<br/>"), TagKind::SelfClosed);
        assert_eq!(TagKind::classify("<img src=\"a.png\" />"), TagKind::SelfClosed);
    }

    #[test]
    fn test_classify_comments() {
        assert_eq!(TagKind::classify("<!--"), TagKind::Open);
        assert_eq!(TagKind::classify("-->"), TagKind::Close);
        assert_eq!(TagKind::classify("<!-- note -->"), TagKind::SelfClosed);
        assert_eq!(TagKind::classify("<!---->"), TagKind::SelfClosed);
    }

    #[test]
    fn test_classify_declarations() {
        assert_eq!(
            TagKind::classify("<!ENTITY key=\"value\">"),
            TagKind::SelfClosed
        );
        assert_eq!(TagKind::classify("<!DOCTYPE html>"), TagKind::SelfClosed);
        assert_eq!(
            TagKind::classify("<?xml version=\"1.0\"?>"),
            TagKind::SelfClosed
        );
    }

    #[test]
    fn test_classify_cdata() {
        assert_eq!(TagKind::classify("<![CDATA["), TagKind::Open);
        assert_eq!(TagKind::classify("]]>"), TagKind::Close);
        assert_eq!(TagKind::classify("<![CDATA[x < y]]>"), TagKind::SelfClosed);
    }

    #[test]
    fn test_default_attachment_follows_kind() {
        assert!(!Tag::new("<b>", 0).right_attach());
        assert!(Tag::new("</b>", 1).right_attach());
        assert!(!Tag::new("<br/>", 1).right_attach());
    }

    #[test]
    fn test_kind_override_resets_attachment() {
        let close = Tag::new("}}", 1).with_kind(TagKind::Close);
        assert!(close.is_closing());
        assert!(close.right_attach());

        let open = Tag::new("</b>", 1).with_kind(TagKind::Open);
        assert!(!open.right_attach());

        let detached = Tag::new("}}", 1)
            .with_kind(TagKind::Close)
            .with_right_attach(false);
        assert!(!detached.right_attach());
    }

    #[test]
    fn test_builders() {
        let tag = Tag::new("-->", 4)
            .with_right_attach(false)
            .with_trailing_space(" ")
            .with_kind(TagKind::SelfClosed);

        assert_eq!(tag.kind(), TagKind::SelfClosed);
        assert!(!tag.right_attach());
        assert_eq!(tag.trailing_space(), Some(" "));
        assert_eq!(tag.anchor(), 4);
    }

    #[test]
    fn test_relocated_keeps_everything_but_anchor() {
        let tag = Tag::new("</b>", 2).with_trailing_space(" ");
        let moved = tag.relocated(0);

        assert_eq!(moved.anchor(), 0);
        assert_eq!(moved.text(), "</b>");
        assert_eq!(moved.trailing_space(), Some(" "));
        assert!(moved.right_attach());
    }
}
