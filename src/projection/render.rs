//! Serialization of words and tags into surface strings
//!
//! Spacing rules for the marked-up rendering, applied at every boundary
//! between two consecutive units:
//!
//! 1. a tag's explicit trailing space is written as is, and swallows any
//!    space still owed by the previous word;
//! 2. a right-attached tag receives no whitespace in front of it; the space
//!    owed by the previous word waits for the next boundary;
//! 3. otherwise the space owed by the last word (its `space_after`) is
//!    written once.
//!
//! Nothing is written before the first unit or after the last one.

use crate::model::{Tag, Word};

#[derive(Debug, Clone, Copy)]
enum Unit<'a> {
    Word(&'a Word),
    Tag(&'a Tag),
}

/// A fragment of the marked-up rendering
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece<'a> {
    Text(&'a str),
    Markup(&'a str),
    Space(&'a str),
}

/// Interleave words and tags: tags anchored at `i` come before word `i`, in
/// their list order; tags anchored at the end come last.
fn layout<'a>(words: &'a [Word], tags: &'a [Tag]) -> Vec<Unit<'a>> {
    let mut ordered: Vec<&Tag> = tags.iter().collect();
    ordered.sort_by_key(|tag| tag.anchor());

    let mut units = Vec::with_capacity(words.len() + tags.len());
    let mut pending = ordered.into_iter().peekable();

    for (index, word) in words.iter().enumerate() {
        while let Some(tag) = pending.next_if(|tag| tag.anchor() <= index) {
            units.push(Unit::Tag(tag));
        }
        units.push(Unit::Word(word));
    }
    units.extend(pending.map(Unit::Tag));

    units
}

fn marked_up_pieces<'a>(units: &[Unit<'a>]) -> Vec<Piece<'a>> {
    let mut pieces = Vec::with_capacity(units.len() * 2);
    let mut owed_space = false;
    let mut trailing: Option<&'a str> = None;

    for (position, &unit) in units.iter().enumerate() {
        if position > 0 {
            if let Some(space) = trailing.take() {
                if !space.is_empty() {
                    pieces.push(Piece::Space(space));
                }
                owed_space = false;
            } else if owed_space && !matches!(unit, Unit::Tag(tag) if tag.right_attach()) {
                pieces.push(Piece::Space(" "));
                owed_space = false;
            }
        }

        match unit {
            Unit::Word(word) => {
                pieces.push(Piece::Text(word.text()));
                owed_space = word.space_after();
            }
            Unit::Tag(tag) => {
                pieces.push(Piece::Markup(tag.text()));
                trailing = tag.trailing_space();
            }
        }
    }

    pieces
}

fn join(pieces: &[Piece<'_>]) -> String {
    pieces
        .iter()
        .map(|piece| match piece {
            Piece::Text(text) | Piece::Markup(text) | Piece::Space(text) => *text,
        })
        .collect()
}

/// Words and tags with their original spacing
pub fn render_marked_up(words: &[Word], tags: &[Tag]) -> String {
    join(&marked_up_pieces(&layout(words, tags)))
}

/// Words only. Two words are separated by a space when the first one has
/// `space_after` or when markup sat between them.
pub fn render_plain(words: &[Word], tags: &[Tag]) -> String {
    let mut out = String::new();
    let mut previous: Option<&Word> = None;
    let mut markup_between = false;

    for unit in layout(words, tags) {
        match unit {
            Unit::Tag(_) => markup_between = true,
            Unit::Word(word) => {
                if previous.is_some_and(|p| p.space_after() || markup_between) {
                    out.push(' ');
                }
                out.push_str(word.text());
                previous = Some(word);
                markup_between = false;
            }
        }
    }

    out
}

/// Tokens joined by single spaces, ignoring the original spacing
pub fn render_tokens(words: &[Word], tags: &[Tag], include_tags: bool) -> String {
    let tokens: Vec<&str> = layout(words, tags)
        .into_iter()
        .filter_map(|unit| match unit {
            Unit::Word(word) => Some(word.text()),
            Unit::Tag(tag) if include_tags => Some(tag.text()),
            Unit::Tag(_) => None,
        })
        .collect();
    tokens.join(" ")
}

/// The plain rendering recovered from the marked-up one: markup is removed,
/// any gap between two words becomes one space and edge gaps disappear.
pub fn strip_markup(words: &[Word], tags: &[Tag]) -> String {
    let pieces = marked_up_pieces(&layout(words, tags));

    let mut out = String::new();
    let mut seen_text = false;
    let mut gap = false;
    for piece in pieces {
        match piece {
            Piece::Text(text) => {
                if gap && seen_text {
                    out.push(' ');
                }
                out.push_str(text);
                seen_text = true;
                gap = false;
            }
            Piece::Markup(_) | Piece::Space(_) => gap = true,
        }
    }

    out
}

/// Render `words` with `tags`.
///
/// | tags  | whitespace | result                                   |
/// |-------|------------|------------------------------------------|
/// | true  | true       | marked-up string with original spacing   |
/// | false | true       | plain string                             |
/// | true  | false      | words and tags joined by single spaces   |
/// | false | false      | words joined by single spaces            |
pub fn render(words: &[Word], tags: &[Tag], include_tags: bool, include_whitespace: bool) -> String {
    match (include_tags, include_whitespace) {
        (true, true) => render_marked_up(words, tags),
        (false, true) => {
            let plain = render_plain(words, tags);
            debug_assert_eq!(
                plain,
                strip_markup(words, tags),
                "plain rendering disagrees with the marked-up rendering"
            );
            plain
        }
        (include_tags, false) => render_tokens(words, tags, include_tags),
    }
}
