//! Tag scope resolution
//!
//! Pairs the tags of a sentence by stack discipline over their declaration
//! order. Tag names are never compared: a closing tag closes whatever opened
//! most recently. Anything left over becomes an unmatched point.

use crate::model::{Tag, TagKind};

/// How a tag (or pair of tags) relates to the words around it.
/// Indices refer to the sentence's tag list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// An opening tag matched with a later closing tag
    Pair { open: usize, close: usize },
    /// A tag that terminates itself
    SelfClosed { tag: usize },
    /// An opening tag never closed, or a closing tag with nothing to close
    Unmatched { tag: usize },
}

/// A scope with the half-open range of source words it covers.
///
/// For a pair, `start` and `end` are the anchors of its opening and closing
/// tags as declared. Malformed markup may close before it opens, in which
/// case `end < start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopedTag {
    pub kind: ScopeKind,
    pub start: usize,
    pub end: usize,
}

impl ScopedTag {
    /// Declaration index of the first tag in this scope
    pub fn first_declared(&self) -> usize {
        match self.kind {
            ScopeKind::Pair { open, .. } => open,
            ScopeKind::SelfClosed { tag } | ScopeKind::Unmatched { tag } => tag,
        }
    }

    /// True when the scope covers no words
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// True for a pair whose closing tag sits before its opening tag
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }
}

/// Partition `tags` into pairs, self-closed tags and unmatched singletons.
///
/// The result is ordered by the declaration index of each scope's first tag.
pub fn resolve_scopes(tags: &[Tag]) -> Vec<ScopedTag> {
    let mut scopes = Vec::with_capacity(tags.len());
    let mut pending: Vec<usize> = Vec::new();

    for (index, tag) in tags.iter().enumerate() {
        match tag.kind() {
            TagKind::Open => pending.push(index),
            TagKind::Close => match pending.pop() {
                Some(open) => scopes.push(ScopedTag {
                    kind: ScopeKind::Pair { open, close: index },
                    start: tags[open].anchor(),
                    end: tag.anchor(),
                }),
                None => scopes.push(point(ScopeKind::Unmatched { tag: index }, tag)),
            },
            TagKind::SelfClosed => scopes.push(point(ScopeKind::SelfClosed { tag: index }, tag)),
        }
    }

    for index in pending {
        scopes.push(point(ScopeKind::Unmatched { tag: index }, &tags[index]));
    }

    scopes.sort_by_key(ScopedTag::first_declared);

    tracing::trace!(tags = tags.len(), scopes = scopes.len(), "resolved tag scopes");

    scopes
}

fn point(kind: ScopeKind, tag: &Tag) -> ScopedTag {
    ScopedTag {
        kind,
        start: tag.anchor(),
        end: tag.anchor(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(spec: &[(&str, usize)]) -> Vec<Tag> {
        spec.iter().map(|&(text, anchor)| Tag::new(text, anchor)).collect()
    }

    #[test]
    fn test_simple_pair() {
        let scopes = resolve_scopes(&tags(&[("<b>", 1), ("</b>", 2)]));
        assert_eq!(
            scopes,
            vec![ScopedTag {
                kind: ScopeKind::Pair { open: 0, close: 1 },
                start: 1,
                end: 2,
            }]
        );
    }

    #[test]
    fn test_nested_pairs_ordered_by_opening() {
        let scopes = resolve_scopes(&tags(&[("<a>", 1), ("<b>", 3), ("</b>", 4), ("</a>", 4)]));
        assert_eq!(scopes.len(), 2);
        assert_eq!(scopes[0].kind, ScopeKind::Pair { open: 0, close: 3 });
        assert_eq!((scopes[0].start, scopes[0].end), (1, 4));
        assert_eq!(scopes[1].kind, ScopeKind::Pair { open: 1, close: 2 });
        assert_eq!((scopes[1].start, scopes[1].end), (3, 4));
    }

    #[test]
    fn test_pairing_ignores_names() {
        let scopes = resolve_scopes(&tags(&[("<a>", 0), ("<b>", 1), ("</a>", 2), ("</b>", 3)]));
        assert_eq!(scopes[0].kind, ScopeKind::Pair { open: 0, close: 3 });
        assert_eq!(scopes[1].kind, ScopeKind::Pair { open: 1, close: 2 });
    }

    #[test]
    fn test_unmatched_open_and_close() {
        let scopes = resolve_scopes(&tags(&[("</x>", 1), ("<open>", 2)]));
        assert_eq!(
            scopes,
            vec![
                ScopedTag {
                    kind: ScopeKind::Unmatched { tag: 0 },
                    start: 1,
                    end: 1,
                },
                ScopedTag {
                    kind: ScopeKind::Unmatched { tag: 1 },
                    start: 2,
                    end: 2,
                },
            ]
        );
    }

    #[test]
    fn test_self_closed_and_declarations_are_points() {
        let scopes = resolve_scopes(&tags(&[("<br/>", 3), ("<!ENTITY key=\"value\">", 0)]));
        assert_eq!(scopes[0].kind, ScopeKind::SelfClosed { tag: 0 });
        assert!(scopes[0].is_point());
        assert_eq!(scopes[1].kind, ScopeKind::SelfClosed { tag: 1 });
        assert_eq!(scopes[1].start, 0);
    }

    #[test]
    fn test_comment_markers_pair_up() {
        let scopes = resolve_scopes(&tags(&[("<!--", 0), ("-->", 4)]));
        assert_eq!(scopes[0].kind, ScopeKind::Pair { open: 0, close: 1 });
        assert_eq!((scopes[0].start, scopes[0].end), (0, 4));
    }

    #[test]
    fn test_empty_pair_is_point() {
        let scopes = resolve_scopes(&tags(&[("<g>", 1), ("</g>", 1)]));
        assert!(scopes[0].is_point());
    }

    #[test]
    fn test_inverted_pair_keeps_declared_anchors() {
        let scopes = resolve_scopes(&tags(&[("<b>", 3), ("</b>", 1)]));
        assert_eq!(scopes[0].kind, ScopeKind::Pair { open: 0, close: 1 });
        assert_eq!((scopes[0].start, scopes[0].end), (3, 1));
        assert!(scopes[0].is_inverted());
        assert!(!scopes[0].is_point());
    }

    #[test]
    fn test_no_tags() {
        assert!(resolve_scopes(&[]).is_empty());
    }
}
