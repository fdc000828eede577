//! Placement of projected tags in the target sentence
//!
//! Each scope is mapped to target anchors, then tags that land on the same
//! anchor are ordered so that source nesting survives: regions ending here
//! close before regions starting here open, inner closes before outer,
//! outer opens before inner. Point tags slot in between according to which
//! pairs enclosed them in the source.

use super::scope::{ScopeKind, ScopedTag};
use super::span::{AnchorStyle, SpanMapper};
use crate::model::Tag;
use std::cmp::Reverse;

/// Role of a positioned tag at its target anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Opens a pair that closes at a later target anchor
    Opening { close: usize, close_anchor: usize },
    /// Closes a pair that opened at an earlier target anchor
    Closing { open: usize, open_anchor: usize },
    /// Unmatched, self-closed, or either half of a collapsed pair
    Point,
}

/// A source tag mapped to a target anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedTag {
    /// Declaration index in the source tag list
    pub index: usize,
    pub anchor: usize,
    pub placement: Placement,
}

impl PositionedTag {
    fn point(index: usize, anchor: usize) -> Self {
        PositionedTag {
            index,
            anchor,
            placement: Placement::Point,
        }
    }

    /// Whether the pair this tag belongs to enclosed `declared` in the source
    fn encloses(&self, declared: usize) -> bool {
        match self.placement {
            Placement::Opening { close, .. } => self.index < declared && declared < close,
            Placement::Closing { open, .. } => open < declared && declared < self.index,
            Placement::Point => false,
        }
    }
}

/// Map every scope to target anchors
pub fn position_tags(
    scopes: &[ScopedTag],
    tags: &[Tag],
    mapper: &SpanMapper,
) -> Vec<PositionedTag> {
    let mut positioned = Vec::with_capacity(tags.len());

    for scope in scopes {
        match scope.kind {
            ScopeKind::Pair { open, close } if scope.is_inverted() => {
                // closes before it opens: each half keeps its own position
                let start = mapper.map_anchor(scope.start, AnchorStyle::Opening);
                let end = mapper.map_anchor(scope.end, AnchorStyle::Closing);
                tracing::trace!(open, close, start, end, "inverted pair placed as points");
                positioned.push(PositionedTag::point(open, start));
                positioned.push(PositionedTag::point(close, end));
            }
            ScopeKind::Pair { open, close } => {
                let (start, end) = map_pair(scope, mapper);
                if start == end {
                    tracing::trace!(open, close, anchor = start, "pair collapsed to a point");
                    positioned.push(PositionedTag::point(open, start));
                    positioned.push(PositionedTag::point(close, start));
                } else {
                    positioned.push(PositionedTag {
                        index: open,
                        anchor: start,
                        placement: Placement::Opening {
                            close,
                            close_anchor: end,
                        },
                    });
                    positioned.push(PositionedTag {
                        index: close,
                        anchor: end,
                        placement: Placement::Closing {
                            open,
                            open_anchor: start,
                        },
                    });
                }
            }
            ScopeKind::SelfClosed { tag } => {
                let anchor = mapper.map_anchor(scope.start, AnchorStyle::Opening);
                positioned.push(PositionedTag::point(tag, anchor));
            }
            ScopeKind::Unmatched { tag } => {
                let style = if tags[tag].is_closing() {
                    AnchorStyle::Closing
                } else {
                    AnchorStyle::Opening
                };
                let anchor = mapper.map_anchor(scope.start, style);
                positioned.push(PositionedTag::point(tag, anchor));
            }
        }
    }

    positioned
}

/// Target `(open, close)` anchors of a well-ordered pair, never inverted
fn map_pair(scope: &ScopedTag, mapper: &SpanMapper) -> (usize, usize) {
    if scope.is_point() {
        let anchor = mapper.map_anchor(scope.start, AnchorStyle::Opening);
        return (anchor, anchor);
    }

    if let Some(hull) = mapper.map_span(scope.start, scope.end) {
        return hull;
    }

    let start = mapper.map_anchor(scope.start, AnchorStyle::Opening);
    let end = mapper.map_anchor(scope.end, AnchorStyle::Closing);
    (start, end.max(start))
}

/// Order positioned tags by anchor, resolving ties to keep nesting intact,
/// and produce the relocated tags in emission order.
pub fn arrange(mut positioned: Vec<PositionedTag>, tags: &[Tag]) -> Vec<Tag> {
    positioned.sort_by_key(|p| (p.anchor, p.index));

    let mut arranged = Vec::with_capacity(positioned.len());
    for group in positioned.chunk_by(|a, b| a.anchor == b.anchor) {
        for p in order_group(group) {
            arranged.push(tags[p.index].relocated(p.anchor));
        }
    }

    arranged
}

/// Emission order for tags sharing one anchor. `group` is in declaration order.
fn order_group(group: &[PositionedTag]) -> Vec<PositionedTag> {
    let mut closing: Vec<PositionedTag> = Vec::new();
    let mut opening: Vec<PositionedTag> = Vec::new();
    let mut points: Vec<PositionedTag> = Vec::new();

    for &p in group {
        match p.placement {
            Placement::Closing { .. } => closing.push(p),
            Placement::Opening { .. } => opening.push(p),
            Placement::Point => points.push(p),
        }
    }

    // innermost first: the pair that opened last closes first
    closing.sort_by_key(|p| match p.placement {
        Placement::Closing { open, open_anchor } => Reverse((open_anchor, open)),
        _ => Reverse((0, 0)),
    });
    // outermost first: the pair that closes last opens first
    opening.sort_by_key(|p| match p.placement {
        Placement::Opening { close_anchor, .. } => (Reverse(close_anchor), p.index),
        _ => (Reverse(0), p.index),
    });

    let frame: Vec<PositionedTag> = closing.iter().chain(opening.iter()).copied().collect();
    let slots: Vec<usize> = points
        .iter()
        .map(|p| point_slot(p.index, &closing, &opening))
        .collect();

    let mut ordered = Vec::with_capacity(group.len());
    for slot in 0..=frame.len() {
        ordered.extend(
            points
                .iter()
                .zip(&slots)
                .filter(|&(_, &s)| s == slot)
                .map(|(&p, _)| p),
        );
        if let Some(&p) = frame.get(slot) {
            ordered.push(p);
        }
    }

    ordered
}

/// Position of a point tag within `closing ++ opening`.
///
/// The point goes after every closing tag whose pair did not enclose it in the
/// source. If some later closing tag did enclose it, it stays in front of that
/// one; otherwise it goes after every opening tag whose pair encloses it.
fn point_slot(declared: usize, closing: &[PositionedTag], opening: &[PositionedTag]) -> usize {
    let after_closing = closing
        .iter()
        .rposition(|c| !c.encloses(declared))
        .map_or(0, |i| i + 1);

    if after_closing < closing.len() {
        return after_closing;
    }

    let after_opening = opening
        .iter()
        .rposition(|o| o.encloses(declared))
        .map_or(0, |i| i + 1);

    closing.len() + after_opening
}
