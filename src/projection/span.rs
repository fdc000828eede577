//! Mapping source spans and anchors into the target sentence
//!
//! Spans are projected by convex hull: the tightest target interval holding
//! every image of every source word in the span. Anchors whose neighbouring
//! word has no image search outward for the nearest aligned word, and only
//! fall back to the original anchor when nothing is aligned at all.

use crate::model::Alignment;

/// Which side of a region an anchor delimits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorStyle {
    /// Starts something: resolved against the word after the anchor
    Opening,
    /// Ends something: resolved against the word before the anchor
    Closing,
}

/// Target images of every source word, indexed for span and anchor lookups
#[derive(Debug, Clone)]
pub struct SpanMapper {
    /// `(min, max)` target index per source word, `None` when unaligned
    images: Vec<Option<(usize, usize)>>,
    target_len: usize,
}

impl SpanMapper {
    /// Index `alignment` for a source of `source_len` words and a target of
    /// `target_len` words. Pairs whose source word lies past `source_len`
    /// are ignored.
    pub fn new(alignment: Option<&Alignment>, source_len: usize, target_len: usize) -> Self {
        let images = (0..source_len)
            .map(|source| {
                let mut targets = alignment?.targets_of(source);
                let min = targets.next()?;
                Some((min, targets.last().unwrap_or(min)))
            })
            .collect();

        SpanMapper { images, target_len }
    }

    /// Whether any source word has a target image
    pub fn has_alignment(&self) -> bool {
        self.images.iter().any(Option::is_some)
    }

    /// Convex hull of the images of source words `[start, end)`,
    /// as a half-open target range. `None` if no word in the span is aligned,
    /// or if the span is inverted or runs past the source.
    pub fn map_span(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        self.images
            .get(start..end)?
            .iter()
            .flatten()
            .fold(None, |hull, &(min, max)| match hull {
                Some((lo, hi)) => Some((min.min(lo), hi.max(max + 1))),
                None => Some((min, max + 1)),
            })
    }

    /// Target anchor for a source anchor
    pub fn map_anchor(&self, anchor: usize, style: AnchorStyle) -> usize {
        let found = match style {
            AnchorStyle::Opening => self
                .first_image_from(anchor)
                .or_else(|| self.last_image_before(anchor)),
            AnchorStyle::Closing => self
                .last_image_before(anchor)
                .or_else(|| self.first_image_from(anchor)),
        };

        found.unwrap_or_else(|| {
            let fallback = anchor.min(self.target_len);
            tracing::debug!(anchor, fallback, "no aligned word, keeping source anchor");
            fallback
        })
    }

    /// Minimum image of the first aligned word at or after `anchor`
    fn first_image_from(&self, anchor: usize) -> Option<usize> {
        self.images
            .iter()
            .skip(anchor)
            .flatten()
            .next()
            .map(|&(min, _)| min)
    }

    /// Position just past the maximum image of the last aligned word before `anchor`
    fn last_image_before(&self, anchor: usize) -> Option<usize> {
        self.images[..anchor.min(self.images.len())]
            .iter()
            .rev()
            .flatten()
            .next()
            .map(|&(_, max)| max + 1)
    }
}
