//! Tag Projection
//!
//! Moves the inline markup of a source sentence onto its translation, using
//! the word alignment between the two.
//!
//! # Overview
//!
//! Projection runs in four stages, each in its own module:
//!
//! 1. **Scope resolution** ([`scope`]) - pairs opening and closing tags by
//!    stack discipline and leaves the rest as points
//! 2. **Span mapping** ([`span`]) - projects each source span to the convex
//!    hull of its target images, searching outward for unaligned anchors
//! 3. **Placement** ([`placement`]) - orders tags that land on the same
//!    target anchor so nesting survives
//! 4. **Rendering** ([`render`]) - writes the target words and tags back out
//!    as a marked-up or plain string
//!
//! # Example
//!
//! ```ignore
//! use tag_projection::{Alignment, Sentence, Tag, TagProjector, Translation, Word};
//!
//! let source = Sentence::new(
//!     vec![Word::spaced("hello"), Word::joined("world"), Word::joined("!")],
//!     vec![Tag::new("<b>", 1), Tag::new("</b>", 2)],
//! )?;
//! let mut translation = Translation::new(
//!     vec![Word::spaced("ciao"), Word::joined("mondo"), Word::joined("!")],
//!     source,
//!     Some(Alignment::identity(3)),
//! );
//!
//! TagProjector::new().project(&mut translation)?;
//! assert_eq!(translation.to_string(), "ciao <b>mondo</b>!");
//! ```
pub mod placement;
pub mod render;
pub mod scope;
pub mod span;


use crate::error::{ProjectionError, ProjectionResult};
use crate::model::Translation;
use placement::{arrange, position_tags};
use scope::resolve_scopes;
use span::SpanMapper;

/// Stateless entry point for projecting and rendering translations
#[derive(Debug, Clone, Copy, Default)]
pub struct TagProjector;

impl TagProjector {
    pub fn new() -> Self {
        TagProjector
    }

    /// See [`project`]
    pub fn project(&self, translation: &mut Translation) -> ProjectionResult<()> {
        project(translation)
    }

    /// See [`render`]
    pub fn render(
        &self,
        translation: &Translation,
        include_tags: bool,
        include_whitespace: bool,
    ) -> String {
        render(translation, include_tags, include_whitespace)
    }
}

/// Project the source tags of `translation` onto its words.
///
/// The source sentence and the alignment are only read. On success the
/// translation holds one relocated copy of every source tag, sorted by
/// anchor in emission order. On error the translation is left untouched.
///
/// # Errors
///
/// * [`ProjectionError::AlignmentOutOfRange`] - an alignment pair points
///   past the end of the source or the translation
/// * [`ProjectionError::AlreadyProjected`] - the translation was projected before
pub fn project(translation: &mut Translation) -> ProjectionResult<()> {
    if translation.is_projected() {
        return Err(ProjectionError::AlreadyProjected);
    }

    let source = translation.source();
    let source_len = source.word_count();
    let target_len = translation.word_count();

    let _span = tracing::debug_span!(
        "project",
        source_words = source_len,
        target_words = target_len,
        tags = source.tags().len()
    )
    .entered();

    if let Some(alignment) = translation.alignment() {
        alignment.check_bounds(source_len, target_len)?;
        tracing::debug!(
            pairs = alignment.len(),
            monotone = alignment.is_monotone(),
            "alignment checked"
        );
    }

    let mapper = SpanMapper::new(translation.alignment(), source_len, target_len);
    if source.has_tags() && !mapper.has_alignment() {
        tracing::debug!("no alignment information, tags keep their source anchors");
    }

    let scopes = resolve_scopes(source.tags());
    let positioned = position_tags(&scopes, source.tags(), &mapper);
    let tags = arrange(positioned, source.tags());

    tracing::debug!(scopes = scopes.len(), tags = tags.len(), "tags projected");

    translation.attach_tags(tags);
    Ok(())
}

/// Render a translation.
///
/// * `include_tags = true, include_whitespace = true` - marked-up string
/// * `include_tags = false, include_whitespace = true` - plain string
/// * `include_whitespace = false` - tokens joined by single spaces, with or
///   without markup
pub fn render(translation: &Translation, include_tags: bool, include_whitespace: bool) -> String {
    translation.to_string_with(include_tags, include_whitespace)
}
