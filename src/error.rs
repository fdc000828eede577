//! Error types for tag projection

use thiserror::Error;

/// Contract violations detected while building or projecting sentences.
///
/// Malformed markup (unmatched tags, empty wraps, unaligned words) is never
/// reported here: those cases always project to a renderable result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// A tag anchor points past the end of its sentence
    #[error("tag '{text}' anchored at {anchor} but the sentence has {word_count} words")]
    AnchorOutOfRange {
        text: String,
        anchor: usize,
        word_count: usize,
    },

    /// An alignment pair references a word that does not exist
    #[error(
        "alignment pair {source_index}-{target_index} is outside {source_len}x{target_len} words"
    )]
    AlignmentOutOfRange {
        source_index: usize,
        target_index: usize,
        source_len: usize,
        target_len: usize,
    },

    /// Alignment text could not be parsed
    #[error("invalid alignment '{0}': expected pairs like '0-0 1-2'")]
    InvalidAlignment(String),

    /// The translation already carries projected tags
    #[error("translation has already been projected")]
    AlreadyProjected,
}

/// Result type for projection operations
pub type ProjectionResult<T> = Result<T, ProjectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_error_message() {
        let error = ProjectionError::AnchorOutOfRange {
            text: "<b>".to_string(),
            anchor: 7,
            word_count: 3,
        };
        assert_eq!(
            error.to_string(),
            "tag '<b>' anchored at 7 but the sentence has 3 words"
        );
    }

    #[test]
    fn test_alignment_error_message() {
        let error = ProjectionError::AlignmentOutOfRange {
            source_index: 4,
            target_index: 0,
            source_len: 2,
            target_len: 2,
        };
        assert_eq!(
            error.to_string(),
            "alignment pair 4-0 is outside 2x2 words"
        );
    }
}
