//! Inline markup projection for machine translation
//!
//! A source sentence carries its markup as a list of [`Tag`]s anchored at
//! word boundaries. After translation, [`project`] moves every tag onto the
//! target words through the word [`Alignment`], keeping well-formed regions
//! well formed, and [`render`] writes the result back out.
//!
//! ```ignore
//! use tag_projection::{Alignment, Sentence, Tag, Translation, Word, project};
//!
//! let source = Sentence::new(
//!     vec![Word::spaced("hello"), Word::joined("world"), Word::joined("!")],
//!     vec![Tag::new("<b>", 1), Tag::new("</b>", 2)],
//! )?;
//! let alignment: Alignment = "0-1 1-0 2-2".parse()?;
//! let mut translation = Translation::new(
//!     vec![Word::spaced("mondo"), Word::joined("ciao"), Word::joined("!")],
//!     source,
//!     Some(alignment),
//! );
//!
//! project(&mut translation)?;
//! assert_eq!(translation.to_string(), "<b>mondo</b> ciao!");
//! ```

pub mod error;
pub mod model;
pub mod projection;

pub use error::{ProjectionError, ProjectionResult};
pub use model::{Alignment, Sentence, Tag, TagKind, Translation, Word};
pub use projection::{TagProjector, project, render};
