//! Token model shared by the tokenizers, the aligner and the projector
//!
//! Everything here is a plain value: words and tags never change after
//! creation, and a sentence validates its tag anchors when it is built. The
//! only mutation in the model is [`Translation`] receiving its projected tags.

pub mod alignment;
pub mod sentence;
pub mod tag;
pub mod translation;
pub mod word;

pub use alignment::Alignment;
pub use sentence::Sentence;
pub use tag::{Tag, TagKind};
pub use translation::Translation;
pub use word::Word;
