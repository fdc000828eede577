//! Job file format
//!
//! A job file holds one job object or an array of them. Each job carries the
//! tagged source sentence, the untagged target words and, optionally, the
//! alignment between them.

use crate::error::{CliError, CliResult};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tag_projection::{
    Alignment, ProjectionResult, Sentence, Tag, TagKind, Translation, Word,
};

/// Markup as written in a job file
#[derive(Debug, Clone, Deserialize)]
pub struct TagSpec {
    pub text: String,
    pub anchor: usize,
    /// Defaults to attached for closing tags
    #[serde(default)]
    pub right_attach: Option<bool>,
    #[serde(default)]
    pub trailing_space: Option<String>,
    /// Overrides the kind guessed from `text`
    #[serde(default)]
    pub kind: Option<TagKind>,
}

impl TagSpec {
    pub fn to_tag(&self) -> Tag {
        let mut tag = Tag::new(self.text.as_str(), self.anchor);
        if let Some(kind) = self.kind {
            tag = tag.with_kind(kind);
        }
        if let Some(right_attach) = self.right_attach {
            tag = tag.with_right_attach(right_attach);
        }
        match &self.trailing_space {
            Some(space) => tag.with_trailing_space(space.as_str()),
            None => tag,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentenceSpec {
    pub words: Vec<Word>,
    #[serde(default)]
    pub tags: Vec<TagSpec>,
}

/// Either `"0-0 1-2"` or `[[0, 0], [1, 2]]`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AlignmentSpec {
    Text(String),
    Pairs(Vec<(usize, usize)>),
}

impl AlignmentSpec {
    pub fn to_alignment(&self) -> ProjectionResult<Alignment> {
        match self {
            AlignmentSpec::Text(text) => text.parse(),
            AlignmentSpec::Pairs(pairs) => Ok(Alignment::from_pairs(pairs.iter().copied())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobSpec {
    /// Echoed back in JSON output
    #[serde(default)]
    pub id: Option<String>,
    pub source: SentenceSpec,
    pub target: Vec<Word>,
    #[serde(default)]
    pub alignment: Option<AlignmentSpec>,
}

impl JobSpec {
    /// Build the untagged translation this job describes
    pub fn to_translation(&self) -> ProjectionResult<Translation> {
        let tags = self.source.tags.iter().map(TagSpec::to_tag).collect();
        let source = Sentence::new(self.source.words.clone(), tags)?;
        let alignment = self
            .alignment
            .as_ref()
            .map(AlignmentSpec::to_alignment)
            .transpose()?;

        Ok(Translation::new(self.target.clone(), source, alignment))
    }
}

/// Parse job file contents
pub fn parse_jobs(text: &str) -> CliResult<Vec<JobSpec>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(CliError::from))
            .collect(),
        item @ Value::Object(_) => Ok(vec![serde_json::from_value(item)?]),
        Value::Null => Err(CliError::UnexpectedShape("null")),
        Value::Bool(_) => Err(CliError::UnexpectedShape("a boolean")),
        Value::Number(_) => Err(CliError::UnexpectedShape("a number")),
        Value::String(_) => Err(CliError::UnexpectedShape("a string")),
    }
}

pub fn load_jobs(path: &Path) -> CliResult<Vec<JobSpec>> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let jobs = parse_jobs(&text)?;
    tracing::debug!(path = %path.display(), jobs = jobs.len(), "job file loaded");
    Ok(jobs)
}
