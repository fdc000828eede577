use crate::error::{ProjectionError, ProjectionResult};
use serde::Serialize;
use std::str::FromStr;

/// A many-to-many relation between source and target word indices
///
/// Pairs are kept sorted and free of duplicates. Nothing requires the
/// relation to be a function in either direction: a source word may align
/// to zero, one or many target words and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Alignment {
    pairs: Vec<(usize, usize)>,
}

impl Alignment {
    /// An empty alignment
    pub fn new() -> Self {
        Alignment { pairs: Vec::new() }
    }

    /// Build an alignment from `(source, target)` pairs in any order
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut pairs: Vec<(usize, usize)> = pairs.into_iter().collect();
        pairs.sort_unstable();
        pairs.dedup();
        Alignment { pairs }
    }

    /// The diagonal alignment `{(i, i) : i < len}`
    pub fn identity(len: usize) -> Self {
        Alignment {
            pairs: (0..len).map(|i| (i, i)).collect(),
        }
    }

    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Target indices aligned to the given source word, ascending
    pub fn targets_of(&self, source: usize) -> impl Iterator<Item = usize> + '_ {
        let start = self.pairs.partition_point(|&(s, _)| s < source);
        self.pairs[start..]
            .iter()
            .take_while(move |&&(s, _)| s == source)
            .map(|&(_, t)| t)
    }

    /// Whether target order never decreases as source order increases
    pub fn is_monotone(&self) -> bool {
        self.pairs.windows(2).all(|w| {
            let ((s0, t0), (s1, t1)) = (w[0], w[1]);
            s0 == s1 || t0 <= t1
        })
    }

    /// Fail if any pair falls outside the given sentence lengths
    pub fn check_bounds(&self, source_len: usize, target_len: usize) -> ProjectionResult<()> {
        match self
            .pairs
            .iter()
            .find(|&&(s, t)| s >= source_len || t >= target_len)
        {
            Some(&(source_index, target_index)) => Err(ProjectionError::AlignmentOutOfRange {
                source_index,
                target_index,
                source_len,
                target_len,
            }),
            None => Ok(()),
        }
    }
}

impl FromIterator<(usize, usize)> for Alignment {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Alignment::from_pairs(iter)
    }
}

/// Parse the `source-target` pair format written by word aligners,
/// e.g. `"0-0 1-2 2-1"`. Blank input is an empty alignment.
impl FromStr for Alignment {
    type Err = ProjectionError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.split_whitespace()
            .map(|pair| {
                let (source, target) = pair
                    .split_once('-')
                    .ok_or_else(|| ProjectionError::InvalidAlignment(text.to_string()))?;
                let source = source
                    .parse::<usize>()
                    .map_err(|_| ProjectionError::InvalidAlignment(text.to_string()))?;
                let target = target
                    .parse::<usize>()
                    .map_err(|_| ProjectionError::InvalidAlignment(text.to_string()))?;
                Ok((source, target))
            })
            .collect::<ProjectionResult<Vec<_>>>()
            .map(Alignment::from_pairs)
    }
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text: Vec<String> = self
            .pairs
            .iter()
            .map(|(s, t)| format!("{}-{}", s, t))
            .collect();
        write!(f, "{}", text.join(" "))
    }
}
