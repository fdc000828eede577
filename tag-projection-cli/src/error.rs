//! Errors raised while loading and running job files

use std::path::PathBuf;
use tag_projection::ProjectionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed job file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("job file must hold an object or an array of objects, found {0}")]
    UnexpectedShape(&'static str),

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

pub type CliResult<T> = Result<T, CliError>;
