use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::ModeId;

/// Fatal catalog failures. Any of these rejects the whole catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed verb data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to fetch verb data: {0}")]
    Fetch(String),

    #[error("verb catalog is empty")]
    Empty,

    #[error("no practice modes configured")]
    NoModes,

    #[error("verb #{index} ({dictionary_form}) is missing field '{field}'")]
    MissingField {
        index: usize,
        dictionary_form: String,
        field: String,
    },

    #[error("catalog source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DrillError {
    #[error("verb catalog has not finished loading")]
    NotReady,

    #[error("verb catalog failed to load; drill is halted")]
    LoadFailed,

    #[error("unknown mode '{0}'")]
    UnknownMode(ModeId),

    #[error("previous answer is still being shown")]
    AdvancePending,
}
