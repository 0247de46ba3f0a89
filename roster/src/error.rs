use santa_types::RosterError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("cannot open participants file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("participants file has no header row")]
    MissingHeader,

    #[error("failed to read participants: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected name, email, partner and interests, found {found} fields")]
    MalformedRow { line: u64, found: usize },

    #[error("invalid participant list: {0}")]
    Roster(#[from] RosterError),

    #[error("{0}")]
    Other(String),
}
