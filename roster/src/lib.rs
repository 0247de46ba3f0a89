//! Participant loading.
//!
//! A [`ParticipantLoader`] turns some persisted roster into a validated
//! [`ParticipantSet`](santa_types::ParticipantSet). The only on-disk
//! format is CSV, read by [`CsvLoader`].

pub mod csv_loader;
pub mod error;

pub use csv_loader::CsvLoader;
pub use error::LoaderError;

use santa_types::ParticipantSet;
use std::path::Path;

/// Source of the participant set for one run.
pub trait ParticipantLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<ParticipantSet, LoaderError>;
}
