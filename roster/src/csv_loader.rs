//! CSV roster: `Name,Email,Partner,Interests`, one participant per row.
//!
//! The header row is skipped by position, not matched by name. The
//! interests cell is a comma-separated list; if it was written without
//! quotes its items spill into extra columns, which are folded back in.

use std::fs::File;
use std::io;
use std::path::Path;

use santa_types::{Participant, ParticipantSet};

use crate::error::LoaderError;
use crate::ParticipantLoader;

const FIELDS: usize = 4;

#[derive(Clone, Copy, Debug, Default)]
pub struct CsvLoader;

impl CsvLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse a roster from any reader.
    pub fn from_reader<R: io::Read>(&self, reader: R) -> Result<ParticipantSet, LoaderError> {
        let mut rows = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        if rows.headers()?.is_empty() {
            return Err(LoaderError::MissingHeader);
        }

        let mut participants = Vec::new();
        for record in rows.records() {
            let record = record?;
            if record.len() < FIELDS {
                return Err(LoaderError::MalformedRow {
                    line: record.position().map_or(0, |pos| pos.line()),
                    found: record.len(),
                });
            }

            let interests = record
                .iter()
                .skip(FIELDS - 1)
                .flat_map(|cell| cell.split(','))
                .map(str::trim)
                .filter(|interest| !interest.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>();

            participants.push(
                Participant::new(&record[0], &record[1])
                    .with_partner(&record[2])
                    .with_interests(interests),
            );
        }

        let set = ParticipantSet::new(participants)?;
        tracing::debug!(participants = set.len(), "roster parsed");
        Ok(set)
    }
}

impl ParticipantLoader for CsvLoader {
    fn load(&self, path: &Path) -> Result<ParticipantSet, LoaderError> {
        let file = File::open(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set = self.from_reader(io::BufReader::new(file))?;
        tracing::info!(path = %path.display(), participants = set.len(), "loaded participants");
        Ok(set)
    }
}
