//! Nullable participant loader: an in-memory roster.

use santa_roster::{LoaderError, ParticipantLoader};
use santa_types::ParticipantSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Returns a fixed participant set (or a fixed failure) for any path,
/// recording which paths were requested.
pub struct NullLoader {
    result: Result<ParticipantSet, String>,
    requested: Mutex<Vec<PathBuf>>,
}

impl NullLoader {
    pub fn new(participants: ParticipantSet) -> Self {
        Self {
            result: Ok(participants),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// A loader whose every call fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            result: Err(reason.into()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<PathBuf> {
        self.requested.lock().unwrap().clone()
    }
}

impl ParticipantLoader for NullLoader {
    fn load(&self, path: &Path) -> Result<ParticipantSet, LoaderError> {
        self.requested.lock().unwrap().push(path.to_path_buf());
        self.result.clone().map_err(LoaderError::Other)
    }
}
