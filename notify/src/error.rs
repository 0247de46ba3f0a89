use santa_pairing::PairingError;
use santa_roster::LoaderError;
use santa_types::AssignmentViolation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("error loading participants: {0}")]
    Load(#[from] LoaderError),

    #[error("error pairing participants: {0}")]
    Pairing(#[from] PairingError),

    #[error("pairing produced an invalid assignment: {0}")]
    InvalidAssignment(#[from] AssignmentViolation),

    #[error("template error: {0}")]
    Template(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("{failed} of {total} notifications failed to send; first error: {first}")]
    Delivery {
        failed: usize,
        total: usize,
        first: String,
    },
}
