use santa_types::ParticipantId;
use thiserror::Error;

/// Why a single pairing attempt was abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptFailure {
    #[error("no eligible giftee found for {gifter}")]
    NoEligibleGiftee { gifter: ParticipantId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    /// Every attempt in the budget failed; `cause` is from the last one.
    #[error("pairing failed after {attempts} attempts: {cause}")]
    Exhausted { attempts: u32, cause: AttemptFailure },
}

impl PairingError {
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Exhausted { attempts, .. } => *attempts,
        }
    }
}
