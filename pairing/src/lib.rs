//! Pairing engine for gift exchanges.
//!
//! Draws a gifter → giftee assignment over a [`ParticipantSet`] such that
//! nobody gives to themselves or to a partner (in either direction of the
//! partner relation). Each attempt is a randomized greedy pass; an attempt
//! that paints itself into a corner is discarded and the construction
//! restarts, up to a fixed attempt budget.
//!
//! Randomness is injected through [`RandomSource`] so callers can swap
//! the thread RNG for a seeded or scripted source.

pub mod engine;
pub mod error;
pub mod random;

pub use engine::{PairingEngine, DEFAULT_MAX_ATTEMPTS};
pub use error::{AttemptFailure, PairingError};
pub use random::{RandomSource, SeededRandom, ThreadRandom};

use santa_types::{Assignment, ParticipantSet};

/// Pair `participants` with the thread RNG and the default attempt budget.
pub fn pair(participants: &ParticipantSet) -> Result<Assignment, PairingError> {
    PairingEngine::new().pair(&ThreadRandom, participants)
}
