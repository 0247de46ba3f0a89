//! Fundamental types for gift-exchange pairing.
//!
//! This crate defines the types shared by every other crate in the workspace:
//! participant identities, the validated participant set, and the
//! gifter → giftee assignment with its validity checks.

pub mod assignment;
pub mod error;
pub mod participant;
pub mod set;

pub use assignment::Assignment;
pub use error::{AssignmentViolation, RosterError};
pub use participant::{Participant, ParticipantId};
pub use set::ParticipantSet;
