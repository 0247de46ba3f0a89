//! Input validation and assignment validity errors.

use thiserror::Error;

use crate::participant::ParticipantId;

/// A participant list that cannot form a [`ParticipantSet`](crate::ParticipantSet).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("participant identity must not be empty")]
    EmptyIdentity,

    #[error("duplicate participant identity: {0}")]
    DuplicateIdentity(ParticipantId),

    #[error("participant {participant} names unknown partner {partner}")]
    UnknownPartner {
        participant: ParticipantId,
        partner: ParticipantId,
    },

    #[error("participant {0} names themselves as partner")]
    SelfPartner(ParticipantId),
}

/// The first invariant an [`Assignment`](crate::Assignment) breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentViolation {
    #[error("assignment covers {assigned} gifters but the group has {expected} participants")]
    Domain { expected: usize, assigned: usize },

    #[error("{0} is not a participant in this group")]
    UnknownParticipant(ParticipantId),

    #[error("{0} is assigned as giftee more than once")]
    DuplicateGiftee(ParticipantId),

    #[error("{0} is assigned to themselves")]
    SelfAssigned(ParticipantId),

    #[error("{gifter} is assigned to partner {giftee}")]
    PartnerAssigned {
        gifter: ParticipantId,
        giftee: ParticipantId,
    },
}
