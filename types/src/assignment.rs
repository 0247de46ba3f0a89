//! Gifter → giftee assignment.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::AssignmentViolation;
use crate::participant::{Participant, ParticipantId};
use crate::set::ParticipantSet;

/// A mapping from each gifter to the participant they give to.
///
/// Built by the pairing engine, consumed once by delivery, never stored.
/// Construction does not check validity; call [`Assignment::validate`]
/// against the group it was drawn from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    pairs: BTreeMap<ParticipantId, ParticipantId>,
}

impl Assignment {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from `(gifter, giftee)` pairs. A repeated gifter keeps its last giftee.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (ParticipantId, ParticipantId)>) -> Self {
        Self {
            pairs: pairs.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn giftee_of(&self, gifter: &ParticipantId) -> Option<&ParticipantId> {
        self.pairs.get(gifter)
    }

    /// `(gifter, giftee)` identities in gifter order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &ParticipantId)> {
        self.pairs.iter()
    }

    /// Resolve identities to participant records. Pairs naming someone
    /// outside `participants` are skipped.
    pub fn pairs<'a>(
        &'a self,
        participants: &'a ParticipantSet,
    ) -> impl Iterator<Item = (&'a Participant, &'a Participant)> + 'a {
        self.pairs.iter().filter_map(move |(gifter, giftee)| {
            Some((participants.get(gifter)?, participants.get(giftee)?))
        })
    }

    /// Check every validity invariant against the group the assignment
    /// was drawn from, reporting the first violation found.
    ///
    /// An assignment is valid when it is a permutation of the group's
    /// identities with no fixed points and no partner pairs, in either
    /// direction of the partner relation.
    pub fn validate(&self, participants: &ParticipantSet) -> Result<(), AssignmentViolation> {
        if self.pairs.len() != participants.len() {
            return Err(AssignmentViolation::Domain {
                expected: participants.len(),
                assigned: self.pairs.len(),
            });
        }

        let mut seen = BTreeSet::new();
        for (gifter, giftee) in &self.pairs {
            for id in [gifter, giftee] {
                if !participants.contains(id) {
                    return Err(AssignmentViolation::UnknownParticipant(id.clone()));
                }
            }
            if !seen.insert(giftee) {
                return Err(AssignmentViolation::DuplicateGiftee(giftee.clone()));
            }
            if gifter == giftee {
                return Err(AssignmentViolation::SelfAssigned(gifter.clone()));
            }
            if participants.are_partners(gifter, giftee) {
                return Err(AssignmentViolation::PartnerAssigned {
                    gifter: gifter.clone(),
                    giftee: giftee.clone(),
                });
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = (&'a ParticipantId, &'a ParticipantId);
    type IntoIter = std::collections::btree_map::Iter<'a, ParticipantId, ParticipantId>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
