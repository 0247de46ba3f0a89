//! The validated group of participants taking part in one exchange.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::RosterError;
use crate::participant::{Participant, ParticipantId};

/// Identity → participant mapping, validated on construction and
/// immutable afterwards.
///
/// Guarantees:
/// - every identity is non-empty and unique,
/// - every declared partner is another member of the same set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParticipantSet {
    members: BTreeMap<ParticipantId, Participant>,
}

impl ParticipantSet {
    /// Build a set from loaded participants, rejecting malformed input.
    pub fn new(participants: impl IntoIterator<Item = Participant>) -> Result<Self, RosterError> {
        let mut members = BTreeMap::new();
        for participant in participants {
            if participant.id.is_empty() {
                return Err(RosterError::EmptyIdentity);
            }
            if members.contains_key(&participant.id) {
                return Err(RosterError::DuplicateIdentity(participant.id));
            }
            members.insert(participant.id.clone(), participant);
        }

        for participant in members.values() {
            let Some(partner) = &participant.partner else {
                continue;
            };
            if partner == &participant.id {
                return Err(RosterError::SelfPartner(participant.id.clone()));
            }
            if !members.contains_key(partner) {
                return Err(RosterError::UnknownPartner {
                    participant: participant.id.clone(),
                    partner: partner.clone(),
                });
            }
        }

        Ok(Self { members })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.members.get(id)
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.members.contains_key(id)
    }

    /// Identities in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &ParticipantId> {
        self.members.keys()
    }

    /// Participants in ascending identity order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.members.values()
    }

    /// Whether either of `a` and `b` names the other as partner.
    pub fn are_partners(&self, a: &ParticipantId, b: &ParticipantId) -> bool {
        let names = |from: &ParticipantId, to: &ParticipantId| {
            self.members
                .get(from)
                .and_then(|p| p.partner.as_ref())
                .is_some_and(|partner| partner == to)
        };
        names(a, b) || names(b, a)
    }

    /// Identities `id` must never be assigned to: itself, its declared
    /// partner, and everyone who declares `id` as their partner.
    pub fn excluded_for(&self, id: &ParticipantId) -> BTreeSet<&ParticipantId> {
        let mut excluded = BTreeSet::new();
        let Some((own_id, participant)) = self.members.get_key_value(id) else {
            return excluded;
        };
        excluded.insert(own_id);
        if let Some(partner) = &participant.partner {
            excluded.insert(partner);
        }
        for other in self.members.values() {
            if other.partner.as_ref() == Some(id) {
                excluded.insert(&other.id);
            }
        }
        excluded
    }
}

impl<'a> IntoIterator for &'a ParticipantSet {
    type Item = &'a Participant;
    type IntoIter = std::collections::btree_map::Values<'a, ParticipantId, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.values()
    }
}
