//! Participant identity and record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique key of a participant within a group.
///
/// Participants are keyed by name, so the identity is the name with
/// surrounding whitespace removed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.len() == raw.len() {
            Self(raw)
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<ParticipantId> for String {
    fn from(id: ParticipantId) -> Self {
        id.0
    }
}

/// A member of the gift exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Identity, unique within the group.
    pub id: ParticipantId,
    /// Display name used in messages.
    pub name: String,
    /// Contact address notifications are delivered to.
    pub email: String,
    /// Free-form interests, shown to whoever draws this participant.
    #[serde(default)]
    pub interests: Vec<String>,
    /// Someone this participant must neither give to nor receive from.
    #[serde(default)]
    pub partner: Option<ParticipantId>,
}

impl Participant {
    /// Create a participant identified by `name`.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let name = name.into().trim().to_string();
        Self {
            id: ParticipantId::new(name.clone()),
            name,
            email: email.into().trim().to_string(),
            interests: Vec::new(),
            partner: None,
        }
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Set the excluded partner. A blank identity clears it.
    pub fn with_partner(mut self, partner: impl Into<ParticipantId>) -> Self {
        let partner = partner.into();
        self.partner = if partner.is_empty() {
            None
        } else {
            Some(partner)
        };
        self
    }
}
