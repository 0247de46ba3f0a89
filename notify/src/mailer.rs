//! The delivery seam.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::NotifyError;

/// A rendered message for one gifter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub to_name: String,
    pub to_address: String,
    pub from_name: String,
    pub from_address: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    /// `Name <address>` form of the recipient.
    pub fn to_mailbox(&self) -> String {
        mailbox(&self.to_name, &self.to_address)
    }

    /// `Name <address>` form of the sender.
    pub fn from_mailbox(&self) -> String {
        mailbox(&self.from_name, &self.from_address)
    }
}

fn mailbox(name: &str, address: &str) -> String {
    if name.is_empty() {
        address.to_string()
    } else {
        format!("{name} <{address}>")
    }
}

/// What a backend reports after accepting a notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub backend: String,
    /// Backend-assigned message id, if the backend issues one.
    pub message_id: Option<String>,
}

/// A transport that delivers notifications.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn deliver(&self, notification: &Notification) -> Result<DeliveryReceipt, NotifyError>;

    /// Human-readable name of this backend.
    fn name(&self) -> &str;
}
