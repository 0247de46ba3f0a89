//! Nullable mailer: records notifications instead of sending them.

use async_trait::async_trait;
use santa_notify::{DeliveryReceipt, Mailer, NotifyError, Notification};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Captures every delivered notification. Clones share the same record,
/// so a test can keep one handle and give another to the code under test.
#[derive(Clone, Default)]
pub struct NullMailer {
    sent: Arc<Mutex<Vec<Notification>>>,
    reject: Arc<HashSet<String>>,
}

impl NullMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer that fails for the given recipient addresses.
    pub fn rejecting<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sent: Arc::default(),
            reject: Arc::new(addresses.into_iter().map(Into::into).collect()),
        }
    }

    /// Notifications accepted so far, in delivery order.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for NullMailer {
    async fn deliver(&self, notification: &Notification) -> Result<DeliveryReceipt, NotifyError> {
        if self.reject.contains(&notification.to_address) {
            return Err(NotifyError::Transport(format!(
                "rejected recipient {}",
                notification.to_address
            )));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(notification.clone());
        Ok(DeliveryReceipt {
            backend: self.name().to_string(),
            message_id: Some(format!("null-{}", sent.len())),
        })
    }

    fn name(&self) -> &str {
        "null-mailer"
    }
}
