//! Dry-run backend: prints each message instead of sending it.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::mailer::{DeliveryReceipt, Mailer, Notification};

pub struct ConsoleMailer<W = io::Stdout> {
    out: Mutex<W>,
}

impl ConsoleMailer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleMailer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<W: Write + Send + 'static> Mailer for ConsoleMailer<W> {
    async fn deliver(&self, notification: &Notification) -> Result<DeliveryReceipt, NotifyError> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        write!(
            out,
            "\nEmail to {} <{}>:\n{}\n",
            notification.to_name, notification.to_address, notification.body
        )
        .and_then(|()| out.flush())
        .map_err(|e| NotifyError::Transport(format!("console write failed: {e}")))?;

        Ok(DeliveryReceipt {
            backend: self.name().to_string(),
            message_id: None,
        })
    }

    fn name(&self) -> &str {
        "console"
    }
}
