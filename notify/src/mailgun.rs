//! Live backend: the Mailgun HTTP messages API.
//!
//! `POST {base_url}/v3/{domain}/messages` with HTTP basic auth `api:{key}`
//! and the message as form fields (`from`, `to`, `subject`, `text`).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::NotifyError;
use crate::mailer::{DeliveryReceipt, Mailer, Notification};

/// US region API host. EU domains use `https://api.eu.mailgun.net`.
pub const DEFAULT_BASE_URL: &str = "https://api.mailgun.net";

/// Default timeout for a send request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct MailgunMailer {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    base_url: String,
    domain: String,
    api_key: String,
}

/// JSON body of a successful send: `{"id": "<...>", "message": "Queued. Thank you."}`.
#[derive(Debug, Default, Deserialize)]
struct SendResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl MailgunMailer {
    pub fn new(domain: impl Into<String>, api_key: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            base_url: DEFAULT_BASE_URL.to_string(),
            domain: domain.into(),
            api_key: api_key.into(),
        }
    }

    /// Point at another API host (EU region, or a local stand-in).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn messages_url(&self) -> String {
        format!(
            "{}/v3/{}/messages",
            self.base_url.trim_end_matches('/'),
            self.domain
        )
    }

    fn form(notification: &Notification) -> Vec<(&'static str, String)> {
        vec![
            ("from", notification.from_mailbox()),
            ("to", notification.to_mailbox()),
            ("subject", notification.subject.clone()),
            ("text", notification.body.clone()),
        ]
    }
}

impl fmt::Debug for MailgunMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailgunMailer")
            .field("base_url", &self.base_url)
            .field("domain", &self.domain)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Mailer for MailgunMailer {
    async fn deliver(&self, notification: &Notification) -> Result<DeliveryReceipt, NotifyError> {
        let response = self
            .http_client
            .post(self.messages_url())
            .basic_auth("api", Some(&self.api_key))
            .form(&Self::form(notification))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NotifyError::Transport(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    NotifyError::Transport(format!("connection failed: {e}"))
                } else {
                    NotifyError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NotifyError::Transport(format!(
                "HTTP status {status}: {}",
                detail.trim()
            )));
        }

        // The message is accepted once the status is 2xx; an unreadable body
        // only loses the message id.
        let sent = match response.text().await {
            Ok(body) => serde_json::from_str::<SendResponse>(&body).unwrap_or_else(|e| {
                tracing::warn!(
                    to = %notification.to_address,
                    error = %e,
                    "mailgun accepted message but its response could not be parsed"
                );
                SendResponse::default()
            }),
            Err(e) => {
                tracing::warn!(
                    to = %notification.to_address,
                    error = %e,
                    "mailgun accepted message but its response could not be read"
                );
                SendResponse::default()
            }
        };
        tracing::debug!(
            to = %notification.to_address,
            id = sent.id.as_deref().unwrap_or("-"),
            message = sent.message.as_deref().unwrap_or("-"),
            "mailgun accepted message"
        );

        Ok(DeliveryReceipt {
            backend: self.name().to_string(),
            message_id: sent.id,
        })
    }

    fn name(&self) -> &str {
        "mailgun"
    }
}
