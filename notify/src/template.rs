//! Message templates (Jinja syntax via minijinja).
//!
//! A template sees three values:
//! - `gifter`: the participant receiving the message,
//! - `giftee`: the participant they give to,
//! - `sender`: `name` and `address` of the configured sender.
//!
//! Participants expose `name`, `email`, `interests` (a list) and `partner`.
//! Referencing anything else is a render error rather than an empty string.

use std::path::Path;

use minijinja::{context, Environment, UndefinedBehavior};
use serde::Serialize;

use santa_types::Participant;

use crate::error::NotifyError;
use crate::mailer::Notification;

/// Body used when no custom template file is given.
pub const DEFAULT_BODY: &str = "\
Hello {{ gifter.name }},
This is your secret santa assignment!
This Christmas, you will buy a gift for {{ giftee.name }}.
{{ giftee.name }} wrote in their letter to Santa that they are interested in {{ giftee.interests | join(\", \") }}.
Remember this is a SECRET Santa so ssssshhhhhhh!
Merry Christmas
{{ sender.name }}";

/// Subject and sender shared by every message of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub subject: String,
    pub sender_name: String,
    pub sender_address: String,
}

#[derive(Serialize)]
struct Sender<'a> {
    name: &'a str,
    address: &'a str,
}

/// A compiled-on-construction message body plus its envelope.
#[derive(Clone, Debug)]
pub struct MessageTemplate {
    name: String,
    source: String,
    envelope: Envelope,
}

impl MessageTemplate {
    /// Create a template, rejecting sources that do not compile.
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        envelope: Envelope,
    ) -> Result<Self, NotifyError> {
        let template = Self {
            name: name.into(),
            source: source.into(),
            envelope,
        };
        template.environment()?;
        Ok(template)
    }

    /// The built-in body.
    pub fn default_body(envelope: Envelope) -> Result<Self, NotifyError> {
        Self::new("default", DEFAULT_BODY, envelope)
    }

    /// Load a custom body from `path`. The file name selects auto-escaping,
    /// so an `.html` template escapes participant data.
    pub fn from_file(path: &Path, envelope: Envelope) -> Result<Self, NotifyError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            NotifyError::Template(format!("cannot read template {}: {e}", path.display()))
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());
        tracing::debug!(template = %name, "loaded custom message template");
        Self::new(name, source, envelope)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Render the body for one pair.
    pub fn render(&self, gifter: &Participant, giftee: &Participant) -> Result<String, NotifyError> {
        let env = self.environment()?;
        let template = env
            .get_template(&self.name)
            .map_err(|e| NotifyError::Template(e.to_string()))?;
        let sender = Sender {
            name: &self.envelope.sender_name,
            address: &self.envelope.sender_address,
        };
        template
            .render(context! { gifter, giftee, sender })
            .map_err(|e| NotifyError::Template(format!("error rendering {}: {e}", self.name)))
    }

    /// Render and address the message for `gifter`.
    pub fn notification(
        &self,
        gifter: &Participant,
        giftee: &Participant,
    ) -> Result<Notification, NotifyError> {
        Ok(Notification {
            to_name: gifter.name.clone(),
            to_address: gifter.email.clone(),
            from_name: self.envelope.sender_name.clone(),
            from_address: self.envelope.sender_address.clone(),
            subject: self.envelope.subject.clone(),
            body: self.render(gifter, giftee)?,
        })
    }

    fn environment(&self) -> Result<Environment<'_>, NotifyError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template(&self.name, &self.source).map_err(|e| {
            NotifyError::Template(format!("template {} does not compile: {e}", self.name))
        })?;
        Ok(env)
    }
}
