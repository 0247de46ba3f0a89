//! Assignment delivery.
//!
//! Turns each `(gifter, giftee)` pair into a [`Notification`] through a
//! [`MessageTemplate`] and hands it to a [`Mailer`] backend:
//! - [`ConsoleMailer`]: dry runs, prints every message and sends nothing.
//! - [`MailgunMailer`]: live runs through the Mailgun HTTP API.
//!
//! [`Dispatcher`] wires a loader, the pairing engine, a template and a
//! mailer into one run. Nothing is delivered unless pairing succeeds.

pub mod console;
pub mod dispatch;
pub mod error;
pub mod mailer;
pub mod mailgun;
pub mod template;

pub use console::ConsoleMailer;
pub use dispatch::{DeliveryReport, Dispatcher};
pub use error::NotifyError;
pub use mailer::{DeliveryReceipt, Mailer, Notification};
pub use mailgun::MailgunMailer;
pub use template::{Envelope, MessageTemplate};
