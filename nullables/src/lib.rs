//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of a run (randomness, the participant file,
//! the mail transport) sits behind a trait. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod loader;
pub mod mailer;
pub mod random;

pub use loader::NullLoader;
pub use mailer::NullMailer;
pub use random::NullRandom;
