//! Shared utilities for the secret santa workspace.

pub mod logging;

pub use logging::{init_logging, LogFormat};
