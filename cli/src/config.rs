//! Run configuration with TOML file support.
//!
//! ```toml
//! [email]
//! subject = "Secret Santa Assignment"
//! domain = "bedrock.com"
//!
//! [email.sender]
//! name = "Santa Claus"
//! address = "santa@bedrock.com"
//!
//! [mailgun]
//! api_key = "key-..."
//!
//! [pairing]
//! max_attempts = 11
//!
//! [log]
//! format = "human"
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use santa_notify::mailgun::DEFAULT_BASE_URL;
use santa_pairing::DEFAULT_MAX_ATTEMPTS;
use santa_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("missing required setting `{0}`")]
    Missing(&'static str),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SantaConfig {
    #[serde(default)]
    pub email: EmailConfig,

    #[serde(default)]
    pub mailgun: MailgunConfig,

    #[serde(default)]
    pub pairing: PairingConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Sending domain; also the Mailgun domain.
    #[serde(default)]
    pub domain: Option<String>,

    #[serde(default)]
    pub sender: SenderConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SenderConfig {
    #[serde(default = "default_sender_name")]
    pub name: String,

    /// Defaults to `santa@{domain}`.
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MailgunConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PairingConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,

    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_subject() -> String {
    "Secret Santa Assignment".to_string()
}

fn default_sender_name() -> String {
    "Santa Claus".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl SantaConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// The configured domain, which every run needs.
    pub fn require_domain(&self) -> Result<&str, ConfigError> {
        self.email
            .domain
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or(ConfigError::Missing("email.domain"))
    }

    /// Explicit sender address, or `santa@{domain}`.
    pub fn sender_address(&self) -> Result<String, ConfigError> {
        match self.email.sender.address.as_deref().map(str::trim) {
            Some(address) if !address.is_empty() => Ok(address.to_string()),
            _ => Ok(format!("santa@{}", self.require_domain()?)),
        }
    }

    /// `override_key` (command line or environment) wins over the file.
    pub fn mailgun_api_key(&self, override_key: Option<&str>) -> Result<String, ConfigError> {
        override_key
            .or(self.mailgun.api_key.as_deref())
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .ok_or(ConfigError::Missing("mailgun.api_key"))
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            subject: default_subject(),
            domain: None,
            sender: SenderConfig::default(),
        }
    }
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            name: default_sender_name(),
            address: None,
        }
    }
}

impl Default for MailgunConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
        }
    }
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_log_level(),
        }
    }
}
