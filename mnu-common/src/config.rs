//! Configuration loading
//!
//! Two sources:
//! 1. **TOML bootstrap file**: listen address, email sender, logging level
//! 2. **Environment**: email provider credential and sender override
//!
//! Priority for the listen address is command line > environment > TOML >
//! compiled default; the binary's argument parser covers the first two.
//! A missing TOML file is not an error: the service starts on defaults.

use crate::Result;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Compiled default listen host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Compiled default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Sender identity used when neither `EMAIL_FROM` nor the TOML file sets one
pub const DEFAULT_FROM_ADDRESS: &str = "noreply@mkhontonationalunion.com";

/// Mailbox receiving every notification; not configurable
pub const NOTIFICATION_ADDRESS: &str = "mkhontonationalunion@gmail.com";

/// SendGrid v3 send endpoint
pub const SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Environment variable holding the email provider credential
pub const API_KEY_ENV: &str = "SENDGRID_API_KEY";

/// Environment variable overriding the sender address
pub const EMAIL_FROM_ENV: &str = "EMAIL_FROM";

/// Bootstrap configuration loaded from TOML file
///
/// Every section is optional; a file containing only `[logging]` is valid.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub email: EmailSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Listen address
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Apply command-line/environment overrides on top of the TOML values
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `[email]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailSettings {
    /// Sender address (`EMAIL_FROM` takes precedence)
    #[serde(default)]
    pub from: Option<String>,

    /// Provider endpoint, for staging or test stubs
    #[serde(default)]
    pub api_url: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a TOML file; both a missing and a malformed file are errors
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load the bootstrap file, falling back to defaults when it does not exist
    ///
    /// `path` is the explicit location (command line or environment). Without
    /// one, the platform config directory is tried. A malformed file is still
    /// an error. Nothing is logged here: this runs before the subscriber
    /// exists, so the caller reports the returned [`ConfigSource`] later.
    pub fn load_or_default(path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Ok((Self::default(), ConfigSource::NoConfigDir)),
            },
        };

        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Missing(path)));
        }

        let config = Self::load(&path)?;
        Ok((config, ConfigSource::File(path)))
    }
}

/// Where the bootstrap configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// File not found; compiled defaults in use
    Missing(PathBuf),
    /// No platform config directory and no explicit path; compiled defaults in use
    NoConfigDir,
}

impl ConfigSource {
    /// Log how the configuration was obtained
    pub fn report(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
            ConfigSource::Missing(path) => {
                warn!("Config file {} not found, using defaults", path.display())
            }
            ConfigSource::NoConfigDir => {
                info!("No config directory on this platform, using defaults")
            }
        }
    }
}

/// Platform default TOML location (`~/.config/mnu/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mnu").join("config.toml"))
}

/// Resolved email provider settings
///
/// `api_key` of `None` selects degraded (log-only) delivery.
#[derive(Clone)]
pub struct EmailConfig {
    pub api_key: Option<String>,
    pub from: String,
    pub api_url: String,
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl EmailConfig {
    /// Resolve from the process environment and the `[email]` section
    pub fn resolve(settings: &EmailSettings) -> Self {
        Self::from_lookup(settings, |key| std::env::var(key).ok())
    }

    /// Resolve using `lookup` in place of the process environment
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(settings: &EmailSettings, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |value: String| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        let api_key = lookup(API_KEY_ENV).and_then(non_blank);

        let from = lookup(EMAIL_FROM_ENV)
            .and_then(non_blank)
            .or_else(|| settings.from.clone().and_then(non_blank))
            .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string());

        let api_url = settings
            .api_url
            .clone()
            .and_then(non_blank)
            .unwrap_or_else(|| SENDGRID_API_URL.to_string());

        Self {
            api_key,
            from,
            api_url,
        }
    }

    /// No credential configured: notifications are only logged
    pub fn is_degraded(&self) -> bool {
        self.api_key.is_none()
    }
}
