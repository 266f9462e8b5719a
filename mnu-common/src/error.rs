//! Common error types for MNU services

use thiserror::Error;

/// Common result type for MNU operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across MNU services
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML configuration file
    #[error("Config file parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
