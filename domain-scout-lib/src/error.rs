//! Error handling for domain rating and availability probing.
//!
//! Validation and generation errors reach the caller. Lookup failures stay
//! inside the probe, which maps them to "available".

use std::time::Duration;
use thiserror::Error;

/// Main error type for domain-scout operations.
#[derive(Debug, Clone, Error)]
pub enum DomainScoutError {
    /// Domain string does not match `<label>.<tld>`
    #[error("Invalid domain '{domain}': {reason}")]
    InvalidDomain { domain: String, reason: String },

    /// Suggestion base token is unusable
    #[error("Invalid base '{base}': {reason}")]
    InvalidBase { base: String, reason: String },

    /// Synthetic generation could not reach the requested distinct count
    #[error(
        "Could only generate {produced} of {requested} distinct names after {attempts} attempts"
    )]
    GenerationExhausted {
        requested: usize,
        produced: usize,
        attempts: usize,
    },

    /// Lookup backend failed (process, network, parse)
    #[error("Lookup failed for '{domain}': {message}")]
    Lookup { domain: String, message: String },

    /// Operation exceeded its time budget
    #[error("Timeout after {duration:?} during: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// Invalid settings in a config file, environment or builder
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File I/O errors when reading configuration
    #[error("File error at '{path}': {message}")]
    FileError { path: String, message: String },

    /// Internal faults, including worker tasks that died mid-batch
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainScoutError {
    /// Create a new invalid domain error.
    pub fn invalid_domain<D: Into<String>, R: Into<String>>(domain: D, reason: R) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid base error.
    pub fn invalid_base<B: Into<String>, R: Into<String>>(base: B, reason: R) -> Self {
        Self::InvalidBase {
            base: base.into(),
            reason: reason.into(),
        }
    }

    /// Create a new lookup error.
    pub fn lookup<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::Lookup {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for DomainScoutError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("Failed to parse TOML configuration: {}", err))
    }
}
