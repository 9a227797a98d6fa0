//! Error handling for daddy

use std::path::Path;
use thiserror::Error;

/// Main error type for daddy
#[derive(Error, Debug, Clone)]
pub enum DaddyError {
    #[error("Usage error: {message}")]
    Usage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Could not read credentials from '{path}': {hint}")]
    Credentials { path: String, hint: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("No internet connection.")]
    Connection { message: String },

    #[error("Connection timed out.")]
    Timeout { timeout_secs: u64 },

    #[error("Invalid API key or secret.")]
    Unauthorized,

    #[error("Access denied: {message}")]
    Forbidden { message: String },

    #[error("TLD '{tld}' unavailable at godaddy.com.")]
    UnsupportedTld { tld: String },

    #[error("Internal server error, try again.")]
    ServerError,

    #[error("Could not check '{domain}': {message}")]
    Unexpected { domain: String, message: String },

    #[error("Aborted!")]
    Aborted,

    #[error("Interrupted.")]
    Interrupted,
}

impl DaddyError {
    /// Create a usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a credentials file error
    pub fn credentials(path: &Path, hint: impl Into<String>) -> Self {
        Self::Credentials {
            path: path.display().to_string(),
            hint: hint.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<&Path>) -> Self {
        Self::Io {
            message: message.into(),
            path: path.map(|p| p.display().to_string()),
        }
    }

    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }

    /// Create an access denied error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create an unsupported TLD error
    pub fn unsupported_tld(tld: impl Into<String>) -> Self {
        Self::UnsupportedTld { tld: tld.into() }
    }

    /// Create a per-domain error that does not stop the batch
    pub fn unexpected(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unexpected {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Whether this error must abort the whole run.
    ///
    /// Only per-domain failures are recoverable; the batch skips the domain
    /// and moves on.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Unexpected { .. })
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Usage { message } => {
                format!("Error: {}\nTry 'daddy --help' for help.", message)
            }
            Self::Config { message } => format!("Error: {}", message),
            Self::Credentials { path, hint } => {
                format!("Error: Could not open file '{}': {}", path, hint)
            }
            Self::Io { message, path } => match path {
                Some(p) => format!("Error: Could not open file '{}': {}", p, message),
                None => format!("Error: {}", message),
            },
            Self::Aborted => "Aborted!".to_string(),
            Self::Interrupted => "Aborted! Interrupted.".to_string(),
            other => format!("Error: {}", other),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DaddyError>;
