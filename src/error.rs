//! Error types for configuration resolution.

use thiserror::Error;

/// Errors surfaced by a remote store client.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Service error: {0}")]
    Service(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// A single context could not be turned into a property source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Unable to load configuration from {context}: {source}")]
    Store {
        context: String,
        #[source]
        source: StoreError,
    },

    #[error("Malformed document at {context}: {reason}")]
    MalformedDocument { context: String, reason: String },
}

impl FetchError {
    /// The context whose lookup failed.
    pub fn context(&self) -> &str {
        match self {
            FetchError::Store { context, .. } => context,
            FetchError::MalformedDocument { context, .. } => context,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Store { source, .. } if source.is_not_found())
    }
}

/// Caller-supplied configuration is invalid or could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {field}: {message}")]
    Invalid { field: &'static str, message: String },

    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("{0}")]
    Validation(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Load(err.to_string())
    }
}

/// Errors returned from a resolution call.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("Fail fast is set and configuration could not be resolved from {context}: {source}")]
    Aborted {
        context: String,
        #[source]
        source: FetchError,
    },

    #[error("Resolution incomplete, {} context(s) skipped: {}", .skipped.len(), .skipped.join(", "))]
    Incomplete { skipped: Vec<String> },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<config::ConfigError> for LocateError {
    fn from(err: config::ConfigError) -> Self {
        LocateError::Config(err.into())
    }
}
