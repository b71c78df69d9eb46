//! Error types for the web-service checks
//!
//! Messages are written to stderr as the diagnostic for a failed run, so
//! they name the field, the expectation and what was actually returned.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the checker
#[derive(Error, Debug)]
pub enum Error {
    // === Transport Errors ===
    #[error("HTTP request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("Invalid service URL '{0}'")]
    InvalidUrl(String),

    #[error("Expected status {expected} from {url}, got {actual}: {body}")]
    UnexpectedStatus {
        url: String,
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("Response from {url} is not valid JSON: {message}")]
    InvalidJson { url: String, message: String },

    // === Schema Errors ===
    #[error("field '{field}' not found in result")]
    MissingField { field: String },

    #[error("field '{field}' has type {actual}, expected {expected}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    // === Value Errors ===
    #[error("Incorrect {field} in result: expected {expected}, got {actual}")]
    ValueMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("No {field} returned when expected in result")]
    NoEntries { field: String },

    #[error("Expected child not found in {field}: no entry with {key} = {value}")]
    EntryNotFound {
        field: String,
        key: String,
        value: String,
    },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },
}

impl Error {
    /// Create a transport error for a request URL
    pub fn http(url: &str, message: impl ToString) -> Self {
        Self::Http {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(field: &str, expected: &str, actual: &str) -> Self {
        Self::TypeMismatch {
            field: field.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a value mismatch error
    pub fn value_mismatch(field: &str, expected: impl ToString, actual: impl ToString) -> Self {
        Self::ValueMismatch {
            field: field.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Which of the three failure families this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Http { .. }
            | Error::InvalidUrl(_)
            | Error::UnexpectedStatus { .. }
            | Error::InvalidJson { .. } => ErrorKind::Transport,
            Error::MissingField { .. } | Error::TypeMismatch { .. } => ErrorKind::Schema,
            Error::ValueMismatch { .. } | Error::NoEntries { .. } | Error::EntryNotFound { .. } => {
                ErrorKind::Value
            }
            Error::Config(_) | Error::ConfigParse(_) | Error::FileRead { .. } => ErrorKind::Setup,
        }
    }
}

/// Coarse classification used when reporting a failed check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The call failed, returned the wrong status, or was not JSON
    Transport,
    /// An expected field is absent or has the wrong JSON type
    Schema,
    /// A field is present but holds the wrong value
    Value,
    /// Configuration or scenario file problems
    Setup,
}
