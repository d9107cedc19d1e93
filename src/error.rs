use std::path::PathBuf;

use thiserror::Error;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields.";
pub const OUT_OF_RANGE_MESSAGE: &str = "Level and number of questions must be between 1 and 10.";

/// A required form field was left empty, or a number fell outside its range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.message())]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
    pub out_of_range: Vec<&'static str>,
}

impl ValidationError {
    fn message(&self) -> &'static str {
        if self.missing.is_empty() {
            OUT_OF_RANGE_MESSAGE
        } else {
            MISSING_FIELDS_MESSAGE
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API key not found for provider '{provider}' (checked {checked}, and --key)")]
    MissingCredential {
        provider: &'static str,
        checked: String,
    },

    #[error("{provider} rejected the API key ({status}): {message}")]
    Unauthorized {
        provider: &'static str,
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("{provider} API error ({status}): {message}")]
    Api {
        provider: &'static str,
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse {provider} response JSON: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build {provider} endpoint URL: {detail}")]
    Endpoint {
        provider: &'static str,
        detail: String,
    },

    #[error("no text returned from {provider}")]
    EmptyResponse { provider: &'static str },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to open preference store {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to create directory for preference store {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preference store query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("stored level '{0}' is not a number between 1 and 10")]
    InvalidLevel(String),
}

/// Everything a single form submission can fail with.
#[derive(Debug, Error)]
pub enum InteractionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("An error occurred: {0}")]
    Generation(#[from] GenerationError),

    #[error("Failed to save preferences: {0}")]
    Storage(#[from] StorageError),
}
