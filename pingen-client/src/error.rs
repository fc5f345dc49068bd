//! Error types for the Pingen client

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when using the Pingen client
#[derive(Error, Debug)]
pub enum PingenError {
    /// Invalid client configuration (unknown mode, bad base URL, missing token)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client initialization failed
    #[error("Client initialization failed: {0}")]
    ClientInit(String),

    /// The file to upload is missing or cannot be read
    #[error("Cannot read upload file {}: {source}", .path.display())]
    FileAccess {
        /// Path that was passed for upload
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// HTTP request failed (connect, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was neither a known binary payload nor valid JSON
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The service reported an error in a well-formed response
    #[error("Service error {code}: {message}")]
    Service {
        /// The `errorcode` field of the response
        code: i64,
        /// The `errormessage` field of the response
        message: String,
    },
}

impl PingenError {
    /// Service error code, if this error was reported by the service
    pub fn service_code(&self) -> Option<i64> {
        match self {
            PingenError::Service { code, .. } => Some(*code),
            _ => None,
        }
    }
}
