//! Request assembly
//!
//! Turns an operation, a body map and an optional upload path into a
//! [`PreparedRequest`]. Nothing here touches the network; the upload file is
//! read up front so a missing file fails before any request is sent.

use crate::catalog::Endpoint;
use crate::error::PingenError;
use serde_json::{Map, Value};
use std::path::Path;

/// Caller supplied body parameters
pub type BodyParameters = Map<String, Value>;

/// A file read from disk, ready to be sent as the `file` multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    /// Read `path` into memory
    ///
    /// # Errors
    ///
    /// Returns `PingenError::FileAccess` if the path does not exist, is not a
    /// regular file, or cannot be read.
    pub fn read(path: &Path) -> Result<Self, PingenError> {
        let file_access = |source| PingenError::FileAccess {
            path: path.to_path_buf(),
            source,
        };

        let metadata = std::fs::metadata(path).map_err(file_access)?;
        if !metadata.is_file() {
            return Err(file_access(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        let bytes = std::fs::read(path).map_err(file_access)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }
}

/// A fully assembled POST request
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// Target URL including the token
    pub url: reqwest::Url,
    /// JSON encoded body parameters, `None` when there are none
    pub data: Option<String>,
    /// Upload sent as the `file` part
    pub file: Option<FileAttachment>,
}

impl PreparedRequest {
    /// Whether the request has no form fields at all
    pub fn is_empty(&self) -> bool {
        self.data.is_none() && self.file.is_none()
    }
}

/// Build the value of the `data` field
///
/// An empty caller map yields `None`. Otherwise the endpoint defaults are
/// overlaid with the caller's values (caller wins) and serialized.
pub(crate) fn encode_body(
    endpoint: Endpoint,
    body: BodyParameters,
) -> Result<Option<String>, PingenError> {
    if body.is_empty() {
        return Ok(None);
    }

    let mut merged = endpoint.default_body();
    merged.extend(body);

    let encoded = serde_json::to_string(&merged)
        .map_err(|e| PingenError::Config(format!("Cannot encode body parameters: {e}")))?;

    if encoded.is_empty() || merged.is_empty() {
        return Ok(None);
    }
    Ok(Some(encoded))
}

/// Convert a serializable options struct into body parameters
///
/// Anything that does not serialize to a JSON object counts as no body.
pub(crate) fn to_body<T: serde::Serialize>(value: &T) -> Result<BodyParameters, PingenError> {
    match serde_json::to_value(value)
        .map_err(|e| PingenError::Config(format!("Cannot encode body parameters: {e}")))?
    {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

/// Read the upload file if one was given
pub(crate) fn read_attachment(path: Option<&Path>) -> Result<Option<FileAttachment>, PingenError> {
    path.map(FileAttachment::read).transpose()
}

/// Join the base URL, the operation path and the token
pub(crate) fn build_url(base_url: &str, path: &str, token: &str) -> Result<reqwest::Url, PingenError> {
    let raw = [base_url.trim_end_matches('/'), path, "token", token].join("/");
    reqwest::Url::parse(&raw).map_err(|e| PingenError::Config(format!("Invalid request URL: {e}")))
}
