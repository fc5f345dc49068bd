//! Response classification

use crate::error::PingenError;
use serde_json::Value;

/// Kind of raw document payload returned by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryKind {
    Pdf,
    Png,
}

impl BinaryKind {
    /// MIME type of the payload
    pub const fn content_type(self) -> &'static str {
        match self {
            BinaryKind::Pdf => "application/pdf",
            BinaryKind::Png => "image/png",
        }
    }

    /// Detect the payload kind from its leading bytes
    pub fn sniff(body: &[u8]) -> Option<Self> {
        if body.starts_with(b"%PDF") {
            Some(BinaryKind::Pdf)
        } else if body.get(1..4) == Some(b"PNG".as_slice()) {
            Some(BinaryKind::Png)
        } else {
            None
        }
    }
}

/// Raw document bytes, returned unmodified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPayload {
    pub kind: BinaryKind,
    pub bytes: Vec<u8>,
}

impl BinaryPayload {
    /// MIME type matching the detected signature
    pub fn content_type(&self) -> &'static str {
        self.kind.content_type()
    }
}

/// Successful result of an API call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// A PDF or PNG document
    Binary(BinaryPayload),
    /// The decoded JSON body, including its `error: false` marker
    Json(Value),
}

impl ApiResponse {
    /// Classify a raw response body
    ///
    /// Binary signatures win over everything else; otherwise the body must be
    /// JSON, and a truthy `error` field turns into `PingenError::Service`.
    ///
    /// # Errors
    ///
    /// * `PingenError::MalformedResponse` - Body is neither PDF/PNG nor JSON
    /// * `PingenError::Service` - The service flagged the call as failed
    pub fn classify(body: Vec<u8>) -> Result<Self, PingenError> {
        if let Some(kind) = BinaryKind::sniff(&body) {
            return Ok(ApiResponse::Binary(BinaryPayload { kind, bytes: body }));
        }

        let value: Value = serde_json::from_slice(&body)
            .map_err(|e| PingenError::MalformedResponse(e.to_string()))?;

        if value.get("error").is_some_and(is_truthy) {
            return Err(PingenError::Service {
                code: value.get("errorcode").and_then(error_code).unwrap_or(0),
                message: value
                    .get("errormessage")
                    .map(|m| match m {
                        Value::String(s) => s.clone(),
                        Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .unwrap_or_default(),
            });
        }

        Ok(ApiResponse::Json(value))
    }

    /// The JSON body, or an error if the service sent a document instead
    pub fn into_json(self) -> Result<Value, PingenError> {
        match self {
            ApiResponse::Json(value) => Ok(value),
            ApiResponse::Binary(payload) => Err(PingenError::MalformedResponse(format!(
                "expected JSON, got {} payload",
                payload.content_type()
            ))),
        }
    }

    /// The document payload, or an error if the service answered with JSON
    pub fn into_binary(self) -> Result<BinaryPayload, PingenError> {
        match self {
            ApiResponse::Binary(payload) => Ok(payload),
            ApiResponse::Json(_) => Err(PingenError::MalformedResponse(
                "expected a PDF or PNG payload, got JSON".to_string(),
            )),
        }
    }
}

/// Loose truthiness, the service is not consistent about the `error` type
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn error_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
