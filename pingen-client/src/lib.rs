//! Pingen API Client Library
//!
//! A blocking client for the Pingen letter-mailing API: upload documents, send
//! them by post, manage letters, contacts and the send queue, and query prices
//! and account state.
//!
//! # Features
//!
//! - One method per API endpoint, backed by a static endpoint catalog
//! - Typed options for speeds, print colors, list paging and filters
//! - PDF and PNG responses returned as raw bytes, JSON responses as
//!   `serde_json::Value`
//! - Service errors surfaced as `PingenError::Service` with the service's code
//! - Secure TLS using rustls, certificate validation on by default
//! - The API token is zeroized on drop and never printed
//!
//! # Example
//!
//! ```no_run
//! use pingen_client::{Mode, PingenClient, SendOptions, Speed, UploadOptions};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PingenClient::new("your_api_token", Mode::Staging)?;
//!
//! // Upload a document
//! let uploaded = client.document_upload(Path::new("letter.pdf"), &UploadOptions::default())?;
//! let document_id = uploaded["id"].as_u64().unwrap_or_default();
//!
//! // Send it by economy mail
//! let options = SendOptions {
//!     speed: Speed::Economy,
//!     ..SendOptions::default()
//! };
//! let sent = client.document_send(document_id, options)?;
//!
//! // Check the status of the sending
//! let send_id = sent["id"].as_u64().unwrap_or_default();
//! let status = client.send_get(send_id)?;
//! println!("Status: {}", status["item"]["status"]);
//! # Ok(())
//! # }
//! ```

mod catalog;
mod client;
mod error;
mod mode;
mod operations;
mod options;
mod request;
mod response;

pub use catalog::{Endpoint, Operation, Segment};
pub use client::{BASE_URL_ENV, MODE_ENV, PingenClient, PingenClientBuilder, TOKEN_ENV};
pub use error::PingenError;
pub use mode::Mode;
pub use options::{
    Color, FaxCalculation, Filter, LetterSendOptions, ListOptions, PostCalculation,
    PreviewOptions, SendOptions, Speed, UploadOptions,
};
pub use request::{BodyParameters, FileAttachment, PreparedRequest};
pub use response::{ApiResponse, BinaryKind, BinaryPayload};
