//! One method per catalog endpoint
//!
//! Each method binds its arguments into an [`Operation`], builds the body from
//! its typed options, and delegates to [`PingenClient::execute`].

use crate::catalog::{Endpoint, Operation};
use crate::client::PingenClient;
use crate::error::PingenError;
use crate::options::{
    FaxCalculation, LetterSendOptions, ListOptions, PostCalculation, PreviewOptions, SendOptions,
    UploadOptions,
};
use crate::request::{BodyParameters, to_body};
use crate::response::{ApiResponse, BinaryPayload};
use serde_json::Value;
use std::path::Path;

impl PingenClient {
    fn call(
        &self,
        endpoint: Endpoint,
        args: &[String],
        body: BodyParameters,
    ) -> Result<ApiResponse, PingenError> {
        let operation = Operation::new(endpoint, args)?;
        self.execute(&operation, body, None)
    }

    fn call_json(&self, endpoint: Endpoint, id: u64) -> Result<Value, PingenError> {
        self.call(endpoint, &[id.to_string()], BodyParameters::new())?
            .into_json()
    }

    fn list(&self, endpoint: Endpoint, options: &ListOptions) -> Result<Value, PingenError> {
        let operation =
            Operation::new(endpoint, &options.path_args())?.with_filter(&options.filter)?;
        self.execute(&operation, BodyParameters::new(), None)?
            .into_json()
    }

    fn pdf(&self, endpoint: Endpoint, id: u64) -> Result<BinaryPayload, PingenError> {
        self.call(endpoint, &[id.to_string()], BodyParameters::new())?
            .into_binary()
    }

    fn preview(
        &self,
        endpoint: Endpoint,
        id: u64,
        options: PreviewOptions,
    ) -> Result<BinaryPayload, PingenError> {
        let args = [id.to_string(), options.page.to_string(), options.size.to_string()];
        self.call(endpoint, &args, BodyParameters::new())?
            .into_binary()
    }

    // Documents

    /// List uploaded documents
    ///
    /// # Errors
    ///
    /// * `PingenError::Config` - A sort or filter value cannot be sent in the path
    /// * `PingenError::Service` - The service rejected the request
    pub fn document_list(&self, options: &ListOptions) -> Result<Value, PingenError> {
        self.list(Endpoint::DocumentList, options)
    }

    /// Get information about a document
    pub fn document_get(&self, document_id: u64) -> Result<Value, PingenError> {
        self.call_json(Endpoint::DocumentGet, document_id)
    }

    /// Download a document as PDF
    pub fn document_pdf(&self, document_id: u64) -> Result<BinaryPayload, PingenError> {
        self.pdf(Endpoint::DocumentPdf, document_id)
    }

    /// Render one page of a document as PNG
    pub fn document_preview(
        &self,
        document_id: u64,
        options: PreviewOptions,
    ) -> Result<BinaryPayload, PingenError> {
        self.preview(Endpoint::DocumentPreview, document_id, options)
    }

    /// Delete a document
    pub fn document_delete(&self, document_id: u64) -> Result<Value, PingenError> {
        self.call_json(Endpoint::DocumentDelete, document_id)
    }

    /// Send an uploaded document by post
    pub fn document_send(
        &self,
        document_id: u64,
        options: SendOptions,
    ) -> Result<Value, PingenError> {
        self.call(
            Endpoint::DocumentSend,
            &[document_id.to_string()],
            to_body(&options)?,
        )?
        .into_json()
    }

    /// Upload a document, and optionally send it right away
    ///
    /// # Errors
    ///
    /// Returns `PingenError::FileAccess` without contacting the service if
    /// `file` cannot be read.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pingen_client::{Mode, PingenClient, UploadOptions};
    /// use std::path::Path;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = PingenClient::new("your_api_token", Mode::Staging)?;
    /// let uploaded = client.document_upload(Path::new("letter.pdf"), &UploadOptions::default())?;
    /// println!("Document id: {}", uploaded["id"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn document_upload(
        &self,
        file: &Path,
        options: &UploadOptions,
    ) -> Result<Value, PingenError> {
        let operation = Operation::new(Endpoint::DocumentUpload, &[])?;
        self.execute(&operation, to_body(options)?, Some(file))?
            .into_json()
    }

    // Letters

    /// List letters, newest first by default
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pingen_client::{Filter, ListOptions, Mode, PingenClient};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = PingenClient::new("your_api_token", Mode::Staging)?;
    /// let options = ListOptions::default()
    ///     .limit(20)
    ///     .filter(Filter::new().with("status", "pending"));
    /// let letters = client.letter_list(&options)?;
    /// println!("{letters}");
    /// # Ok(())
    /// # }
    /// ```
    pub fn letter_list(&self, options: &ListOptions) -> Result<Value, PingenError> {
        self.list(Endpoint::LetterList, options)
    }

    /// Get a letter with its recipient, content and status
    pub fn letter_get(&self, letter_id: u64) -> Result<Value, PingenError> {
        self.call_json(Endpoint::LetterGet, letter_id)
    }

    /// Create a letter from recipients, place, date, title and content
    pub fn letter_add(&self, letter: BodyParameters) -> Result<Value, PingenError> {
        self.call(Endpoint::LetterAdd, &[], letter)?.into_json()
    }

    /// Replace fields of an existing letter
    pub fn letter_edit(&self, letter_id: u64, letter: BodyParameters) -> Result<Value, PingenError> {
        self.call(Endpoint::LetterEdit, &[letter_id.to_string()], letter)?
            .into_json()
    }

    /// Render one page of a letter as PNG
    pub fn letter_preview(
        &self,
        letter_id: u64,
        options: PreviewOptions,
    ) -> Result<BinaryPayload, PingenError> {
        self.preview(Endpoint::LetterPreview, letter_id, options)
    }

    /// Download a letter as PDF
    pub fn letter_pdf(&self, letter_id: u64) -> Result<BinaryPayload, PingenError> {
        self.pdf(Endpoint::LetterPdf, letter_id)
    }

    /// Send a letter by post
    ///
    /// # Errors
    ///
    /// Returns `PingenError::Service` if the letter is incomplete or the
    /// account has insufficient credit.
    pub fn letter_send(
        &self,
        letter_id: u64,
        options: LetterSendOptions,
    ) -> Result<Value, PingenError> {
        self.call(
            Endpoint::LetterSend,
            &[letter_id.to_string()],
            to_body(&options)?,
        )?
        .into_json()
    }

    /// Delete a letter that has not been sent
    pub fn letter_delete(&self, letter_id: u64) -> Result<Value, PingenError> {
        self.call_json(Endpoint::LetterDelete, letter_id)
    }

    // Post sendings

    /// List post sendings
    pub fn send_list(&self, options: &ListOptions) -> Result<Value, PingenError> {
        self.list(Endpoint::SendList, options)
    }

    /// Get a post sending with its status and price
    pub fn send_get(&self, send_id: u64) -> Result<Value, PingenError> {
        self.call_json(Endpoint::SendGet, send_id)
    }

    /// Send confirmation; the service may answer with a PDF or with JSON
    pub fn send_confirmation(&self, send_id: u64) -> Result<ApiResponse, PingenError> {
        self.call(
            Endpoint::SendConfirmation,
            &[send_id.to_string()],
            BodyParameters::new(),
        )
    }

    /// Cancel a sending that has not been printed yet
    pub fn send_cancel(&self, send_id: u64) -> Result<Value, PingenError> {
        self.call_json(Endpoint::SendCancel, send_id)
    }

    /// Tracking information, where the carrier provides it
    pub fn send_track(&self, send_id: u64) -> Result<Value, PingenError> {
        self.call_json(Endpoint::SendTrack, send_id)
    }

    /// Available speeds for one or more ISO2 country codes
    pub fn send_speed<S: AsRef<str>>(&self, countries: &[S]) -> Result<Value, PingenError> {
        let countries = countries
            .iter()
            .map(|country| country.as_ref())
            .collect::<Vec<&str>>()
            .join(",");
        self.call(Endpoint::SendSpeed, &[countries], BodyParameters::new())?
            .into_json()
    }

    // Queue

    /// List queued uploads and sendings
    pub fn queue_list(&self, options: &ListOptions) -> Result<Value, PingenError> {
        self.list(Endpoint::QueueList, options)
    }

    /// Get a queue entry
    pub fn queue_get(&self, queue_id: u64) -> Result<Value, PingenError> {
        self.call_json(Endpoint::QueueGet, queue_id)
    }

    /// Cancel a pending queue entry
    pub fn queue_cancel(&self, queue_id: u64, body: BodyParameters) -> Result<Value, PingenError> {
        self.call(Endpoint::QueueCancel, &[queue_id.to_string()], body)?
            .into_json()
    }

    // Contacts

    /// List contacts; use [`ListOptions::contacts`] for the id-sorted default
    pub fn contact_list(&self, options: &ListOptions) -> Result<Value, PingenError> {
        self.list(Endpoint::ContactList, options)
    }

    /// Get a contact
    pub fn contact_get(&self, contact_id: u64) -> Result<Value, PingenError> {
        self.call_json(Endpoint::ContactGet, contact_id)
    }

    /// Create a contact
    ///
    /// # Errors
    ///
    /// Returns `PingenError::Service` if required address fields are missing.
    pub fn contact_add(&self, contact: BodyParameters) -> Result<Value, PingenError> {
        self.call(Endpoint::ContactAdd, &[], contact)?.into_json()
    }

    /// Replace fields of an existing contact
    pub fn contact_edit(
        &self,
        contact_id: u64,
        contact: BodyParameters,
    ) -> Result<Value, PingenError> {
        self.call(Endpoint::ContactEdit, &[contact_id.to_string()], contact)?
            .into_json()
    }

    /// Delete a contact
    pub fn contact_delete(&self, contact_id: u64) -> Result<Value, PingenError> {
        self.call_json(Endpoint::ContactDelete, contact_id)
    }

    // Calculators

    /// Price of a fax sending; the number is percent-encoded into the path
    pub fn calculator_fax(&self, fax: &FaxCalculation) -> Result<Value, PingenError> {
        self.call(Endpoint::CalculatorFax, &fax.path_args(), BodyParameters::new())?
            .into_json()
    }

    /// Price of a postal sending
    pub fn calculator_post(&self, post: &PostCalculation) -> Result<Value, PingenError> {
        self.call(Endpoint::CalculatorPost, &post.path_args(), BodyParameters::new())?
            .into_json()
    }

    // Account

    /// Current credit balance
    pub fn account_credit(&self) -> Result<Value, PingenError> {
        self.call(Endpoint::AccountCredit, &[], BodyParameters::new())?
            .into_json()
    }

    /// Current plan
    pub fn account_plan(&self) -> Result<Value, PingenError> {
        self.call(Endpoint::AccountPlan, &[], BodyParameters::new())?
            .into_json()
    }
}
