//! Pingen HTTP client implementation

use crate::catalog::Operation;
use crate::error::PingenError;
use crate::mode::Mode;
use crate::request::{self, BodyParameters, PreparedRequest};
use crate::response::ApiResponse;
use reqwest::blocking::multipart::{Form, Part};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use zeroize::Zeroizing;

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "PINGEN_TOKEN";
/// Environment variable selecting the mode (`production` or `staging`)
pub const MODE_ENV: &str = "PINGEN_MODE";
/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "PINGEN_BASE_URL";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The main Pingen API client
///
/// Every call is a single blocking POST to
/// `{base_url}/{operation path}/token/{token}`. The client holds no per-call
/// state and can be cloned or shared between threads freely.
///
/// # Example
///
/// ```no_run
/// use pingen_client::{Mode, PingenClient};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PingenClient::new("your_api_token", Mode::Staging)?;
///
/// let plan = client.account_plan()?;
/// println!("Plan: {}", plan["plan"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PingenClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
    token: Zeroizing<String>,
}

impl fmt::Debug for PingenClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PingenClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

impl PingenClient {
    /// Create a client for the given token and mode with default settings
    ///
    /// # Errors
    ///
    /// Returns `PingenError::ClientInit` if the HTTP client cannot be initialized.
    pub fn new(token: impl Into<String>, mode: Mode) -> Result<Self, PingenError> {
        Self::builder(token).mode(mode).build()
    }

    /// Create a builder for configuring the client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pingen_client::{Mode, PingenClient};
    /// use std::time::Duration;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = PingenClient::builder("your_api_token")
    ///     .mode(Mode::Staging)
    ///     .timeout(Duration::from_secs(120))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder(token: impl Into<String>) -> PingenClientBuilder {
        PingenClientBuilder::new(token)
    }

    /// Create a client from `PINGEN_TOKEN`, `PINGEN_MODE` and `PINGEN_BASE_URL`
    ///
    /// # Errors
    ///
    /// Returns `PingenError::Config` if the token is missing or the mode or
    /// base URL cannot be parsed.
    pub fn from_env() -> Result<Self, PingenError> {
        PingenClientBuilder::from_env_with(|key| std::env::var(key).ok())?.build()
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Assemble the request for an operation without sending it
    ///
    /// The upload file, if any, is read here, so a missing file fails before
    /// any network I/O.
    ///
    /// # Errors
    ///
    /// * `PingenError::FileAccess` - The upload file cannot be read
    /// * `PingenError::Config` - The URL or body cannot be encoded
    pub fn prepare(
        &self,
        operation: &Operation,
        body: BodyParameters,
        file: Option<&Path>,
    ) -> Result<PreparedRequest, PingenError> {
        let file = request::read_attachment(file)?;
        let data = request::encode_body(operation.endpoint(), body)?;
        let url = request::build_url(self.base_url.as_str(), operation.path(), &self.token)?;

        Ok(PreparedRequest { url, data, file })
    }

    /// Send a prepared request and classify the response
    ///
    /// # Errors
    ///
    /// * `PingenError::Transport` - Network, TLS or timeout failure
    /// * `PingenError::MalformedResponse` - Body is neither PDF/PNG nor JSON
    /// * `PingenError::Service` - The service reported an error
    pub fn send(&self, request: PreparedRequest) -> Result<ApiResponse, PingenError> {
        let PreparedRequest { url, data, file } = request;
        let mut builder = self.client.post(url);

        if data.is_some() || file.is_some() {
            let mut form = Form::new();
            if let Some(data) = data {
                form = form.text("data", data);
            }
            if let Some(file) = file {
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.mime)?;
                form = form.part("file", part);
            }
            builder = builder.multipart(form);
        }

        let response = builder.send()?;
        let status = response.status();
        let body = response.bytes()?.to_vec();
        debug!(%status, bytes = body.len(), "pingen response received");

        ApiResponse::classify(body)
    }

    /// Execute an operation: build the request, send it, classify the response
    ///
    /// `body` is merged over the endpoint's default body; an empty map sends
    /// no `data` field at all.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pingen_client::{Endpoint, Operation, PingenClient, Mode};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = PingenClient::new("your_api_token", Mode::Production)?;
    /// let op = Operation::new(Endpoint::AccountCredit, &[])?;
    /// let credit = client.execute(&op, Default::default(), None)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn execute(
        &self,
        operation: &Operation,
        body: BodyParameters,
        file: Option<&Path>,
    ) -> Result<ApiResponse, PingenError> {
        let request = self.prepare(operation, body, file)?;
        debug!(
            operation = %operation,
            data = request.data.is_some(),
            file = request.file.is_some(),
            "sending pingen request"
        );
        self.send(request)
    }
}

/// Builder for configuring a Pingen client
///
/// Connect and total timeouts default to 3 and 60 seconds. TLS certificates
/// are always validated unless [`danger_accept_invalid_certs`] is called.
///
/// [`danger_accept_invalid_certs`]: PingenClientBuilder::danger_accept_invalid_certs
pub struct PingenClientBuilder {
    token: Zeroizing<String>,
    mode: Mode,
    base_url: Option<reqwest::Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
    connect_timeout: Duration,
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl fmt::Debug for PingenClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PingenClientBuilder")
            .field("mode", &self.mode)
            .field("base_url", &self.base_url)
            .field("connect_timeout", &self.connect_timeout)
            .field("timeout", &self.timeout)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish_non_exhaustive()
    }
}

impl PingenClientBuilder {
    /// Create a new builder for production with default settings
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Zeroizing::new(token.into()),
            mode: Mode::Production,
            base_url: None,
            client_builder: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }

    /// Configure a builder from an environment lookup
    fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PingenError> {
        let token = lookup(TOKEN_ENV)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| PingenError::Config(format!("{TOKEN_ENV} is not set")))?;

        let mut builder = Self::new(token);
        if let Some(mode) = lookup(MODE_ENV) {
            builder = builder.mode(mode.parse()?);
        }
        if let Some(url) = lookup(BASE_URL_ENV) {
            builder = builder.base_url(url.as_str())?;
        }
        Ok(builder)
    }

    /// Select production or staging
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set a custom base URL, overriding the mode's URL
    ///
    /// Useful for testing against mock servers.
    ///
    /// # Errors
    ///
    /// Returns `PingenError::Config` if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, PingenError> {
        let url = url
            .into_url()
            .map_err(|e| PingenError::Config(format!("Invalid base URL: {e}")))?;
        self.base_url = Some(url);
        Ok(self)
    }

    /// Set a custom HTTP client builder (proxies, headers, ...)
    ///
    /// Timeouts configured on this builder are always applied on top.
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Time allowed to establish a connection
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Time allowed for the whole request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disable TLS certificate validation
    ///
    /// Only for environments with a broken CA bundle. Never enable this
    /// against the production API.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Build the client with the configured settings
    ///
    /// # Errors
    ///
    /// Returns `PingenError::ClientInit` if the HTTP client cannot be initialized.
    pub fn build(self) -> Result<PingenClient, PingenError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse(self.mode.base_url())
                .map_err(|e| PingenError::Config(format!("Invalid base URL: {e}")))?,
        };

        let mut builder = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls())
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout);
        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| PingenError::ClientInit(e.to_string()))?;

        Ok(PingenClient {
            client,
            base_url,
            token: self.token,
        })
    }
}
