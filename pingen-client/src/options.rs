//! Typed options for the per-operation client methods

use serde::Serialize;
use serde_json::{Map, Value};

/// Delivery speed of a letter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Speed {
    /// Priority mail (A-Post)
    #[default]
    Priority,
    /// Economy mail (B-Post)
    Economy,
    /// Registered mail (Switzerland only)
    Registered,
    /// Priority plus (Switzerland only)
    PriorityPlus,
    /// Slow economy (Switzerland only)
    SlowEconomy,
}

impl Speed {
    /// Numeric code used on the wire
    pub const fn code(self) -> u8 {
        match self {
            Speed::Priority => 1,
            Speed::Economy => 2,
            Speed::Registered => 3,
            Speed::PriorityPlus => 4,
            Speed::SlowEconomy => 5,
        }
    }
}

impl Serialize for Speed {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Print color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Color {
    BlackWhite,
    #[default]
    Color,
}

impl Color {
    /// Numeric code used on the wire
    pub const fn code(self) -> u8 {
        match self {
            Color::BlackWhite => 0,
            Color::Color => 1,
        }
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Ordered set of list filters, encoded as `field1:value1;field2:value2`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    entries: Vec<(String, String)>,
}

impl Filter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition, replacing an earlier value for the same field
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Add a condition in place, replacing an earlier value for the same field
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    /// Whether no conditions were added
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as `field:value` pairs joined by `;`
    ///
    /// The text is not escaped here; [`Operation::with_filter`] escapes it
    /// when appending it to a path.
    ///
    /// [`Operation::with_filter`]: crate::Operation::with_filter
    pub fn encode(&self) -> String {
        self.entries
            .iter()
            .map(|(field, value)| format!("{field}:{value}"))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filter = Filter::new();
        for (field, value) in iter {
            filter.insert(field, value);
        }
        filter
    }
}

/// Paging, sorting and filtering for list operations
///
/// Sort fields and directions are passed through to the service unchecked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Maximum number of results, 0 for no limit
    pub limit: u32,
    /// Page to return when limiting
    pub page: u32,
    /// Field to sort by
    pub sort: String,
    /// Sort direction (`asc` or `desc`)
    pub sort_type: String,
    /// Conditions appended as `/filter/...`, omitted when empty
    pub filter: Filter,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: 0,
            page: 1,
            sort: "date".to_string(),
            sort_type: "desc".to_string(),
            filter: Filter::new(),
        }
    }
}

impl ListOptions {
    /// Defaults for contact lists, which sort by id
    pub fn contacts() -> Self {
        Self {
            sort: "id".to_string(),
            ..Self::default()
        }
    }

    /// Set the maximum number of results
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the page to return
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the sort field and direction
    pub fn sort(mut self, sort: impl Into<String>, sort_type: impl Into<String>) -> Self {
        self.sort = sort.into();
        self.sort_type = sort_type.into();
        self
    }

    /// Replace the filter
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub(crate) fn path_args(&self) -> Vec<String> {
        vec![
            self.limit.to_string(),
            self.page.to_string(),
            self.sort.clone(),
            self.sort_type.clone(),
        ]
    }
}

/// Which page of a document to render, and how wide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Page number, starting at 1
    pub page: u32,
    /// Width of the preview in pixels
    pub size: u32,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self { page: 1, size: 595 }
    }
}

/// Options for sending an uploaded document
///
/// Without an envelope the body carries no `envelope` key at all, not
/// `"envelope": null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SendOptions {
    pub speed: Speed,
    pub color: Color,
    /// Envelope id, omitted when `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope: Option<u64>,
}

/// Options for sending a letter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LetterSendOptions {
    pub speed: Speed,
    pub color: Color,
}

/// Options for uploading a document, optionally sending it right away
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UploadOptions {
    /// Send the document immediately after upload
    pub send: bool,
    pub speed: Speed,
    pub color: Color,
    /// Envelope id; the key is left out when `None`, not sent as `null`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope: Option<u64>,
    /// Template values, only sent when non-empty
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub values: Map<String, Value>,
}

/// Parameters for a fax price calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaxCalculation {
    /// Fax number including the leading `+` and country code
    pub number: String,
    /// Pages per document
    pub pages: u32,
    pub documents: u32,
    pub currency: String,
}

impl FaxCalculation {
    /// One document of one page, priced in CHF
    ///
    /// # Example
    ///
    /// ```
    /// use pingen_client::FaxCalculation;
    ///
    /// let fax = FaxCalculation::new("+41441234567");
    /// assert_eq!(fax.pages, 1);
    /// assert_eq!(fax.currency, "CHF");
    /// ```
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            pages: 1,
            documents: 1,
            currency: "CHF".to_string(),
        }
    }

    pub(crate) fn path_args(&self) -> Vec<String> {
        vec![
            self.number.clone(),
            self.pages.to_string(),
            self.documents.to_string(),
            self.currency.clone(),
        ]
    }
}

/// Parameters for a postage price calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCalculation {
    /// ISO2 destination country
    pub country: String,
    pub speed: Speed,
    pub print: Color,
    pub documents: u32,
    pub pages_normal: u32,
    /// Pages with payment slips
    pub pages_esr: u32,
    /// Pricing plan id of the account
    pub plan: u32,
    /// ISO currency code of the returned price
    pub currency: String,
}

impl Default for PostCalculation {
    fn default() -> Self {
        Self {
            country: "CH".to_string(),
            speed: Speed::Priority,
            print: Color::Color,
            documents: 1,
            pages_normal: 1,
            pages_esr: 0,
            plan: 1,
            currency: "CHF".to_string(),
        }
    }
}

impl PostCalculation {
    pub(crate) fn path_args(&self) -> Vec<String> {
        vec![
            self.country.clone(),
            self.print.code().to_string(),
            self.speed.code().to_string(),
            self.plan.to_string(),
            self.documents.to_string(),
            self.currency.clone(),
            self.pages_normal.to_string(),
            self.pages_esr.to_string(),
        ]
    }
}
