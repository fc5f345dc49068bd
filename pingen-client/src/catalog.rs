//! Static endpoint catalog
//!
//! Every remote operation is an [`Endpoint`] with a path template such as
//! `document/preview/id/{id}/page/{page}/size/{size}` and an optional default
//! body. Templates are bound positionally into an [`Operation`], which is
//! what the client executes.

use crate::error::PingenError;
use crate::options::Filter;
use serde_json::{Map, Value, json};
use std::fmt;

/// One piece of a path template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Fixed path segment
    Literal(&'static str),
    /// Named parameter bound at call time
    Param(&'static str),
}

impl Segment {
    fn parse(raw: &'static str) -> Self {
        match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => Segment::Param(name),
            None => Segment::Literal(raw),
        }
    }
}

/// A logical remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    DocumentList,
    DocumentGet,
    DocumentPdf,
    DocumentPreview,
    DocumentDelete,
    DocumentSend,
    DocumentUpload,
    LetterList,
    LetterGet,
    LetterAdd,
    LetterEdit,
    LetterPreview,
    LetterPdf,
    LetterSend,
    LetterDelete,
    SendList,
    SendGet,
    SendConfirmation,
    SendCancel,
    SendTrack,
    SendSpeed,
    QueueList,
    QueueGet,
    QueueCancel,
    ContactList,
    ContactGet,
    ContactAdd,
    ContactEdit,
    ContactDelete,
    CalculatorFax,
    CalculatorPost,
    AccountCredit,
    AccountPlan,
}

impl Endpoint {
    /// Every endpoint in the catalog
    pub const ALL: [Endpoint; 33] = [
        Endpoint::DocumentList,
        Endpoint::DocumentGet,
        Endpoint::DocumentPdf,
        Endpoint::DocumentPreview,
        Endpoint::DocumentDelete,
        Endpoint::DocumentSend,
        Endpoint::DocumentUpload,
        Endpoint::LetterList,
        Endpoint::LetterGet,
        Endpoint::LetterAdd,
        Endpoint::LetterEdit,
        Endpoint::LetterPreview,
        Endpoint::LetterPdf,
        Endpoint::LetterSend,
        Endpoint::LetterDelete,
        Endpoint::SendList,
        Endpoint::SendGet,
        Endpoint::SendConfirmation,
        Endpoint::SendCancel,
        Endpoint::SendTrack,
        Endpoint::SendSpeed,
        Endpoint::QueueList,
        Endpoint::QueueGet,
        Endpoint::QueueCancel,
        Endpoint::ContactList,
        Endpoint::ContactGet,
        Endpoint::ContactAdd,
        Endpoint::ContactEdit,
        Endpoint::ContactDelete,
        Endpoint::CalculatorFax,
        Endpoint::CalculatorPost,
        Endpoint::AccountCredit,
        Endpoint::AccountPlan,
    ];

    /// Path template, `{name}` marks a parameter
    pub const fn template(self) -> &'static str {
        match self {
            Endpoint::DocumentList => "document/list/limit/{limit}/page/{page}/sort/{sort}/sorttype/{sort_type}",
            Endpoint::DocumentGet => "document/get/id/{id}",
            Endpoint::DocumentPdf => "document/pdf/id/{id}",
            Endpoint::DocumentPreview => "document/preview/id/{id}/page/{page}/size/{size}",
            Endpoint::DocumentDelete => "document/delete/id/{id}",
            Endpoint::DocumentSend => "document/send/id/{id}",
            Endpoint::DocumentUpload => "document/upload",
            Endpoint::LetterList => "letter/list/limit/{limit}/page/{page}/sort/{sort}/sorttype/{sort_type}",
            Endpoint::LetterGet => "letter/get/id/{id}",
            Endpoint::LetterAdd => "letter/add",
            Endpoint::LetterEdit => "letter/edit/id/{id}",
            Endpoint::LetterPreview => "letter/preview/id/{id}/page/{page}/size/{size}",
            Endpoint::LetterPdf => "letter/pdf/id/{id}",
            Endpoint::LetterSend => "letter/send/id/{id}",
            Endpoint::LetterDelete => "letter/delete/id/{id}",
            Endpoint::SendList => "send/list/limit/{limit}/page/{page}/sort/{sort}/sorttype/{sort_type}",
            Endpoint::SendGet => "send/get/id/{id}",
            Endpoint::SendConfirmation => "send/confirmation/id/{id}",
            Endpoint::SendCancel => "send/cancel/id/{id}",
            Endpoint::SendTrack => "send/track/id/{id}",
            Endpoint::SendSpeed => "send/speed/countries/{countries}",
            Endpoint::QueueList => "queue/list/limit/{limit}/page/{page}/sort/{sort}/sorttype/{sort_type}",
            Endpoint::QueueGet => "queue/get/id/{id}",
            Endpoint::QueueCancel => "queue/cancel/id/{id}",
            Endpoint::ContactList => "contact/list/limit/{limit}/page/{page}/sort/{sort}/sorttype/{sort_type}",
            Endpoint::ContactGet => "contact/get/id/{id}",
            Endpoint::ContactAdd => "contact/add",
            Endpoint::ContactEdit => "contact/edit/id/{id}",
            Endpoint::ContactDelete => "contact/delete/id/{id}",
            Endpoint::CalculatorFax => "calculator/fax/number/{number}/pages/{pages}/documents/{documents}/currency/{currency}",
            Endpoint::CalculatorPost => "calculator/get/country/{country}/print/{print}/speed/{speed}/plan/{plan}/documents/{documents}/currency/{currency}/pages_normal/{pages_normal}/pages_esr/{pages_esr}",
            Endpoint::AccountCredit => "account/credit",
            Endpoint::AccountPlan => "account/plan",
        }
    }

    /// Template split into literal and parameter segments
    pub fn segments(self) -> impl Iterator<Item = Segment> {
        self.template().split('/').map(Segment::parse)
    }

    /// Names of the parameters, in binding order
    pub fn params(self) -> impl Iterator<Item = &'static str> {
        self.segments().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name),
            Segment::Literal(_) => None,
        })
    }

    /// Whether the endpoint takes a trailing filter
    pub fn accepts_filter(self) -> bool {
        matches!(
            self,
            Endpoint::DocumentList
                | Endpoint::LetterList
                | Endpoint::SendList
                | Endpoint::QueueList
                | Endpoint::ContactList
        )
    }

    /// Body parameters the service assumes when the caller sends any body
    pub fn default_body(self) -> Map<String, Value> {
        let defaults = match self {
            Endpoint::DocumentSend | Endpoint::LetterSend => json!({ "speed": 1, "color": 1 }),
            Endpoint::DocumentUpload => json!({ "send": false, "speed": 1, "color": 1 }),
            _ => return Map::new(),
        };
        match defaults {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template())
    }
}

/// An endpoint with its path parameters bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    endpoint: Endpoint,
    path: String,
}

impl Operation {
    /// Bind `args` to the endpoint's parameters in declaration order
    ///
    /// Values are percent-encoded, except for `/`, `:`, `;` and `,`, so the
    /// service decodes them back to exactly what was given.
    ///
    /// # Errors
    ///
    /// Returns `PingenError::Config` if the number of arguments does not match
    /// the number of template parameters, or if a value contains a `.` or `..`
    /// path segment.
    ///
    /// # Example
    ///
    /// ```
    /// use pingen_client::{Endpoint, Operation};
    ///
    /// let op = Operation::new(Endpoint::DocumentGet, &["42".to_string()]).unwrap();
    /// assert_eq!(op.path(), "document/get/id/42");
    /// ```
    pub fn new(endpoint: Endpoint, args: &[String]) -> Result<Self, PingenError> {
        let expected = endpoint.params().count();
        if args.len() != expected {
            return Err(PingenError::Config(format!(
                "{endpoint} expects {expected} argument(s), got {}",
                args.len()
            )));
        }

        let mut args = args.iter();
        let path = endpoint
            .segments()
            .map(|segment| match segment {
                Segment::Literal(text) => Ok(text.to_string()),
                // Arity was checked above
                Segment::Param(_) => escape_value(args.next().map(String::as_str).unwrap_or_default()),
            })
            .collect::<Result<Vec<_>, _>>()?
            .join("/");

        Ok(Self { endpoint, path })
    }

    /// Append `/filter/<encoded>` when the filter is non-empty
    ///
    /// The encoded filter is escaped like any other bound value.
    ///
    /// # Errors
    ///
    /// Returns `PingenError::Config` if a filter value contains a `.` or `..`
    /// path segment.
    pub fn with_filter(mut self, filter: &Filter) -> Result<Self, PingenError> {
        if !filter.is_empty() {
            self.path.push_str("/filter/");
            self.path.push_str(&escape_value(&filter.encode())?);
        }
        Ok(self)
    }

    /// The endpoint this operation targets
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Resolved path relative to the API base URL
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Kept verbatim in bound values: path separators plus the list and filter syntax
const KEPT: &[char] = &['/', ':', ';', ','];

/// Percent-encode a bound value so it cannot move the token out of the path
fn escape_value(value: &str) -> Result<String, PingenError> {
    // URL parsing collapses dot segments, escaped or not
    if value
        .split('/')
        .any(|segment| !segment.is_empty() && segment.chars().all(|c| c == '.'))
    {
        return Err(PingenError::Config(format!(
            "{value:?} cannot be sent as a path segment"
        )));
    }

    let mut escaped = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(at) = rest.find(KEPT) {
        escaped.push_str(&urlencoding::encode(&rest[..at]));
        escaped.push_str(&rest[at..at + 1]);
        rest = &rest[at + 1..];
    }
    escaped.push_str(&urlencoding::encode(rest));
    Ok(escaped)
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_segments_split_literals_and_params() {
        let segments: Vec<_> = Endpoint::DocumentPreview.segments().collect();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("document"),
                Segment::Literal("preview"),
                Segment::Literal("id"),
                Segment::Param("id"),
                Segment::Literal("page"),
                Segment::Param("page"),
                Segment::Literal("size"),
                Segment::Param("size"),
            ]
        );
    }

    #[test]
    fn test_bind_list_template() {
        let op = Operation::new(Endpoint::DocumentList, &args(&["10", "2", "date", "asc"])).unwrap();
        assert_eq!(op.path(), "document/list/limit/10/page/2/sort/date/sorttype/asc");
        assert_eq!(op.endpoint(), Endpoint::DocumentList);
    }

    #[test]
    fn test_bind_without_params() {
        let op = Operation::new(Endpoint::AccountPlan, &[]).unwrap();
        assert_eq!(op.path(), "account/plan");
    }

    #[test]
    fn test_bind_wrong_arity_is_config_error() {
        let result = Operation::new(Endpoint::DocumentGet, &[]);
        assert!(matches!(result, Err(PingenError::Config(_))));

        let result = Operation::new(Endpoint::AccountCredit, &args(&["1"]));
        assert!(matches!(result, Err(PingenError::Config(_))));
    }

    #[test]
    fn test_filter_suffix() {
        let filter = Filter::new().with("status", "pending");
        let op = Operation::new(Endpoint::LetterList, &args(&["0", "1", "date", "desc"]))
            .unwrap()
            .with_filter(&filter)
            .unwrap();
        assert_eq!(
            op.path(),
            "letter/list/limit/0/page/1/sort/date/sorttype/desc/filter/status:pending"
        );
    }

    #[test]
    fn test_empty_filter_appends_nothing() {
        let op = Operation::new(Endpoint::QueueList, &args(&["0", "1", "date", "desc"]))
            .unwrap()
            .with_filter(&Filter::new())
            .unwrap();
        assert_eq!(op.path(), "queue/list/limit/0/page/1/sort/date/sorttype/desc");
    }

    #[test]
    fn test_bound_values_are_escaped() {
        let op = Operation::new(Endpoint::LetterList, &args(&["0", "1", "date?x", "desc"])).unwrap();
        assert_eq!(op.path(), "letter/list/limit/0/page/1/sort/date%3Fx/sorttype/desc");

        let op = Operation::new(Endpoint::SendSpeed, &args(&["CH,DE"])).unwrap();
        assert_eq!(op.path(), "send/speed/countries/CH,DE");

        let op = Operation::new(Endpoint::CalculatorFax, &args(&["+41 44 123", "1", "1", "CHF"])).unwrap();
        assert!(op.path().starts_with("calculator/fax/number/%2B41%2044%20123/pages/"));

        let op = Operation::new(Endpoint::DocumentGet, &args(&["100%"])).unwrap();
        assert_eq!(op.path(), "document/get/id/100%25");
    }

    #[test]
    fn test_filter_values_are_escaped() {
        let filter = Filter::new().with("subject", "invoice #12").with("status", "sent");
        let op = Operation::new(Endpoint::LetterList, &args(&["0", "1", "date", "desc"]))
            .unwrap()
            .with_filter(&filter)
            .unwrap();
        assert!(op.path().ends_with("/filter/subject:invoice%20%2312;status:sent"));
    }

    #[test]
    fn test_dot_segments_are_rejected() {
        let result = Operation::new(Endpoint::DocumentList, &args(&["0", "1", "..", "desc"]));
        assert!(matches!(result, Err(PingenError::Config(_))));

        let result = Operation::new(Endpoint::DocumentGet, &args(&["a/./b"]));
        assert!(matches!(result, Err(PingenError::Config(_))));

        let result = Operation::new(Endpoint::DocumentList, &args(&["0", "1", "date", "desc"]))
            .unwrap()
            .with_filter(&Filter::new().with("path", "x/.."));
        assert!(matches!(result, Err(PingenError::Config(_))));

        // Dots inside a segment are fine
        assert!(Operation::new(Endpoint::DocumentGet, &args(&["v1.2"])).is_ok());
    }

    #[test]
    fn test_default_bodies() {
        assert_eq!(
            Value::Object(Endpoint::DocumentSend.default_body()),
            json!({ "speed": 1, "color": 1 })
        );
        assert_eq!(
            Value::Object(Endpoint::DocumentUpload.default_body()),
            json!({ "send": false, "speed": 1, "color": 1 })
        );
        assert!(Endpoint::AccountPlan.default_body().is_empty());
    }

    #[test]
    fn test_only_list_endpoints_accept_filters() {
        for endpoint in Endpoint::ALL {
            assert_eq!(
                endpoint.accepts_filter(),
                endpoint.template().contains("/list/"),
                "{endpoint}"
            );
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        // Bound paths keep every literal of the template, in order
        #[test]
        fn prop_bound_path_keeps_literals_in_order(
            endpoint in prop::sample::select(Endpoint::ALL.to_vec()),
            value in "[a-z0-9]{1,8}",
        ) {
            let bound: Vec<String> = endpoint.params().map(|_| value.clone()).collect();
            let op = Operation::new(endpoint, &bound).unwrap();

            let parts: Vec<&str> = op.path().split('/').collect();
            let expected: Vec<&str> = endpoint
                .segments()
                .map(|segment| match segment {
                    Segment::Literal(text) => text,
                    Segment::Param(_) => value.as_str(),
                })
                .collect();
            prop_assert_eq!(parts, expected);
        }
    }
}
