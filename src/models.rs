// Core data models and traits for req2postman
// Requests serialize directly into Postman Collection v2.1 item records

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::Result;

/// Method used when a source does not name one
pub const DEFAULT_METHOD: &str = "GET";

/// One query parameter; a parameter without `=` carries an empty value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
}

impl QueryParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Decomposed request URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestUrl {
    pub raw: String,
    pub protocol: String,
    /// Host split on `.`
    #[serde(rename = "host", default)]
    pub host_labels: Vec<String>,
    /// Non-empty path segments
    #[serde(rename = "path", default)]
    pub path_segments: Vec<String>,
    #[serde(rename = "query", default, skip_serializing_if = "Vec::is_empty")]
    pub query_params: Vec<QueryParam>,
}

impl RequestUrl {
    /// Last path segment, the human-readable resource name
    pub fn resource_name(&self) -> Option<&str> {
        self.path_segments.last().map(String::as_str)
    }
}

/// A request header; duplicates stay separate entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
    #[serde(rename = "type", default = "Header::text_type")]
    pub kind: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            kind: Self::text_type(),
        }
    }

    fn text_type() -> String {
        "text".to_string()
    }
}

/// Body language hint attached for downstream tooling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Json,
    Xml,
    Javascript,
    Html,
    Text,
    #[default]
    Unset,
}

impl Language {
    pub fn is_unset(&self) -> bool {
        matches!(self, Language::Unset)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Json => write!(f, "json"),
            Language::Xml => write!(f, "xml"),
            Language::Javascript => write!(f, "javascript"),
            Language::Html => write!(f, "html"),
            Language::Text => write!(f, "text"),
            Language::Unset => write!(f, "unset"),
        }
    }
}

/// Raw request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BodyRecord", from = "BodyRecord")]
pub struct RequestBody {
    pub mode: String,
    pub raw: String,
    pub language: Language,
}

impl RequestBody {
    pub fn raw(content: impl Into<String>, language: Language) -> Self {
        Self {
            mode: "raw".to_string(),
            raw: content.into(),
            language,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BodyRecord {
    mode: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<BodyOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BodyOptions {
    raw: RawOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawOptions {
    language: Language,
}

impl From<RequestBody> for BodyRecord {
    fn from(body: RequestBody) -> Self {
        let options = (!body.language.is_unset()).then(|| BodyOptions {
            raw: RawOptions {
                language: body.language,
            },
        });
        Self {
            mode: body.mode,
            raw: body.raw,
            options,
        }
    }
}

impl From<BodyRecord> for RequestBody {
    fn from(record: BodyRecord) -> Self {
        Self {
            mode: record.mode,
            raw: record.raw,
            language: record
                .options
                .map(|o| o.raw.language)
                .unwrap_or_default(),
        }
    }
}

/// Recognized Authorization schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    Bearer,
    Basic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthDetail {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Auth descriptor derived from an Authorization header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "AuthRecord", try_from = "AuthRecord")]
pub struct Auth {
    pub scheme: AuthScheme,
    pub detail: AuthDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AuthRecord {
    #[serde(rename = "type")]
    scheme: AuthScheme,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    bearer: Vec<AuthDetail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    basic: Vec<AuthDetail>,
}

impl From<Auth> for AuthRecord {
    fn from(auth: Auth) -> Self {
        let (bearer, basic) = match auth.scheme {
            AuthScheme::Bearer => (vec![auth.detail], Vec::new()),
            AuthScheme::Basic => (Vec::new(), vec![auth.detail]),
        };
        Self {
            scheme: auth.scheme,
            bearer,
            basic,
        }
    }
}

impl TryFrom<AuthRecord> for Auth {
    type Error = String;

    fn try_from(record: AuthRecord) -> std::result::Result<Self, Self::Error> {
        let details = match record.scheme {
            AuthScheme::Bearer => record.bearer,
            AuthScheme::Basic => record.basic,
        };
        let detail = details
            .into_iter()
            .next()
            .ok_or_else(|| format!("auth of type {:?} carries no detail", record.scheme))?;
        Ok(Self {
            scheme: record.scheme,
            detail,
        })
    }
}

/// One parsed HTTP request, independent of the text it came from
///
/// Serializes as a Postman item: `{name, request: {method, header, body?, url, auth?}}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ItemRecord")]
pub struct NormalizedRequest {
    pub name: String,
    pub method: String,
    pub url: RequestUrl,
    pub headers: Vec<Header>,
    pub body: Option<RequestBody>,
    pub auth: Option<Auth>,
}

impl NormalizedRequest {
    /// Empty request with the default method
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: DEFAULT_METHOD.to_string(),
            url: RequestUrl::default(),
            headers: Vec::new(),
            body: None,
            auth: None,
        }
    }

    /// First header whose key matches case-insensitively
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.key.eq_ignore_ascii_case(key))
            .map(|h| h.value.as_str())
    }
}

#[derive(Serialize)]
struct ItemRef<'a> {
    name: &'a str,
    request: RequestRef<'a>,
}

#[derive(Serialize)]
struct RequestRef<'a> {
    method: &'a str,
    header: &'a [Header],
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a RequestBody>,
    url: &'a RequestUrl,
    #[serde(skip_serializing_if = "Option::is_none")]
    auth: Option<&'a Auth>,
}

impl Serialize for NormalizedRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ItemRef {
            name: &self.name,
            request: RequestRef {
                method: &self.method,
                header: &self.headers,
                body: self.body.as_ref(),
                url: &self.url,
                auth: self.auth.as_ref(),
            },
        }
        .serialize(serializer)
    }
}

#[derive(Deserialize)]
struct ItemRecord {
    name: String,
    request: RequestRecord,
}

#[derive(Deserialize)]
struct RequestRecord {
    #[serde(default = "default_method")]
    method: String,
    #[serde(default)]
    header: Vec<Header>,
    #[serde(default)]
    body: Option<RequestBody>,
    #[serde(default)]
    url: RequestUrl,
    #[serde(default)]
    auth: Option<Auth>,
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

impl From<ItemRecord> for NormalizedRequest {
    fn from(item: ItemRecord) -> Self {
        let request = item.request;
        Self {
            name: item.name,
            method: request.method,
            url: request.url,
            headers: request.header,
            body: request.body,
            auth: request.auth,
        }
    }
}

/// Where inside a file a warning was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Line(usize),
    Item(usize),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Line(n) => write!(f, "line {}", n),
            Position::Item(n) => write!(f, "item {}", n),
        }
    }
}

/// Non-fatal problem, attributable to a file and optionally a line or item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub source: String,
    pub position: Option<Position>,
    pub reason: String,
}

impl Warning {
    pub fn file(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            position: None,
            reason: reason.into(),
        }
    }

    pub fn at(source: impl Into<String>, position: Position, reason: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            position: Some(position),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} ({}): {}", self.source, position, self.reason),
            None => write!(f, "{}: {}", self.source, self.reason),
        }
    }
}

/// Requests produced from one input plus everything that went wrong along the way
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub requests: Vec<NormalizedRequest>,
    pub warnings: Vec<Warning>,
}

impl ParseOutcome {
    pub fn extend(&mut self, other: ParseOutcome) {
        self.requests.extend(other.requests);
        self.warnings.extend(other.warnings);
    }
}

/// Trait for parsing one input file into normalized requests
pub trait InputParser {
    /// Parse the file at `path`; per-item problems land in the outcome's warnings
    fn parse(&self, path: &Path) -> Result<ParseOutcome>;
}
