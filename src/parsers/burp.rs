// Burp Suite XML export decoder for req2postman
// Uses quick-xml's serde support to read <items>/<item> records, then hands each
// stored request to the raw HTTP parser

use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use quick_xml::events::Event;
use quick_xml::{DeError, Reader};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ConvertError, Result};
use crate::models::{InputParser, ParseOutcome, Position, Warning};
use crate::parsers::raw_http::parse_raw_request;
use crate::urls::decompose_url;

const BURP_ROOT: &str = "items";

/// Root `<items>` element of a Burp export
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BurpItems {
    #[serde(rename = "@burpVersion", default)]
    pub burp_version: String,
    #[serde(rename = "@exportTime", default)]
    pub export_time: String,
    #[serde(rename = "item", default)]
    pub items: Vec<BurpRawItem>,
}

impl BurpItems {
    /// Decode an export; the document root must be `<items>`
    pub fn from_xml(xml: &str) -> std::result::Result<Self, DeError> {
        check_root(xml)?;
        quick_xml::de::from_str(xml)
    }
}

/// The serde deserializer ignores the root name, so check it up front
fn check_root(xml: &str) -> std::result::Result<(), DeError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event().map_err(DeError::InvalidXml)? {
            Event::Start(e) | Event::Empty(e) => {
                let name = e.name();
                return if name.as_ref() == BURP_ROOT.as_bytes() {
                    Ok(())
                } else {
                    Err(DeError::Custom(format!(
                        "expected <{}> root, found <{}>",
                        BURP_ROOT,
                        String::from_utf8_lossy(name.as_ref())
                    )))
                };
            }
            Event::Eof => {
                return Err(DeError::Custom(format!("expected <{}> root, found none", BURP_ROOT)))
            }
            _ => {}
        }
    }
}

/// One `<item>` record. Only method, path, url and request feed the conversion.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BurpRawItem {
    pub time: String,
    pub url: String,
    pub host: BurpHost,
    pub port: String,
    pub protocol: String,
    pub method: String,
    pub path: String,
    pub extension: String,
    pub request: BurpContent,
    pub status: String,
    #[serde(rename = "responselength")]
    pub response_length: String,
    #[serde(rename = "mimetype")]
    pub mime_type: String,
    pub response: BurpContent,
    pub comment: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BurpHost {
    #[serde(rename = "@ip")]
    pub ip: String,
    #[serde(rename = "$text")]
    pub name: String,
}

/// Request or response payload, optionally base64 encoded
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BurpContent {
    #[serde(rename = "@base64")]
    pub base64: String,
    #[serde(rename = "$text")]
    pub content: String,
}

impl BurpContent {
    pub fn is_base64(&self) -> bool {
        self.base64 == "true"
    }

    /// Payload as text, decoding base64 when flagged. `item` is only used for error context.
    pub fn decode(&self, item: usize) -> Result<String> {
        if !self.is_base64() {
            return Ok(self.content.clone());
        }
        let compact: String = self
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = general_purpose::STANDARD
            .decode(compact)
            .map_err(|source| ConvertError::InvalidBase64 { item, source })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl BurpRawItem {
    /// Last non-empty segment of `path`, else of `url`, else `request`
    pub fn resource_name(&self) -> String {
        self.path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .last()
            .map(str::to_string)
            .or_else(|| {
                decompose_url(&self.url)
                    .ok()
                    .and_then(|url| url.resource_name().map(str::to_string))
            })
            .unwrap_or_else(|| "request".to_string())
    }
}

/// Convert decoded Burp items; a bad item becomes a warning and the rest continue
pub fn convert_items(items: &BurpItems, source: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for (i, item) in items.items.iter().enumerate() {
        let index = i + 1;
        let text = match item.request.decode(index) {
            Ok(text) => text,
            Err(e) => {
                outcome
                    .warnings
                    .push(Warning::at(source, Position::Item(index), e.to_string()));
                continue;
            }
        };

        let name = format!("{} {}", item.method, item.resource_name());
        match parse_raw_request(&text, index, &name) {
            Ok(request) => {
                debug!(item = index, name = %request.name, "decoded Burp item");
                outcome.requests.push(request);
            }
            Err(e) => outcome.warnings.push(Warning::at(
                source,
                Position::Item(index),
                format!("could not parse HTTP request: {}", e),
            )),
        }
    }

    outcome
}

/// Parser for Burp Repeater / Proxy XML exports
pub struct BurpXmlParser;

impl InputParser for BurpXmlParser {
    fn parse(&self, path: &Path) -> Result<ParseOutcome> {
        let bytes = std::fs::read(path).map_err(|e| ConvertError::io(path, e))?;
        let xml = String::from_utf8_lossy(&bytes);
        let items = BurpItems::from_xml(&xml).map_err(|source| ConvertError::XmlDecode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(convert_items(&items, &path.display().to_string()))
    }
}
