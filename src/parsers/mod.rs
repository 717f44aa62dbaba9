pub mod burp;
pub mod curl;
pub mod raw_http;

pub use burp::BurpXmlParser;
pub use curl::CurlFileParser;
pub use raw_http::parse_raw_request;
