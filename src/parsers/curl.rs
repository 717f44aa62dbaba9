// cURL command parser for req2postman
// Uses regex to pull each flag out of a command line independently of its position

use std::path::Path;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::auth::apply_auth;
use crate::error::{ConvertError, Result};
use crate::models::{
    Header, InputParser, Language, NormalizedRequest, ParseOutcome, RequestBody, DEFAULT_METHOD,
};
use crate::urls::decompose_url;

/// Prefix a line must carry to be treated as a cURL command
pub const CURL_PREFIX: &str = "curl ";

// Double-quoted (backslash escapes allowed) or single-quoted (literal) argument
macro_rules! quoted {
    ($flag:literal) => {
        concat!($flag, r#"\s+(?:"((?:[^"\\]|\\.)*)"|'([^']*)')"#)
    };
}

lazy_static! {
    static ref METHOD_REGEX: Regex = Regex::new(r#"-X\s+['"]?([A-Z]+)['"]?"#).unwrap();
    // Closing quote must match the opening one
    static ref QUOTED_URL_REGEX: Regex =
        Regex::new(r#""(https?://[^"]+)"|'(https?://[^']+)'"#).unwrap();
    static ref BARE_URL_REGEX: Regex = Regex::new(r"\s(https?://\S+)").unwrap();
    static ref HEADER_REGEX: Regex = Regex::new(quoted!("-H")).unwrap();
    static ref COOKIE_REGEX: Regex = Regex::new(quoted!("-b")).unwrap();
    // Priority order: the first flag that matches supplies the body
    static ref DATA_REGEXES: [Regex; 3] = [
        Regex::new(quoted!("-d")).unwrap(),
        Regex::new(quoted!("--data")).unwrap(),
        Regex::new(quoted!("--data-raw")).unwrap(),
    ];
}

/// Parse one cURL command line. Never fails; missing pieces stay empty.
///
/// `index` is 1-based and only used for the fallback name `Request {index}`.
pub fn parse_curl_command(command: &str, index: usize) -> NormalizedRequest {
    let mut request = NormalizedRequest::new(format!("Request {}", index));
    request.method = extract_method(command).unwrap_or_else(|| DEFAULT_METHOD.to_string());

    if let Some(url) = extract_url(command).and_then(|raw| decompose_url(&raw).ok()) {
        let resource = url.resource_name().unwrap_or("root").to_string();
        request.name = format!("{} {}", request.method, resource);
        request.url = url;
    }

    for (key, value) in extract_headers(command) {
        apply_auth(&mut request.auth, &key, &value);
        request.headers.push(Header::new(key, value));
    }

    if let Some(cookie) = extract_cookie(command) {
        request.headers.push(Header::new("Cookie", cookie));
    }

    // cURL flags do not reliably expose the Content-Type, so bodies are tagged json
    if let Some(data) = extract_body(command) {
        request.body = Some(RequestBody::raw(data, Language::Json));
    }

    request
}

/// Method from `-X`
pub fn extract_method(command: &str) -> Option<String> {
    METHOD_REGEX
        .captures(command)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// Quoted `http(s)://` token, else a bare one preceded by whitespace
pub fn extract_url(command: &str) -> Option<String> {
    QUOTED_URL_REGEX
        .captures(command)
        .and_then(|cap| cap.get(1).or_else(|| cap.get(2)))
        .or_else(|| BARE_URL_REGEX.captures(command).and_then(|cap| cap.get(1)))
        .map(|m| m.as_str().to_string())
}

/// Every `-H` with a `key: value` shape, trimmed, in order
pub fn extract_headers(command: &str) -> Vec<(String, String)> {
    HEADER_REGEX
        .captures_iter(command)
        .filter_map(|cap| {
            let line = quoted_argument(&cap)?;
            let (key, value) = line.split_once(':')?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Cookie string from `-b`
pub fn extract_cookie(command: &str) -> Option<String> {
    COOKIE_REGEX
        .captures(command)
        .and_then(|cap| quoted_argument(&cap))
        .filter(|cookie| !cookie.is_empty())
}

/// Payload of `-d`, `--data` or `--data-raw`, checked in that order
pub fn extract_body(command: &str) -> Option<String> {
    DATA_REGEXES
        .iter()
        .find_map(|re| re.captures(command).and_then(|cap| quoted_argument(&cap)))
}

fn quoted_argument(cap: &Captures<'_>) -> Option<String> {
    if let Some(double) = cap.get(1) {
        Some(unescape_double_quoted(double.as_str()))
    } else {
        cap.get(2).map(|single| single.as_str().to_string())
    }
}

/// Remove the backslashes a shell strips inside double quotes
fn unescape_double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if matches!(next, '"' | '\\' | '$' | '`') {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Parse every `curl ` line of a commands file's content.
///
/// Other lines are ignored; the index handed to each command counts cURL lines only.
pub fn parse_curl_commands(content: &str) -> ParseOutcome {
    let requests = content
        .lines()
        .filter(|line| line.starts_with(CURL_PREFIX))
        .enumerate()
        .map(|(i, line)| parse_curl_command(line, i + 1))
        .collect();
    ParseOutcome {
        requests,
        warnings: Vec::new(),
    }
}

/// Parser for text files holding one cURL command per line
pub struct CurlFileParser;

impl InputParser for CurlFileParser {
    fn parse(&self, path: &Path) -> Result<ParseOutcome> {
        let bytes = std::fs::read(path).map_err(|e| ConvertError::io(path, e))?;
        Ok(parse_curl_commands(&String::from_utf8_lossy(&bytes)))
    }
}
