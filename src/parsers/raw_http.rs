// Raw HTTP/1.1 request parser for req2postman
// Walks the request text line by line: request line, headers, blank line, body

use crate::auth::apply_auth;
use crate::classifier::classify_body;
use crate::error::{ConvertError, Result};
use crate::models::{Header, NormalizedRequest, RequestBody, RequestUrl};
use crate::urls::{parse_query, render_query, split_host, split_path};

/// Protocol assumed when the request target is a bare path
pub const DEFAULT_PROTOCOL: &str = "https";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    RequestLine,
    Headers,
    Body,
}

/// Pieces of the request text before URL reconstruction
#[derive(Debug, Default)]
struct RequestParts<'a> {
    method: &'a str,
    target: &'a str,
    headers: Vec<(&'a str, &'a str)>,
    body_lines: Vec<&'a str>,
}

/// Parse raw request text into a [`NormalizedRequest`].
///
/// `name` is the caller's label; it is replaced by `"{method} {resource}"` as soon
/// as a path segment or a host is known. `_index` is the 1-based position of the
/// request in its source and is not used for naming here.
pub fn parse_raw_request(text: &str, _index: usize, name: &str) -> Result<NormalizedRequest> {
    let parts = split_request(text)?;

    let mut request = NormalizedRequest::new(name);
    request.method = parts.method.to_string();

    let mut host = String::new();
    for (key, value) in &parts.headers {
        if key.eq_ignore_ascii_case("host") {
            host = value.to_string();
        }
        apply_auth(&mut request.auth, key, value);
        request.headers.push(Header::new(*key, *value));
    }

    let body = parts.body_lines.join("\n");
    if !body.is_empty() {
        let language = classify_body(request.header("content-type"));
        request.body = Some(RequestBody::raw(body, language));
    }

    request.url = rebuild_url(parts.target, host);

    let host = request.url.host_labels.join(".");
    if let Some(resource) = request.url.resource_name() {
        request.name = format!("{} {}", request.method, resource);
    } else if !host.is_empty() {
        request.name = format!("{} {}", request.method, host);
    }

    Ok(request)
}

fn split_request(text: &str) -> Result<RequestParts<'_>> {
    if text.is_empty() {
        return Err(ConvertError::EmptyRequest);
    }

    let mut parts = RequestParts::default();
    let mut state = ParseState::RequestLine;

    for line in text.split('\n') {
        match state {
            ParseState::RequestLine => {
                let request_line = line.trim();
                let mut tokens = request_line.split(' ');
                match (tokens.next(), tokens.next()) {
                    (Some(method), Some(target)) => {
                        parts.method = method;
                        parts.target = target;
                    }
                    _ => return Err(ConvertError::InvalidRequestLine(request_line.to_string())),
                }
                state = ParseState::Headers;
            }
            ParseState::Headers => {
                let header_line = line.trim();
                if header_line.is_empty() {
                    state = ParseState::Body;
                } else if let Some((key, value)) = header_line.split_once(':') {
                    parts.headers.push((key.trim(), value.trim()));
                }
            }
            ParseState::Body => parts.body_lines.push(line),
        }
    }

    Ok(parts)
}

/// Rebuild the full URL from the request target and the Host header.
///
/// A target containing `https://` or `http://` anywhere is treated as an absolute
/// URL: the protocol comes from it and the host is whatever precedes the first `/`
/// once the scheme prefix (if it is a prefix) is removed. This overrides `Host`.
fn rebuild_url(target: &str, mut host: String) -> RequestUrl {
    let mut protocol = DEFAULT_PROTOCOL;
    let mut path_and_query = target.to_string();

    for scheme in ["https", "http"] {
        let marker = format!("{}://", scheme);
        if target.contains(&marker) {
            protocol = scheme;
            let rest = target.strip_prefix(&marker).unwrap_or(target);
            let (url_host, path) = rest.split_once('/').unwrap_or((rest, ""));
            host = url_host.to_string();
            path_and_query = format!("/{}", path);
            break;
        }
    }

    let (path, query) = match path_and_query.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path_and_query.as_str(), None),
    };
    let path_segments = split_path(path);
    let query_params = query.map(parse_query).unwrap_or_default();

    let mut raw = format!("{}://{}", protocol, host);
    if !path_segments.is_empty() {
        raw.push('/');
        raw.push_str(&path_segments.join("/"));
    }
    if !query_params.is_empty() {
        raw.push('?');
        raw.push_str(&render_query(&query_params));
    }

    RequestUrl {
        raw,
        protocol: protocol.to_string(),
        host_labels: split_host(&host),
        path_segments,
        query_params,
    }
}
