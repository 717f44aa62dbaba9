// URL decomposition for req2postman
// Splits absolute URLs into the host/path/query arrays Postman expects.
// No percent-decoding and no validation: tokens are stored exactly as written.

use crate::error::{ConvertError, Result};
use crate::models::{QueryParam, RequestUrl};

/// Decompose `scheme://host[/path][?query]` into a [`RequestUrl`].
///
/// The host ends at the first `/`; the query starts at the first `?` after it.
/// A URL without any `/` after the host keeps everything (including a `?`) in
/// the host.
pub fn decompose_url(raw: &str) -> Result<RequestUrl> {
    let (protocol, rest) = raw
        .split_once("://")
        .ok_or_else(|| ConvertError::MalformedUrl(raw.to_string()))?;

    let (host, path_and_query) = rest.split_once('/').unwrap_or((rest, ""));
    let (path, query) = match path_and_query.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path_and_query, None),
    };

    Ok(RequestUrl {
        raw: raw.to_string(),
        protocol: protocol.to_string(),
        host_labels: split_host(host),
        path_segments: split_path(path),
        query_params: query.map(parse_query).unwrap_or_default(),
    })
}

/// Host labels in order, empty host included as a single empty label
pub fn split_host(host: &str) -> Vec<String> {
    host.split('.').map(str::to_string).collect()
}

/// Path segments with empty ones dropped
pub fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a query string on `&`, then each pair on its first `=`
pub fn parse_query(query: &str) -> Vec<QueryParam> {
    query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => QueryParam::new(key, value),
            None => QueryParam::new(pair, ""),
        })
        .collect()
}

/// Render query parameters back to text; empty values render as the bare key
pub fn render_query(params: &[QueryParam]) -> String {
    params
        .iter()
        .map(|p| {
            if p.value.is_empty() {
                p.key.clone()
            } else {
                format!("{}={}", p.key, p.value)
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}
