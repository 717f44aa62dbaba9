// Authentication extraction for req2postman
// Recognizes Bearer and Basic Authorization headers

use crate::models::{Auth, AuthDetail, AuthScheme};

const BEARER_PREFIX: &str = "Bearer ";
const BASIC_PREFIX: &str = "Basic ";

/// Build an auth descriptor from a header, if it is a recognized Authorization header.
///
/// The prefix match is case-sensitive and includes the trailing space;
/// unknown schemes produce nothing (the header itself is still kept by the caller).
pub fn extract_auth(key: &str, value: &str) -> Option<Auth> {
    if !key.eq_ignore_ascii_case("authorization") {
        return None;
    }

    if let Some(token) = value.strip_prefix(BEARER_PREFIX) {
        Some(auth(AuthScheme::Bearer, "token", token))
    } else if let Some(credentials) = value.strip_prefix(BASIC_PREFIX) {
        Some(auth(AuthScheme::Basic, "password", credentials))
    } else {
        None
    }
}

/// Apply a header to the running auth state: a later recognized header replaces an earlier one
pub fn apply_auth(current: &mut Option<Auth>, key: &str, value: &str) {
    if let Some(found) = extract_auth(key, value) {
        *current = Some(found);
    }
}

fn auth(scheme: AuthScheme, key: &str, value: &str) -> Auth {
    Auth {
        scheme,
        detail: AuthDetail {
            key: key.to_string(),
            value: value.to_string(),
            kind: "string".to_string(),
        },
    }
}
