//! Credential masking for diagnostic output
//!
//! Anything that may end up in a log line (request headers, response
//! headers, URLs carrying query-string keys) goes through these helpers
//! first.

use std::collections::BTreeMap;

use url::Url;

const MASK: &str = "****";

/// Header names whose values are credentials
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "x-api-key",
    "api-key",
    "x-goog-api-key",
    "cookie",
    "set-cookie",
];

/// Query parameters whose values are credentials
const SENSITIVE_QUERY_PARAMS: &[&str] = &["key", "api_key", "apikey", "access_token", "token"];

/// Mask a secret, keeping only the last four characters of long values
///
/// ```
/// use prism_utils::mask_secret;
///
/// assert_eq!(mask_secret("sk-1234567890abcdef"), "****cdef");
/// assert_eq!(mask_secret("short"), "****");
/// ```
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 12 {
        return MASK.to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{MASK}{tail}")
}

/// Whether a header carries credentials (case-insensitive)
pub fn is_sensitive_header(name: &str) -> bool {
    SENSITIVE_HEADERS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(name))
}

fn redact_header_value(value: &str) -> String {
    // Keep the auth scheme so "Bearer" vs "Basic" stays visible
    match value.split_once(' ') {
        Some((scheme, secret)) if !secret.is_empty() => {
            format!("{scheme} {}", mask_secret(secret))
        }
        _ => mask_secret(value),
    }
}

/// Copy a header set, masking credential values
pub fn redact_headers<'a, I>(headers: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    headers
        .into_iter()
        .map(|(name, value)| {
            let value = if is_sensitive_header(name) {
                redact_header_value(value)
            } else {
                value.to_string()
            };
            (name.to_string(), value)
        })
        .collect()
}

/// Mask credential query parameters in a URL
///
/// Unparseable input has its whole query string masked.
pub fn redact_url_query(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return match raw.split_once('?') {
            Some((base, _)) => format!("{base}?{MASK}"),
            None => raw.to_string(),
        };
    };

    if url.query().is_none() {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let sensitive = SENSITIVE_QUERY_PARAMS
                .iter()
                .any(|p| p.eq_ignore_ascii_case(&k));
            let v = if sensitive { mask_secret(&v) } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();

    url.query_pairs_mut().clear().extend_pairs(pairs);
    url.to_string()
}
