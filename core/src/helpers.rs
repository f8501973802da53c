//! Header formatting helpers used during request assembly.

use crate::http::Headers;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type applied when the caller supplies none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Join the non-empty cookie strings with `"; "`, preserving order.
pub fn combine_cookies(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("; ")
}

/// True when the `content-type` header contains `content_type`.
pub fn content_is(headers: &Headers, content_type: &str) -> bool {
    headers
        .get("content-type")
        .is_some_and(|value| value.contains(content_type))
}

/// Set `content-type` to `content_type` unless one is already present.
pub fn content_set_default<'a>(headers: &'a mut Headers, content_type: &str) -> &'a mut Headers {
    if !headers.has("content-type") {
        headers.set("content-type", content_type);
    }
    headers
}
