//! Request context utilities
//!
//! Reading caller-supplied values (such as the session token) from HTTP headers.

use axum::http::HeaderMap;

/// Read a header as a trimmed, non-empty string
///
/// Returns `None` when the header is absent, not valid UTF-8, or blank.
pub fn extract_header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_header() {
        let mut headers = HeaderMap::new();
        headers.insert("token", HeaderValue::from_static(" 0b8f-token "));

        assert_eq!(extract_header(&headers, "token").as_deref(), Some("0b8f-token"));
        assert_eq!(extract_header(&headers, "Token").as_deref(), Some("0b8f-token"));
    }

    #[test]
    fn test_extract_header_missing_or_blank() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_header(&headers, "token"), None);

        headers.insert("token", HeaderValue::from_static("   "));
        assert_eq!(extract_header(&headers, "token"), None);
    }
}
