//! Session cookies and token extraction from request headers.

use std::collections::HashMap;

use http::HeaderMap;
use http::header::{AUTHORIZATION, COOKIE};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::token::SESSION_TTL;

/// Name of the cookie holding the admin session token.
pub const ADMIN_COOKIE_NAME: &str = "admin_session";

/// Header clients can use to send the token explicitly.
pub const SESSION_HEADER: &str = "x-admin-session";

/// Characters left unescaped in cookie values, matching `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Parse a `Cookie` header into name/value pairs.
///
/// Parts without `=` or with an empty name are skipped. Values are
/// percent-decoded; a value that does not decode to UTF-8 is kept verbatim.
/// Later duplicates win.
pub fn parse_cookie_header(header: &str) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for part in header.split(';') {
        let raw = part.trim();
        let Some((key, value)) = raw.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value.trim();
        let decoded = percent_decode_str(value)
            .decode_utf8()
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string());
        out.insert(key.to_string(), decoded);
    }
    out
}

/// Build the `Set-Cookie` value that stores a session token.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let value = utf8_percent_encode(token, COMPONENT).to_string();
    build_cookie(&value, SESSION_TTL.as_secs(), secure)
}

/// Build the `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    build_cookie("", 0, secure)
}

fn build_cookie(value: &str, max_age: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{ADMIN_COOKIE_NAME}={value}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Whether cookies for this request should carry the `Secure` attribute.
///
/// Always true in production; otherwise only behind a TLS-terminating proxy
/// that reports `x-forwarded-proto: https`.
pub fn wants_secure_cookie(headers: &HeaderMap, production: bool) -> bool {
    production
        || headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|proto| proto.contains("https"))
}

/// Find the session token in a request's headers.
///
/// Looks at, in order: the `x-admin-session` header, an `Authorization:
/// Bearer` header, and the `admin_session` cookie.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let explicit = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(token) = explicit {
        return Some(token.to_string());
    }

    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    let cookie_header = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    parse_cookie_header(&cookie_header)
        .remove(ADMIN_COOKIE_NAME)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(*value));
        }
        map
    }

    // -------------------------------------------------------------------------
    // parse_cookie_header tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_parse_cookie_header_basic() {
        let cookies = parse_cookie_header("theme=dark; admin_session=abc.def.ghi");
        assert_eq!(cookies.get("theme").map(String::as_str), Some("dark"));
        assert_eq!(
            cookies.get("admin_session").map(String::as_str),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn test_parse_cookie_header_skips_junk() {
        let cookies = parse_cookie_header(";; =novalue; flag; a = 1 ");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.get("a").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_parse_cookie_header_decodes() {
        let cookies = parse_cookie_header("name=hello%20world; bad=%FF");
        assert_eq!(cookies["name"], "hello world");
        assert_eq!(cookies["bad"], "%FF");
    }

    #[test]
    fn test_parse_cookie_header_value_with_equals() {
        let cookies = parse_cookie_header("k=a=b");
        assert_eq!(cookies["k"], "a=b");
    }

    // -------------------------------------------------------------------------
    // Set-Cookie builders
    // -------------------------------------------------------------------------

    #[test]
    fn test_session_cookie() {
        assert_eq!(
            session_cookie("a.b.c", false),
            "admin_session=a.b.c; HttpOnly; Path=/; SameSite=Lax; Max-Age=43200"
        );
        assert!(session_cookie("a.b.c", true).ends_with("; Secure"));
    }

    #[test]
    fn test_session_cookie_escapes() {
        assert!(session_cookie("a b;c", false).starts_with("admin_session=a%20b%3Bc;"));
    }

    #[test]
    fn test_clear_session_cookie() {
        assert_eq!(
            clear_session_cookie(false),
            "admin_session=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0"
        );
        assert_eq!(
            clear_session_cookie(true),
            "admin_session=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0; Secure"
        );
    }

    #[test]
    fn test_wants_secure_cookie() {
        assert!(wants_secure_cookie(&HeaderMap::new(), true));
        assert!(!wants_secure_cookie(&HeaderMap::new(), false));
        assert!(wants_secure_cookie(
            &headers(&[("x-forwarded-proto", "https")]),
            false
        ));
        assert!(!wants_secure_cookie(
            &headers(&[("x-forwarded-proto", "http")]),
            false
        ));
    }

    // -------------------------------------------------------------------------
    // token_from_headers tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_token_from_session_header() {
        let map = headers(&[("x-admin-session", "  header-token  "), ("cookie", "admin_session=cookie-token")]);
        assert_eq!(token_from_headers(&map).as_deref(), Some("header-token"));
    }

    #[test]
    fn test_token_blank_header_falls_through() {
        let map = headers(&[("x-admin-session", "   "), ("cookie", "admin_session=cookie-token")]);
        assert_eq!(token_from_headers(&map).as_deref(), Some("cookie-token"));
    }

    #[test]
    fn test_token_from_bearer() {
        let map = headers(&[("authorization", "Bearer my-token-123")]);
        assert_eq!(token_from_headers(&map).as_deref(), Some("my-token-123"));
    }

    #[test]
    fn test_token_wrong_scheme() {
        let map = headers(&[("authorization", "Basic dXNlcjpwYXNz")]);
        assert_eq!(token_from_headers(&map), None);
    }

    #[test]
    fn test_token_from_split_cookie_headers() {
        let map = headers(&[("cookie", "theme=dark"), ("cookie", "admin_session=c1")]);
        assert_eq!(token_from_headers(&map).as_deref(), Some("c1"));
    }

    #[test]
    fn test_token_missing() {
        assert_eq!(token_from_headers(&HeaderMap::new()), None);
        let map = headers(&[("cookie", "admin_session=")]);
        assert_eq!(token_from_headers(&map), None);
    }
}
