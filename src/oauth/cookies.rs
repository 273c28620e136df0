//! `Set-Cookie` construction and `Cookie` header parsing.
//!
//! Every cookie is `Path=/; SameSite=Lax; Secure` with a percent-encoded
//! value.

use axum::http::{header::COOKIE, HeaderMap};

/// `name=<percent-encoded value>; Path=/; SameSite=Lax; Secure[; Max-Age=n]`
pub fn build_cookie(name: &str, value: &str, max_age: Option<u64>) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; SameSite=Lax; Secure",
        name,
        urlencoding::encode(value)
    );
    if let Some(secs) = max_age {
        cookie.push_str(&format!("; Max-Age={secs}"));
    }
    cookie
}

/// Expire a cookie immediately.
pub fn clear_cookie(name: &str) -> String {
    format!("{name}=; Path=/; SameSite=Lax; Secure; Max-Age=0")
}

/// Raw (still percent-encoded) value of `name` in a `Cookie` header string.
pub fn get_cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|part| {
        let part = part.trim();
        let (key, value) = part.split_once('=').unwrap_or((part, ""));
        (key == name).then_some(value)
    })
}

/// Percent-decoded value of `name` across all `Cookie` headers.
///
/// Empty or undecodable values count as absent.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|header| get_cookie_value(header, name))
        .and_then(|raw| urlencoding::decode(raw).ok())
        .map(|decoded| decoded.into_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_build_cookie_with_max_age() {
        assert_eq!(
            build_cookie("oauth_state", "abc-123", Some(300)),
            "oauth_state=abc-123; Path=/; SameSite=Lax; Secure; Max-Age=300"
        );
    }

    #[test]
    fn test_build_cookie_without_max_age() {
        assert_eq!(
            build_cookie("session", "v", None),
            "session=v; Path=/; SameSite=Lax; Secure"
        );
    }

    #[test]
    fn test_build_cookie_percent_encodes_value() {
        assert_eq!(
            build_cookie("yahoo_oauth", "ab+c/d==", Some(1)),
            "yahoo_oauth=ab%2Bc%2Fd%3D%3D; Path=/; SameSite=Lax; Secure; Max-Age=1"
        );
    }

    #[test]
    fn test_clear_cookie() {
        assert_eq!(
            clear_cookie("oauth_state"),
            "oauth_state=; Path=/; SameSite=Lax; Secure; Max-Age=0"
        );
    }

    #[test]
    fn test_get_cookie_value() {
        let header = "theme=dark; oauth_state=xyz; yahoo_oauth=a%3Db=c";
        assert_eq!(get_cookie_value(header, "oauth_state"), Some("xyz"));
        assert_eq!(get_cookie_value(header, "yahoo_oauth"), Some("a%3Db=c"));
        assert_eq!(get_cookie_value(header, "theme"), Some("dark"));
        assert_eq!(get_cookie_value(header, "missing"), None);
        assert_eq!(get_cookie_value("", "theme"), None);
        assert_eq!(get_cookie_value("flag", "flag"), Some(""));
    }

    #[test]
    fn test_get_cookie_value_does_not_match_prefixes() {
        assert_eq!(get_cookie_value("xoauth_state=1", "oauth_state"), None);
    }

    #[test]
    fn test_read_cookie_decodes_and_spans_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("yahoo_oauth=ab%2Bc%3D%3D"));

        assert_eq!(read_cookie(&headers, "yahoo_oauth").as_deref(), Some("ab+c=="));
        assert_eq!(read_cookie(&headers, "theme").as_deref(), Some("dark"));
        assert_eq!(read_cookie(&headers, "oauth_state"), None);
    }

    #[test]
    fn test_read_cookie_empty_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("oauth_state="));
        assert_eq!(read_cookie(&headers, "oauth_state"), None);
    }

    #[test]
    fn test_build_then_read_round_trip() {
        let value = "eyJhIjoiYiJ9+/=";
        let set_cookie = build_cookie("yahoo_oauth", value, Some(10));
        let pair = set_cookie.split(';').next().unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(pair).unwrap());
        assert_eq!(read_cookie(&headers, "yahoo_oauth").as_deref(), Some(value));
    }
}
