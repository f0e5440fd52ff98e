//! Outgoing request model decorated by the auth provider.
//!
//! The transport owns one request per URL. Anything implementing
//! [`AuthRequest`] can be decorated; [`OutgoingRequest`] is the concrete type
//! handed to the libcurl transport as a header list.

use anyhow::{Context, Result};
use url::Url;

/// User-Agent set on every request before decoration, so a configured
/// User-Agent header replaces it.
pub const DEFAULT_USER_AGENT: &str = "downurl/1.0";

/// Mutable view of a request that credentials are written into.
pub trait AuthRequest {
    /// Current value of a header, matched case-insensitively.
    fn header(&self, name: &str) -> Option<&str>;
    /// Sets a header, replacing any value under the same case-insensitive name.
    fn set_header(&mut self, name: &str, value: &str);
    /// Attaches an independent cookie. Implementations must keep the name and
    /// value from spilling into neighbouring cookies.
    fn add_cookie(&mut self, name: &str, value: &str);
}

/// A single outgoing HTTP request: target URL, headers and cookies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    url: Url,
    headers: Vec<(String, String)>,
    cookies: Vec<(String, String)>,
}

impl OutgoingRequest {
    /// Request for an http(s) URL with the default User-Agent.
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("invalid URL: {url}"))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!("unsupported URL scheme '{}': {}", url.scheme(), url);
        }
        Ok(Self {
            url,
            headers: vec![("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string())],
            cookies: Vec::new(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn cookies(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Cookies rendered as a `Cookie` header value (`a=1; b=2`), if any.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        Some(pairs.join("; "))
    }

    /// `Name: value` lines as sent on the wire. Attached cookies are appended
    /// to an explicit `Cookie` header, or emitted as their own line.
    pub fn header_lines(&self) -> Vec<String> {
        let cookies = self.cookie_header();
        let mut merged_cookies = false;
        let mut lines = Vec::with_capacity(self.headers.len() + 1);
        for (name, value) in &self.headers {
            if name.eq_ignore_ascii_case("cookie") {
                if let Some(c) = &cookies {
                    lines.push(format!("{}: {}; {}", name.trim(), value.trim(), c));
                    merged_cookies = true;
                    continue;
                }
            }
            lines.push(format!("{}: {}", name.trim(), value.trim()));
        }
        if let (Some(c), false) = (cookies, merged_cookies) {
            lines.push(format!("Cookie: {c}"));
        }
        lines
    }

    /// Header list for `curl::easy::Easy::http_headers`. Fails on a header
    /// that would break the request framing.
    pub fn to_curl_list(&self) -> Result<curl::easy::List> {
        for (name, value) in &self.headers {
            if !is_valid_header_name(name) {
                anyhow::bail!("invalid header name {name:?}");
            }
            if !is_valid_header_value(value) {
                anyhow::bail!("invalid characters in value of header {name}");
            }
        }
        let mut list = curl::easy::List::new();
        for line in self.header_lines() {
            list.append(&line).context("append curl header")?;
        }
        Ok(list)
    }
}

/// RFC 7230 token: non-empty, visible ASCII without separators.
pub fn is_valid_header_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

/// No control characters other than horizontal tab.
pub fn is_valid_header_value(value: &str) -> bool {
    !value.chars().any(|c| c.is_ascii_control() && c != '\t')
}

/// CR/LF in a cookie name would split the header line.
fn sanitize_cookie_name(name: &str) -> String {
    name.replace(['\r', '\n'], "-")
}

/// Keeps cookie-octets only (drops `;`, `"`, `\`, controls, non-ASCII) and
/// quotes values containing a space or comma.
fn sanitize_cookie_value(value: &str) -> String {
    let kept: String = value
        .chars()
        .filter(|&c| (' '..='~').contains(&c) && !matches!(c, '"' | ';' | '\\'))
        .collect();
    if kept.contains([' ', ',']) {
        format!("\"{kept}\"")
    } else {
        kept
    }
}

impl AuthRequest for OutgoingRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn set_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some(entry) => *entry = (name.to_string(), value.to_string()),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    fn add_cookie(&mut self, name: &str, value: &str) {
        self.cookies
            .push((sanitize_cookie_name(name), sanitize_cookie_value(value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_default_user_agent() {
        let req = OutgoingRequest::new("https://example.com/file.js").unwrap();
        assert_eq!(req.header("user-agent"), Some(DEFAULT_USER_AGENT));
        assert_eq!(req.url().host_str(), Some("example.com"));
    }

    #[test]
    fn new_rejects_bad_urls() {
        assert!(OutgoingRequest::new("not a url").is_err());
        assert!(OutgoingRequest::new("ftp://example.com/file").is_err());
    }

    #[test]
    fn set_header_replaces_case_insensitively() {
        let mut req = OutgoingRequest::new("http://example.com/").unwrap();
        req.set_header("X-Api-Key", "one");
        req.set_header("x-api-key", "two");
        assert_eq!(req.headers().filter(|(k, _)| k.eq_ignore_ascii_case("x-api-key")).count(), 1);
        assert_eq!(req.header("X-API-KEY"), Some("two"));
    }

    #[test]
    fn cookies_render_as_single_header_line() {
        let mut req = OutgoingRequest::new("https://example.com/").unwrap();
        req.add_cookie("session", "abc123");
        req.add_cookie("token", "xyz789");
        assert_eq!(req.cookie_header().as_deref(), Some("session=abc123; token=xyz789"));
        assert_eq!(
            req.header_lines(),
            vec![
                "User-Agent: downurl/1.0".to_string(),
                "Cookie: session=abc123; token=xyz789".to_string(),
            ]
        );
    }

    #[test]
    fn cookies_merge_into_explicit_cookie_header() {
        let mut req = OutgoingRequest::new("https://example.com/").unwrap();
        req.set_header("Cookie", "pre=1");
        req.add_cookie("session", "abc");
        let lines = req.header_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Cookie: pre=1; session=abc");
    }

    #[test]
    fn to_curl_list_contains_every_line() {
        let mut req = OutgoingRequest::new("https://example.com/").unwrap();
        req.set_header("Authorization", "Bearer abc");
        req.add_cookie("a", "1");
        let list = req.to_curl_list().unwrap();
        let lines: Vec<String> = list
            .iter()
            .map(|l| String::from_utf8_lossy(l).into_owned())
            .collect();
        assert_eq!(
            lines,
            vec![
                "User-Agent: downurl/1.0".to_string(),
                "Authorization: Bearer abc".to_string(),
                "Cookie: a=1".to_string(),
            ]
        );
    }

    #[test]
    fn cookie_value_cannot_smuggle_second_cookie() {
        let mut req = OutgoingRequest::new("https://example.com/").unwrap();
        req.add_cookie("a", "1; admin=true");
        assert_eq!(req.cookie_header().as_deref(), Some("a=\"1 admin=true\""));
    }

    #[test]
    fn cookie_sanitizing_drops_invalid_octets() {
        let mut req = OutgoingRequest::new("https://example.com/").unwrap();
        req.add_cookie("na\r\nme", "x\"y\\z\u{e9}");
        req.add_cookie("list", "a,b");
        assert_eq!(
            req.cookie_header().as_deref(),
            Some("na--me=xyz; list=\"a,b\"")
        );
    }

    #[test]
    fn header_name_and_value_checks() {
        assert!(is_valid_header_name("X-API-Key"));
        assert!(!is_valid_header_name("X API"));
        assert!(!is_valid_header_name(""));
        assert!(!is_valid_header_name("X-Evil\r\n"));
        assert!(is_valid_header_value("Bot/1.0 (x; y)\tz"));
        assert!(!is_valid_header_value("Bot\r\nX-Evil: 1"));
        assert!(!is_valid_header_value("a\0b"));
    }

    #[test]
    fn to_curl_list_rejects_header_injection() {
        let mut req = OutgoingRequest::new("https://example.com/").unwrap();
        req.set_header("User-Agent", "Bot\r\nX-Evil: 1");
        let err = req.to_curl_list().unwrap_err();
        assert!(err.to_string().contains("User-Agent"));
    }
}
