//! Lenient parsing of inline credential strings (flags, env vars, config values).
//!
//! Unlike the file parsers these never fail on a malformed cookie segment: the
//! segment is dropped. Only an empty basic-auth string is an error.

use std::fmt;

use super::error::FormatError;
use super::CredentialMap;

/// Username/password pair parsed from `user` or `user:pass`.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Parses a `Cookie` header style string: `name1=value1; name2=value2`.
///
/// Segments without `=` or with an empty name are skipped; empty input yields
/// an empty map.
pub fn parse_cookie_string(s: &str) -> CredentialMap {
    let mut cookies = CredentialMap::new();
    for segment in s.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if let Some((name, value)) = segment.split_once('=') {
            let name = name.trim();
            if !name.is_empty() {
                cookies.insert(name.to_string(), value.trim().to_string());
            }
        }
    }
    cookies
}

/// Parses `username` or `username:password`. Only the first `:` separates;
/// the password may contain further colons.
pub fn parse_basic_auth_string(s: &str) -> Result<BasicCredentials, FormatError> {
    let (username, password) = s.split_once(':').unwrap_or((s, ""));
    if username.is_empty() {
        return Err(FormatError::MissingUsername);
    }
    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
