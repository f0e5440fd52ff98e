//! Assembly of raw credential sources into an [`AuthConfig`].
//!
//! Raw values come from CLI flags, environment variables or the config file.
//! At most one primary method (bearer, basic, raw Authorization header) may be
//! given; headers and cookies from files and strings are layered on top.

use std::fmt;
use std::path::{Path, PathBuf};

use super::config::{redacted, AuthConfig, AuthType};
use super::error::{AuthError, ValidationError};
use super::file::{parse_cookies_file, parse_headers_file};
use super::inline::{parse_basic_auth_string, parse_cookie_string};
use super::provider::{AuthProvider, RequestAuth};
use super::CredentialMap;

/// Raw, unparsed credential inputs. Empty strings count as unset.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthSources {
    /// Bearer token.
    pub bearer: Option<String>,
    /// `username[:password]`.
    pub basic: Option<String>,
    /// Raw `Authorization` header value.
    pub auth_header: Option<String>,
    pub headers_file: Option<PathBuf>,
    pub cookies_file: Option<PathBuf>,
    /// Inline `name=value; ...` cookie string.
    pub cookie: Option<String>,
    pub user_agent: Option<String>,
}

impl AuthSources {
    /// Fills unset fields from `fallback`. The primary method is taken as a
    /// whole: if `self` names one, the fallback's primary methods are ignored.
    pub fn or(self, fallback: AuthSources) -> AuthSources {
        let (bearer, basic, auth_header) = if self.has_primary() {
            (self.bearer, self.basic, self.auth_header)
        } else {
            (fallback.bearer, fallback.basic, fallback.auth_header)
        };
        AuthSources {
            bearer,
            basic,
            auth_header,
            headers_file: set_path(&self.headers_file)
                .map(Path::to_path_buf)
                .or(fallback.headers_file),
            cookies_file: set_path(&self.cookies_file)
                .map(Path::to_path_buf)
                .or(fallback.cookies_file),
            cookie: set(&self.cookie).map(str::to_string).or(fallback.cookie),
            user_agent: set(&self.user_agent)
                .map(str::to_string)
                .or(fallback.user_agent),
        }
    }

    fn has_primary(&self) -> bool {
        !self.primary_methods().is_empty()
    }

    fn primary_methods(&self) -> Vec<&'static str> {
        [
            ("auth-bearer", &self.bearer),
            ("auth-basic", &self.basic),
            ("auth-header", &self.auth_header),
        ]
        .into_iter()
        .filter(|(_, value)| set(value).is_some())
        .map(|(name, _)| name)
        .collect()
    }

    /// Parses every configured source and assembles the configuration.
    ///
    /// Headers-file entries overwrite the raw Authorization header; inline
    /// cookies overwrite cookies-file entries. Headers or cookies without a
    /// primary method make the type `Custom`.
    pub fn to_config(&self) -> Result<AuthConfig, AuthError> {
        let methods = self.primary_methods();
        if methods.len() > 1 {
            return Err(ValidationError::ConflictingMethods(methods).into());
        }

        let mut cfg = if let Some(token) = set(&self.bearer) {
            AuthConfig::bearer(token)
        } else if let Some(basic) = set(&self.basic) {
            let creds = parse_basic_auth_string(basic)?;
            AuthConfig::basic(creds.username, creds.password)
        } else if let Some(value) = set(&self.auth_header) {
            let mut headers = CredentialMap::new();
            headers.insert("Authorization".to_string(), value.to_string());
            AuthConfig::custom(headers, CredentialMap::new())
        } else {
            AuthConfig::default()
        };

        if let Some(path) = set_path(&self.headers_file) {
            cfg.headers.extend(parse_headers_file(path)?);
        }
        if let Some(ua) = set(&self.user_agent) {
            cfg.headers.insert("User-Agent".to_string(), ua.to_string());
        }
        if let Some(path) = set_path(&self.cookies_file) {
            cfg.cookies.extend(parse_cookies_file(path)?);
        }
        if let Some(cookie) = set(&self.cookie) {
            cfg.cookies.extend(parse_cookie_string(cookie));
        }

        if cfg.auth_type == AuthType::None && (!cfg.headers.is_empty() || !cfg.cookies.is_empty())
        {
            cfg.auth_type = AuthType::Custom;
        }
        Ok(cfg)
    }

    /// Assembles and validates; `Disabled` when nothing is configured.
    pub fn build(&self) -> Result<RequestAuth, AuthError> {
        let cfg = self.to_config()?;
        if cfg.auth_type == AuthType::None {
            tracing::debug!("no authentication configured");
            return Ok(RequestAuth::Disabled);
        }
        Ok(RequestAuth::Enabled(AuthProvider::new(cfg)?))
    }
}

impl fmt::Debug for AuthSources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = |v: &Option<String>| v.as_deref().map(redacted);
        f.debug_struct("AuthSources")
            .field("bearer", &secret(&self.bearer))
            .field("basic", &secret(&self.basic))
            .field("auth_header", &secret(&self.auth_header))
            .field("headers_file", &self.headers_file)
            .field("cookies_file", &self.cookies_file)
            .field("cookie", &secret(&self.cookie))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn set_path(value: &Option<PathBuf>) -> Option<&Path> {
    value.as_deref().filter(|p| !p.as_os_str().is_empty())
}
