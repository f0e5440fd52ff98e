//! Auth provider: validated, frozen credentials applied to every outgoing request.
//!
//! A provider is built once at start-up and then shared by all download
//! workers. Its data sits behind an `Arc` and has no mutators, so `apply_auth`
//! can run concurrently on many requests without locking.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fmt;
use std::sync::Arc;

use super::config::{redacted, AuthConfig, AuthType};
use super::error::{AuthError, ValidationError};
use super::CredentialMap;
use crate::request::AuthRequest;

const AUTHORIZATION: &str = "Authorization";
const BEARER_PREFIX: &str = "bearer ";

/// Immutable authentication snapshot. Cloning shares the same frozen data.
#[derive(Clone)]
pub struct AuthProvider {
    inner: Arc<Frozen>,
}

struct Frozen {
    auth_type: AuthType,
    token: String,
    username: String,
    password: String,
    headers: CredentialMap,
    cookies: CredentialMap,
}

impl AuthProvider {
    /// Validates `cfg` against its type and freezes it.
    pub fn new(cfg: AuthConfig) -> Result<Self, AuthError> {
        cfg.validate()?;
        tracing::debug!(
            auth_type = %cfg.auth_type,
            headers = cfg.headers.len(),
            cookies = cfg.cookies.len(),
            "auth provider ready"
        );
        Ok(Self {
            inner: Arc::new(Frozen {
                auth_type: cfg.auth_type,
                token: cfg.token,
                username: cfg.username,
                password: cfg.password,
                headers: cfg.headers,
                cookies: cfg.cookies,
            }),
        })
    }

    pub fn auth_type(&self) -> AuthType {
        self.inner.auth_type
    }

    pub fn headers(&self) -> &CredentialMap {
        &self.inner.headers
    }

    pub fn cookies(&self) -> &CredentialMap {
        &self.inner.cookies
    }

    /// Decorates `req`: primary credential, then header overlay, then cookies.
    ///
    /// An overlay `Authorization` header never replaces one set by the primary
    /// credential. Stops at the first error without undoing earlier steps.
    pub fn apply_auth<R: AuthRequest + ?Sized>(&self, req: &mut R) -> Result<(), AuthError> {
        match self.inner.auth_type {
            AuthType::Bearer => req.set_header(AUTHORIZATION, &self.bearer_value()?),
            AuthType::Basic => req.set_header(AUTHORIZATION, &self.basic_value()?),
            AuthType::None | AuthType::Custom => {}
        }
        self.apply_headers(req);
        self.apply_cookies(req);
        Ok(())
    }

    fn bearer_value(&self) -> Result<String, AuthError> {
        let token = &self.inner.token;
        if token.is_empty() {
            return Err(ValidationError::MissingToken.into());
        }
        let has_prefix = token
            .get(..BEARER_PREFIX.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(BEARER_PREFIX));
        if has_prefix {
            Ok(token.clone())
        } else {
            Ok(format!("Bearer {token}"))
        }
    }

    fn basic_value(&self) -> Result<String, AuthError> {
        let Frozen {
            username, password, ..
        } = self.inner.as_ref();
        if username.is_empty() {
            return Err(ValidationError::MissingUsername.into());
        }
        let encoded = STANDARD.encode(format!("{username}:{password}"));
        Ok(format!("Basic {encoded}"))
    }

    fn apply_headers<R: AuthRequest + ?Sized>(&self, req: &mut R) {
        for (name, value) in &self.inner.headers {
            if name.eq_ignore_ascii_case(AUTHORIZATION)
                && req.header(AUTHORIZATION).is_some_and(|v| !v.is_empty())
            {
                continue;
            }
            req.set_header(name, value);
        }
    }

    fn apply_cookies<R: AuthRequest + ?Sized>(&self, req: &mut R) {
        for (name, value) in &self.inner.cookies {
            req.add_cookie(name, value);
        }
    }
}

impl fmt::Debug for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.as_ref();
        f.debug_struct("AuthProvider")
            .field("auth_type", &inner.auth_type)
            .field("token", &redacted(&inner.token))
            .field("username", &inner.username)
            .field("password", &redacted(&inner.password))
            .field("headers", &inner.headers.keys().collect::<Vec<_>>())
            .field("cookies", &inner.cookies.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Authentication as seen by the transport: either disabled (a no-op) or a
/// shared provider. Resolved once at start-up so workers never branch on it.
#[derive(Debug, Clone, Default)]
pub enum RequestAuth {
    #[default]
    Disabled,
    Enabled(AuthProvider),
}

impl RequestAuth {
    pub fn is_enabled(&self) -> bool {
        matches!(self, RequestAuth::Enabled(_))
    }

    pub fn provider(&self) -> Option<&AuthProvider> {
        match self {
            RequestAuth::Disabled => None,
            RequestAuth::Enabled(p) => Some(p),
        }
    }

    /// `AuthType::None` when disabled.
    pub fn auth_type(&self) -> AuthType {
        self.provider()
            .map(AuthProvider::auth_type)
            .unwrap_or(AuthType::None)
    }

    /// Decorates `req` when enabled; leaves it untouched and succeeds otherwise.
    pub fn apply_auth<R: AuthRequest + ?Sized>(&self, req: &mut R) -> Result<(), AuthError> {
        match self {
            RequestAuth::Disabled => Ok(()),
            RequestAuth::Enabled(p) => p.apply_auth(req),
        }
    }
}

impl From<AuthProvider> for RequestAuth {
    fn from(provider: AuthProvider) -> Self {
        RequestAuth::Enabled(provider)
    }
}

impl From<Option<AuthProvider>> for RequestAuth {
    fn from(provider: Option<AuthProvider>) -> Self {
        provider.map_or(RequestAuth::Disabled, RequestAuth::Enabled)
    }
}
