//! Authentication strategy and the configuration record a provider is built from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ValidationError;
use super::CredentialMap;
use crate::request::{is_valid_header_name, is_valid_header_value};

/// Authentication strategy. Names are lowercase in flags, env and config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    #[default]
    None,
    Bearer,
    Basic,
    Custom,
}

impl AuthType {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthType::None => "none",
            AuthType::Bearer => "bearer",
            AuthType::Basic => "basic",
            AuthType::Custom => "custom",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(AuthType::None),
            "bearer" => Ok(AuthType::Bearer),
            "basic" => Ok(AuthType::Basic),
            "custom" => Ok(AuthType::Custom),
            _ => Err(ValidationError::UnsupportedType(s.to_string())),
        }
    }
}

/// Raw authentication configuration. Checked against `auth_type` when an
/// [`AuthProvider`](super::AuthProvider) is built from it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthConfig {
    pub auth_type: AuthType,
    /// Bearer token, with or without the `Bearer ` prefix.
    pub token: String,
    pub username: String,
    /// May be empty for basic auth.
    pub password: String,
    /// Overlay headers set on every request.
    pub headers: CredentialMap,
    /// Overlay cookies attached to every request.
    pub cookies: CredentialMap,
}

impl AuthConfig {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            auth_type: AuthType::Bearer,
            token: token.into(),
            ..Self::default()
        }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            auth_type: AuthType::Basic,
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn custom(headers: CredentialMap, cookies: CredentialMap) -> Self {
        Self {
            auth_type: AuthType::Custom,
            headers,
            cookies,
            ..Self::default()
        }
    }

    /// Checks that the populated fields match `auth_type` and that every
    /// header can be sent as a single header line.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.auth_type {
            AuthType::Bearer if self.token.is_empty() => return Err(ValidationError::MissingToken),
            AuthType::Basic if self.username.is_empty() => {
                return Err(ValidationError::MissingUsername)
            }
            AuthType::Custom if self.headers.is_empty() && self.cookies.is_empty() => {
                return Err(ValidationError::MissingCustomCredentials)
            }
            _ => {}
        }
        if self.auth_type == AuthType::Bearer && !is_valid_header_value(&self.token) {
            return Err(ValidationError::InvalidHeaderValue("Authorization".to_string()));
        }
        for (name, value) in &self.headers {
            if !is_valid_header_name(name) {
                return Err(ValidationError::InvalidHeaderName(name.clone()));
            }
            if !is_valid_header_value(value) {
                return Err(ValidationError::InvalidHeaderValue(name.clone()));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("auth_type", &self.auth_type)
            .field("token", &redacted(&self.token))
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("cookies", &self.cookies.keys().collect::<Vec<_>>())
            .finish()
    }
}

pub(crate) fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}
