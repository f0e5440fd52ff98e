//! Credential parsing and request decoration.
//!
//! Credential sources (bearer token, basic-auth pair, custom headers, cookies)
//! are parsed once at start-up, assembled into an [`AuthConfig`], validated
//! into an immutable [`AuthProvider`], and applied to every outgoing request.
//! Headers and cookies *files* are parsed strictly; inline *strings* leniently.

mod config;
mod error;
mod file;
mod inline;
mod provider;
mod sources;

use std::collections::BTreeMap;

/// Name → value mapping of headers or cookies. Later insertions overwrite;
/// ordered so decoration is deterministic.
pub type CredentialMap = BTreeMap<String, String>;

pub use config::{AuthConfig, AuthType};
pub use error::{AuthError, CredentialKind, FormatError, ValidationError};
pub use file::{parse_cookies_file, parse_headers_file};
pub use inline::{parse_basic_auth_string, parse_cookie_string, BasicCredentials};
pub use provider::{AuthProvider, RequestAuth};
pub use sources::AuthSources;
