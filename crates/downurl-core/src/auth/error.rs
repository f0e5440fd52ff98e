//! Error taxonomy for credential parsing, validation and decoration.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Which credential grammar a file or string is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    Headers,
    Cookies,
    BasicAuth,
}

impl CredentialKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CredentialKind::Headers => "headers",
            CredentialKind::Cookies => "cookies",
            CredentialKind::BasicAuth => "basic auth",
        }
    }

    /// Singular noun used in per-line messages.
    fn item(self) -> &'static str {
        match self {
            CredentialKind::Headers => "header",
            CredentialKind::Cookies => "cookie",
            CredentialKind::BasicAuth => "basic auth",
        }
    }

    fn expected(self) -> &'static str {
        match self {
            CredentialKind::Headers => "'Name: value'",
            CredentialKind::Cookies => "'name=value'",
            CredentialKind::BasicAuth => "'username:password'",
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammar violation in a credential file line or inline string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Line has no `:` (headers) or `=` (cookies).
    #[error("invalid {} format at line {line}: {text} (expected {})", .kind.item(), .kind.expected())]
    MissingSeparator {
        kind: CredentialKind,
        line: usize,
        text: String,
    },
    #[error("empty {} name at line {line}", .kind.item())]
    EmptyName { kind: CredentialKind, line: usize },
    /// Basic auth string with no username.
    #[error("invalid basic auth format (expected {})", CredentialKind::BasicAuth.expected())]
    MissingUsername,
}

impl FormatError {
    /// 1-based line number of the offending line, when the input was a file.
    pub fn line(&self) -> Option<usize> {
        match self {
            FormatError::MissingSeparator { line, .. } | FormatError::EmptyName { line, .. } => {
                Some(*line)
            }
            FormatError::MissingUsername => None,
        }
    }
}

/// Auth configuration inconsistent with its declared type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("token is required for bearer authentication")]
    MissingToken,
    #[error("username is required for basic authentication")]
    MissingUsername,
    #[error("headers or cookies required for custom authentication")]
    MissingCustomCredentials,
    #[error("unsupported authentication type: {0}")]
    UnsupportedType(String),
    /// More than one primary credential source was given.
    #[error("multiple authentication methods specified (use only one of: {})", .0.join(", "))]
    ConflictingMethods(Vec<&'static str>),
    #[error("invalid header name {0:?}")]
    InvalidHeaderName(String),
    /// The value itself is left out of the message; it may be a credential.
    #[error("invalid characters in value of header {0}")]
    InvalidHeaderValue(String),
}

/// Error returned by the credential parsers, provider construction and decoration.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Credential file could not be opened or read.
    #[error("failed to read {kind} file {}", .path.display())]
    Io {
        kind: CredentialKind,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{error}{}", in_file(.path))]
    Format {
        /// Set when the violation came from a file rather than an inline string.
        path: Option<PathBuf>,
        error: FormatError,
    },
    /// File parsed cleanly but yielded no entries.
    #[error("no valid {kind} found in {}", .path.display())]
    EmptyResult { kind: CredentialKind, path: PathBuf },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AuthError {
    pub(crate) fn io(kind: CredentialKind, path: &Path, source: io::Error) -> Self {
        AuthError::Io {
            kind,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            AuthError::Format { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            AuthError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FormatError> for AuthError {
    fn from(error: FormatError) -> Self {
        AuthError::Format { path: None, error }
    }
}

fn in_file(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_names_line_and_text() {
        let err = FormatError::MissingSeparator {
            kind: CredentialKind::Headers,
            line: 2,
            text: "InvalidHeaderWithoutColon".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid header format at line 2: InvalidHeaderWithoutColon (expected 'Name: value')"
        );
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn file_format_error_mentions_path() {
        let err = AuthError::Format {
            path: Some(PathBuf::from("/tmp/cookies.txt")),
            error: FormatError::EmptyName {
                kind: CredentialKind::Cookies,
                line: 4,
            },
        };
        assert_eq!(
            err.to_string(),
            "empty cookie name at line 4 in /tmp/cookies.txt"
        );
    }

    #[test]
    fn inline_format_error_has_no_location() {
        let err = AuthError::from(FormatError::MissingUsername);
        assert_eq!(
            err.to_string(),
            "invalid basic auth format (expected 'username:password')"
        );
        assert_eq!(err.format_error().and_then(FormatError::line), None);
    }

    #[test]
    fn conflicting_methods_lists_sources() {
        let err = ValidationError::ConflictingMethods(vec!["--auth-bearer", "--auth-basic"]);
        assert_eq!(
            err.to_string(),
            "multiple authentication methods specified (use only one of: --auth-bearer, --auth-basic)"
        );
    }
}
