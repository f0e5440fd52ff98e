//! Strict credential file parsing.
//!
//! Headers files hold one `Name: value` per line, cookies files one
//! `name=value` per line. Blank lines and `#` comments are skipped; the first
//! malformed line aborts the whole parse with its 1-based line number.

use std::fs;
use std::path::Path;

use super::error::{AuthError, CredentialKind, FormatError};
use super::CredentialMap;

/// Parses a headers file (`Name: value` per line).
pub fn parse_headers_file(path: &Path) -> Result<CredentialMap, AuthError> {
    parse_file(path, CredentialKind::Headers)
}

/// Parses a cookies file (`name=value` per line).
pub fn parse_cookies_file(path: &Path) -> Result<CredentialMap, AuthError> {
    parse_file(path, CredentialKind::Cookies)
}

fn parse_file(path: &Path, kind: CredentialKind) -> Result<CredentialMap, AuthError> {
    let text = fs::read_to_string(path).map_err(|e| AuthError::io(kind, path, e))?;
    let entries = parse_lines(&text, kind).map_err(|error| AuthError::Format {
        path: Some(path.to_path_buf()),
        error,
    })?;
    if entries.is_empty() {
        return Err(AuthError::EmptyResult {
            kind,
            path: path.to_path_buf(),
        });
    }
    tracing::debug!(
        kind = %kind,
        path = %path.display(),
        entries = entries.len(),
        "parsed credential file"
    );
    Ok(entries)
}

fn separator(kind: CredentialKind) -> char {
    match kind {
        CredentialKind::Cookies => '=',
        CredentialKind::Headers | CredentialKind::BasicAuth => ':',
    }
}

/// Strict line grammar shared by both file kinds. Later duplicates overwrite.
pub(crate) fn parse_lines(text: &str, kind: CredentialKind) -> Result<CredentialMap, FormatError> {
    let sep = separator(kind);
    let mut entries = CredentialMap::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no = index + 1;
        let (name, value) = line
            .split_once(sep)
            .ok_or_else(|| FormatError::MissingSeparator {
                kind,
                line: line_no,
                text: line.to_string(),
            })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(FormatError::EmptyName {
                kind,
                line: line_no,
            });
        }
        entries.insert(name.to_string(), value.trim().to_string());
    }
    Ok(entries)
}
