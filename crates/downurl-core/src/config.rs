use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::auth::AuthSources;

/// `[auth]` section of the config file. Every key is optional; `${VAR}` in a
/// value is replaced from the environment when converted to [`AuthSources`].
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSection {
    /// Bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer: Option<String>,
    /// Basic auth as `username:password`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic: Option<String>,
    /// Raw Authorization header value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// File with one `Name: value` header per line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers_file: Option<String>,
    /// File with one `name=value` cookie per line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookies_file: Option<String>,
    /// Inline cookies, `name1=value1; name2=value2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl AuthSection {
    pub fn to_sources(&self) -> AuthSources {
        self.to_sources_with(|name| std::env::var(name).ok())
    }

    fn to_sources_with(&self, lookup: impl Fn(&str) -> Option<String>) -> AuthSources {
        let value = |v: &Option<String>| {
            v.as_deref()
                .map(|s| expand_vars(s, &lookup))
                .filter(|s| !s.is_empty())
        };
        AuthSources {
            bearer: value(&self.bearer),
            basic: value(&self.basic),
            auth_header: value(&self.header),
            headers_file: value(&self.headers_file).map(PathBuf::from),
            cookies_file: value(&self.cookies_file).map(PathBuf::from),
            cookie: value(&self.cookie),
            user_agent: value(&self.user_agent),
        }
    }
}

impl fmt::Debug for AuthSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_sources_with(|_| None), f)
    }
}

/// Global configuration loaded from `~/.config/downurl/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownurlConfig {
    #[serde(default)]
    pub auth: AuthSection,
}

/// Replaces each `${NAME}` with `lookup(NAME)`, or nothing when unset.
/// An unterminated `${` is kept literally.
fn expand_vars(input: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                if let Some(v) = lookup(&after[..end]) {
                    out.push_str(&v);
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("downurl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DownurlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DownurlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<DownurlConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    let cfg: DownurlConfig = toml::from_str(&data)
        .with_context(|| format!("parse config file: {}", path.display()))?;
    Ok(cfg)
}
