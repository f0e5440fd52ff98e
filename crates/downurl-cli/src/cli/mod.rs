//! CLI for inspecting downurl request credentials.

mod commands;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use downurl_core::auth::{AuthSources, RequestAuth};
use downurl_core::config;
use std::path::{Path, PathBuf};

use commands::{run_check, run_completions, run_inspect};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "downurl-auth")]
#[command(about = "downurl: validate and preview request credentials", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub auth: AuthArgs,

    /// Config file to read the [auth] section from (default: ~/.config/downurl/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Credential sources. Flags win over env vars, which win over the config file.
#[derive(Debug, Default, Args)]
pub struct AuthArgs {
    /// Bearer token authentication.
    #[arg(short = 'b', long, env = "AUTH_BEARER", hide_env_values = true, global = true)]
    pub auth_bearer: Option<String>,

    /// Basic auth (format: username:password).
    #[arg(short = 'B', long, env = "AUTH_BASIC", hide_env_values = true, global = true)]
    pub auth_basic: Option<String>,

    /// Custom Authorization header value.
    #[arg(short = 'H', long, env = "AUTH_HEADER", hide_env_values = true, global = true)]
    pub auth_header: Option<String>,

    /// File with custom headers (format: 'Name: value').
    #[arg(long, value_name = "PATH", global = true)]
    pub headers_file: Option<PathBuf>,

    /// File with cookies (format: 'name=value').
    #[arg(short = 'C', long, value_name = "PATH", global = true)]
    pub cookies_file: Option<PathBuf>,

    /// Cookie string (format: 'name1=value1; name2=value2').
    #[arg(short = 'c', long, env = "COOKIE", hide_env_values = true, global = true)]
    pub cookie: Option<String>,

    /// Custom User-Agent header.
    #[arg(short = 'u', long, env = "USER_AGENT", global = true)]
    pub user_agent: Option<String>,
}

impl AuthArgs {
    pub fn to_sources(&self) -> AuthSources {
        AuthSources {
            bearer: self.auth_bearer.clone(),
            basic: self.auth_basic.clone(),
            auth_header: self.auth_header.clone(),
            headers_file: self.headers_file.clone(),
            cookies_file: self.cookies_file.clone(),
            cookie: self.cookie.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Validate the configured credentials and summarize them.
    Check,

    /// Show the headers a request to URL would carry.
    Inspect {
        /// HTTP/HTTPS URL to build the request for.
        url: String,

        /// Print Authorization and Cookie values instead of masking them.
        #[arg(long)]
        show_secrets: bool,
    },

    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Check => {
                let auth = resolve_auth(&cli.auth, cli.config.as_deref())?;
                run_check(&auth);
            }
            CliCommand::Inspect { url, show_secrets } => {
                let auth = resolve_auth(&cli.auth, cli.config.as_deref())?;
                run_inspect(&auth, &url, show_secrets)?;
            }
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

/// Merges flags/env over the config file and builds the request auth.
pub(crate) fn resolve_auth(args: &AuthArgs, config_path: Option<&Path>) -> Result<RequestAuth> {
    let cfg = match config_path {
        Some(path) => config::load_from_path(path)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    let sources = args.to_sources().or(cfg.auth.to_sources());
    let auth = sources
        .build()
        .context("invalid authentication configuration")?;
    tracing::info!(auth_type = %auth.auth_type(), "authentication resolved");
    Ok(auth)
}

#[cfg(test)]
mod tests;
