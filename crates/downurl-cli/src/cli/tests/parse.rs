//! Tests for check, inspect, completions and the credential flags.

use super::{clear_credential_env, parse, parse_cli};
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use serial_test::serial;
use std::path::PathBuf;

#[test]
#[serial]
fn cli_parse_check() {
    match parse(&["downurl-auth", "check"]) {
        CliCommand::Check => {}
        _ => panic!("expected Check"),
    }
}

#[test]
#[serial]
fn cli_parse_inspect() {
    match parse(&["downurl-auth", "inspect", "https://example.com/x"]) {
        CliCommand::Inspect { url, show_secrets } => {
            assert_eq!(url, "https://example.com/x");
            assert!(!show_secrets);
        }
        _ => panic!("expected Inspect"),
    }
}

#[test]
#[serial]
fn cli_parse_inspect_show_secrets() {
    match parse(&["downurl-auth", "inspect", "https://example.com/", "--show-secrets"]) {
        CliCommand::Inspect { show_secrets, .. } => assert!(show_secrets),
        _ => panic!("expected Inspect with --show-secrets"),
    }
}

#[test]
#[serial]
fn cli_parse_completions() {
    match parse(&["downurl-auth", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
#[serial]
fn cli_parse_short_flags() {
    let cli = parse_cli(&[
        "downurl-auth",
        "-b",
        "tok",
        "-C",
        "cookies.txt",
        "-c",
        "a=1",
        "-u",
        "Bot/2.0",
        "check",
    ]);
    assert_eq!(cli.auth.auth_bearer.as_deref(), Some("tok"));
    assert_eq!(cli.auth.cookies_file, Some(PathBuf::from("cookies.txt")));
    assert_eq!(cli.auth.cookie.as_deref(), Some("a=1"));
    assert_eq!(cli.auth.user_agent.as_deref(), Some("Bot/2.0"));
}

#[test]
#[serial]
fn cli_parse_flags_after_subcommand() {
    let cli = parse_cli(&[
        "downurl-auth",
        "inspect",
        "https://example.com/",
        "--auth-basic",
        "user:pass",
        "--headers-file",
        "h.txt",
        "--config",
        "alt.toml",
    ]);
    assert_eq!(cli.auth.auth_basic.as_deref(), Some("user:pass"));
    assert_eq!(cli.auth.headers_file, Some(PathBuf::from("h.txt")));
    assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
}

#[test]
#[serial]
fn cli_parse_long_auth_header() {
    let cli = parse_cli(&["downurl-auth", "-H", "Token xyz", "check"]);
    let sources = cli.auth.to_sources();
    assert_eq!(sources.auth_header.as_deref(), Some("Token xyz"));
    assert!(sources.bearer.is_none());
}

#[test]
#[serial]
fn cli_parse_requires_subcommand() {
    assert!(Cli::try_parse_from(["downurl-auth"]).is_err());
}

#[test]
#[serial]
fn cli_parse_bad_shell_rejected() {
    assert!(Cli::try_parse_from(["downurl-auth", "completions", "notashell"]).is_err());
}

#[test]
#[serial]
fn cli_parse_reads_credential_env() {
    clear_credential_env();
    std::env::set_var("AUTH_BEARER", "from-env");
    let parsed = Cli::try_parse_from(["downurl-auth", "check"]);
    clear_credential_env();
    assert_eq!(parsed.unwrap().auth.auth_bearer.as_deref(), Some("from-env"));
}

#[test]
#[serial]
fn cli_parse_ignores_caller_env() {
    std::env::set_var("USER_AGENT", "x");
    std::env::set_var("COOKIE", "zz");
    let cli = parse_cli(&["downurl-auth", "check"]);
    assert!(cli.auth.user_agent.is_none());
    assert!(cli.auth.cookie.is_none());
}
