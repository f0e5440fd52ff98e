//! CLI parse and credential resolution tests.
//!
//! Credential flags also read `AUTH_*`, `COOKIE` and `USER_AGENT` from the
//! environment; tests that parse clear those first and run serially.

use super::{Cli, CliCommand};
use clap::Parser;

const CREDENTIAL_ENV: [&str; 5] = ["AUTH_BEARER", "AUTH_BASIC", "AUTH_HEADER", "COOKIE", "USER_AGENT"];

pub(super) fn clear_credential_env() {
    for var in CREDENTIAL_ENV {
        std::env::remove_var(var);
    }
}

pub(super) fn parse_cli(args: &[&str]) -> Cli {
    clear_credential_env();
    Cli::try_parse_from(args).unwrap()
}

pub(super) fn parse(args: &[&str]) -> CliCommand {
    parse_cli(args).command
}

mod parse;
