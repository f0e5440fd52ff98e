//! Credential parsing and request decoration for the downurl downloader.
//!
//! Start-up code assembles [`auth::AuthSources`] (flags, env, config file)
//! into an [`auth::RequestAuth`]; every download worker then calls
//! `apply_auth` on its own [`request::OutgoingRequest`] before dispatch.

pub mod auth;
pub mod config;
pub mod logging;
pub mod request;
