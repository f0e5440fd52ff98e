//! `downurl-auth check` – validate credentials and summarize them.

use downurl_core::auth::{CredentialMap, RequestAuth};

pub fn run_check(auth: &RequestAuth) {
    for line in summary(auth) {
        println!("{line}");
    }
}

pub(crate) fn summary(auth: &RequestAuth) -> Vec<String> {
    let Some(provider) = auth.provider() else {
        return vec!["Authentication: none (requests are sent without credentials)".to_string()];
    };
    vec![
        format!("Authentication: {}", provider.auth_type()),
        format!("  headers: {}", names(provider.headers())),
        format!("  cookies: {}", names(provider.cookies())),
    ]
}

fn names(map: &CredentialMap) -> String {
    if map.is_empty() {
        return "0".to_string();
    }
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    format!("{} ({})", map.len(), keys.join(", "))
}
