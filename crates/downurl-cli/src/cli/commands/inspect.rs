//! `downurl-auth inspect <url>` – show the decorated request headers.

use anyhow::{Context, Result};
use downurl_core::auth::RequestAuth;
use downurl_core::request::OutgoingRequest;

const MASK: &str = "****";

pub fn run_inspect(auth: &RequestAuth, url: &str, show_secrets: bool) -> Result<()> {
    for line in decorated_lines(auth, url, show_secrets)? {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn decorated_lines(
    auth: &RequestAuth,
    url: &str,
    show_secrets: bool,
) -> Result<Vec<String>> {
    let mut req = OutgoingRequest::new(url)?;
    auth.apply_auth(&mut req)
        .with_context(|| format!("apply authentication for {url}"))?;
    let mut lines = vec![format!("GET {}", req.url())];
    lines.extend(req.header_lines().into_iter().map(|line| {
        if show_secrets {
            line
        } else {
            mask_line(&line)
        }
    }));
    Ok(lines)
}

/// Masks credential values: the Authorization scheme and cookie names stay visible.
fn mask_line(line: &str) -> String {
    let Some((name, value)) = line.split_once(": ") else {
        return line.to_string();
    };
    if name.eq_ignore_ascii_case("authorization") {
        match value.split_once(' ') {
            Some((scheme, _)) => format!("{name}: {scheme} {MASK}"),
            None => format!("{name}: {MASK}"),
        }
    } else if name.eq_ignore_ascii_case("cookie") {
        let masked: Vec<String> = value
            .split("; ")
            .map(|pair| match pair.split_once('=') {
                Some((cookie, _)) => format!("{cookie}={MASK}"),
                None => MASK.to_string(),
            })
            .collect();
        format!("{name}: {}", masked.join("; "))
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use downurl_core::auth::{AuthConfig, AuthProvider};

    fn bearer_with_cookie() -> RequestAuth {
        let mut cfg = AuthConfig::bearer("abc");
        cfg.cookies.insert("session".to_string(), "s3cr3t".to_string());
        RequestAuth::from(AuthProvider::new(cfg).unwrap())
    }

    #[test]
    fn inspect_masks_by_default() {
        let lines = decorated_lines(&bearer_with_cookie(), "https://example.com/a.js", false).unwrap();
        assert_eq!(
            lines,
            vec![
                "GET https://example.com/a.js",
                "User-Agent: downurl/1.0",
                "Authorization: Bearer ****",
                "Cookie: session=****",
            ]
        );
    }

    #[test]
    fn inspect_show_secrets() {
        let lines = decorated_lines(&bearer_with_cookie(), "https://example.com/a.js", true).unwrap();
        assert_eq!(lines[2], "Authorization: Bearer abc");
        assert_eq!(lines[3], "Cookie: session=s3cr3t");
    }

    #[test]
    fn inspect_disabled_only_user_agent() {
        let lines = decorated_lines(&RequestAuth::Disabled, "http://example.com/", false).unwrap();
        assert_eq!(lines, vec!["GET http://example.com/", "User-Agent: downurl/1.0"]);
    }

    #[test]
    fn inspect_bad_url_is_error() {
        assert!(decorated_lines(&RequestAuth::Disabled, "not a url", false).is_err());
    }

    #[test]
    fn mask_line_without_scheme() {
        assert_eq!(mask_line("Authorization: opaque"), "Authorization: ****");
        assert_eq!(mask_line("X-Other: visible"), "X-Other: visible");
    }
}
