use std::collections::BTreeMap;

use reqwest::Method;

use crate::error::EngineError;

/// Immutable description of what is being probed. Built once by the runner
/// and shared read-only across every concurrent trial.
#[derive(Debug, Clone)]
pub struct Target {
    pub url: String,
    /// HTTP methods to test. Always GET and POST.
    pub methods: Vec<Method>,
    pub cookies: BTreeMap<String, String>,
    pub proxies: Vec<String>,
    pub user_agents: Vec<String>,
}

impl Target {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            methods: vec![Method::GET, Method::POST],
            cookies: BTreeMap::new(),
            proxies: Vec::new(),
            user_agents: default_user_agents(),
        }
    }

    /// Cookie header value, or None when no cookies are configured.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let joined = self
            .cookies
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("; ");
        Some(joined)
    }
}

/// Parse a `k1=v1;k2=v2` cookie string as passed on the command line.
pub fn parse_cookies(raw: &str) -> Result<BTreeMap<String, String>, EngineError> {
    let mut out = BTreeMap::new();
    for pair in raw.split(';') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (name, value) = pair.split_once('=').ok_or_else(|| {
            EngineError::Configuration(format!("invalid cookie pair '{}', expected k=v", pair))
        })?;
        out.insert(name.trim().to_string(), value.trim().to_string());
    }
    Ok(out)
}

/// Identities rotated per trial when the caller doesn't supply its own pool.
pub fn default_user_agents() -> Vec<String> {
    [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
        "Mozilla/5.0 (X11; Linux x86_64)",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)",
        "sqli-probe/0.1",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cookie_pairs() {
        let cookies = parse_cookies("session=abc123; theme=dark").unwrap();
        assert_eq!(cookies.get("session").map(String::as_str), Some("abc123"));
        assert_eq!(cookies.get("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn reject_malformed_cookie() {
        assert!(parse_cookies("no-equals-sign").is_err());
    }

    #[test]
    fn cookie_header_joins_pairs() {
        let mut target = Target::new("http://example.com/login");
        assert!(target.cookie_header().is_none());
        target.cookies = parse_cookies("a=1;b=2").unwrap();
        assert_eq!(target.cookie_header().as_deref(), Some("a=1; b=2"));
    }
}
