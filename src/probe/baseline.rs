use std::time::{Duration, Instant};

use reqwest::header::COOKIE;
use reqwest::Method;

use crate::error::EngineError;
use crate::http_client::ClientPool;
use crate::target::Target;

/// Reference response shape for one HTTP method. Captured once before the
/// batch and shared read-only by every trial; never reassigned.
#[derive(Debug, Clone)]
pub struct Baseline {
    pub status: u16,
    pub body_len: u64,
    pub elapsed: Duration,
    pub body: String,
}

/// One unmodified request with the configured method and cookies. No
/// retries. A failure (including a zero-length body, which would make the
/// content-diff ratio undefined) is fatal for this method's batch only.
pub async fn capture_baseline(
    clients: &ClientPool,
    target: &Target,
    method: &Method,
    timeout: Duration,
) -> Result<Baseline, EngineError> {
    let client = clients.pick();
    let mut req = client
        .request(method.clone(), &target.url)
        .timeout(timeout);
    if let Some(cookie) = target.cookie_header() {
        req = req.header(COOKIE, cookie);
    }

    let start = Instant::now();
    let resp = req
        .send()
        .await
        .map_err(|e| EngineError::Baseline(format!("{} {}: {}", method, target.url, e)))?;
    let status = resp.status().as_u16();
    let body = resp
        .text()
        .await
        .map_err(|e| EngineError::Baseline(format!("{} {}: body read: {}", method, target.url, e)))?;
    let elapsed = start.elapsed();

    if body.is_empty() {
        return Err(EngineError::Baseline(format!(
            "{} {} returned an empty body; content-diff ratio would be undefined",
            method, target.url
        )));
    }

    Ok(Baseline {
        status,
        body_len: body.len() as u64,
        elapsed,
        body,
    })
}
