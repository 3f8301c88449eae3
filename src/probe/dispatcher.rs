use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};
use indicatif::ProgressBar;
use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::header::{COOKIE, USER_AGENT};
use reqwest::Method;
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;

use crate::config::ScanConfig;
use crate::http_client::ClientPool;
use crate::output::{ResultSink, TrialRecord};
use crate::probe::baseline::Baseline;
use crate::probe::classifier::{classify, content_diff_ratio, TrialResponse};
use crate::target::Target;

/// Constant decoy field sent alongside the injected one so the request
/// shape stays stable across trials.
const DECOY_FIELD: &str = "password";
const DECOY_VALUE: &str = "anything";

/// Everything a batch shares across its trials. Target, baseline, and
/// config are read-only; the sink is the only mutable shared structure.
pub struct BatchContext {
    pub clients: Arc<ClientPool>,
    pub target: Arc<Target>,
    pub config: Arc<ScanConfig>,
    pub sink: Arc<ResultSink>,
    pub csv_tx: Option<mpsc::Sender<TrialRecord>>,
    pub cancel: CancellationToken,
}

/// Per-trial outcome. Skips on network errors are a deliberate no-retry
/// policy, surfaced as a typed result instead of being swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialOutcome {
    Recorded,
    Skipped,
}

#[derive(Debug, Clone, Copy)]
pub struct BatchOutcome {
    /// Trials handed to the worker pool.
    pub submitted: usize,
    /// Trials that hit a network error and emitted no record.
    pub skipped: usize,
}

/// Run the fields × payloads trial set for one HTTP method on a bounded
/// worker pool. Each pair is submitted exactly once; the submitting task
/// blocks only on the jittered inter-submission delay (and on a permit when
/// the pool is saturated), never on trial completion. The cancellation
/// token is checked before each submission, so an abort keeps every record
/// collected so far.
pub async fn run_batch(
    ctx: &BatchContext,
    method: Method,
    baseline: Arc<Baseline>,
    fields: &[String],
    payloads: &[String],
) -> BatchOutcome {
    let total = fields.len() * payloads.len();
    tracing::info!(%method, fields = fields.len(), payloads = payloads.len(), total, "starting batch");

    let pb = ProgressBar::new(total as u64);
    let semaphore = Arc::new(Semaphore::new(ctx.config.concurrency));
    let mut trials = FuturesUnordered::new();
    let mut submitted = 0usize;

    'submit: for field in fields {
        for payload in payloads {
            if ctx.cancel.is_cancelled() {
                tracing::warn!(%method, submitted, total, "batch cancelled before exhaustion");
                break 'submit;
            }

            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .expect("semaphore closed unexpectedly");

            let clients = Arc::clone(&ctx.clients);
            let target = Arc::clone(&ctx.target);
            let config = Arc::clone(&ctx.config);
            let sink = Arc::clone(&ctx.sink);
            let baseline = Arc::clone(&baseline);
            let csv_tx = ctx.csv_tx.clone();
            let method = method.clone();
            let field = field.clone();
            let payload = payload.clone();

            trials.push(tokio::spawn(async move {
                let _permit = permit;
                run_trial(
                    clients, target, config, sink, baseline, csv_tx, method, field, payload,
                )
                .await
            }));

            submitted += 1;
            pb.inc(1);

            let jitter = rand::thread_rng().gen_range(ctx.config.delay_min..=ctx.config.delay_max);
            tokio::time::sleep(std::time::Duration::from_secs_f64(jitter)).await;
        }
    }

    let mut skipped = 0usize;
    while let Some(joined) = trials.next().await {
        match joined {
            Ok(TrialOutcome::Recorded) => {}
            Ok(TrialOutcome::Skipped) => skipped += 1,
            Err(e) => tracing::error!(error = %e, "trial task failed to join"),
        }
    }
    pb.finish_and_clear();

    let outcome = BatchOutcome { submitted, skipped };
    tracing::info!(
        %method,
        submitted = outcome.submitted,
        skipped = outcome.skipped,
        "batch complete"
    );
    outcome
}

#[allow(clippy::too_many_arguments)]
async fn run_trial(
    clients: Arc<ClientPool>,
    target: Arc<Target>,
    config: Arc<ScanConfig>,
    sink: Arc<ResultSink>,
    baseline: Arc<Baseline>,
    csv_tx: Option<mpsc::Sender<TrialRecord>>,
    method: Method,
    field: String,
    payload: String,
) -> TrialOutcome {
    let client = clients.pick();
    let ua = target
        .user_agents
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_default();

    let mut params = vec![(field.clone(), payload.clone())];
    if field != DECOY_FIELD {
        params.push((DECOY_FIELD.to_string(), DECOY_VALUE.to_string()));
    }

    let mut req = client
        .request(method.clone(), &target.url)
        .timeout(config.trial_timeout)
        .header(USER_AGENT, ua);
    if let Some(cookie) = target.cookie_header() {
        req = req.header(COOKIE, cookie);
    }
    req = if method == Method::GET {
        req.query(&params)
    } else {
        req.form(&params)
    };

    let start = Instant::now();
    let resp = match req.send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(%method, %field, %payload, error = %e, "trial request failed, skipping");
            return TrialOutcome::Skipped;
        }
    };
    let status = resp.status().as_u16();
    let body = match resp.text().await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(%method, %field, %payload, error = %e, "trial body read failed, skipping");
            return TrialOutcome::Skipped;
        }
    };
    let elapsed = start.elapsed();

    let trial = TrialResponse {
        status,
        body,
        elapsed,
    };
    let verdict = classify(&trial, &baseline, &config);

    let record = TrialRecord {
        timestamp: Utc::now(),
        field,
        payload,
        method: method.to_string(),
        elapsed_secs: elapsed.as_secs_f64(),
        response_len: trial.body.len() as u64,
        status,
        vulnerable: verdict.vulnerable,
    };

    if verdict.vulnerable || config.log_all {
        let diff_pct = content_diff_ratio(record.response_len, baseline.body_len) * 100.0;
        tracing::info!(
            field = %record.field,
            payload = %record.payload,
            method = %record.method,
            elapsed_secs = record.elapsed_secs,
            diff_pct,
            status = record.status,
            vulnerable = record.vulnerable,
            signals = ?verdict.signals,
            "trial classified"
        );
        if let Some(tx) = &csv_tx {
            let _ = tx.send(record.clone()).await;
        }
    }

    sink.append(record);
    TrialOutcome::Recorded
}
