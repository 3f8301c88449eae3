use std::time::Duration;

use crate::config::ScanConfig;
use crate::fingerprint::signatures;
use crate::probe::baseline::Baseline;

/// Independent vulnerability heuristics. Any one firing marks the trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Response took longer than baseline elapsed plus the sleep threshold.
    Timing,
    /// Body length deviates from the baseline by more than the threshold.
    ContentDiff,
    /// Body matches some engine's error signature, whichever engine.
    ErrorSignature,
    /// Status is 200 or 302 and differs from the baseline status.
    StatusFlip,
}

#[derive(Debug, Clone)]
pub struct Verdict {
    pub vulnerable: bool,
    pub signals: Vec<Signal>,
}

/// What one trial observed, handed to the classifier.
#[derive(Debug, Clone)]
pub struct TrialResponse {
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
}

/// Absolute body-length deviation relative to the baseline length.
/// The baseline length is guaranteed non-zero by capture_baseline.
pub fn content_diff_ratio(response_len: u64, baseline_len: u64) -> f64 {
    (response_len as f64 - baseline_len as f64).abs() / baseline_len as f64
}

/// OR-combination of the four signals. Complete and sound: `vulnerable` is
/// true exactly when `signals` is non-empty.
pub fn classify(trial: &TrialResponse, baseline: &Baseline, config: &ScanConfig) -> Verdict {
    let mut signals = Vec::new();

    if trial.elapsed.as_secs_f64() > baseline.elapsed.as_secs_f64() + config.sleep_threshold {
        signals.push(Signal::Timing);
    }

    if content_diff_ratio(trial.body.len() as u64, baseline.body_len) > config.content_diff_percent
    {
        signals.push(Signal::ContentDiff);
    }

    if signatures::matches_any(&trial.body) {
        signals.push(Signal::ErrorSignature);
    }

    if (trial.status == 200 || trial.status == 302) && trial.status != baseline.status {
        // Known precision/recall tradeoff: a transient redirect into 302
        // with identical content still trips this.
        signals.push(Signal::StatusFlip);
    }

    Verdict {
        vulnerable: !signals.is_empty(),
        signals,
    }
}
