use std::time::Duration;

/// Knobs for one scan run. Assembled by the runner from CLI args; every
/// component reads it through a shared reference and nothing mutates it
/// after assembly.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Worker pool size for concurrent trials.
    pub concurrency: usize,
    /// Per-trial request timeout.
    pub trial_timeout: Duration,
    /// Baseline request timeout.
    pub baseline_timeout: Duration,
    /// Timing anomaly threshold in seconds on top of the baseline elapsed.
    pub sleep_threshold: f64,
    /// Content-length diff threshold as a fraction of the baseline length.
    pub content_diff_percent: f64,
    /// Minimum jittered delay between trial submissions, in seconds.
    pub delay_min: f64,
    /// Maximum jittered delay between trial submissions, in seconds.
    pub delay_max: f64,
    /// Log and stream every classified trial, not only vulnerable ones.
    pub log_all: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: 10,
            trial_timeout: Duration::from_secs(15),
            baseline_timeout: Duration::from_secs(10),
            sleep_threshold: 4.0,
            content_diff_percent: 0.1,
            delay_min: 0.1,
            delay_max: 0.3,
            log_all: false,
        }
    }
}
