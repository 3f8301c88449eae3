use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One classified trial. Created exactly once per (field, payload, method)
/// that produced a response, never mutated afterwards; the sink owns it
/// from append on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialRecord {
    pub timestamp: DateTime<Utc>,
    pub field: String,
    pub payload: String,
    pub method: String,
    /// Wall-clock duration of the trial request, in seconds.
    pub elapsed_secs: f64,
    /// Response body length in bytes.
    pub response_len: u64,
    pub status: u16,
    pub vulnerable: bool,
}
