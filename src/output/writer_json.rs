use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::fingerprint::DbFingerprint;
use crate::output::record::TrialRecord;

#[derive(Serialize)]
struct JsonReport<'a> {
    url: &'a str,
    db_type: &'a str,
    total_tests: usize,
    results: &'a [TrialRecord],
}

/// Write the whole run as a single JSON document: target URL, detected
/// engine (or "Unknown"), total count, and the full record list.
pub fn write_json(
    path: &Path,
    url: &str,
    fingerprint: Option<&DbFingerprint>,
    records: &[TrialRecord],
) -> anyhow::Result<()> {
    let report = JsonReport {
        url,
        db_type: fingerprint.map(|f| f.engine.name()).unwrap_or("Unknown"),
        total_tests: records.len(),
        results: records,
    };
    fs::write(path, serde_json::to_string_pretty(&report)?)?;
    Ok(())
}
