use thiserror::Error;

/// Engine error taxonomy. Configuration and baseline errors are fatal
/// (configuration for the whole run, baseline for one method's batch);
/// network errors are caught at the trial boundary and never escape the
/// dispatcher.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("baseline capture failed: {0}")]
    Baseline(String),
}
