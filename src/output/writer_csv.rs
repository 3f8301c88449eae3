use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tokio::sync::mpsc;

use crate::output::record::TrialRecord;

const CSV_HEADER: [&str; 8] = [
    "timestamp", "field", "payload", "method", "time", "length", "status", "vulnerable",
];

/// Create the CSV log with its header row. Runs at configuration time so a
/// report file exists even when every trial is later skipped.
pub fn write_csv_header(path: &Path) -> anyhow::Result<()> {
    let f = File::create(path)?;
    let mut w = csv::Writer::from_writer(f);
    w.write_record(CSV_HEADER)?;
    w.flush()?;
    Ok(())
}

/// Spawn a background task appending received records to `path` as they are
/// produced. The header is written separately by `write_csv_header`; rows
/// are flushed per record so a killed run keeps everything logged so far.
pub fn spawn_csv_writer(
    path: PathBuf,
    mut rx: mpsc::Receiver<TrialRecord>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let file = match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(f) => f,
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "failed to open csv log");
                return;
            }
        };
        let mut w = WriterBuilder::new().has_headers(false).from_writer(file);
        while let Some(rec) = rx.recv().await {
            if let Err(e) = w.serialize(&rec) {
                tracing::error!(error = %e, "failed to write csv row");
            }
            if let Err(e) = w.flush() {
                tracing::error!(error = %e, "failed to flush csv log");
            }
        }
    })
}
