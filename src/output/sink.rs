use parking_lot::Mutex;

use crate::output::record::TrialRecord;

/// Append-only collection of trial records, ordered by completion.
/// Appends from concurrent workers are serialized by the mutex; nothing is
/// removed or mutated after insertion.
#[derive(Default)]
pub struct ResultSink {
    records: Mutex<Vec<TrialRecord>>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, record: TrialRecord) {
        self.records.lock().push(record);
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Owned copy of the records for the report writers. Restartable: the
    /// caller can iterate it as many times as it likes.
    pub fn snapshot(&self) -> Vec<TrialRecord> {
        self.records.lock().clone()
    }
}
