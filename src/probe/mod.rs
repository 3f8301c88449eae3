pub mod baseline;
pub mod classifier;
pub mod dispatcher;

pub use baseline::{capture_baseline, Baseline};
pub use classifier::{classify, content_diff_ratio, Signal, TrialResponse, Verdict};
pub use dispatcher::{run_batch, BatchContext, BatchOutcome, TrialOutcome};
