pub mod record;
pub mod sink;
pub mod writer_csv;
pub mod writer_html;
pub mod writer_json;

pub use record::TrialRecord;
pub use sink::ResultSink;
pub use writer_csv::{spawn_csv_writer, write_csv_header};
pub use writer_html::write_html;
pub use writer_json::write_json;
