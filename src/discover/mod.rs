pub mod forms;

pub use forms::{discover_fields, fields_from_html, DEFAULT_FIELDS};
