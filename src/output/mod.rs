mod json;
mod summary;

pub use json::{to_json, write_report};
pub use summary::{format_catalog, format_summary, print_summary};
