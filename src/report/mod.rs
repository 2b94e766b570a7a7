mod builder;
mod score;
mod tier;
mod types;

pub use builder::{build_report, ReportBuilder};
pub use score::{aggregate, percentage, ratio};
pub use tier::Tier;
pub use types::*;
