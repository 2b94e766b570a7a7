//! Repository standards compliance auditing.
//!
//! A [`rules::RuleCatalog`] of weighted, categorised rules is evaluated
//! against a read-only [`inspect::RepositoryInspector`]. The results are
//! folded into a [`report::ComplianceReport`] carrying the overall score,
//! a tier, and the required rules that did not pass.

pub mod cli;
pub mod inspect;
pub mod output;
pub mod report;
pub mod rules;

use inspect::RepositoryInspector;
use report::{ComplianceReport, ReportBuilder};
use rules::RuleCatalog;

/// Evaluate `catalog` against `inspector` in one sequential pass
pub fn audit(catalog: &RuleCatalog, inspector: &dyn RepositoryInspector) -> ComplianceReport {
    let mut builder = ReportBuilder::new(catalog);
    builder.run_rules(inspector);
    builder.build()
}
