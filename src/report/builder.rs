use super::score::aggregate;
use super::tier::Tier;
use super::types::*;
use crate::inspect::RepositoryInspector;
use crate::rules::{evaluate, evaluate_concurrent, CheckResult, RuleCatalog};
use std::sync::Arc;

/// Assemble the report from check results and their aggregated scores
pub fn build_report(results: Vec<CheckResult>, summary: ScoreSummary) -> ComplianceReport {
    let failed_required: Vec<FailedRule> = results
        .iter()
        .filter(|r| r.required && !r.passed)
        .map(FailedRule::from)
        .collect();

    // Tier from the unrounded score so 89.95 displays as 90.0 but stays Gold
    ComplianceReport {
        overall_points_earned: summary.points_earned,
        overall_points_possible: summary.points_possible,
        percentage: summary.percentage(),
        tier: Tier::classify(summary.ratio()),
        category_scores: summary.categories,
        checks: results,
        all_required_passed: failed_required.is_empty(),
        failed_required,
    }
}

/// Runs a catalog against a repository and builds the report
pub struct ReportBuilder<'a> {
    catalog: &'a RuleCatalog,
    results: Vec<CheckResult>,
}

impl<'a> ReportBuilder<'a> {
    /// Create a builder for `catalog` with no results yet
    pub fn new(catalog: &'a RuleCatalog) -> Self {
        Self {
            catalog,
            results: Vec::new(),
        }
    }

    /// Evaluate rules one after another
    pub fn run_rules(&mut self, inspector: &dyn RepositoryInspector) -> &mut Self {
        self.results = evaluate(self.catalog, inspector);
        self
    }

    /// Evaluate rules concurrently
    pub async fn run_rules_concurrent(
        &mut self,
        inspector: Arc<dyn RepositoryInspector>,
    ) -> &mut Self {
        self.results = evaluate_concurrent(self.catalog, inspector).await;
        self
    }

    /// Use results produced elsewhere
    pub fn with_results(&mut self, results: Vec<CheckResult>) -> &mut Self {
        self.results = results;
        self
    }

    /// Build the final report
    pub fn build(self) -> ComplianceReport {
        let summary = aggregate(self.catalog, &self.results);
        let report = build_report(self.results, summary);

        tracing::info!(
            catalog = %self.catalog.name(),
            earned = report.overall_points_earned,
            possible = report.overall_points_possible,
            percentage = report.percentage,
            tier = %report.tier,
            failed_required = report.failed_required.len(),
            "compliance report built"
        );

        report
    }
}
