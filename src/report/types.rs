use super::score::{percentage, ratio};
use super::tier::Tier;
use crate::rules::CheckResult;
use serde::{Deserialize, Serialize};

/// Report file written by the CLI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportDocument {
    pub report_version: String,
    pub report_id: String,
    pub generated_at: String,
    pub target: String,
    pub catalog: String,
    pub report: ComplianceReport,
}

impl ReportDocument {
    pub fn new(target: &str, catalog: &str, report: ComplianceReport) -> Self {
        Self {
            report_version: "1.0.0".to_string(),
            report_id: uuid::Uuid::new_v4().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            target: target.to_string(),
            catalog: catalog.to_string(),
            report,
        }
    }
}

/// Result of evaluating a catalog against a repository
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplianceReport {
    pub overall_points_earned: u64,
    pub overall_points_possible: u64,
    pub percentage: f64,
    pub tier: Tier,
    pub category_scores: Vec<CategoryScore>,
    pub checks: Vec<CheckResult>,
    pub failed_required: Vec<FailedRule>,
    pub all_required_passed: bool,
}

impl ComplianceReport {
    /// Process exit status: 0 when every required rule passed, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        if self.all_required_passed {
            0
        } else {
            1
        }
    }

    /// Failed required rules grouped by category, in catalog order
    pub fn failed_required_by_category(&self) -> Vec<(&str, Vec<&FailedRule>)> {
        let mut groups: Vec<(&str, Vec<&FailedRule>)> = Vec::new();
        for rule in &self.failed_required {
            match groups.last_mut() {
                Some((category, rules)) if *category == rule.category => rules.push(rule),
                _ => groups.push((rule.category.as_str(), vec![rule])),
            }
        }
        groups
    }
}

/// Points and checks for one category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryScore {
    pub category: String,
    pub title: String,
    pub checks_passed: usize,
    pub checks_total: usize,
    pub points_earned: u64,
    pub points_possible: u64,
}

impl CategoryScore {
    /// Zeroed score for a category with no results yet
    pub fn empty(category: &str, title: &str) -> Self {
        Self {
            category: category.to_string(),
            title: title.to_string(),
            checks_passed: 0,
            checks_total: 0,
            points_earned: 0,
            points_possible: 0,
        }
    }

    /// Category percentage, rounded to one decimal
    pub fn percentage(&self) -> f64 {
        percentage(self.points_earned, self.points_possible)
    }
}

/// Aggregated totals before tiering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreSummary {
    pub points_earned: u64,
    pub points_possible: u64,
    pub categories: Vec<CategoryScore>,
}

impl ScoreSummary {
    /// Overall percentage as reported, rounded to one decimal
    pub fn percentage(&self) -> f64 {
        percentage(self.points_earned, self.points_possible)
    }

    /// Overall percentage before rounding, used for tiering
    pub fn ratio(&self) -> f64 {
        ratio(self.points_earned, self.points_possible)
    }
}

/// Required rule that did not pass
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailedRule {
    pub category: String,
    pub rule_id: String,
    pub description: String,
    pub points: u32,
}

impl From<&CheckResult> for FailedRule {
    fn from(result: &CheckResult) -> Self {
        Self {
            category: result.category.clone(),
            rule_id: result.rule_id.clone(),
            description: result.description.clone(),
            points: result.points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn failed(category: &str, id: &str) -> FailedRule {
        FailedRule {
            category: category.to_string(),
            rule_id: id.to_string(),
            description: id.to_string(),
            points: 1,
        }
    }

    fn sample_report() -> ComplianceReport {
        ComplianceReport {
            overall_points_earned: 3,
            overall_points_possible: 4,
            percentage: 75.0,
            tier: Tier::Gold,
            category_scores: vec![CategoryScore::empty("docs", "Documentation")],
            checks: vec![],
            failed_required: vec![
                failed("docs", "readme"),
                failed("docs", "license"),
                failed("security", "policy"),
            ],
            all_required_passed: false,
        }
    }

    #[test]
    fn test_exit_code() {
        let mut report = sample_report();
        assert_eq!(report.exit_code(), 1);

        report.failed_required.clear();
        report.all_required_passed = true;
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_failed_required_grouping() {
        let report = sample_report();
        let groups = report.failed_required_by_category();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "docs");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "security");
        assert_eq!(groups[1].1[0].rule_id, "policy");
    }

    #[test]
    fn test_report_json_roundtrip() {
        let document = ReportDocument::new("/tmp/project", "rsr", sample_report());

        let json = serde_json::to_string_pretty(&document).unwrap();
        let parsed: ReportDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(document, parsed);
        assert!(json.contains("\"tier\": \"Gold\""));
    }

    #[test]
    fn test_document_default_values() {
        let document = ReportDocument::new("/tmp/project", "rsr", sample_report());

        assert_eq!(document.report_version, "1.0.0");
        assert!(!document.report_id.is_empty());
        assert!(document.generated_at.contains('T'));
    }

    #[test]
    fn test_category_score_percentage() {
        let mut score = CategoryScore::empty("docs", "docs");
        assert_eq!(score.percentage(), 0.0);

        score.points_earned = 1;
        score.points_possible = 3;
        assert_eq!(score.percentage(), 33.3);
    }
}
