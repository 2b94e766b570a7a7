use super::types::{CategoryScore, ScoreSummary};
use crate::rules::{CheckResult, RuleCatalog};

/// Unrounded percentage; 0 when nothing is possible
pub fn ratio(earned: u64, possible: u64) -> f64 {
    if possible == 0 {
        return 0.0;
    }
    earned as f64 / possible as f64 * 100.0
}

/// Percentage rounded to one decimal; 0 when nothing is possible
pub fn percentage(earned: u64, possible: u64) -> f64 {
    (ratio(earned, possible) * 10.0).round() / 10.0
}

/// Fold check results into per-category and overall totals.
///
/// Categories follow catalog order, including categories with no rules.
/// Results for categories unknown to the catalog are appended in first-seen order.
pub fn aggregate(catalog: &RuleCatalog, results: &[CheckResult]) -> ScoreSummary {
    let mut categories: Vec<CategoryScore> = catalog
        .categories()
        .iter()
        .map(|c| CategoryScore::empty(&c.name, c.display_name()))
        .collect();

    for result in results {
        let index = match categories.iter().position(|c| c.category == result.category) {
            Some(index) => index,
            None => {
                categories.push(CategoryScore::empty(&result.category, &result.category));
                categories.len() - 1
            }
        };

        let score = &mut categories[index];
        score.checks_total += 1;
        score.points_possible += u64::from(result.points);
        if result.passed {
            score.checks_passed += 1;
            score.points_earned += u64::from(result.points_awarded);
        }
    }

    ScoreSummary {
        points_earned: categories.iter().map(|c| c.points_earned).sum(),
        points_possible: categories.iter().map(|c| c.points_possible).sum(),
        categories,
    }
}
