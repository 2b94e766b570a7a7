use crate::report::{ComplianceReport, Tier};
use crate::rules::RuleCatalog;

fn mark(passed: bool) -> &'static str {
    if passed {
        "✅"
    } else {
        "❌"
    }
}

fn tier_icon(tier: Tier) -> &'static str {
    match tier {
        Tier::Platinum => "💎",
        Tier::Gold => "🥇",
        Tier::Silver => "🥈",
        Tier::Bronze => "🥉",
        Tier::None => "🚫",
    }
}

/// Print human-readable summary to stdout
pub fn print_summary(report: &ComplianceReport, target: &str, output_path: Option<&str>) {
    println!();
    println!("╭───────────────────────────────────────────────────────────────╮");
    println!("│                  RSR Compliance Report                        │");
    println!("╰───────────────────────────────────────────────────────────────╯");
    println!();
    println!("Project: {}", target);

    // Per-check results, sectioned by category
    for category in &report.category_scores {
        println!();
        println!("{}", category.title);
        for check in report.checks.iter().filter(|c| c.category == category.category) {
            let optional = if check.required { "" } else { " (optional)" };
            println!("  {} {}{}", mark(check.passed), check.description, optional);
            if let Some(diagnostic) = &check.diagnostic {
                println!("     ⚠️  {}", diagnostic.message);
            }
        }
    }

    println!();
    println!("{}", "=".repeat(60));
    print!("{}", format_summary(report));
    println!("{}", "=".repeat(60));

    if let Some(path) = output_path {
        println!("Full report written to: {}", path);
    }
    println!();
}

/// Format the score, breakdown and required improvements
pub fn format_summary(report: &ComplianceReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} Compliance Level: {}\n",
        tier_icon(report.tier),
        report.tier
    ));
    output.push_str(&format!(
        "Score: {}/{} ({:.1}%)\n",
        report.overall_points_earned, report.overall_points_possible, report.percentage
    ));

    output.push_str("\nCategory Breakdown:\n");
    for category in &report.category_scores {
        output.push_str(&format!(
            "  {:<20} {}/{} checks ({}/{} points)\n",
            category.category,
            category.checks_passed,
            category.checks_total,
            category.points_earned,
            category.points_possible
        ));
    }

    output.push_str("\nRequired Improvements:\n");
    if report.all_required_passed {
        output.push_str("  ✅ All required checks passed!\n");
    } else {
        for (category, rules) in report.failed_required_by_category() {
            output.push_str(&format!("\n  {}:\n", category));
            for rule in rules {
                output.push_str(&format!("    ❌ {}\n", rule.description));
            }
        }
    }

    output
}

/// Format the catalog as a rule listing
pub fn format_catalog(catalog: &RuleCatalog) -> String {
    let mut output = format!("Catalog: {} ({} rules)\n", catalog.name(), catalog.len());

    for category in catalog.categories() {
        output.push_str(&format!(
            "\n{} [{}] ({} points)\n",
            category.display_name(),
            category.name,
            category.points_possible()
        ));
        for rule in &category.rules {
            let status = if rule.required { "required" } else { "optional" };
            output.push_str(&format!(
                "  {:<22} {:<8} {:>2} pt  {}\n",
                rule.id, status, rule.points, rule.description
            ));
        }
    }

    output
}
