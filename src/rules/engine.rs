use super::catalog::{Rule, RuleCatalog};
use super::predicate::{FaultKind, RuleFault};
use crate::inspect::RepositoryInspector;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Outcome of checking one rule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckResult {
    pub rule_id: String,
    pub category: String,
    pub description: String,
    pub passed: bool,
    pub required: bool,
    /// Weight of the rule
    pub points: u32,
    pub points_awarded: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<Diagnostic>,
}

/// Why a rule could not be checked
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: FaultKind,
    pub message: String,
}

impl CheckResult {
    fn new(rule: &Rule, passed: bool, diagnostic: Option<Diagnostic>) -> Self {
        Self {
            rule_id: rule.id.clone(),
            category: rule.category.clone(),
            description: rule.description.clone(),
            passed,
            required: rule.required,
            points: rule.points,
            points_awarded: if passed { rule.points } else { 0 },
            diagnostic,
        }
    }

    fn faulted(rule: &Rule, fault: &RuleFault) -> Self {
        Self::new(
            rule,
            false,
            Some(Diagnostic {
                kind: fault.kind(),
                message: fault.to_string(),
            }),
        )
    }
}

/// Check a single rule. Faults and panics in the probe become a failing result.
///
/// A caught panic still goes through the installed panic hook, so the default
/// hook prints a "thread ... panicked" line to stderr before the diagnostic.
pub fn evaluate_rule(rule: &Rule, inspector: &dyn RepositoryInspector) -> CheckResult {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.probe.check(inspector)))
        .unwrap_or_else(|payload| Err(RuleFault::Predicate(panic_message(payload.as_ref()))));

    match outcome {
        Ok(passed) => {
            debug!(category = %rule.category, rule = %rule.id, passed, "checked rule");
            CheckResult::new(rule, passed, None)
        }
        Err(fault) => {
            warn!(
                category = %rule.category,
                rule = %rule.id,
                error = %fault,
                "rule could not be checked"
            );
            CheckResult::faulted(rule, &fault)
        }
    }
}

/// Evaluate every rule in catalog order
pub fn evaluate(catalog: &RuleCatalog, inspector: &dyn RepositoryInspector) -> Vec<CheckResult> {
    catalog
        .rules()
        .map(|rule| evaluate_rule(rule, inspector))
        .collect()
}

/// Evaluate rules on the blocking pool, returning results in catalog order
pub async fn evaluate_concurrent(
    catalog: &RuleCatalog,
    inspector: Arc<dyn RepositoryInspector>,
) -> Vec<CheckResult> {
    let rules: Vec<Rule> = catalog.rules().cloned().collect();
    let mut slots: Vec<Option<CheckResult>> = vec![None; rules.len()];
    let mut tasks = JoinSet::new();

    for (index, rule) in rules.iter().cloned().enumerate() {
        let inspector = Arc::clone(&inspector);
        tasks.spawn_blocking(move || (index, evaluate_rule(&rule, inspector.as_ref())));
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(e) => warn!(error = %e, "rule evaluation task failed"),
        }
    }

    rules
        .iter()
        .zip(slots)
        .map(|(rule, slot)| {
            slot.unwrap_or_else(|| {
                let fault = RuleFault::Predicate("evaluation task did not complete".to_string());
                CheckResult::faulted(rule, &fault)
            })
        })
        .collect()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("predicate panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("predicate panicked: {}", msg)
    } else {
        "predicate panicked".to_string()
    }
}
