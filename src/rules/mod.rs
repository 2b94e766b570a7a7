mod catalog;
mod engine;
mod loader;
mod predicate;

pub use catalog::{Category, CatalogBuilder, CatalogError, Rule, RuleCatalog};
pub use engine::{evaluate, evaluate_concurrent, evaluate_rule, CheckResult, Diagnostic};
pub use loader::{load_catalog, parse_catalog, rsr_catalog};
pub use predicate::{FaultKind, FnProbe, Predicate, Probe, RuleFault};
