use crate::inspect::{InspectorError, RepositoryInspector};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a rule could not be checked
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleFault {
    /// Content was not in the shape the predicate expected
    #[error("{0}")]
    Predicate(String),

    #[error(transparent)]
    Inspector(#[from] InspectorError),
}

impl RuleFault {
    /// Classify the fault; only an unavailable inspector is `InspectorUnavailable`
    pub fn kind(&self) -> FaultKind {
        match self {
            RuleFault::Predicate(_) => FaultKind::PredicateFault,
            RuleFault::Inspector(InspectorError::Unavailable { .. }) => {
                FaultKind::InspectorUnavailable
            }
            RuleFault::Inspector(_) => FaultKind::PredicateFault,
        }
    }
}

/// Diagnostic classification of a rule fault
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    PredicateFault,
    InspectorUnavailable,
}

/// Something that can decide whether a rule holds for a repository
pub trait Probe: Send + Sync + fmt::Debug {
    fn check(&self, inspector: &dyn RepositoryInspector) -> Result<bool, RuleFault>;
}

/// Declarative repository predicate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    FileExists {
        path: String,
    },
    DirExists {
        path: String,
    },
    /// File or directory
    Exists {
        path: String,
    },
    Contains {
        path: String,
        needle: String,
        #[serde(default)]
        ignore_case: bool,
    },
    ContainsAll {
        path: String,
        needles: Vec<String>,
        #[serde(default)]
        ignore_case: bool,
    },
    /// Multi-line regex must match at least `min` times
    PatternCount {
        path: String,
        pattern: String,
        min: usize,
    },
    /// Any JSON pointer resolves to a truthy value
    JsonPointer {
        path: String,
        pointers: Vec<String>,
    },
    AnyOf {
        of: Vec<Predicate>,
    },
    AllOf {
        of: Vec<Predicate>,
    },
    Not {
        of: Box<Predicate>,
    },
}

impl Predicate {
    pub fn file_exists(path: &str) -> Self {
        Predicate::FileExists {
            path: path.to_string(),
        }
    }

    pub fn dir_exists(path: &str) -> Self {
        Predicate::DirExists {
            path: path.to_string(),
        }
    }

    pub fn contains(path: &str, needle: &str) -> Self {
        Predicate::Contains {
            path: path.to_string(),
            needle: needle.to_string(),
            ignore_case: false,
        }
    }

    pub fn pattern_count(path: &str, pattern: &str, min: usize) -> Self {
        Predicate::PatternCount {
            path: path.to_string(),
            pattern: pattern.to_string(),
            min,
        }
    }

    /// Evaluate against the inspector
    pub fn evaluate(&self, inspector: &dyn RepositoryInspector) -> Result<bool, RuleFault> {
        match self {
            Predicate::FileExists { path } => Ok(inspector.file_exists(path)?),
            Predicate::DirExists { path } => Ok(inspector.dir_exists(path)?),
            Predicate::Exists { path } => {
                Ok(inspector.file_exists(path)? || inspector.dir_exists(path)?)
            }
            Predicate::Contains {
                path,
                needle,
                ignore_case,
            } => Ok(inspector
                .read_file(path)?
                .is_some_and(|content| contains(&content, needle, *ignore_case))),
            Predicate::ContainsAll {
                path,
                needles,
                ignore_case,
            } => Ok(inspector.read_file(path)?.is_some_and(|content| {
                needles
                    .iter()
                    .all(|needle| contains(&content, needle, *ignore_case))
            })),
            Predicate::PatternCount { path, pattern, min } => {
                let regex = RegexBuilder::new(pattern)
                    .multi_line(true)
                    .build()
                    .map_err(|e| RuleFault::Predicate(format!("invalid pattern: {}", e)))?;
                match inspector.read_file(path)? {
                    Some(content) => Ok(regex.find_iter(&content).count() >= *min),
                    None => Ok(false),
                }
            }
            Predicate::JsonPointer { path, pointers } => {
                let Some(content) = inspector.read_file(path)? else {
                    return Ok(false);
                };
                let doc: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
                    RuleFault::Predicate(format!("{} is not valid JSON: {}", path, e))
                })?;
                Ok(pointers
                    .iter()
                    .any(|pointer| doc.pointer(pointer).is_some_and(is_truthy)))
            }
            Predicate::AnyOf { of } => {
                for predicate in of {
                    if predicate.evaluate(inspector)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Predicate::AllOf { of } => {
                for predicate in of {
                    if !predicate.evaluate(inspector)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Predicate::Not { of } => Ok(!of.evaluate(inspector)?),
        }
    }
}

impl Probe for Predicate {
    fn check(&self, inspector: &dyn RepositoryInspector) -> Result<bool, RuleFault> {
        self.evaluate(inspector)
    }
}

/// Probe backed by a closure, for checks that don't fit a declarative predicate
pub struct FnProbe<F> {
    label: &'static str,
    f: F,
}

impl<F> FnProbe<F>
where
    F: Fn(&dyn RepositoryInspector) -> Result<bool, RuleFault> + Send + Sync,
{
    pub fn new(label: &'static str, f: F) -> Self {
        Self { label, f }
    }
}

impl<F> fmt::Debug for FnProbe<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnProbe").field(&self.label).finish()
    }
}

impl<F> Probe for FnProbe<F>
where
    F: Fn(&dyn RepositoryInspector) -> Result<bool, RuleFault> + Send + Sync,
{
    fn check(&self, inspector: &dyn RepositoryInspector) -> Result<bool, RuleFault> {
        (self.f)(inspector)
    }
}

fn contains(haystack: &str, needle: &str, ignore_case: bool) -> bool {
    if ignore_case {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    } else {
        haystack.contains(needle)
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
