use super::predicate::Probe;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Error raised while constructing a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate rule '{id}' in category '{category}'")]
    DuplicateRule { category: String, id: String },

    #[error("rule '{id}' in category '{category}' must be worth at least 1 point")]
    InvalidPoints { category: String, id: String },

    #[error("invalid catalog definition: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single weighted assertion about the repository
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub category: String,
    pub description: String,
    pub required: bool,
    pub points: u32,
    pub probe: Arc<dyn Probe>,
}

impl Rule {
    /// Create a required, 1-point rule
    pub fn new(category: &str, id: &str, description: &str, probe: impl Probe + 'static) -> Self {
        Self {
            id: id.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            required: true,
            points: 1,
            probe: Arc::new(probe),
        }
    }

    /// Mark whether a failure of this rule blocks compliance
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the rule's weight; must be positive
    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }
}

/// Named, ordered group of rules
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub title: Option<String>,
    pub rules: Vec<Rule>,
}

impl Category {
    /// Title for display, falling back to the name
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    pub fn points_possible(&self) -> u64 {
        self.rules.iter().map(|r| u64::from(r.points)).sum()
    }
}

/// Immutable, ordered set of rules grouped by category
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    name: String,
    categories: Vec<Category>,
}

impl RuleCatalog {
    /// Start building a catalog
    pub fn builder(name: &str) -> CatalogBuilder {
        CatalogBuilder {
            name: name.to_string(),
            categories: Vec::new(),
        }
    }

    /// Get the catalog name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Categories in declaration order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All rules in catalog order
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.categories.iter().flat_map(|c| c.rules.iter())
    }

    /// Look up a rule by identity
    pub fn get(&self, category: &str, id: &str) -> Option<&Rule> {
        self.categories
            .iter()
            .find(|c| c.name == category)?
            .rules
            .iter()
            .find(|r| r.id == id)
    }

    /// Get the number of rules
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.rules.len()).sum()
    }

    /// Check if the catalog has no rules
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get `category/id` for every rule
    pub fn rule_ids(&self) -> Vec<String> {
        self.rules()
            .map(|r| format!("{}/{}", r.category, r.id))
            .collect()
    }
}

/// Append-only catalog construction
#[derive(Debug)]
pub struct CatalogBuilder {
    name: String,
    categories: Vec<Category>,
}

impl CatalogBuilder {
    /// Declare a category, fixing its position even if it ends up empty
    pub fn category(mut self, name: &str, title: Option<&str>) -> Self {
        let category = self.category_mut(name);
        if let Some(title) = title {
            category.title = Some(title.to_string());
        }
        self
    }

    /// Append a rule to its category
    pub fn rule(mut self, rule: Rule) -> Self {
        self.category_mut(&rule.category.clone()).rules.push(rule);
        self
    }

    /// Validate and freeze the catalog
    pub fn build(self) -> Result<RuleCatalog, CatalogError> {
        let mut seen = HashSet::new();

        for rule in self.categories.iter().flat_map(|c| c.rules.iter()) {
            if rule.points == 0 {
                return Err(CatalogError::InvalidPoints {
                    category: rule.category.clone(),
                    id: rule.id.clone(),
                });
            }
            if !seen.insert((rule.category.as_str(), rule.id.as_str())) {
                return Err(CatalogError::DuplicateRule {
                    category: rule.category.clone(),
                    id: rule.id.clone(),
                });
            }
        }

        Ok(RuleCatalog {
            name: self.name,
            categories: self.categories,
        })
    }

    fn category_mut(&mut self, name: &str) -> &mut Category {
        let index = match self.categories.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.categories.push(Category {
                    name: name.to_string(),
                    title: None,
                    rules: Vec::new(),
                });
                self.categories.len() - 1
            }
        };
        &mut self.categories[index]
    }
}
