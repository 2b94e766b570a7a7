use super::catalog::{CatalogError, Rule, RuleCatalog};
use super::predicate::Predicate;
use serde::Deserialize;
use std::path::Path;

/// Reference catalog bundled with the binary
const RSR_CATALOG: &str = include_str!("catalogs/rsr.toml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    name: String,
    #[serde(default, rename = "category")]
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryEntry {
    name: String,
    title: Option<String>,
    #[serde(default, rename = "rule")]
    rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleEntry {
    id: String,
    description: String,
    #[serde(default = "default_required")]
    required: bool,
    #[serde(default = "default_points")]
    points: u32,
    check: Predicate,
}

fn default_required() -> bool {
    true
}

fn default_points() -> u32 {
    1
}

/// Parse a catalog from its TOML definition
pub fn parse_catalog(source: &str) -> Result<RuleCatalog, CatalogError> {
    let file: CatalogFile = toml::from_str(source)?;
    let mut builder = RuleCatalog::builder(&file.name);

    for category in file.categories {
        builder = builder.category(&category.name, category.title.as_deref());
        for entry in category.rules {
            let rule = Rule::new(&category.name, &entry.id, &entry.description, entry.check)
                .with_required(entry.required)
                .with_points(entry.points);
            builder = builder.rule(rule);
        }
    }

    builder.build()
}

/// Load a catalog definition from disk
pub fn load_catalog(path: &Path) -> Result<RuleCatalog, CatalogError> {
    let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&source)?;
    tracing::debug!(path = ?path, rules = catalog.len(), "loaded catalog");
    Ok(catalog)
}

/// The bundled Rhodium Standard Repository catalog
pub fn rsr_catalog() -> Result<RuleCatalog, CatalogError> {
    parse_catalog(RSR_CATALOG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SMALL: &str = r#"
name = "small"

[[category]]
name = "docs"
title = "Documentation"

[[category.rule]]
id = "readme"
description = "README.md present"
points = 2
check = { kind = "file_exists", path = "README.md" }

[[category.rule]]
id = "docs-dir"
description = "docs/ directory"
required = false
check = { kind = "dir_exists", path = "docs" }

[[category]]
name = "ci"
"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(SMALL).unwrap();

        assert_eq!(catalog.name(), "small");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.categories().len(), 2);
        assert_eq!(catalog.categories()[0].display_name(), "Documentation");
        assert!(catalog.categories()[1].rules.is_empty());

        let readme = catalog.get("docs", "readme").unwrap();
        assert!(readme.required);
        assert_eq!(readme.points, 2);

        let docs = catalog.get("docs", "docs-dir").unwrap();
        assert!(!docs.required);
        assert_eq!(docs.points, 1);
    }

    #[test]
    fn test_parse_duplicate_rule() {
        let source = r#"
name = "dup"
[[category]]
name = "docs"
[[category.rule]]
id = "readme"
description = "a"
check = { kind = "file_exists", path = "README.md" }
[[category.rule]]
id = "readme"
description = "b"
check = { kind = "file_exists", path = "README" }
"#;
        let err = parse_catalog(source).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateRule { .. }));
    }

    #[test]
    fn test_parse_unknown_kind() {
        let source = r#"
name = "bad"
[[category]]
name = "docs"
[[category.rule]]
id = "readme"
description = "a"
check = { kind = "smells_nice", path = "README.md" }
"#;
        let err = parse_catalog(source).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_parse_zero_points() {
        let source = r#"
name = "bad"
[[category]]
name = "docs"
[[category.rule]]
id = "readme"
description = "a"
points = 0
check = { kind = "file_exists", path = "README.md" }
"#;
        let err = parse_catalog(source).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPoints { .. }));
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SMALL.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/catalog.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_rsr_catalog_parses() {
        let catalog = rsr_catalog().unwrap();
        let names: Vec<_> = catalog.categories().iter().map(|c| c.name.as_str()).collect();

        assert_eq!(catalog.name(), "rsr");
        assert_eq!(
            names,
            vec![
                "governance",
                "well_known",
                "build_system",
                "testing",
                "security",
                "accessibility",
                "tpcf",
                "licensing",
                "documentation",
                "ci",
                "offline",
            ]
        );
        assert_eq!(catalog.get("build_system", "justfile-recipes").unwrap().points, 2);
        assert!(!catalog.get("ci", "ci-configured").unwrap().required);
    }

    #[test]
    fn test_rsr_catalog_recipe_threshold_is_data() {
        let catalog = rsr_catalog().unwrap();
        let rule = catalog.get("build_system", "justfile-recipes").unwrap();
        let debug = format!("{:?}", rule.probe);

        assert!(debug.contains("min: 20"));
    }
}
