use super::{InspectorError, RepositoryInspector};
use std::collections::{BTreeMap, BTreeSet};

/// In-memory repository snapshot.
///
/// Parent directories of every added file are implied.
#[derive(Debug, Clone, Default)]
pub struct MemoryInspector {
    files: BTreeMap<String, String>,
    dirs: BTreeSet<String>,
    unavailable: BTreeSet<String>,
}

impl MemoryInspector {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given contents
    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        let path = normalize(path);
        self.add_parents(&path);
        self.files.insert(path, contents.to_string());
        self
    }

    /// Add an (empty) directory
    pub fn with_dir(mut self, path: &str) -> Self {
        let path = normalize(path);
        self.add_parents(&path);
        self.dirs.insert(path);
        self
    }

    /// Make every query for `path` fail as unavailable
    pub fn with_unavailable(mut self, path: &str) -> Self {
        self.unavailable.insert(normalize(path));
        self
    }

    fn add_parents(&mut self, path: &str) {
        let mut current = path;
        while let Some((parent, _)) = current.rsplit_once('/') {
            self.dirs.insert(parent.to_string());
            current = parent;
        }
    }

    fn guard(&self, path: &str) -> Result<String, InspectorError> {
        let path = normalize(path);
        if self.unavailable.contains(&path) {
            return Err(InspectorError::Unavailable {
                path,
                reason: "snapshot marked unavailable".to_string(),
            });
        }
        Ok(path)
    }
}

impl RepositoryInspector for MemoryInspector {
    fn file_exists(&self, path: &str) -> Result<bool, InspectorError> {
        let path = self.guard(path)?;
        Ok(self.files.contains_key(&path))
    }

    fn dir_exists(&self, path: &str) -> Result<bool, InspectorError> {
        let path = self.guard(path)?;
        Ok(self.dirs.contains(&path))
    }

    fn read_file(&self, path: &str) -> Result<Option<String>, InspectorError> {
        let path = self.guard(path)?;
        Ok(self.files.get(&path).cloned())
    }
}

fn normalize(path: &str) -> String {
    path.trim_start_matches("./").trim_end_matches('/').to_string()
}
