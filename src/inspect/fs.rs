use super::{InspectorError, RepositoryInspector};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Inspector backed by a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FsInspector {
    root: PathBuf,
}

impl FsInspector {
    /// Create an inspector rooted at `root`, canonicalized when it exists
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = std::fs::canonicalize(&root).unwrap_or(root);
        Self { root }
    }

    /// Get the repository root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a repository-relative path onto disk. Absolute paths, `..`, and
    /// symlinks whose target lies outside the root are rejected.
    fn resolve(&self, path: &str) -> Result<PathBuf, InspectorError> {
        let relative = Path::new(path);
        let escapes = relative.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(InspectorError::OutsideRoot(path.to_string()));
        }

        let full = self.root.join(relative);
        match std::fs::canonicalize(&full) {
            Ok(real) if real.starts_with(&self.root) => Ok(real),
            Ok(_) => Err(InspectorError::OutsideRoot(path.to_string())),
            Err(e) if is_missing(&e) => Ok(full),
            Err(e) => Err(unavailable(path, &e)),
        }
    }

    fn metadata(&self, path: &str) -> Result<Option<std::fs::Metadata>, InspectorError> {
        let full = self.resolve(path)?;
        match std::fs::metadata(&full) {
            Ok(meta) => Ok(Some(meta)),
            Err(e) if is_missing(&e) => Ok(None),
            Err(e) => Err(unavailable(path, &e)),
        }
    }
}

impl RepositoryInspector for FsInspector {
    fn file_exists(&self, path: &str) -> Result<bool, InspectorError> {
        Ok(self.metadata(path)?.is_some_and(|m| m.is_file()))
    }

    fn dir_exists(&self, path: &str) -> Result<bool, InspectorError> {
        Ok(self.metadata(path)?.is_some_and(|m| m.is_dir()))
    }

    fn read_file(&self, path: &str) -> Result<Option<String>, InspectorError> {
        if !self.file_exists(path)? {
            return Ok(None);
        }

        let full = self.resolve(path)?;
        let bytes = match std::fs::read(&full) {
            Ok(bytes) => bytes,
            Err(e) if is_missing(&e) => return Ok(None),
            Err(e) => return Err(unavailable(path, &e)),
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| InspectorError::NotText {
                path: path.to_string(),
            })
    }
}

fn is_missing(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

fn unavailable(path: &str, e: &io::Error) -> InspectorError {
    InspectorError::Unavailable {
        path: path.to_string(),
        reason: e.to_string(),
    }
}
