use crate::error::ShellError;
use std::path::{Component, Path, PathBuf};

/// Tilde expansion and lexical path resolution against a working directory.
#[derive(Debug, Clone)]
pub struct PathExpander {
    home: Option<PathBuf>,
}

impl PathExpander {
    pub fn new(home: Option<PathBuf>) -> Self {
        Self { home }
    }

    /// Expand `~` and `~/rest`. Anything else (including `~user`) is returned as is.
    pub fn expand(&self, path: &str) -> Result<PathBuf, ShellError> {
        if path.starts_with('~') {
            self.expand_tilde(path)
        } else {
            Ok(Path::new(path).to_path_buf())
        }
    }

    fn expand_tilde(&self, path: &str) -> Result<PathBuf, ShellError> {
        if path.len() == 1 {
            self.home_dir()
        } else if let Some(stripped) = path[1..].strip_prefix('/') {
            let mut home_path = self.home_dir()?;
            for part in stripped.split('/').filter(|p| !p.is_empty()) {
                home_path.push(part);
            }
            Ok(home_path)
        } else {
            Ok(Path::new(path).to_path_buf())
        }
    }

    pub fn home_dir(&self) -> Result<PathBuf, ShellError> {
        self.home.clone().ok_or(ShellError::HomeDirNotFound)
    }

    /// Expand `path` and resolve it against `cwd`, folding `.` and `..`
    /// without touching the filesystem.
    pub fn resolve(&self, cwd: &Path, path: &str) -> Result<PathBuf, ShellError> {
        let expanded = self.expand(path)?;
        Ok(normalize(&cwd.join(expanded)))
    }
}

/// Lexically fold `.` and `..` components. `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}
