use std::{
    collections::BTreeMap,
    env,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// The ordered list of directories a bare command name is looked up in.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Build from a `PATH`-style value, skipping empty entries.
    pub fn new(value: Option<&OsStr>) -> Self {
        let dirs = value
            .map(|v| {
                env::split_paths(v)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// First executable named `name` in path order.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains('/') {
            return None;
        }
        self.dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| is_executable(candidate))
    }

    /// Every executable across the search path, keyed by file name. On a
    /// name collision the directory earliest in the path wins. Unreadable
    /// directories are skipped. Not cached: each call rescans.
    pub fn list_all(&self) -> BTreeMap<String, PathBuf> {
        let mut found = BTreeMap::new();
        for dir in &self.dirs {
            let Ok(entries) = fs::read_dir(dir) else {
                log::trace!("skipping unreadable path entry {}", dir.display());
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                let path = entry.path();
                if !is_executable(&path) {
                    continue;
                }
                if let Some(name) = entry.file_name().to_str() {
                    found.entry(name.to_string()).or_insert(path);
                }
            }
        }
        found
    }
}

/// Regular file (after following symlinks) with any execute bit set.
pub fn is_executable(path: &Path) -> bool {
    let Ok(meta) = fs::metadata(path) else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        meta.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}
