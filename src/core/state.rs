use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::error::ShellError;
use crate::input::History;
use crate::path::{PathExpander, SearchPath};

/// Everything a command may read or change between prompts.
///
/// Only the control-flow thread touches this value: `cd` is the sole writer
/// of `cwd`, the line executor appends to `history`. External programs are
/// started in `cwd`; the process-wide working directory is never changed.
#[derive(Debug, Clone)]
pub struct ShellState {
    pub cwd: PathBuf,
    pub history: History,
    home: Option<PathBuf>,
    search_path: Option<OsString>,
}

impl ShellState {
    pub fn new(cwd: PathBuf, home: Option<PathBuf>, search_path: Option<OsString>) -> Self {
        Self {
            cwd,
            history: History::new(),
            home,
            search_path,
        }
    }

    /// Capture the working directory, `HOME` and `PATH` of this process.
    pub fn from_env() -> Result<Self, ShellError> {
        let cwd = env::current_dir()?;
        let home = env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir);
        Ok(Self::new(cwd, home, env::var_os("PATH")))
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    pub fn search_path(&self) -> SearchPath {
        SearchPath::new(self.search_path.as_deref())
    }

    pub fn expander(&self) -> PathExpander {
        PathExpander::new(self.home.clone())
    }
}
