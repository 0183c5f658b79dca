use std::path::{Path, PathBuf};

pub const RC_FILE_NAME: &str = ".conchrc";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPaths {
    /// Startup commands; `None` when neither an override nor a home directory is known.
    pub rc_path: Option<PathBuf>,
    /// History file from `HISTFILE`.
    pub history_path: Option<PathBuf>,
}

impl ConfigPaths {
    pub fn new(home: Option<&Path>, rc_override: Option<PathBuf>, histfile: Option<PathBuf>) -> Self {
        let rc_path = rc_override.or_else(|| home.map(|h| h.join(RC_FILE_NAME)));
        let history_path = histfile.filter(|p| !p.as_os_str().is_empty());

        ConfigPaths {
            rc_path,
            history_path,
        }
    }
}
