use std::{
    env, fmt,
    path::{Path, PathBuf},
};

mod loader;
mod paths;

use crate::flags::Flags;
use loader::ConfigLoader;
pub use paths::{ConfigPaths, RC_FILE_NAME};

/// Startup configuration: the rc file to run and the history file to keep.
#[derive(Debug, Clone)]
pub struct Config {
    paths: ConfigPaths,
}

impl Config {
    pub fn new(paths: ConfigPaths) -> Self {
        Config { paths }
    }

    /// `--config` overrides `~/.conchrc`; `HISTFILE` names the history file.
    pub fn from_env(flags: &Flags, home: Option<&Path>) -> Self {
        let rc_override = flags.get_value("config").map(PathBuf::from);
        let histfile = env::var_os("HISTFILE").map(PathBuf::from);
        Self::new(ConfigPaths::new(home, rc_override, histfile))
    }

    pub fn rc_path(&self) -> Option<&Path> {
        self.paths.rc_path.as_deref()
    }

    pub fn history_file(&self) -> Option<&Path> {
        self.paths.history_path.as_deref()
    }

    pub fn startup_commands(&self) -> Result<Vec<String>, ConfigError> {
        ConfigLoader::new(self.rc_path()).load_commands()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    IoError { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError { path, source } => write!(
                f,
                "{}: {}",
                path.display(),
                crate::error::io_reason(source)
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_override_flag() {
        let mut flags = Flags::new();
        flags
            .parse(&["--config".to_string(), "/tmp/custom_rc".to_string()])
            .unwrap();
        let config = Config::from_env(&flags, Some(Path::new("/home/u")));
        assert_eq!(config.rc_path(), Some(Path::new("/tmp/custom_rc")));
    }

    #[test]
    fn test_default_rc_under_home() {
        let config = Config::new(ConfigPaths::new(Some(Path::new("/home/u")), None, None));
        assert_eq!(
            config.rc_path(),
            Some(Path::new("/home/u").join(RC_FILE_NAME).as_path())
        );
        assert_eq!(config.history_file(), None);
    }
}
