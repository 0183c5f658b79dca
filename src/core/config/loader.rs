use std::{fs, io, path::Path};

use super::ConfigError;

/// Reads the rc file into the list of lines to run at startup.
pub struct ConfigLoader<'a> {
    rc_path: Option<&'a Path>,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(rc_path: Option<&'a Path>) -> Self {
        Self { rc_path }
    }

    /// Lines to execute, in file order. A missing file yields nothing.
    pub fn load_commands(&self) -> Result<Vec<String>, ConfigError> {
        let Some(path) = self.rc_path else {
            return Ok(Vec::new());
        };

        match fs::read_to_string(path) {
            Ok(content) => Ok(content.lines().filter_map(Self::process_line).collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(ConfigError::IoError {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn process_line(line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        Some(line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_skips_comments_and_blanks() {
        let dir = TempDir::new().unwrap();
        let rc = dir.path().join(".conchrc");
        fs::write(&rc, "# setup\n\n  cd /tmp  \nhistory -r ~/.old\n").unwrap();

        let commands = ConfigLoader::new(Some(rc.as_path())).load_commands().unwrap();
        assert_eq!(commands, vec!["cd /tmp", "history -r ~/.old"]);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let rc = dir.path().join("absent");
        assert!(ConfigLoader::new(Some(rc.as_path())).load_commands().unwrap().is_empty());
        assert!(ConfigLoader::new(None).load_commands().unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_path_is_error() {
        let dir = TempDir::new().unwrap();
        // a directory cannot be read as a file
        let result = ConfigLoader::new(Some(dir.path())).load_commands();
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }
}
