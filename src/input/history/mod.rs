mod file_ops;

use std::{fmt, path::Path, path::PathBuf};

#[derive(Debug)]
pub enum HistoryError {
    Io { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Io { path, source } => write!(
                f,
                "{}: {}",
                path.display(),
                crate::error::io_reason(source)
            ),
        }
    }
}

impl std::error::Error for HistoryError {}

/// Append-only log of the lines entered in this session.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    // entries before this index have already been written out by `append_to`/`write_to`
    saved_upto: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw input line. Blank lines are ignored.
    pub fn add(&mut self, entry: &str) {
        if entry.trim().is_empty() {
            return;
        }
        self.entries.push(entry.to_owned());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The last `count` entries paired with their 1-based position in the
    /// whole history.
    pub fn get_recent(&self, count: usize) -> impl Iterator<Item = (usize, &str)> {
        let skip = self.entries.len().saturating_sub(count);
        self.entries
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(idx, entry)| (idx + 1, entry.as_str()))
    }

    /// Append the non-blank lines of `path` (`history -r`).
    pub fn read_from(&mut self, path: &Path) -> Result<usize, HistoryError> {
        let loaded = file_ops::load_entries(path)?;
        let count = loaded.len();
        self.entries.extend(loaded);
        Ok(count)
    }

    /// Seed from a history file at startup. The seeded lines count as saved.
    pub fn load(&mut self, path: &Path) -> Result<usize, HistoryError> {
        let count = self.read_from(path)?;
        self.saved_upto = self.entries.len();
        Ok(count)
    }

    /// Replace `path` with the whole history (`history -w`).
    pub fn write_to(&mut self, path: &Path) -> Result<(), HistoryError> {
        file_ops::write_entries(path, &self.entries, false)?;
        self.saved_upto = self.entries.len();
        Ok(())
    }

    /// Append the entries not yet saved to `path` (`history -a`).
    pub fn append_to(&mut self, path: &Path) -> Result<(), HistoryError> {
        file_ops::write_entries(path, &self.entries[self.saved_upto..], true)?;
        self.saved_upto = self.entries.len();
        Ok(())
    }
}
