use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use super::HistoryError;

fn wrap(path: &Path) -> impl Fn(std::io::Error) -> HistoryError + '_ {
    move |source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Non-blank lines of a history file, in file order.
pub fn load_entries(path: &Path) -> Result<Vec<String>, HistoryError> {
    let file = File::open(path).map_err(wrap(path))?;
    let reader = BufReader::new(file);

    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(wrap(path))?;
        if !line.trim().is_empty() {
            entries.push(line);
        }
    }
    Ok(entries)
}

/// Write `entries` one per line, either replacing the file or appending to it.
pub fn write_entries(path: &Path, entries: &[String], append: bool) -> Result<(), HistoryError> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .map_err(wrap(path))?;

    let mut writer = BufWriter::new(file);
    for entry in entries {
        writeln!(writer, "{}", entry).map_err(wrap(path))?;
    }
    writer.flush().map_err(wrap(path))
}
