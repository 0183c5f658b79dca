use std::{
    fs,
    path::Path,
};

/// Candidates for an argument word: entries of the directory the word
/// points into, spelled the way the user started typing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    pub fn candidates(&self, cwd: &Path, word: &str) -> Vec<String> {
        let (dir_part, file_prefix) = split_word(word);
        let dir_to_search = if dir_part.is_empty() {
            cwd.to_path_buf()
        } else {
            cwd.join(dir_part)
        };

        let Ok(entries) = fs::read_dir(&dir_to_search) else {
            return Vec::new();
        };

        let mut matches: Vec<String> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                if !name.starts_with(file_prefix) {
                    return None;
                }
                // dot files only when asked for
                if name.starts_with('.') && !file_prefix.starts_with('.') {
                    return None;
                }
                Some(Self::create_candidate(dir_part, &name, &entry.path()))
            })
            .collect();

        matches.sort();
        matches
    }

    fn create_candidate(dir_part: &str, name: &str, path: &Path) -> String {
        if path.is_dir() {
            format!("{}{}/", dir_part, name)
        } else {
            format!("{}{}", dir_part, name)
        }
    }
}

/// `src/ma` -> (`src/`, `ma`); `ma` -> (``, `ma`).
fn split_word(word: &str) -> (&str, &str) {
    match word.rfind('/') {
        Some(idx) => word.split_at(idx + 1),
        None => ("", word),
    }
}
