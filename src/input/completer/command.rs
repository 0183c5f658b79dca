use std::collections::BTreeSet;

use crate::core::commands::CommandType;
use crate::path::SearchPath;

/// Candidates for the command word: builtin names plus every executable on
/// the search path, rescanned on each request.
#[derive(Debug, Clone)]
pub struct CommandCompleter {
    search_path: SearchPath,
}

impl CommandCompleter {
    pub fn new(search_path: SearchPath) -> Self {
        Self { search_path }
    }

    pub fn candidates(&self) -> BTreeSet<String> {
        let mut commands: BTreeSet<String> =
            CommandType::NAMES.iter().map(|s| s.to_string()).collect();
        commands.extend(self.search_path.list_all().into_keys());
        commands
    }
}
