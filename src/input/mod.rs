mod completer;
pub mod history;

pub use completer::{CompletionSession, Disambiguation, ShellCompleter};
pub use history::History;
