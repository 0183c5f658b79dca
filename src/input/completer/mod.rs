mod command;
mod engine;
mod path;
mod shell;

pub use engine::{disambiguate, CompletionSession, Disambiguation};
pub use shell::ShellCompleter;
