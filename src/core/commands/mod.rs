use std::path::PathBuf;

mod builtin;
mod cd;
mod history;
mod type_cmd;

pub use builtin::{EchoCommand, ExitCommand, PwdCommand};
pub use cd::CdCommand;
pub use history::HistoryCommand;
pub use type_cmd::TypeCommand;

use crate::core::state::ShellState;
use crate::path::is_executable;

#[derive(Debug)]
pub enum CommandError {
    NotFound(String),
    InvalidArguments(String),
    ExecutionError(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::NotFound(cmd) => write!(f, "{}: command not found", cmd),
            CommandError::InvalidArguments(msg) => write!(f, "{}", msg),
            CommandError::ExecutionError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CommandError {}

/// What a builtin produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Text for stdout, without the trailing newline.
    Text(String),
    /// Nothing to print (`cd`, an empty `history`).
    Silent,
    /// Leave the shell with this status.
    Exit(i32),
}

pub trait Command {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Output, CommandError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Cd(CdCommand),
    Echo(EchoCommand),
    Exit(ExitCommand),
    History(HistoryCommand),
    Pwd(PwdCommand),
    Type(TypeCommand),
}

impl CommandType {
    /// Every builtin name, sorted.
    pub const NAMES: [&'static str; 6] = ["cd", "echo", "exit", "history", "pwd", "type"];

    pub fn from_name(name: &str) -> Option<Self> {
        let command = match name {
            "cd" => CommandType::Cd(CdCommand),
            "echo" => CommandType::Echo(EchoCommand),
            "exit" => CommandType::Exit(ExitCommand),
            "history" => CommandType::History(HistoryCommand),
            "pwd" => CommandType::Pwd(PwdCommand),
            "type" => CommandType::Type(TypeCommand),
            _ => return None,
        };
        Some(command)
    }

    pub fn is_builtin(name: &str) -> bool {
        Self::from_name(name).is_some()
    }
}

impl Command for CommandType {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Output, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, state),
            CommandType::Echo(cmd) => cmd.execute(args, state),
            CommandType::Exit(cmd) => cmd.execute(args, state),
            CommandType::History(cmd) => cmd.execute(args, state),
            CommandType::Pwd(cmd) => cmd.execute(args, state),
            CommandType::Type(cmd) => cmd.execute(args, state),
        }
    }
}

/// How a command name will be run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Builtin(CommandType),
    External(PathBuf),
}

/// Find the executable a name refers to. Names containing `/` are taken
/// as paths relative to the working directory; bare names are looked up
/// on the search path.
pub fn resolve_external(name: &str, state: &ShellState) -> Option<PathBuf> {
    if name.contains('/') {
        let path = state.cwd().join(name);
        return is_executable(&path).then_some(path);
    }
    state.search_path().resolve(name)
}

/// Builtins shadow executables of the same name.
pub fn resolve(name: &str, state: &ShellState) -> Option<Resolution> {
    CommandType::from_name(name)
        .map(Resolution::Builtin)
        .or_else(|| resolve_external(name, state).map(Resolution::External))
}
