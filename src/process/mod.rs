use std::fmt;

pub mod executor;
pub mod signal;

pub use executor::ProcessExecutor;

#[derive(Debug)]
pub enum ProcessError {
    /// The program could not be started.
    Spawn { name: String, source: std::io::Error },
    /// A redirection target could not be created or opened.
    Redirect { path: String, source: std::io::Error },
    /// Waiting on or talking to a running child failed.
    Io(std::io::Error),
    SignalError(String),
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Io(e)
    }
}

impl From<ctrlc::Error> for ProcessError {
    fn from(e: ctrlc::Error) -> Self {
        ProcessError::SignalError(e.to_string())
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::error::io_reason;
        match self {
            ProcessError::Spawn { name, source } => write!(f, "{}: {}", name, io_reason(source)),
            ProcessError::Redirect { path, source } => {
                write!(f, "{}: {}", path, io_reason(source))
            }
            ProcessError::Io(e) => write!(f, "{}", io_reason(e)),
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}
