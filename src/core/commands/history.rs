use super::{Command, CommandError, Output};
use crate::core::state::ShellState;
use crate::input::history::HistoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryCommand;

#[derive(Debug, Clone, Copy)]
enum FileAction {
    Read,
    Write,
    Append,
}

impl HistoryCommand {
    fn show_recent(&self, count: usize, state: &ShellState) -> Output {
        let lines: Vec<String> = state
            .history
            .get_recent(count)
            .map(|(idx, entry)| format_entry(idx, entry))
            .collect();

        if lines.is_empty() {
            Output::Silent
        } else {
            Output::Text(lines.join("\n"))
        }
    }

    fn file_action(
        &self,
        action: FileAction,
        flag: &str,
        path: Option<&String>,
        state: &mut ShellState,
    ) -> Result<Output, CommandError> {
        let path = path.ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "history: {}: option requires an argument",
                flag
            ))
        })?;

        let resolved = state
            .expander()
            .resolve(state.cwd(), path)
            .map_err(|e| CommandError::ExecutionError(format!("history: {}", e)))?;

        let result = match action {
            FileAction::Read => state.history.read_from(&resolved).map(|count| {
                log::debug!("read {} history entries from {}", count, resolved.display());
            }),
            FileAction::Write => state.history.write_to(&resolved),
            FileAction::Append => state.history.append_to(&resolved),
        };

        result.map(|()| Output::Silent).map_err(|e| match e {
            HistoryError::Io { source, .. } => CommandError::ExecutionError(format!(
                "history: {}: {}",
                path,
                crate::error::io_reason(&source)
            )),
        })
    }
}

fn format_entry(idx: usize, entry: &str) -> String {
    format!("{:>4} {}", idx, entry)
}

impl Command for HistoryCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Output, CommandError> {
        let Some(first) = args.first() else {
            return Ok(self.show_recent(usize::MAX, state));
        };

        match first.as_str() {
            "-r" => self.file_action(FileAction::Read, first, args.get(1), state),
            "-w" => self.file_action(FileAction::Write, first, args.get(1), state),
            "-a" => self.file_action(FileAction::Append, first, args.get(1), state),
            flag if flag.starts_with('-') && flag.len() > 1 => Err(
                CommandError::InvalidArguments(format!("history: {}: invalid option", flag)),
            ),
            count => {
                let count = count.parse::<usize>().map_err(|_| {
                    CommandError::InvalidArguments(format!(
                        "history: {}: numeric argument required",
                        count
                    ))
                })?;
                Ok(self.show_recent(count, state))
            }
        }
    }
}
