use super::{Command, CommandError, Output};
use crate::core::state::ShellState;
use crate::error::ShellError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CdCommand;

impl Command for CdCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Output, CommandError> {
        let path_str = match args {
            [] => "~",
            [path] => path.as_str(),
            _ => {
                return Err(CommandError::InvalidArguments(
                    "cd: too many arguments".to_string(),
                ))
            }
        };

        let target = state
            .expander()
            .resolve(state.cwd(), path_str)
            .map_err(|e| match e {
                ShellError::HomeDirNotFound => {
                    CommandError::ExecutionError("cd: HOME not set".to_string())
                }
                other => CommandError::ExecutionError(format!("cd: {}", other)),
            })?;

        if target.is_dir() {
            log::debug!("cd {} -> {}", path_str, target.display());
            state.cwd = target;
            Ok(Output::Silent)
        } else if target.exists() {
            Err(CommandError::ExecutionError(format!(
                "cd: {}: Not a directory",
                path_str
            )))
        } else {
            Err(CommandError::ExecutionError(format!(
                "cd: {}: No such file or directory",
                path_str
            )))
        }
    }
}
