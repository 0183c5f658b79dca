use super::{Command, CommandError, Output};
use crate::core::state::ShellState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(&self, args: &[String], _state: &mut ShellState) -> Result<Output, CommandError> {
        match args {
            [] => Ok(Output::Exit(0)),
            [code] => code
                .parse::<i32>()
                .map(|code| Output::Exit(code.rem_euclid(256)))
                .map_err(|_| {
                    CommandError::InvalidArguments(format!(
                        "exit: {}: numeric argument required",
                        code
                    ))
                }),
            _ => Err(CommandError::InvalidArguments(
                "exit: too many arguments".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EchoCommand;

impl Command for EchoCommand {
    fn execute(&self, args: &[String], _state: &mut ShellState) -> Result<Output, CommandError> {
        Ok(Output::Text(args.join(" ")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(&self, _args: &[String], state: &mut ShellState) -> Result<Output, CommandError> {
        Ok(Output::Text(state.cwd().display().to_string()))
    }
}
