use super::{resolve_external, Command, CommandError, CommandType, Output};
use crate::core::state::ShellState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeCommand;

impl TypeCommand {
    fn describe(&self, name: &str, state: &ShellState) -> String {
        if CommandType::is_builtin(name) {
            format!("{} is a shell builtin", name)
        } else if let Some(path) = resolve_external(name, state) {
            format!("{} is {}", name, path.display())
        } else {
            format!("{}: not found", name)
        }
    }
}

impl Command for TypeCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Output, CommandError> {
        if args.is_empty() {
            return Ok(Output::Silent);
        }
        let lines: Vec<String> = args.iter().map(|name| self.describe(name, state)).collect();
        Ok(Output::Text(lines.join("\n")))
    }
}
