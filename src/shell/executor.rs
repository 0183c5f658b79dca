use std::{
    fs::File,
    io::{self, Write},
};

use super::pipeline::Pipeline;
use crate::{
    core::{
        commands::{resolve, Command, CommandError, CommandType, Output, Resolution},
        state::ShellState,
    },
    parse::{split_pipeline, Invocation, Redirection},
    process::{ProcessError, ProcessExecutor},
};

/// What the REPL does after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, command: &str) -> Flow;
}

impl CommandHandler for super::Shell {
    fn execute_command(&mut self, command: &str) -> Flow {
        if command.trim().is_empty() {
            return Flow::Continue;
        }

        self.state.history.add(command);
        if let Err(e) = self.editor.add_history_entry(command) {
            log::warn!("couldn't add to line editor history: {}", e);
        }

        execute_line(&mut self.state, command)
    }
}

/// Run one input line: a single command, or a pipeline when the line
/// holds an unquoted `|`. Failures are reported and never escape the line.
pub fn execute_line(state: &mut ShellState, line: &str) -> Flow {
    let stages = split_pipeline(line);
    log::debug!("executing {:?} ({} stage(s))", line, stages.len());

    if let [stage] = stages.as_slice() {
        return execute_single(state, stage);
    }

    let result = Pipeline::parse(&stages)
        .and_then(|pipeline| pipeline.plan(state))
        .and_then(|plan| plan.execute(state));
    if let Err(e) = result {
        print_error(&e.to_string());
    }
    Flow::Continue
}

fn execute_single(state: &mut ShellState, stage: &str) -> Flow {
    let Some(invocation) = Invocation::parse(stage) else {
        return Flow::Continue;
    };

    match resolve(&invocation.name, state) {
        Some(Resolution::Builtin(command)) => run_builtin(state, command, &invocation),
        Some(Resolution::External(program)) => {
            let executor = ProcessExecutor::new(state.cwd());
            if let Err(e) = executor.run(
                &invocation.name,
                &program,
                &invocation.args,
                &invocation.redirection,
            ) {
                report(state, &invocation.redirection, &e.to_string());
            }
            Flow::Continue
        }
        None => {
            let message = CommandError::NotFound(invocation.name.clone()).to_string();
            report(state, &invocation.redirection, &message);
            Flow::Continue
        }
    }
}

/// Open the declared targets of a builtin, run it, and write its result.
/// A declared stderr target is created even when nothing is written to it.
pub(crate) fn run_builtin(
    state: &mut ShellState,
    command: CommandType,
    invocation: &Invocation,
) -> Flow {
    let (stdout_file, stderr_file) = match open_targets(state, &invocation.redirection) {
        Ok(files) => files,
        Err(e) => {
            print_error(&redirect_failure(&invocation.name, &e));
            return Flow::Continue;
        }
    };

    let result = command.execute(&invocation.args, state);
    let written = match result {
        Ok(Output::Exit(code)) => return Flow::Exit(code),
        Ok(Output::Text(text)) => write_line(stdout_file, &text),
        Ok(Output::Silent) => Ok(()),
        Err(e) => write_error(stderr_file, &e.to_string()),
    };

    if let Err(e) = written {
        print_error(&format!("{}: write error: {}", invocation.name, e));
    }
    Flow::Continue
}

fn open_targets(
    state: &ShellState,
    redirection: &Redirection,
) -> Result<(Option<File>, Option<File>), ProcessError> {
    let executor = ProcessExecutor::new(state.cwd());
    let stdout = redirection
        .stdout
        .as_ref()
        .map(|t| executor.open_target(t))
        .transpose()?;
    let stderr = redirection
        .stderr
        .as_ref()
        .map(|t| executor.open_target(t))
        .transpose()?;
    Ok((stdout, stderr))
}

/// `<command>: <path>: <reason>` for a target that couldn't be opened.
fn redirect_failure(name: &str, err: &ProcessError) -> String {
    format!("{}: {}", name, err)
}

fn write_line(file: Option<File>, text: &str) -> io::Result<()> {
    match file {
        Some(mut file) => writeln!(file, "{}", text),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", text)?;
            stdout.flush()
        }
    }
}

fn write_error(file: Option<File>, message: &str) -> io::Result<()> {
    match file {
        Some(mut file) => writeln!(file, "{}", message),
        None => {
            print_error(message);
            Ok(())
        }
    }
}

/// Report a per-command failure on the command's stderr target when it
/// declared one, on the shell's stderr otherwise.
pub(crate) fn report(state: &ShellState, redirection: &Redirection, message: &str) {
    let file = redirection
        .stderr
        .as_ref()
        .and_then(|t| ProcessExecutor::new(state.cwd()).open_target(t).ok());
    if write_error(file, message).is_err() {
        print_error(message);
    }
}

pub(crate) fn print_error(message: &str) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{}", message);
}
