use std::{
    fs::{self, File, OpenOptions},
    path::Path,
    process::{Child, Command, ExitStatus, Stdio},
};

#[cfg(unix)]
use std::os::unix::process::CommandExt;

use super::ProcessError;
use crate::parse::{Redirection, Target, WriteMode};

/// Starts external programs in the shell's working directory.
#[derive(Debug, Clone, Copy)]
pub struct ProcessExecutor<'a> {
    cwd: &'a Path,
}

impl<'a> ProcessExecutor<'a> {
    pub fn new(cwd: &'a Path) -> Self {
        Self { cwd }
    }

    /// Create (or open for appending) a redirection target, making any
    /// missing parent directories first.
    pub fn open_target(&self, target: &Target) -> Result<File, ProcessError> {
        let path = target.resolve(self.cwd);
        let redirect_err = |source| ProcessError::Redirect {
            path: target.path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(redirect_err)?;
        }

        let mut options = OpenOptions::new();
        match target.mode {
            WriteMode::Truncate => options.write(true).create(true).truncate(true),
            WriteMode::Append => options.append(true).create(true),
        };
        options.open(&path).map_err(redirect_err)
    }

    /// `Stdio` for an optionally redirected stream, inheriting when not redirected.
    pub fn stdio_for(&self, target: Option<&Target>) -> Result<Stdio, ProcessError> {
        match target {
            Some(target) => Ok(Stdio::from(self.open_target(target)?)),
            None => Ok(Stdio::inherit()),
        }
    }

    /// A `Command` for `program`, shown to itself under the typed `name`.
    pub fn command(&self, name: &str, program: &Path, args: &[String]) -> Command {
        let mut command = Command::new(program);
        command.args(args).current_dir(self.cwd);
        #[cfg(unix)]
        command.arg0(name);
        command
    }

    pub fn spawn(
        &self,
        name: &str,
        program: &Path,
        args: &[String],
        stdin: Stdio,
        stdout: Stdio,
        stderr: Stdio,
    ) -> Result<Child, ProcessError> {
        let child = self
            .command(name, program, args)
            .stdin(stdin)
            .stdout(stdout)
            .stderr(stderr)
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                name: name.to_string(),
                source,
            })?;
        log::debug!("spawned {} ({}) as pid {}", name, program.display(), child.id());
        Ok(child)
    }

    /// Run a lone external command to completion. Unredirected streams are
    /// inherited from the shell; redirected ones go straight to their file.
    pub fn run(
        &self,
        name: &str,
        program: &Path,
        args: &[String],
        redirection: &Redirection,
    ) -> Result<ExitStatus, ProcessError> {
        let stdout = self.stdio_for(redirection.stdout.as_ref())?;
        let stderr = self.stdio_for(redirection.stderr.as_ref())?;

        let mut child = self.spawn(name, program, args, Stdio::inherit(), stdout, stderr)?;
        let status = child.wait()?;
        log::debug!("{} exited with {}", name, status);
        Ok(status)
    }
}
