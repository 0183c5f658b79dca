use std::{
    fmt,
    io::Write,
    mem,
    process::{Child, ChildStdout, Stdio},
    thread,
};

use super::executor::{report, run_builtin};
use crate::{
    core::{
        commands::{resolve, Command, CommandError, CommandType, Output, Resolution},
        state::ShellState,
    },
    parse::Invocation,
    process::{ProcessError, ProcessExecutor},
};

#[derive(Debug)]
pub enum PipelineError {
    /// An empty stage; carries the offending token.
    Parse(String),
    NotFound(String),
    Spawn(ProcessError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(token) => write!(f, "conch: syntax error near unexpected token `{}'", token),
            Self::NotFound(name) => write!(f, "{}", CommandError::NotFound(name.clone())),
            Self::Spawn(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<ProcessError> for PipelineError {
    fn from(err: ProcessError) -> Self {
        PipelineError::Spawn(err)
    }
}

/// The tokenized stages of a line holding at least one `|`.
#[derive(Debug)]
pub struct Pipeline {
    invocations: Vec<Invocation>,
}

#[derive(Debug)]
pub struct PipelineStage {
    pub invocation: Invocation,
    pub resolution: Resolution,
}

/// A pipeline whose every stage resolved; nothing has run yet.
#[derive(Debug)]
pub struct Plan {
    stages: Vec<PipelineStage>,
}

/// What the next stage reads from.
enum Upstream {
    Closed,
    Pipe(ChildStdout),
    Buffer(Vec<u8>),
}

impl Upstream {
    fn into_stdin(self) -> (Stdio, Option<Vec<u8>>) {
        match self {
            Upstream::Closed => (Stdio::null(), None),
            Upstream::Pipe(stdout) => (Stdio::from(stdout), None),
            Upstream::Buffer(bytes) => (Stdio::piped(), Some(bytes)),
        }
    }
}

impl Pipeline {
    pub fn parse(stages: &[String]) -> Result<Self, PipelineError> {
        let invocations = stages
            .iter()
            .map(|stage| Invocation::parse(stage).ok_or_else(|| PipelineError::Parse("|".into())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { invocations })
    }

    /// Resolve every stage up front. One unknown name abandons the line
    /// before anything is started.
    pub fn plan(self, state: &ShellState) -> Result<Plan, PipelineError> {
        let stages = self
            .invocations
            .into_iter()
            .map(|invocation| match resolve(&invocation.name, state) {
                Some(resolution) => {
                    log::debug!("stage {:?} -> {:?}", invocation.name, resolution);
                    Ok(PipelineStage {
                        invocation,
                        resolution,
                    })
                }
                None => Err(PipelineError::NotFound(invocation.name)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Plan { stages })
    }
}

impl Plan {
    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    fn is_last(&self, index: usize) -> bool {
        index + 1 == self.stages.len()
    }

    /// External stages feeding another external stage get a live pipe.
    fn pipes_to_next(&self, index: usize) -> bool {
        matches!(
            self.stages.get(index + 1).map(|s| &s.resolution),
            Some(Resolution::External(_))
        )
    }

    /// Run every stage, left to right, then wait for all started children.
    /// Builtins run eagerly; their text is fed to the next stage by a
    /// scoped writer thread so a full pipe cannot stall the shell.
    ///
    /// Stages see a copy of the shell state, so `cd` or `history -r`
    /// inside a pipeline leave the shell untouched.
    pub fn execute(self, state: &ShellState) -> Result<(), PipelineError> {
        let state = &mut state.clone();
        let mut children: Vec<(String, Child)> = Vec::with_capacity(self.stages.len());

        let result = thread::scope(|scope| -> Result<(), PipelineError> {
            let mut upstream = Upstream::Closed;

            for (index, stage) in self.stages.iter().enumerate() {
                let input = mem::replace(&mut upstream, Upstream::Closed);

                match &stage.resolution {
                    // builtins never read stdin; `input` is closed here
                    Resolution::Builtin(command) => {
                        upstream = self.run_builtin_stage(state, index, *command);
                    }
                    Resolution::External(program) => {
                        let invocation = &stage.invocation;
                        let executor = ProcessExecutor::new(state.cwd());
                        let (stdin, feed) = input.into_stdin();
                        let stdout = if self.is_last(index) {
                            executor.stdio_for(invocation.redirection.stdout.as_ref())?
                        } else {
                            Stdio::piped()
                        };
                        let stderr = executor.stdio_for(invocation.redirection.stderr.as_ref())?;

                        let mut child = executor.spawn(
                            &invocation.name,
                            program,
                            &invocation.args,
                            stdin,
                            stdout,
                            stderr,
                        )?;

                        if let (Some(bytes), Some(mut pipe)) = (feed, child.stdin.take()) {
                            scope.spawn(move || {
                                if let Err(e) = pipe.write_all(&bytes) {
                                    log::debug!("pipeline feed stopped early: {}", e);
                                }
                            });
                        }

                        // before a builtin the read end is dropped here, so the
                        // stage stops on its next write
                        let output = child.stdout.take();
                        if self.pipes_to_next(index) {
                            upstream = output.map_or(Upstream::Closed, Upstream::Pipe);
                        }
                        children.push((invocation.name.clone(), child));
                    }
                }
            }
            Ok(())
        });

        for (name, mut child) in children {
            match child.wait() {
                Ok(status) => log::debug!("{} exited with {}", name, status),
                Err(e) => log::warn!("couldn't wait for {}: {}", name, e),
            }
        }

        result
    }

    /// The terminal builtin writes like a lone command; any other builtin
    /// becomes the buffered input of the next stage.
    fn run_builtin_stage(
        &self,
        state: &mut ShellState,
        index: usize,
        command: CommandType,
    ) -> Upstream {
        let invocation = &self.stages[index].invocation;

        if self.is_last(index) {
            // `exit` here leaves only the pipeline
            run_builtin(state, command, invocation);
            return Upstream::Closed;
        }

        match command.execute(&invocation.args, state) {
            Ok(Output::Text(text)) => Upstream::Buffer(format!("{}\n", text).into_bytes()),
            Ok(_) => Upstream::Buffer(Vec::new()),
            Err(e) => {
                report(state, &invocation.redirection, &e.to_string());
                Upstream::Buffer(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::test_support::{state_in, state_with_path};
    use crate::shell::executor::{execute_line, Flow};
    use std::{fs, path::Path, sync::mpsc, time::Duration};
    use tempfile::TempDir;

    fn stages(line: &str) -> Vec<String> {
        crate::parse::split_pipeline(line)
    }

    fn system_state(dir: &Path) -> ShellState {
        state_with_path(dir, Path::new("/bin:/usr/bin"))
    }

    fn read(dir: &Path, name: &str) -> String {
        fs::read_to_string(dir.join(name)).unwrap()
    }

    #[test]
    fn test_empty_stage_is_syntax_error() {
        for line in ["ls |", "| ls", "a || b"] {
            let err = Pipeline::parse(&stages(line)).unwrap_err();
            assert_eq!(
                err.to_string(),
                "conch: syntax error near unexpected token `|'",
                "line: {line}"
            );
        }
    }

    #[test]
    fn test_plan_fails_on_unknown_stage() {
        let dir = TempDir::new().unwrap();
        let state = state_with_path(dir.path(), dir.path());
        let pipeline = Pipeline::parse(&stages("echo hi | nosuchcmd | echo x")).unwrap();
        let err = pipeline.plan(&state).unwrap_err();
        assert_eq!(err.to_string(), "nosuchcmd: command not found");
    }

    #[test]
    fn test_unknown_stage_runs_nothing() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(dir.path());

        execute_line(&mut state, "nosuchcmd | echo hi > out.txt");
        assert!(!dir.path().join("out.txt").exists());
    }

    #[test]
    fn test_builtin_to_builtin() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(dir.path());

        execute_line(&mut state, "echo ignored | echo kept > out.txt");
        assert_eq!(read(dir.path(), "out.txt"), "kept\n");
    }

    #[test]
    fn test_interior_builtin_redirect_shadowed_by_pipe() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(dir.path());

        execute_line(&mut state, "echo hi > f.txt | echo tail > out.txt");
        assert!(!dir.path().join("f.txt").exists());
        assert_eq!(read(dir.path(), "out.txt"), "tail\n");
    }

    #[test]
    fn test_pipeline_builtins_leave_shell_state() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("more"), "one\ntwo\n").unwrap();
        let mut state = state_in(dir.path());

        execute_line(&mut state, "echo x | cd sub");
        assert_eq!(state.cwd(), dir.path());

        execute_line(&mut state, "history -r more | echo y");
        assert_eq!(state.history.len(), 0);
    }

    #[test]
    fn test_exit_inside_pipeline_keeps_shell() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(dir.path());
        assert_eq!(execute_line(&mut state, "echo a | exit 3"), Flow::Continue);
    }

    #[cfg(unix)]
    #[test]
    fn test_builtin_feeds_external() {
        let dir = TempDir::new().unwrap();
        let mut state = system_state(dir.path());

        execute_line(&mut state, "echo hello | cat > out.txt");
        assert_eq!(read(dir.path(), "out.txt"), "hello\n");

        execute_line(&mut state, "pwd | cat > where.txt");
        assert_eq!(
            read(dir.path(), "where.txt"),
            format!("{}\n", dir.path().display())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_interior_builtin_output_reaches_next_stage() {
        let dir = TempDir::new().unwrap();
        let mut state = system_state(dir.path());

        execute_line(&mut state, "echo hi > f.txt | cat > out.txt");
        assert!(!dir.path().join("f.txt").exists());
        assert_eq!(read(dir.path(), "out.txt"), "hi\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_endless_producer_into_builtin_returns() {
        let dir = TempDir::new().unwrap();
        let mut state = system_state(dir.path());
        let (done, finished) = mpsc::channel();

        std::thread::spawn(move || {
            execute_line(&mut state, "yes | echo hi > out.txt");
            let _ = done.send(());
        });

        assert!(
            finished.recv_timeout(Duration::from_secs(10)).is_ok(),
            "pipeline still waiting on its producer"
        );
        assert_eq!(read(dir.path(), "out.txt"), "hi\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_external_to_external_live_pipe() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("words.txt"), "pear\napple\nfig\n").unwrap();
        let mut state = system_state(dir.path());

        execute_line(&mut state, "cat words.txt | sort | head -n 2 > top.txt");
        assert_eq!(read(dir.path(), "top.txt"), "apple\nfig\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_external_into_builtin_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("words.txt"), "pear\n").unwrap();
        let mut state = system_state(dir.path());

        execute_line(&mut state, "cat words.txt | echo done > out.txt");
        assert_eq!(read(dir.path(), "out.txt"), "done\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_interior_stderr_redirect_honored() {
        let dir = TempDir::new().unwrap();
        let mut state = system_state(dir.path());

        execute_line(&mut state, "ls missing-entry 2> err.txt | cat > out.txt");
        assert!(read(dir.path(), "err.txt").contains("missing-entry"));
        assert_eq!(read(dir.path(), "out.txt"), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_plan_classifies_stages() {
        let dir = TempDir::new().unwrap();
        let state = system_state(dir.path());
        let plan = Pipeline::parse(&stages("echo a | cat"))
            .unwrap()
            .plan(&state)
            .unwrap();

        assert!(matches!(plan.stages()[0].resolution, Resolution::Builtin(_)));
        assert!(matches!(plan.stages()[1].resolution, Resolution::External(_)));
    }
}
