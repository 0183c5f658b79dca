use rustyline::{
    config::{BellStyle, CompletionType},
    error::ReadlineError,
    history::DefaultHistory,
    Editor,
};

pub mod executor;
pub mod pipeline;

use crate::{
    core::{config::Config, state::ShellState},
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::{history::HistoryError, ShellCompleter},
};

pub use executor::{execute_line, Flow};
use executor::CommandHandler;

pub const PROMPT: &str = "$ ";

pub struct Shell {
    pub(crate) editor: Editor<ShellCompleter, DefaultHistory>,
    pub(crate) state: ShellState,
    pub(crate) config: Config,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let mut state = ShellState::from_env()?;
        let config = Config::from_env(&flags, state.home());

        if let Some(path) = config.history_file() {
            match state.history.load(path) {
                Ok(count) => log::debug!("loaded {} history entries from {}", count, path.display()),
                Err(HistoryError::Io { ref source, .. })
                    if source.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => log::warn!("couldn't load history: {}", e),
            }
        }

        let mut completer = ShellCompleter::new(state.search_path(), PROMPT, state.cwd.clone());
        if flags.is_set("color") {
            completer = completer.with_highlighter(SyntaxHighlighter::new(state.search_path()));
        }

        // the completer rings the bell and prints listings itself
        let editor_config = rustyline::Config::builder()
            .completion_type(CompletionType::List)
            .bell_style(BellStyle::None)
            .auto_add_history(false)
            .build();
        let mut editor = Editor::with_config(editor_config)?;
        editor.set_helper(Some(completer));

        Ok(Shell {
            editor,
            state,
            config,
        })
    }

    /// Read and run lines until `exit` or end of input. Returns the status
    /// the process should exit with.
    pub fn run(&mut self) -> Result<i32, ShellError> {
        if let Flow::Exit(code) = self.run_startup() {
            return Ok(self.finish(code));
        }

        loop {
            if let Some(helper) = self.editor.helper_mut() {
                helper.begin_line(self.state.cwd.clone());
            }

            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    if let Flow::Exit(code) = self.execute_command(&line) {
                        return Ok(self.finish(code));
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(self.finish(0)),
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Rc file lines go through the line executor but not into history.
    fn run_startup(&mut self) -> Flow {
        let commands = match self.config.startup_commands() {
            Ok(commands) => commands,
            Err(e) => {
                log::warn!("couldn't read rc file: {}", e);
                return Flow::Continue;
            }
        };

        for line in commands {
            log::debug!("rc: {}", line);
            if let Flow::Exit(code) = execute_line(&mut self.state, &line) {
                return Flow::Exit(code);
            }
        }
        Flow::Continue
    }

    fn finish(&mut self, code: i32) -> i32 {
        if let Some(path) = self.config.history_file() {
            if let Err(e) = self.state.history.append_to(path) {
                log::warn!("couldn't save history: {}", e);
            }
        }
        code
    }
}
