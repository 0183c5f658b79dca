use std::{
    borrow::Cow,
    cell::RefCell,
    io::{self, Write},
    path::PathBuf,
};

use super::{
    command::CommandCompleter,
    engine::{CompletionSession, Disambiguation},
    path::PathCompleter,
};
use crate::highlight::SyntaxHighlighter;
use crate::path::SearchPath;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

const BELL: &str = "\x07";

/// The line editor's helper: completion for commands and paths, plus
/// optional highlighting. The editor calls back into it synchronously.
pub struct ShellCompleter {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: Option<SyntaxHighlighter>,
    session: RefCell<CompletionSession>,
    cwd: PathBuf,
    prompt: String,
}

impl ShellCompleter {
    pub fn new(search_path: SearchPath, prompt: &str, cwd: PathBuf) -> Self {
        ShellCompleter {
            command_completer: CommandCompleter::new(search_path),
            path_completer: PathCompleter::new(),
            highlighter: None,
            session: RefCell::new(CompletionSession::new()),
            cwd,
            prompt: prompt.to_string(),
        }
    }

    pub fn with_highlighter(mut self, highlighter: SyntaxHighlighter) -> Self {
        self.highlighter = Some(highlighter).filter(SyntaxHighlighter::is_enabled);
        self
    }

    /// Called before every prompt: forget earlier presses and pick up a
    /// working directory changed by `cd`.
    pub fn begin_line(&mut self, cwd: PathBuf) {
        self.session.get_mut().reset();
        self.cwd = cwd;
    }

    /// Work out the outcome for the text before the cursor. Returns where
    /// the completed word starts.
    pub fn resolve(&self, line_to_cursor: &str) -> (usize, Disambiguation) {
        let start = line_to_cursor.rfind(' ').map_or(0, |idx| idx + 1);
        let word = &line_to_cursor[start..];
        let head = line_to_cursor[..start].trim_end();

        let candidates: Vec<String> = if head.is_empty() || head.ends_with('|') {
            self.command_completer.candidates().into_iter().collect()
        } else {
            self.path_completer.candidates(&self.cwd, word)
        };

        let outcome = self
            .session
            .borrow_mut()
            .complete(line_to_cursor, word, candidates);
        (start, outcome)
    }

    fn emit(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match &self.highlighter {
            Some(highlighter) => Cow::Owned(highlighter.highlight_command(line)),
            None => Cow::Borrowed(line),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        self.highlighter.is_some()
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, outcome) = self.resolve(&line[..pos]);

        match outcome {
            Disambiguation::Replace(text) => Ok((
                start,
                vec![Pair {
                    display: text.clone(),
                    replacement: text,
                }],
            )),
            Disambiguation::Bell => {
                self.emit(BELL)?;
                Ok((start, Vec::new()))
            }
            Disambiguation::List(hits) => {
                self.emit(&format!("\n{}\n{}{}", hits.join("  "), self.prompt, line))?;
                Ok((start, Vec::new()))
            }
        }
    }
}
