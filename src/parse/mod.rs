mod redirect;
mod tokenize;

pub use redirect::{parse_redirection, Redirection, Stream, Target, WriteMode};
pub use tokenize::{split_pipeline, tokenize};

/// One command of a line: its name, remaining arguments and where its
/// output goes. Built fresh for every stage of every line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<String>,
    pub redirection: Redirection,
}

impl Invocation {
    /// Tokenize a single stage. Returns `None` for a blank stage.
    pub fn parse(stage: &str) -> Option<Self> {
        let mut tokens = tokenize(stage);
        if tokens.is_empty() {
            return None;
        }

        let name = tokens.remove(0);
        let mut redirection = parse_redirection(&tokens);
        let args = std::mem::take(&mut redirection.args);

        Some(Self {
            name,
            args,
            redirection,
        })
    }
}
