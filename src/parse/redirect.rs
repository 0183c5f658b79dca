use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Truncate,
    Append,
}

/// A file a standard stream is rerouted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub path: String,
    pub mode: WriteMode,
}

impl Target {
    /// Location of the target, relative paths taken from `cwd`.
    pub fn resolve(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.path)
    }
}

/// Result of pulling redirection operators out of a command's arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Redirection {
    pub stdout: Option<Target>,
    pub stderr: Option<Target>,
    pub args: Vec<String>,
}

impl Redirection {
    fn set(&mut self, stream: Stream, target: Target) {
        match stream {
            Stream::Stdout => self.stdout = Some(target),
            Stream::Stderr => self.stderr = Some(target),
        }
    }
}

// Longest operators first so `2>>file` is not read as `2>` + `>file`.
const OPERATORS: [(&str, Stream, WriteMode); 6] = [
    ("1>>", Stream::Stdout, WriteMode::Append),
    ("2>>", Stream::Stderr, WriteMode::Append),
    (">>", Stream::Stdout, WriteMode::Append),
    ("1>", Stream::Stdout, WriteMode::Truncate),
    ("2>", Stream::Stderr, WriteMode::Truncate),
    (">", Stream::Stdout, WriteMode::Truncate),
];

fn operator(token: &str) -> Option<(Stream, WriteMode, &str)> {
    OPERATORS
        .iter()
        .find_map(|(op, stream, mode)| token.strip_prefix(op).map(|rest| (*stream, *mode, rest)))
}

/// Extract `>`, `1>`, `>>`, `1>>`, `2>` and `2>>` from the arguments of a
/// command (its name excluded).
///
/// Operators may stand alone or carry their target (`2>err.log`). A later
/// operator for the same stream overrides an earlier one, and an operator
/// with nothing after it is dropped.
pub fn parse_redirection(tokens: &[String]) -> Redirection {
    let mut redirection = Redirection::default();
    let mut iter = tokens.iter();

    while let Some(token) = iter.next() {
        match operator(token) {
            Some((stream, mode, "")) => {
                if let Some(path) = iter.next() {
                    redirection.set(
                        stream,
                        Target {
                            path: path.clone(),
                            mode,
                        },
                    );
                }
            }
            Some((stream, mode, path)) => redirection.set(
                stream,
                Target {
                    path: path.to_string(),
                    mode,
                },
            ),
            None => redirection.args.push(token.clone()),
        }
    }

    redirection
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tokens: &[&str]) -> Redirection {
        let tokens: Vec<String> = tokens.iter().map(|s| s.to_string()).collect();
        parse_redirection(&tokens)
    }

    fn target(path: &str, mode: WriteMode) -> Option<Target> {
        Some(Target {
            path: path.to_string(),
            mode,
        })
    }

    #[test]
    fn test_no_operators() {
        let r = parse(&["a", "b"]);
        assert_eq!((r.stdout, r.stderr), (None, None));
        assert_eq!(r.args, vec!["a", "b"]);
    }

    #[test]
    fn test_last_operator_wins() {
        let r = parse(&["x", ">", "a", ">", "b"]);
        assert_eq!(r.stdout, target("b", WriteMode::Truncate));
        assert_eq!(r.args, vec!["x"]);
    }

    #[test]
    fn test_concatenated_append() {
        let r = parse(&["1>>out.txt"]);
        assert_eq!(r.stdout, target("out.txt", WriteMode::Append));
        assert!(r.args.is_empty());
    }

    #[test]
    fn test_standalone_operators() {
        let r = parse(&["hi", "1>", "o", "2>>", "e"]);
        assert_eq!(r.stdout, target("o", WriteMode::Truncate));
        assert_eq!(r.stderr, target("e", WriteMode::Append));
        assert_eq!(r.args, vec!["hi"]);
    }

    #[test]
    fn test_concatenated_forms() {
        let r = parse(&[">o", "2>e", "x"]);
        assert_eq!(r.stdout, target("o", WriteMode::Truncate));
        assert_eq!(r.stderr, target("e", WriteMode::Truncate));
        assert_eq!(r.args, vec!["x"]);

        let r = parse(&[">>o", "2>>e"]);
        assert_eq!(r.stdout, target("o", WriteMode::Append));
        assert_eq!(r.stderr, target("e", WriteMode::Append));
    }

    #[test]
    fn test_dangling_operator_dropped() {
        let r = parse(&["x", "2>"]);
        assert_eq!(r.stderr, None);
        assert_eq!(r.args, vec!["x"]);
    }

    #[test]
    fn test_target_resolves_against_cwd() {
        let t = Target {
            path: "out.txt".to_string(),
            mode: WriteMode::Truncate,
        };
        assert_eq!(t.resolve(Path::new("/tmp")), PathBuf::from("/tmp/out.txt"));

        let t = Target {
            path: "/abs/out.txt".to_string(),
            mode: WriteMode::Truncate,
        };
        assert_eq!(t.resolve(Path::new("/tmp")), PathBuf::from("/abs/out.txt"));
    }
}
