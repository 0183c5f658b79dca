//! Quote and escape handling for a single command line.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Characters a backslash escapes inside double quotes.
const DOUBLE_QUOTE_ESCAPES: [char; 5] = ['"', '\\', '$', '`', '\n'];

fn is_separator(c: char) -> bool {
    c == ' '
}

/// Split a raw line into fully unescaped words.
///
/// Unterminated quotes are tolerated: whatever was accumulated is flushed
/// as the last word.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote = Quote::None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Quote::Single => {
                if c == '\'' {
                    quote = Quote::None;
                } else {
                    current.push(c);
                }
            }
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' => match chars.peek() {
                    Some(&next) if DOUBLE_QUOTE_ESCAPES.contains(&next) => {
                        current.push(next);
                        chars.next();
                    }
                    _ => current.push('\\'),
                },
                _ => current.push(c),
            },
            Quote::None => match c {
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                }
                '\'' => quote = Quote::Single,
                '"' => quote = Quote::Double,
                c if is_separator(c) => {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                }
                _ => current.push(c),
            },
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Split a line into pipeline stage strings on every unquoted, unescaped `|`.
///
/// Stages are returned trimmed but otherwise verbatim (quotes and escapes
/// intact) so each one can be tokenized on its own. A line without a pipe
/// yields exactly one stage.
pub fn split_pipeline(line: &str) -> Vec<String> {
    let mut stages = Vec::new();
    let mut current = String::new();
    let mut quote = Quote::None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Quote::None, '|') => {
                stages.push(current.trim().to_string());
                current.clear();
                continue;
            }
            (Quote::None, '\\') | (Quote::Double, '\\') => {
                current.push(c);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                continue;
            }
            (Quote::None, '\'') => quote = Quote::Single,
            (Quote::None, '"') => quote = Quote::Double,
            (Quote::Single, '\'') | (Quote::Double, '"') => quote = Quote::None,
            _ => {}
        }
        current.push(c);
    }

    stages.push(current.trim().to_string());
    stages
}
