//! Prefix completion with the "bell, then list" protocol for ambiguous input.

/// What a completion request resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disambiguation {
    /// Replace the word being completed with this text.
    Replace(String),
    /// Leave the line alone and ring the bell.
    Bell,
    /// Leave the line alone and show these candidates (sorted).
    List(Vec<String>),
}

/// Tracks repeated presses on the same input. Scoped to one input line:
/// the REPL resets it before every prompt.
#[derive(Debug, Clone, Default)]
pub struct CompletionSession {
    last_input: String,
    repeat_count: usize,
}

impl CompletionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.last_input.clear();
        self.repeat_count = 0;
    }

    /// Count this press: consecutive requests for identical input increment
    /// the count, anything else starts over at 1.
    pub fn register(&mut self, input: &str) -> usize {
        if self.repeat_count > 0 && self.last_input == input {
            self.repeat_count += 1;
        } else {
            self.last_input = input.to_string();
            self.repeat_count = 1;
        }
        self.repeat_count
    }

    /// `input` is everything before the cursor and keys the repeat count;
    /// `word` is the part being completed.
    pub fn complete<I>(&mut self, input: &str, word: &str, candidates: I) -> Disambiguation
    where
        I: IntoIterator<Item = String>,
    {
        let presses = self.register(input);
        let outcome = disambiguate(word, candidates, presses);
        log::debug!("complete {:?} (press {}): {:?}", word, presses, outcome);
        outcome
    }
}

/// Decide the outcome for `word` on its `presses`-th consecutive request.
pub fn disambiguate<I>(word: &str, candidates: I, presses: usize) -> Disambiguation
where
    I: IntoIterator<Item = String>,
{
    let mut hits: Vec<String> = candidates
        .into_iter()
        .filter(|c| c.starts_with(word))
        .collect();
    hits.sort();
    hits.dedup();

    match hits.as_slice() {
        [] => Disambiguation::Bell,
        [only] => Disambiguation::Replace(finish(only)),
        _ => {
            let prefix = longest_common_prefix(&hits);
            if prefix.len() > word.len() {
                Disambiguation::Replace(prefix.to_string())
            } else if presses >= 2 {
                Disambiguation::List(hits)
            } else {
                Disambiguation::Bell
            }
        }
    }
}

/// A sole hit is closed with a space, except directories which stay open.
fn finish(hit: &str) -> String {
    if hit.ends_with('/') {
        hit.to_string()
    } else {
        format!("{} ", hit)
    }
}

pub fn longest_common_prefix(words: &[String]) -> &str {
    let Some((first, rest)) = words.split_first() else {
        return "";
    };

    let mut end = first.len();
    for word in rest {
        end = first
            .char_indices()
            .zip(word.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((idx, a), _)| idx + a.len_utf8())
            .min(end);
    }
    &first[..end]
}
