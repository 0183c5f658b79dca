mod expander;
mod search;

pub use expander::{normalize, PathExpander};
pub use search::{is_executable, SearchPath};
