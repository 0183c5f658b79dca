use inksac::prelude::*;

use crate::core::commands::CommandType;
use crate::path::SearchPath;

/// Colors the line being edited: the command word cyan when it can be run,
/// red when it cannot, and `-flags` yellow. Spacing is preserved exactly so
/// the editor's cursor arithmetic still holds.
#[derive(Debug, Clone)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
    search_path: SearchPath,
}

impl SyntaxHighlighter {
    pub fn new(search_path: SearchPath) -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
            search_path,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    fn is_known(&self, name: &str) -> bool {
        CommandType::is_builtin(name) || self.search_path.resolve(name).is_some()
    }

    pub fn highlight_command(&self, input: &str) -> String {
        if !self.is_enabled() {
            return input.to_string();
        }

        let mut seen_command = false;
        let parts: Vec<String> = input
            .split(' ')
            .map(|part| {
                if part.is_empty() {
                    String::new()
                } else if !seen_command {
                    seen_command = true;
                    self.style_command(part)
                } else if part.starts_with('-') {
                    let flag_style = Style::builder().foreground(Color::Yellow).build();
                    part.style(flag_style).to_string()
                } else {
                    part.to_string()
                }
            })
            .collect();

        parts.join(" ")
    }

    fn style_command(&self, word: &str) -> String {
        let color = if self.is_known(word) {
            Color::Cyan
        } else {
            Color::Red
        };
        let command_style = Style::builder().foreground(color).bold().build();
        word.style(command_style).to_string()
    }
}
