//! Syntax highlighting for REPL input

use colored::Colorize;
use rustyline::highlight::Highlighter;

use crate::index::LookupMode;

/// Every command name and alias the parser recognizes
pub const COMMAND_WORDS: &[&str] = &[
    "query", "q", "bitrun", "br", "verify", "compare", "cmp", "insert", "add", "contains",
    "has", "load", "sketch", "variants", "radius", "k", "max-run", "maxrun", "alphabet", "mode",
    "stats", "info", "dump", "list", "clear", "settings", "set", "help", "?", "exit", "quit",
];

/// Command highlighter
pub struct CommandHighlighter {
    commands: Vec<String>,
}

impl CommandHighlighter {
    /// Create a highlighter for the REPL command set
    pub fn new() -> Self {
        Self {
            commands: COMMAND_WORDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Colour the command word and numeric or mode arguments
    ///
    /// Lines that do not start with a command are bare queries and are
    /// returned unchanged.
    pub fn highlight_command(&self, line: &str) -> String {
        let Some(first) = line.split_whitespace().next() else {
            return line.to_string();
        };

        let cmd = first.to_lowercase();
        if !self.commands.iter().any(|c| c == &cmd) {
            return line.to_string();
        }

        let leading = line.len() - line.trim_start().len();
        let rest = &line[leading + first.len()..];
        format!(
            "{}{}{}",
            &line[..leading],
            first.blue().bold(),
            self.highlight_args(rest)
        )
    }

    fn highlight_args(&self, args: &str) -> String {
        let mut result = String::with_capacity(args.len());
        let mut rest = args;
        while !rest.is_empty() {
            let gap = rest.len() - rest.trim_start().len();
            result.push_str(&rest[..gap]);
            rest = &rest[gap..];

            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let part = &rest[..end];
            if part.parse::<usize>().is_ok() {
                result.push_str(&part.magenta().to_string());
            } else if part.parse::<LookupMode>().is_ok() {
                result.push_str(&part.cyan().to_string());
            } else {
                result.push_str(part);
            }
            rest = &rest[end..];
        }
        result
    }
}

impl Default for CommandHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for CommandHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> std::borrow::Cow<'l, str> {
        std::borrow::Cow::Owned(self.highlight_command(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}
