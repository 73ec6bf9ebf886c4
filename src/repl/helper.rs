//! Rustyline helper integration
//!
//! Provides completion, hinting, highlighting, and validation for the REPL.

use super::highlighter::CommandHighlighter;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};
use std::borrow::Cow;

/// REPL helper
pub struct SketchHelper {
    highlighter: CommandHighlighter,
    hinter: HistoryHinter,
    commands: Vec<String>,
    modes: Vec<String>,
}

impl SketchHelper {
    /// Create a new helper instance
    pub fn new() -> Self {
        Self {
            highlighter: CommandHighlighter::new(),
            hinter: HistoryHinter::new(),
            commands: vec![
                "query", "bitrun", "verify", "compare", "insert", "contains", "load", "sketch",
                "variants", "radius", "max-run", "alphabet", "mode", "stats", "dump", "clear",
                "settings", "help", "exit", "quit",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            modes: vec!["exact", "bit-run"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    fn matching(options: &[String], prefix: &str, trailing_space: bool) -> Vec<Pair> {
        options
            .iter()
            .filter(|option| option.starts_with(prefix))
            .map(|option| Pair {
                display: option.clone(),
                replacement: if trailing_space {
                    format!("{} ", option)
                } else {
                    option.clone()
                },
            })
            .collect()
    }
}

impl Default for SketchHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for SketchHelper {}

impl Completer for SketchHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let line = &line[..pos];
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.is_empty() {
            return Ok((0, Self::matching(&self.commands, "", true)));
        }

        let start = line.rfind(char::is_whitespace).map(|i| i + 1).unwrap_or(0);
        let typing_new_word = line.ends_with(char::is_whitespace);

        // Command completion if still typing first word
        if parts.len() == 1 && !typing_new_word {
            let prefix = parts[0].to_lowercase();
            return Ok((start, Self::matching(&self.commands, &prefix, true)));
        }

        let prefix = if typing_new_word {
            String::new()
        } else {
            parts.last().map(|s| s.to_lowercase()).unwrap_or_default()
        };
        let arg_count = parts.len() - 1 + usize::from(typing_new_word);

        match parts[0].to_lowercase().as_str() {
            "mode" if arg_count <= 1 => Ok((start, Self::matching(&self.modes, &prefix, false))),
            "help" | "?" if arg_count <= 1 => {
                Ok((start, Self::matching(&self.commands, &prefix, false)))
            }
            _ => Ok((0, vec![])),
        }
    }
}

impl Hinter for SketchHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<Self::Hint> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for SketchHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_char(&self, line: &str, pos: usize, forced: bool) -> bool {
        self.highlighter.highlight_char(line, pos, forced)
    }
}

impl Validator for SketchHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        // Always accept input (validation happens during execution)
        Ok(ValidationResult::Valid(None))
    }
}
