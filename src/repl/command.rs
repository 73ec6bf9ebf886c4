//! Command parsing and execution
//!
//! Defines all REPL commands and their execution logic.

use super::state::ReplState;
use crate::cli::commands::{render_comparison, render_matches};
use crate::edits::edits_within;
use crate::index::LookupMode;
use crate::variants::{mask_count, variant_count};
use anyhow::{Context, Result};
use colored::Colorize;
use rustc_hash::FxHashSet;
use std::path::PathBuf;

/// REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fuzzy lookup: query <term>, bitrun <term>, or a bare line
    Query {
        /// Query term
        term: String,
        /// Lookup to use; `None` means the session mode
        mode: Option<LookupMode>,
    },
    /// Lookup with distance verification: verify <term>
    Verify {
        /// Query term
        term: String,
    },
    /// Run both lookups: compare <term>
    Compare {
        /// Query term
        term: String,
    },
    /// Insert word(s): insert <word> [word2] ...
    Insert {
        /// Words to insert
        words: Vec<String>,
    },
    /// Check if a word was inserted: contains <word>
    Contains {
        /// Word to check
        word: String,
    },
    /// Replace the index with a dictionary file: load <path>
    Load {
        /// Path to dictionary file
        path: PathBuf,
    },
    /// Show sketches: sketch <word> [word2] ...
    Sketch {
        /// Words to sketch
        words: Vec<String>,
    },
    /// Show neighborhood sizes for a word: variants <word>
    Variants {
        /// Word to expand
        word: String,
    },
    /// Show or set the edit radius: radius [k]
    Radius {
        /// New radius
        radius: Option<usize>,
    },
    /// Show or set the maximum bit-run length: max-run [n]
    MaxRun {
        /// New maximum run length
        max_run: Option<u32>,
    },
    /// Show or set the alphabet: alphabet [symbols]
    Alphabet {
        /// New alphabet symbols
        symbols: Option<String>,
    },
    /// Show or set the session lookup mode: mode [exact|bit-run]
    Mode {
        /// New mode
        mode: Option<LookupMode>,
    },
    /// Show statistics: stats
    Stats,
    /// Dump all words: dump [limit]
    Dump {
        /// Limit number of words to dump
        limit: Option<usize>,
    },
    /// Remove every word: clear
    Clear,
    /// Show settings: settings
    Settings,
    /// Show help: help [command]
    Help {
        /// Help topic
        topic: Option<String>,
    },
    /// Exit REPL: exit | quit
    Exit,
}

/// Command result
pub enum CommandResult {
    /// Continue REPL
    Continue(String),
    /// Exit REPL
    Exit,
    /// No output
    Silent,
}

impl Command {
    /// Parse command from input string
    ///
    /// A line whose first word is not a command is a query for the whole
    /// line in the session mode.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(anyhow::anyhow!("Empty command"));
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();
        let args = &parts[1..];

        match cmd.as_str() {
            "query" | "q" => Self::parse_query(args, None, "query <term>"),
            "bitrun" | "br" => Self::parse_query(args, Some(LookupMode::BitRun), "bitrun <term>"),
            "verify" => Self::parse_term(args, "verify <term>")
                .map(|term| Self::Verify { term }),
            "compare" | "cmp" => Self::parse_term(args, "compare <term>")
                .map(|term| Self::Compare { term }),
            "insert" | "add" => Self::parse_insert(args),
            "contains" | "has" => Self::parse_term(args, "contains <word>")
                .map(|word| Self::Contains { word }),
            "load" => Self::parse_load(args),
            "sketch" => Self::parse_sketch(args),
            "variants" => Self::parse_term(args, "variants <word>")
                .map(|word| Self::Variants { word }),
            "radius" | "k" => Self::parse_radius(args),
            "max-run" | "maxrun" => Self::parse_max_run(args),
            "alphabet" => Ok(Self::Alphabet {
                symbols: args.first().map(|s| s.to_string()),
            }),
            "mode" => Self::parse_mode(args),
            "stats" | "info" => Ok(Self::Stats),
            "dump" | "list" => Self::parse_dump(args),
            "clear" => Ok(Self::Clear),
            "settings" | "set" => Ok(Self::Settings),
            "help" | "?" => Ok(Self::Help {
                topic: args.first().map(|s| s.to_string()),
            }),
            "exit" | "quit" => Ok(Self::Exit),
            _ => Ok(Self::Query {
                term: input.to_string(),
                mode: None,
            }),
        }
    }

    fn parse_term(args: &[&str], usage: &str) -> Result<String> {
        if args.is_empty() {
            return Err(anyhow::anyhow!("Usage: {}", usage));
        }
        Ok(args.join(" "))
    }

    fn parse_query(args: &[&str], mode: Option<LookupMode>, usage: &str) -> Result<Self> {
        let term = Self::parse_term(args, usage)?;
        Ok(Self::Query { term, mode })
    }

    fn parse_insert(args: &[&str]) -> Result<Self> {
        if args.is_empty() {
            return Err(anyhow::anyhow!("Usage: insert <word> [word2] [word3] ..."));
        }
        Ok(Self::Insert {
            words: args.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn parse_load(args: &[&str]) -> Result<Self> {
        if args.is_empty() {
            return Err(anyhow::anyhow!("Usage: load <path>"));
        }
        Ok(Self::Load {
            path: PathBuf::from(args.join(" ")),
        })
    }

    fn parse_sketch(args: &[&str]) -> Result<Self> {
        if args.is_empty() {
            return Err(anyhow::anyhow!("Usage: sketch <word> [word2] ..."));
        }
        Ok(Self::Sketch {
            words: args.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn parse_radius(args: &[&str]) -> Result<Self> {
        let radius = match args.first() {
            Some(arg) => Some(arg.parse().context("Invalid radius value")?),
            None => None,
        };
        Ok(Self::Radius { radius })
    }

    fn parse_max_run(args: &[&str]) -> Result<Self> {
        let max_run = match args.first() {
            Some(arg) => Some(arg.parse().context("Invalid max-run value")?),
            None => None,
        };
        Ok(Self::MaxRun { max_run })
    }

    fn parse_mode(args: &[&str]) -> Result<Self> {
        let mode = match args.first() {
            Some(arg) => Some(arg.parse::<LookupMode>().map_err(|e| anyhow::anyhow!(e))?),
            None => None,
        };
        Ok(Self::Mode { mode })
    }

    fn parse_dump(args: &[&str]) -> Result<Self> {
        let limit = match args.first() {
            Some(arg) => Some(arg.parse().context("Invalid limit value")?),
            None => None,
        };
        Ok(Self::Dump { limit })
    }

    /// Whether running this command changes persisted settings
    pub fn changes_settings(&self) -> bool {
        matches!(
            self,
            Self::Load { .. }
                | Self::Radius { radius: Some(_) }
                | Self::MaxRun { max_run: Some(_) }
                | Self::Alphabet { symbols: Some(_) }
                | Self::Mode { mode: Some(_) }
        )
    }

    /// Execute command
    pub fn execute(&self, state: &mut ReplState) -> Result<CommandResult> {
        match self {
            Self::Query { term, mode } => {
                let results = state.query(term, *mode);
                Ok(CommandResult::Continue(render_matches(&results)))
            }

            Self::Verify { term } => {
                let results = state.index.lookup_verified(term);
                Ok(CommandResult::Continue(render_matches(&results)))
            }

            Self::Compare { term } => {
                let comparison = state.index.compare(term);
                Ok(CommandResult::Continue(render_comparison(&comparison)))
            }

            Self::Insert { words } => {
                let mut inserted = 0;
                let mut skipped = 0;
                for word in words {
                    if state.index.insert(word) {
                        inserted += 1;
                    } else {
                        skipped += 1;
                    }
                }

                let msg = if skipped > 0 {
                    format!(
                        "Inserted {} word(s), {} already existed",
                        inserted.to_string().green().bold(),
                        skipped.to_string().yellow()
                    )
                } else {
                    format!("Inserted {} word(s)", inserted.to_string().green().bold())
                };
                Ok(CommandResult::Continue(msg))
            }

            Self::Contains { word } => {
                let msg = if state.index.contains(word) {
                    format!("{}: {}", "Found".green().bold(), word)
                } else {
                    format!("{}: {}", "Not found".red(), word)
                };
                Ok(CommandResult::Continue(msg))
            }

            Self::Load { path } => {
                let count = state.load_file(path)?;
                let msg = format!(
                    "Loaded {} word(s) from {}",
                    count.to_string().green().bold(),
                    path.display().to_string().cyan()
                );
                Ok(CommandResult::Continue(msg))
            }

            Self::Sketch { words } => {
                let output = words
                    .iter()
                    .map(|word| {
                        let sketch = state.index.sketch(word);
                        format!(
                            "{}: F={} R={}",
                            word.cyan(),
                            sketch.forward,
                            sketch.reverse
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(CommandResult::Continue(output))
            }

            Self::Variants { word } => {
                let config = state.index.config();
                let neighborhood = edits_within(word, config.edit_radius, &config.alphabet);
                let sketches: FxHashSet<_> = neighborhood
                    .iter()
                    .map(|candidate| state.index.sketch(candidate))
                    .collect();
                let msg = format!(
                    "{}\n  Exact neighborhood:  {} string(s), {} distinct sketch(es)\n  Bit-run variants:    at most {} ({} run masks)",
                    format!("Radius {}", config.edit_radius).bold(),
                    neighborhood.len().to_string().yellow(),
                    sketches.len().to_string().yellow(),
                    variant_count(config.edit_radius, config.max_run)
                        .to_string()
                        .yellow(),
                    mask_count(config.max_run)
                );
                Ok(CommandResult::Continue(msg))
            }

            Self::Radius { radius } => {
                if let Some(k) = radius {
                    state.set_radius(*k)?;
                }
                let msg = format!(
                    "Edit radius: {}",
                    state.index.edit_radius().to_string().green().bold()
                );
                Ok(CommandResult::Continue(msg))
            }

            Self::MaxRun { max_run } => {
                if let Some(n) = max_run {
                    state.set_max_run(*n)?;
                }
                let msg = format!(
                    "Max run: {}",
                    state.index.config().max_run.to_string().green().bold()
                );
                Ok(CommandResult::Continue(msg))
            }

            Self::Alphabet { symbols } => {
                if let Some(symbols) = symbols {
                    state.set_alphabet(symbols)?;
                }
                let msg = format!(
                    "Alphabet: {}",
                    state.index.config().alphabet.to_string().green().bold()
                );
                Ok(CommandResult::Continue(msg))
            }

            Self::Mode { mode } => {
                if let Some(mode) = mode {
                    state.mode = *mode;
                }
                let msg = format!("Lookup mode: {}", state.mode.to_string().green().bold());
                Ok(CommandResult::Continue(msg))
            }

            Self::Stats => Ok(CommandResult::Continue(state.index.stats().to_string())),

            Self::Dump { limit } => {
                let words = state.index.words();
                let total = words.len();
                let shown = limit.unwrap_or(total).min(total);

                let mut output = String::new();
                for (i, word) in words.iter().take(shown).enumerate() {
                    output.push_str(&format!("{:4}. {}\n", i + 1, word));
                }

                if shown < total {
                    output.push_str(&format!(
                        "\n... {} more words (showing {}/{})",
                        (total - shown).to_string().yellow(),
                        shown,
                        total
                    ));
                } else {
                    output.push_str(&format!("\nTotal: {} words", total.to_string().green()));
                }

                Ok(CommandResult::Continue(output))
            }

            Self::Clear => {
                let count = state.index.len();
                state.index.clear();
                let msg = format!("Cleared {} word(s)", count.to_string().green().bold());
                Ok(CommandResult::Continue(msg))
            }

            Self::Settings => {
                let config = state.index.config();
                let mut output = String::new();
                output.push_str(&format!("{}\n\n", "Current Settings:".bold().underline()));
                output.push_str(&format!(
                    "  Dictionary:   {}\n",
                    state
                        .dict_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(none)".to_string())
                        .cyan()
                ));
                output.push_str(&format!(
                    "  Edit radius:  {}\n",
                    config.edit_radius.to_string().yellow()
                ));
                output.push_str(&format!(
                    "  Max run:      {}\n",
                    config.max_run.to_string().yellow()
                ));
                output.push_str(&format!(
                    "  Mode:         {}\n",
                    state.mode.to_string().yellow()
                ));
                output.push_str(&format!(
                    "  Alphabet:     {}\n",
                    config.alphabet.to_string().yellow()
                ));
                output.push_str(&format!(
                    "  Words:        {}",
                    state.index.len().to_string().yellow()
                ));
                Ok(CommandResult::Continue(output))
            }

            Self::Help { topic } => {
                let help_text = match topic {
                    Some(topic) => Self::command_help(topic),
                    None => Self::general_help(),
                };
                Ok(CommandResult::Continue(help_text))
            }

            Self::Exit => Ok(CommandResult::Exit),
        }
    }

    fn general_help() -> String {
        format!(
            r#"{}

{}
  query, q <term>           Fuzzy lookup in the current mode
  bitrun, br <term>         Bit-run lookup
  verify <term>             Exact lookup, dropping sketch collisions
  compare, cmp <term>       Run both lookups and show differences
  <term>                    Any other line is a query

{}
  insert, add <word> ...    Insert word(s)
  contains, has <word>      Check if a word was inserted
  load <path>               Replace the index with a dictionary file
  dump, list [limit]        Show all words (optionally limited)
  clear                     Remove all words

{}
  sketch <word> ...         Show forward/reverse sketches
  variants <word>           Show neighborhood sizes
  stats, info               Show index statistics

{}
  radius, k [n]             Show or set the edit radius (0-3)
  max-run [n]               Show or set the bit-run length (1-64)
  alphabet [symbols]        Show or set the alphabet
  mode [exact|bit-run]      Show or set the lookup mode
  settings, set             Show current settings

{}
  help, ? [command]         Show this help or help for specific command
  exit, quit                Exit REPL

For detailed help on a command, type: help <command>
"#,
            "rollsketch REPL - Interactive Sketch Index Explorer"
                .bold()
                .underline(),
            "Lookups:".bold(),
            "Dictionary:".bold(),
            "Inspection:".bold(),
            "Configuration:".bold(),
            "Utility:".bold(),
        )
    }

    fn command_help(topic: &str) -> String {
        match topic.to_lowercase().as_str() {
            "query" | "q" | "bitrun" | "br" => format!(
                r#"{}

{}
  query <term>
  bitrun <term>
  <term>

{}
  Exact mode sketches every string within the edit radius of <term>
  and returns the indexed words in the buckets they hit.
  Bit-run mode flips up to k runs of 1..max-run bits in the sketch
  of <term>. It is faster but may miss matches and return unrelated
  words. Results are sorted; an empty result prints ∅.

{}
  query helo                    # lookup in the current mode
  bitrun helo                   # force bit-run lookup
  helo                          # same as 'query helo'
"#,
                "query - Fuzzy Lookup".bold().underline(),
                "Usage:".bold(),
                "Description:".bold(),
                "Examples:".bold(),
            ),
            "compare" | "cmp" => format!(
                r#"{}

{}
  compare <term>

{}
  Runs the exact and bit-run lookups and lists the words only one
  of them found.
"#,
                "compare - Compare Lookups".bold().underline(),
                "Usage:".bold(),
                "Description:".bold(),
            ),
            "radius" | "k" => format!(
                r#"{}

{}
  radius [k]

{}
  Sets the maximum edit distance. The index is rebuilt from its
  words. Values above 3 are rejected; the exact neighborhood grows
  as (length x alphabet)^k.
"#,
                "radius - Edit Radius".bold().underline(),
                "Usage:".bold(),
                "Description:".bold(),
            ),
            "alphabet" => format!(
                r#"{}

{}
  alphabet [symbols]

{}
  Sets the symbols used for hashing and for generating edits, in
  value order. Characters outside the alphabet hash like its last
  symbol. The index is rebuilt from its words.
"#,
                "alphabet - Symbol Table".bold().underline(),
                "Usage:".bold(),
                "Description:".bold(),
            ),
            "load" => format!(
                r#"{}

{}
  load <path>

{}
  Replaces the index contents with the words of a text file, one
  word per line. Blank lines and lines starting with '#' are skipped.
"#,
                "load - Load Dictionary".bold().underline(),
                "Usage:".bold(),
                "Description:".bold(),
            ),
            _ => format!(
                "No help available for '{}'. Try 'help' for general help.",
                topic
            ),
        }
    }
}
