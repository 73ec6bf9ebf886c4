//! CLI command implementations
//!
//! Each command renders its output to a `String`; the binary prints it.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::index::{LookupComparison, LookupMode, SketchIndex};
use crate::sketch::Sketcher;

use super::args::{Commands, IndexArgs};
use super::config::{config_file_path_with_override, PersistentConfig};
use super::dict::load_index;

/// Placeholder printed for an empty result set
pub const NO_MATCHES: &str = "∅";

/// Execute a non-interactive CLI command
pub fn execute(command: Commands, config_path: Option<&Path>) -> Result<String> {
    let settings = PersistentConfig::load_from(config_path)?;

    match command {
        Commands::Repl { .. } => bail!("The repl command is run by the binary, not executed"),
        Commands::Query {
            term,
            dict,
            index,
            mode,
            verify,
        } => {
            let settings = settings.merge_with_cli(&overrides(dict, &index, mode));
            cmd_query(&term, &settings, verify)
        }
        Commands::Compare { term, dict, index } => {
            let settings = settings.merge_with_cli(&overrides(dict, &index, None));
            cmd_compare(&term, &settings)
        }
        Commands::Sketch { words, alphabet } => {
            let settings = settings.merge_with_cli(&PersistentConfig {
                alphabet,
                ..PersistentConfig::default()
            });
            cmd_sketch(&words, &settings)
        }
        Commands::Stats { dict, alphabet } => {
            let settings = settings.merge_with_cli(&PersistentConfig {
                dict_path: dict,
                alphabet,
                ..PersistentConfig::default()
            });
            cmd_stats(&settings)
        }
        Commands::Settings {
            set_dict,
            set_radius,
            set_max_run,
            set_mode,
            set_alphabet,
            reset,
        } => {
            let base = if reset {
                PersistentConfig::default()
            } else {
                settings
            };
            let updated = base.merge_with_cli(&PersistentConfig {
                dict_path: set_dict,
                edit_radius: set_radius,
                max_run: set_max_run,
                mode: set_mode,
                alphabet: set_alphabet,
            });
            cmd_settings(updated, reset, config_path)
        }
    }
}

/// Command-line flags as a config layer
pub fn overrides(
    dict: Option<PathBuf>,
    index: &IndexArgs,
    mode: Option<LookupMode>,
) -> PersistentConfig {
    PersistentConfig {
        dict_path: dict,
        edit_radius: index.radius,
        max_run: index.max_run,
        mode,
        alphabet: index.alphabet.clone(),
    }
}

/// Matches one per line, in iteration order
///
/// The empty word is shown as `""` so it stays visible.
pub fn format_matches<S: AsRef<str>>(matches: impl IntoIterator<Item = S>) -> String {
    let mut output = String::new();
    for (i, word) in matches.into_iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        match word.as_ref() {
            "" => output.push_str("\"\""),
            word => output.push_str(word),
        }
    }
    output
}

/// Render a result set, using the placeholder when it is empty
pub fn render_matches(matches: &BTreeSet<String>) -> String {
    if matches.is_empty() {
        NO_MATCHES.to_string()
    } else {
        format_matches(matches)
    }
}

/// Render both lookups and their differences
pub fn render_comparison(comparison: &LookupComparison) -> String {
    fn line<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
        let items: Vec<&str> = items.into_iter().collect();
        if items.is_empty() {
            NO_MATCHES.to_string()
        } else {
            items.join(" ")
        }
    }

    let mut output = String::new();
    let _ = writeln!(
        output,
        "{} ({}): {}",
        "exact".bold(),
        comparison.exact.len(),
        line(comparison.exact.iter().map(String::as_str))
    );
    let _ = writeln!(
        output,
        "{} ({}): {}",
        "bit-run".bold(),
        comparison.bit_run.len(),
        line(comparison.bit_run.iter().map(String::as_str))
    );
    let _ = writeln!(
        output,
        "{}: {}",
        "exact only".yellow(),
        line(comparison.exact_only())
    );
    let _ = write!(
        output,
        "{}: {}",
        "bit-run only".yellow(),
        line(comparison.bit_run_only())
    );
    output
}

fn require_index(settings: &PersistentConfig) -> Result<(PathBuf, SketchIndex)> {
    let Some(path) = settings.dict_path.clone() else {
        bail!("No dictionary given. Pass --dict <FILE> or set one with 'settings --set-dict'");
    };
    let index = load_index(&path, settings.index_config()?)?;
    Ok((path, index))
}

/// Query command
fn cmd_query(term: &str, settings: &PersistentConfig, verify: bool) -> Result<String> {
    let (_, index) = require_index(settings)?;
    let matches = if verify {
        index.lookup_verified(term)
    } else {
        index.lookup_with(settings.lookup_mode(), term)
    };
    Ok(render_matches(&matches))
}

/// Compare command
fn cmd_compare(term: &str, settings: &PersistentConfig) -> Result<String> {
    let (_, index) = require_index(settings)?;
    Ok(render_comparison(&index.compare(term)))
}

/// Sketch command
fn cmd_sketch(words: &[String], settings: &PersistentConfig) -> Result<String> {
    let sketcher = Sketcher::new(settings.index_config()?.alphabet);
    let mut output = String::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        let sketch = sketcher.sketch(word);
        let _ = write!(output, "{}\t{} {}", word, sketch.forward, sketch.reverse);
    }
    Ok(output)
}

/// Stats command
fn cmd_stats(settings: &PersistentConfig) -> Result<String> {
    let (path, index) = require_index(settings)?;
    let stats = index.stats();
    let mut output = String::new();
    let _ = writeln!(output, "{}", "Index Statistics".bold().underline());
    let _ = writeln!(output);
    let _ = writeln!(output, "  Path:             {}", path.display().to_string().cyan());
    let _ = writeln!(output, "  Alphabet:         {}", index.config().alphabet);
    let _ = writeln!(output, "  Words:            {}", stats.word_count);
    let _ = writeln!(output, "  Buckets:          {}", stats.bucket_count);
    let _ = write!(output, "  Avg bucket size:  {:.3}", stats.avg_bucket_size);
    Ok(output)
}

/// Settings command
fn cmd_settings(updated: PersistentConfig, reset: bool, config_path: Option<&Path>) -> Result<String> {
    updated
        .index_config()
        .context("Refusing to save settings")?;

    let current = PersistentConfig::load_from(config_path)?;
    let path = if reset || updated != current {
        updated.save_to(config_path)?
    } else {
        config_file_path_with_override(config_path)?
    };

    let mut output = render_settings(&updated);
    let _ = write!(output, "\n\n  Config file: {}", path.display().to_string().cyan());
    Ok(output)
}

/// Render persistent settings, showing defaults for unset fields
pub fn render_settings(settings: &PersistentConfig) -> String {
    let defaults = crate::index::IndexConfig::default();
    let mut output = String::new();
    let _ = writeln!(output, "{}", "Current Settings:".bold().underline());
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "  Dictionary:   {}",
        settings
            .dict_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
            .cyan()
    );
    let _ = writeln!(
        output,
        "  Edit radius:  {}",
        settings
            .edit_radius
            .unwrap_or(defaults.edit_radius)
            .to_string()
            .yellow()
    );
    let _ = writeln!(
        output,
        "  Max run:      {}",
        settings.max_run.unwrap_or(defaults.max_run).to_string().yellow()
    );
    let _ = writeln!(
        output,
        "  Mode:         {}",
        settings.lookup_mode().to_string().yellow()
    );
    let _ = write!(
        output,
        "  Alphabet:     {}",
        settings
            .alphabet
            .clone()
            .unwrap_or_else(|| defaults.alphabet.to_string())
            .yellow()
    );
    output
}
