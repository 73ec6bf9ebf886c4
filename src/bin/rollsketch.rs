//! rollsketch - Fuzzy string lookup over rolling-hash sketches
//!
//! Provides CLI utilities and an interactive REPL for sketch indexes.

use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process;

use rollsketch::cli::commands::{self, overrides};
use rollsketch::cli::{init_logging, Cli, Commands, IndexArgs, PersistentConfig};
use rollsketch::index::LookupMode;
use rollsketch::repl::{Command, CommandResult, ReplConfig, ReplState, SketchHelper};
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Repl { dict, index, mode } => {
            run_repl(dict, &index, mode, cli.config.as_deref())
        }
        command => commands::execute(command, cli.config.as_deref()).map(|output| {
            if !output.is_empty() {
                println!("{}", output);
            }
        }),
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }
}

fn run_repl(
    dict_path: Option<PathBuf>,
    index_args: &IndexArgs,
    mode: Option<LookupMode>,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    // Load persistent config and merge with CLI options
    let config = PersistentConfig::load_from(config_path).unwrap_or_else(|e| {
        eprintln!("  {}: {:#}", "Warning".yellow(), e);
        PersistentConfig::default()
    });
    let merged_config = config.merge_with_cli(&overrides(dict_path, index_args, mode));

    print_banner();

    let mut state = ReplState::from_settings(&merged_config)?;
    state.config_file_path = config_path.map(Path::to_path_buf);

    if let Some(ref path) = merged_config.dict_path {
        if path.exists() {
            println!(
                "  Loading dictionary from {}...",
                path.display().to_string().cyan()
            );
            match state.load_file(path) {
                Ok(count) => {
                    println!("  Loaded {} word(s)", count.to_string().green().bold());
                    println!();
                }
                Err(e) => {
                    eprintln!("  {}: Could not load dictionary: {:#}", "Warning".yellow(), e);
                    println!();
                }
            }
        } else {
            eprintln!(
                "  {}: Dictionary not found: {}",
                "Warning".yellow(),
                path.display()
            );
            println!();
        }
    }

    let repl_config = ReplConfig::default();

    let rustyline_config = Config::builder()
        .auto_add_history(true)
        .history_ignore_dups(true)?
        .history_ignore_space(true)
        .max_history_size(repl_config.max_history)?
        .build();

    let mut editor: Editor<SketchHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(rustyline_config)?;
    editor.set_helper(Some(SketchHelper::new()));

    if let Some(history_path) = &repl_config.history_file {
        if history_path.exists() {
            let _ = editor.load_history(history_path);
        }
    }

    loop {
        let prompt = format!(
            "{}[{}/{}]> ",
            repl_config.prompt.trim_end_matches("> ").bright_cyan().bold(),
            format!("k{}", state.index.edit_radius()).bright_magenta(),
            state.mode.to_string().bright_green()
        );

        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}: {:?}", "Readline error".red().bold(), err);
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}: {:#}", "Error".red().bold(), e);
                continue;
            }
        };

        match command.execute(&mut state) {
            Ok(CommandResult::Continue(output)) => {
                println!("{}", output);
                if command.changes_settings() {
                    if let Err(e) = state.save_config() {
                        eprintln!("{}: Failed to save config: {:#}", "Warning".yellow(), e);
                    }
                }
            }
            Ok(CommandResult::Silent) => {}
            Ok(CommandResult::Exit) => break,
            Err(e) => println!("{}: {:#}", "Error".red().bold(), e),
        }
    }

    if let Some(history_path) = &repl_config.history_file {
        if let Err(e) = editor.save_history(history_path) {
            eprintln!("{}: Failed to save history: {}", "Warning".yellow(), e);
        }
    }

    Ok(())
}

fn print_banner() {
    println!();
    println!(
        "{}",
        "═══════════════════════════════════════════════════════".bright_cyan()
    );
    println!(
        "{}",
        "   rollsketch - Fuzzy Lookup over Rolling-Hash Sketches"
            .bright_cyan()
            .bold()
    );
    println!(
        "{}",
        "═══════════════════════════════════════════════════════".bright_cyan()
    );
    println!();
    println!("  Version: {}", env!("CARGO_PKG_VERSION").green());
    println!("  Type {} for available commands", "'help'".yellow().bold());
    println!(
        "  Type {} or press {} to exit",
        "'exit'".yellow().bold(),
        "Ctrl+D".yellow().bold()
    );
    println!();
    println!("{}", "  Quick Start:".bold());
    println!("    • Load a dictionary: {}", "load /usr/share/dict/words".cyan());
    println!("    • Query for matches: {}", "helo".cyan());
    println!("    • Compare lookups:   {}", "compare helo".cyan());
    println!("    • Insert words:      {}", "insert hello world".cyan());
    println!();
}
