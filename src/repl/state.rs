//! REPL session state

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::alphabet::Alphabet;
use crate::cli::config::PersistentConfig;
use crate::cli::dict::load_words;
use crate::index::{IndexConfig, LookupMode, SketchIndex};

/// Mutable state of one REPL session
pub struct ReplState {
    /// The index being explored
    pub index: SketchIndex,
    /// Lookup used by `query` and by bare input lines
    pub mode: LookupMode,
    /// Dictionary file the index was last loaded from
    pub dict_path: Option<PathBuf>,
    /// Session config file override (`--config`)
    pub config_file_path: Option<PathBuf>,
}

impl ReplState {
    /// Empty index with default settings
    pub fn new() -> Self {
        Self {
            index: SketchIndex::default(),
            mode: LookupMode::default(),
            dict_path: None,
            config_file_path: None,
        }
    }

    /// Empty index configured from persistent settings
    ///
    /// The dictionary is not loaded; see [`load_file`](Self::load_file).
    pub fn from_settings(settings: &PersistentConfig) -> Result<Self> {
        Ok(Self {
            index: SketchIndex::new(settings.index_config()?)?,
            mode: settings.lookup_mode(),
            dict_path: None,
            config_file_path: None,
        })
    }

    /// Look up `term` in `mode`, or in the session mode
    pub fn query(&self, term: &str, mode: Option<LookupMode>) -> BTreeSet<String> {
        self.index.lookup_with(mode.unwrap_or(self.mode), term)
    }

    /// Replace the index contents with the words of a dictionary file
    ///
    /// Returns the number of distinct words loaded.
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let words = load_words(path)?;
        self.index.clear();
        self.index.extend(&words);
        self.dict_path = Some(path.to_path_buf());
        Ok(self.index.len())
    }

    /// Rebuild the index under a new configuration
    fn reconfigure(&mut self, config: IndexConfig) -> Result<()> {
        self.index = self
            .index
            .reconfigure(config)
            .context("Index configuration rejected")?;
        Ok(())
    }

    /// Change the edit radius, re-inserting every word
    pub fn set_radius(&mut self, edit_radius: usize) -> Result<()> {
        self.reconfigure(IndexConfig {
            edit_radius,
            ..self.index.config().clone()
        })
    }

    /// Change the maximum bit-run length
    pub fn set_max_run(&mut self, max_run: u32) -> Result<()> {
        self.reconfigure(IndexConfig {
            max_run,
            ..self.index.config().clone()
        })
    }

    /// Change the alphabet, re-sketching every word
    pub fn set_alphabet(&mut self, symbols: &str) -> Result<()> {
        let alphabet = Alphabet::from_symbols(symbols)?;
        self.reconfigure(IndexConfig {
            alphabet,
            ..self.index.config().clone()
        })
    }

    /// Convert current state to PersistentConfig
    pub fn to_persistent_config(&self) -> PersistentConfig {
        let config = self.index.config();
        PersistentConfig {
            dict_path: self.dict_path.clone(),
            edit_radius: Some(config.edit_radius),
            max_run: Some(config.max_run),
            mode: Some(self.mode),
            alphabet: Some(config.alphabet.to_string()),
        }
    }

    /// Save current state to configuration file
    pub fn save_config(&self) -> Result<PathBuf> {
        self.to_persistent_config()
            .save_to(self.config_file_path.as_deref())
    }
}

impl Default for ReplState {
    fn default() -> Self {
        Self::new()
    }
}
