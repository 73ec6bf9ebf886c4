//! Configuration directory and persistent user settings

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::index::{IndexBuilder, IndexConfig, LookupMode};

/// Get the configuration directory for rollsketch
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine configuration directory")?;
    Ok(base.join("rollsketch"))
}

/// Get the default user config path
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Get the config file path with optional override
pub fn config_file_path_with_override(custom_path: Option<&Path>) -> Result<PathBuf> {
    match custom_path {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path(),
    }
}

/// Validate that a config file path has .json extension
pub fn validate_config_path(path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => Ok(()),
        Some(ext) => Err(anyhow::anyhow!(
            "Config file must have .json extension, got .{}",
            ext
        )),
        None => Err(anyhow::anyhow!("Config file must have .json extension")),
    }
}

/// User configuration stored in config file
///
/// Every field is optional; unset fields fall back to the library defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PersistentConfig {
    /// Default dictionary path
    pub dict_path: Option<PathBuf>,
    /// Default edit radius
    pub edit_radius: Option<usize>,
    /// Default maximum bit-run length
    pub max_run: Option<u32>,
    /// Default lookup mode for bare REPL queries
    pub mode: Option<LookupMode>,
    /// Default alphabet symbols
    pub alphabet: Option<String>,
}

impl PersistentConfig {
    /// Load configuration from the default or a custom path
    ///
    /// A missing file yields the default configuration.
    pub fn load_from(custom_path: Option<&Path>) -> Result<Self> {
        let path = config_file_path_with_override(custom_path)?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration to the default or a custom path
    pub fn save_to(&self, custom_path: Option<&Path>) -> Result<PathBuf> {
        let path = config_file_path_with_override(custom_path)?;
        validate_config_path(&path)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(path)
    }

    /// Merge with command-line options (CLI options take precedence)
    pub fn merge_with_cli(&self, cli: &PersistentConfig) -> Self {
        Self {
            dict_path: cli.dict_path.clone().or_else(|| self.dict_path.clone()),
            edit_radius: cli.edit_radius.or(self.edit_radius),
            max_run: cli.max_run.or(self.max_run),
            mode: cli.mode.or(self.mode),
            alphabet: cli.alphabet.clone().or_else(|| self.alphabet.clone()),
        }
    }

    /// Resolve the index configuration, validating every set field
    pub fn index_config(&self) -> Result<IndexConfig> {
        let mut builder = IndexBuilder::new();
        if let Some(radius) = self.edit_radius {
            builder = builder.edit_radius(radius);
        }
        if let Some(max_run) = self.max_run {
            builder = builder.max_run(max_run);
        }
        if let Some(symbols) = &self.alphabet {
            builder = builder.symbols(symbols.as_str());
        }
        builder.config().context("Invalid index configuration")
    }

    /// Lookup mode, defaulting to exact
    pub fn lookup_mode(&self) -> LookupMode {
        self.mode.unwrap_or_default()
    }
}
