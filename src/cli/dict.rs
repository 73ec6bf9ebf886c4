//! Plain-text dictionary files
//!
//! One word per line. Surrounding whitespace is trimmed, and blank lines and
//! lines starting with `#` are skipped.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::index::{IndexConfig, SketchIndex};

/// Words of a dictionary file's contents, in file order
pub fn parse_words(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Read the words of a dictionary file
pub fn load_words(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dictionary file: {}", path.display()))?;
    Ok(parse_words(&contents).map(str::to_owned).collect())
}

/// Build an index from a dictionary file
pub fn load_index(path: &Path, config: IndexConfig) -> Result<SketchIndex> {
    let words = load_words(path)?;
    let index = SketchIndex::new(config)?.build(&words);
    info!(
        path = %path.display(),
        lines = words.len(),
        words = index.len(),
        "loaded dictionary"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_words_skips_comments_and_blanks() {
        let contents = "# header\nhello\n\n  world  \n#skip\nhelp\n";
        let words: Vec<_> = parse_words(contents).collect();
        assert_eq!(words, vec!["hello", "world", "help"]);
    }

    #[test]
    fn test_parse_words_keeps_inner_hash() {
        let words: Vec<_> = parse_words("c#\nf#sharp").collect();
        assert_eq!(words, vec!["c#", "f#sharp"]);
    }
}
