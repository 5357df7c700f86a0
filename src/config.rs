//! Configuration management for ai-commit
//!
//! This module loads the optional `ai-commit.config.json` file from the
//! working directory. The file customizes the commit types offered to the
//! model and the formatting instructions that follow them.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::lookup::Lookup;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "ai-commit.config.json";

/// Commit types used when the configuration does not list any
pub const DEFAULT_TYPES: [&str; 7] = ["feat", "fix", "docs", "style", "refactor", "test", "chore"];

/// Formatting instructions used when the configuration has none
pub const DEFAULT_FORMAT: &str = "Follow the format: \"type(scope): summary\"
Use present tense, imperative mood.
Keep message concise (under 72 characters).";

/// Configuration file structure
///
/// # Example JSON
///
/// ```json
/// {
///   "types": ["feat", "fix", "perf"],
///   "format": "Use the format \"type: summary\" in lowercase."
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Commit type labels, in the order they are offered
    #[serde(default)]
    pub types: Option<Vec<String>>,
    /// Free-text formatting instructions
    #[serde(default)]
    pub format: Option<String>,
}

impl Config {
    /// Commit types joined for the prompt, e.g. `"feat, fix, docs"`
    ///
    /// A configured list is used as given, even when empty.
    pub fn types_line(&self) -> String {
        match &self.types {
            Some(types) => types.join(", "),
            None => DEFAULT_TYPES.join(", "),
        }
    }

    /// Formatting instructions, falling back to [`DEFAULT_FORMAT`] when unset or empty
    pub fn format_text(&self) -> &str {
        match self.format.as_deref() {
            Some(format) if !format.is_empty() => format,
            _ => DEFAULT_FORMAT,
        }
    }
}

/// Load `ai-commit.config.json` from `dir`
///
/// A missing file is [`Lookup::NotFound`]. A file that cannot be read or
/// parsed is [`Lookup::Malformed`] with the reason; callers treat it as absent.
///
/// # Arguments
///
/// * `dir` - Directory expected to contain `ai-commit.config.json`
///
/// # Returns
///
/// * `Lookup<Config>` - The parsed configuration or why there is none
///
/// # Example
///
/// ```no_run
/// use ai_commit::config::load_config;
///
/// let config = load_config(std::path::Path::new(".")).found().unwrap_or_default();
/// println!("Types: {}", config.types_line());
/// ```
pub fn load_config(dir: &Path) -> Lookup<Config> {
    let path = dir.join(CONFIG_FILE_NAME);

    match read_config(&path) {
        Ok(Some(config)) => Lookup::Found(config),
        Ok(None) => Lookup::NotFound,
        Err(err) => Lookup::Malformed(format!("{:#}", err)),
    }
}

fn read_config(path: &Path) -> Result<Option<Config>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).context(format!("Failed to read config file: {}", path.display()));
        }
    };

    let config = serde_json::from_str(&content).context("Failed to parse config file as JSON")?;
    Ok(Some(config))
}
