//! Gemini API key discovery
//!
//! The key is taken from the first source that yields a non-empty value:
//!
//! 1. `GEMINI_API_KEY` in the environment (including the project `.env`,
//!    merged by [`Environment::from_process`])
//! 2. `~/.ai-commit.env`
//! 3. `.env` next to the installed executable
//!
//! The two credential files are not full dotenv files: the key is the rest
//! of the first `GEMINI_API_KEY=` line.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::env::{API_KEY_VAR, DOTENV_FILE, Environment};
use crate::lookup::Lookup;

/// Per-user credential file in the home directory
pub const HOME_DOTFILE: &str = ".ai-commit.env";

/// A Gemini API key
///
/// The `Debug` implementation never prints the key itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Where a key was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Environment,
    HomeDotfile,
    InstallDotenv,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeySource::Environment => "environment",
            KeySource::HomeDotfile => "~/.ai-commit.env",
            KeySource::InstallDotenv => "installation .env",
        };
        f.write_str(name)
    }
}

/// Resolve the API key in priority order
///
/// Every filesystem lookup falls through silently to the next source; the
/// reason is only visible in debug logs.
///
/// # Arguments
///
/// * `env` - Environment holding the variable and the directories to search
///
/// # Returns
///
/// * `Option<(ApiKey, KeySource)>` - The first non-empty key and where it came from
pub fn resolve_api_key(env: &Environment) -> Option<(ApiKey, KeySource)> {
    if let Some(key) = env.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        debug!(source = %KeySource::Environment, "resolved API key");
        return Some((ApiKey::new(key), KeySource::Environment));
    }

    let candidates: [(KeySource, Option<PathBuf>); 2] = [
        (
            KeySource::HomeDotfile,
            env.home_dir.as_ref().map(|home| home.join(HOME_DOTFILE)),
        ),
        (
            KeySource::InstallDotenv,
            env.install_dir.as_ref().map(|dir| dir.join(DOTENV_FILE)),
        ),
    ];

    for (source, path) in candidates {
        let Some(path) = path else {
            debug!(%source, "no directory to search");
            continue;
        };

        match read_key_file(&path) {
            Lookup::Found(key) => {
                debug!(%source, path = %path.display(), "resolved API key");
                return Some((key, source));
            }
            Lookup::NotFound => debug!(%source, path = %path.display(), "no key file"),
            Lookup::Malformed(reason) => {
                debug!(%source, path = %path.display(), %reason, "unusable key file")
            }
        }
    }

    None
}

/// Read `GEMINI_API_KEY=<value>` from a credential file
///
/// # Arguments
///
/// * `path` - Path to `~/.ai-commit.env` or the installation `.env`
///
/// # Returns
///
/// * `Lookup<ApiKey>` - The key, [`Lookup::NotFound`] for a missing file, or
///   [`Lookup::Malformed`] for an unreadable file or one without a usable entry
pub fn read_key_file(path: &Path) -> Lookup<ApiKey> {
    match fs::read_to_string(path) {
        Ok(content) => match parse_key(&content) {
            Some(key) => Lookup::Found(key),
            None => Lookup::Malformed(format!("no {} entry", API_KEY_VAR)),
        },
        Err(err) if err.kind() == ErrorKind::NotFound => Lookup::NotFound,
        Err(err) => Lookup::Malformed(err.to_string()),
    }
}

/// Extract the key from dotfile content
///
/// The first line containing `GEMINI_API_KEY=` followed by a non-empty value
/// wins; the value is the rest of that line, trimmed.
///
/// # Arguments
///
/// * `content` - Full text of a credential file
///
/// # Returns
///
/// * `Option<ApiKey>` - The first usable key, if any
pub fn parse_key(content: &str) -> Option<ApiKey> {
    let marker = format!("{}=", API_KEY_VAR);

    content.lines().find_map(|line| {
        let start = line.find(&marker)? + marker.len();
        let value = line[start..].trim();
        (!value.is_empty()).then(|| ApiKey::new(value))
    })
}
