//! Process environment captured as an explicit value
//!
//! Every component receives the directories and variables it needs through
//! [`Environment`] instead of reading process-global state, so tests can
//! describe a whole environment without touching the real one.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::lookup::Lookup;

/// Name of the environment variable holding the Gemini API key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Name of the environment variable selecting development mode
pub const NODE_ENV_VAR: &str = "NODE_ENV";

/// Dotenv file in the working or installation directory
pub const DOTENV_FILE: &str = ".env";

/// Inputs that would otherwise be read from the running process
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Working directory (git repository and config file location)
    pub cwd: PathBuf,
    /// The user's home directory, if one can be determined
    pub home_dir: Option<PathBuf>,
    /// Directory containing the installed executable
    pub install_dir: Option<PathBuf>,
    /// Value of `GEMINI_API_KEY`
    pub api_key: Option<String>,
    /// Value of `NODE_ENV`
    pub node_env: Option<String>,
}

impl Environment {
    /// Capture the environment of the current process
    ///
    /// Variables missing from the process environment are then filled from
    /// `.env` in the working directory.
    ///
    /// # Errors
    ///
    /// * The current working directory cannot be determined
    pub fn from_process() -> anyhow::Result<Self> {
        let cwd = std::env::current_dir()?;
        let install_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(PathBuf::from));

        let mut env = Self {
            home_dir: dirs::home_dir(),
            install_dir,
            api_key: std::env::var(API_KEY_VAR).ok(),
            node_env: std::env::var(NODE_ENV_VAR).ok(),
            cwd,
        };

        let dotenv_path = env.cwd.join(DOTENV_FILE);
        match env.merge_dotenv(&dotenv_path) {
            Lookup::Found(count) => debug!(path = %dotenv_path.display(), count, "read project .env"),
            Lookup::NotFound => debug!(path = %dotenv_path.display(), "no project .env"),
            Lookup::Malformed(reason) => {
                debug!(path = %dotenv_path.display(), %reason, "project .env partly unreadable")
            }
        }

        Ok(env)
    }

    /// Fill unset variables from a dotenv file
    ///
    /// Values already present are never overridden. Lines that fail to parse
    /// are skipped; the first parse error is reported as
    /// [`Lookup::Malformed`] after the rest of the file has been applied.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the dotenv file
    ///
    /// # Returns
    ///
    /// * `Lookup<usize>` - Number of entries read, or why the file was unusable
    pub fn merge_dotenv(&mut self, path: &Path) -> Lookup<usize> {
        let entries = match dotenvy::from_path_iter(path) {
            Ok(entries) => entries,
            Err(err) if err.not_found() => return Lookup::NotFound,
            Err(err) => return Lookup::Malformed(err.to_string()),
        };

        let mut count = 0;
        let mut first_error = None;

        for entry in entries {
            match entry {
                Ok((name, value)) => {
                    count += 1;
                    let slot = match name.as_str() {
                        API_KEY_VAR => &mut self.api_key,
                        NODE_ENV_VAR => &mut self.node_env,
                        _ => continue,
                    };
                    if slot.is_none() {
                        *slot = Some(value);
                    }
                }
                Err(err) => {
                    first_error.get_or_insert_with(|| err.to_string());
                }
            }
        }

        match first_error {
            Some(reason) => Lookup::Malformed(reason),
            None => Lookup::Found(count),
        }
    }

    /// Whether verbose error details should be printed
    pub fn is_development(&self) -> bool {
        self.node_env.as_deref() == Some("development")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_dotenv(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(DOTENV_FILE);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_is_development_only_for_exact_value() {
        // Arrange
        let mut env = Environment::default();

        // Act & Assert - unset, other values, and the exact value
        assert!(!env.is_development());
        env.node_env = Some("production".to_string());
        assert!(!env.is_development());
        env.node_env = Some("development".to_string());
        assert!(env.is_development());
    }

    #[test]
    fn test_merge_dotenv_skips_comments_and_unquotes() {
        // Arrange - a commented-out key above the real, quoted one
        let dir = TempDir::new().unwrap();
        let path = write_dotenv(&dir, "# GEMINI_API_KEY=old-commented\nGEMINI_API_KEY=\"real-key\"\n");
        let mut env = Environment::default();

        // Act
        let result = env.merge_dotenv(&path);

        // Assert
        assert_eq!(result, Lookup::Found(1));
        assert_eq!(env.api_key.as_deref(), Some("real-key"));
    }

    #[test]
    fn test_merge_dotenv_single_quotes() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = write_dotenv(&dir, "GEMINI_API_KEY='single-quoted'\n");
        let mut env = Environment::default();

        // Act
        env.merge_dotenv(&path);

        // Assert
        assert_eq!(env.api_key.as_deref(), Some("single-quoted"));
    }

    #[test]
    fn test_merge_dotenv_does_not_override_process_values() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = write_dotenv(&dir, "GEMINI_API_KEY=from-file\nNODE_ENV=development\n");
        let mut env = Environment {
            api_key: Some("from-process".to_string()),
            node_env: Some("production".to_string()),
            ..Environment::default()
        };

        // Act
        env.merge_dotenv(&path);

        // Assert
        assert_eq!(env.api_key.as_deref(), Some("from-process"));
        assert_eq!(env.node_env.as_deref(), Some("production"));
    }

    #[test]
    fn test_merge_dotenv_sets_node_env() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = write_dotenv(&dir, "NODE_ENV=development\n");
        let mut env = Environment::default();

        // Act
        env.merge_dotenv(&path);

        // Assert - development mode can come from the project .env
        assert!(env.is_development());
        assert_eq!(env.api_key, None);
    }

    #[test]
    fn test_merge_dotenv_missing_file() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let mut env = Environment::default();

        // Act
        let result = env.merge_dotenv(&dir.path().join(DOTENV_FILE));

        // Assert
        assert_eq!(result, Lookup::NotFound);
        assert_eq!(env.api_key, None);
    }
}
