//! Commit message generation
//!
//! Wraps the Gemini client with the tool's failure policy: every problem is
//! reported on the console and turned into a fixed failure message instead
//! of an error.

use std::fmt;

use crate::credentials::resolve_api_key;
use crate::env::Environment;
use crate::gemini::{GeminiClient, GeminiError};
use crate::spinner::with_spinner;

/// Returned when no API key could be resolved
pub const MISSING_KEY_MESSAGE: &str = "Failed to generate commit message: API key not found.";

/// Returned when the API request fails
pub const FAILURE_MESSAGE: &str = "Failed to generate commit message.";

/// Returned when the API answers without any text
pub const EMPTY_MESSAGE: &str = "No commit message generated.";

/// Outcome of a generation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitMessage {
    /// Text produced by the model
    Generated(String),
    /// One of the fixed failure messages
    Failed(&'static str),
}

impl CommitMessage {
    /// The text that is printed, copied, or committed
    pub fn text(&self) -> &str {
        match self {
            CommitMessage::Generated(text) => text,
            CommitMessage::Failed(text) => text,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, CommitMessage::Generated(_))
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Generate a commit message for `prompt`
///
/// Without an API key this returns [`MISSING_KEY_MESSAGE`] and prints the
/// ways to supply one; no request is made. Request failures return
/// [`FAILURE_MESSAGE`] and print the line built by [`api_error_line`].
/// Diagnostics are printed only once the spinner has stopped.
///
/// # Arguments
///
/// * `prompt` - Complete prompt from [`crate::prompt::build_prompt`]
/// * `env` - Source of the API key and the development flag
/// * `client` - Gemini client
/// * `spinner` - Show a spinner on stdout while the request is pending
///
/// # Returns
///
/// * `CommitMessage` - Generated text, or one of the fixed failure messages
///
/// # Example
///
/// ```no_run
/// use ai_commit::{env::Environment, gemini::{GeminiClient, DEFAULT_TIMEOUT}, message::generate_message};
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let env = Environment::from_process()?;
/// let client = GeminiClient::new(DEFAULT_TIMEOUT)?;
/// let message = generate_message("Write a commit message for: +fn main() {}", &env, &client, false).await;
/// println!("{}", message);
/// # Ok(())
/// # }
/// ```
pub async fn generate_message(
    prompt: &str,
    env: &Environment,
    client: &GeminiClient,
    spinner: bool,
) -> CommitMessage {
    let Some((key, source)) = resolve_api_key(env) else {
        print_missing_key_help();
        return CommitMessage::Failed(MISSING_KEY_MESSAGE);
    };
    tracing::info!(%source, "using Gemini API key");

    let request = client.generate(&key, prompt);
    let result = if spinner {
        with_spinner("Gemini is generating...", request).await
    } else {
        request.await
    };

    match result {
        Ok(Some(text)) if !text.trim().is_empty() => CommitMessage::Generated(text.trim().to_string()),
        Ok(_) => CommitMessage::Failed(EMPTY_MESSAGE),
        Err(err) => {
            tracing::debug!(error = %err, "Gemini request failed");
            eprintln!("{}", api_error_line(err, env.is_development()));
            CommitMessage::Failed(FAILURE_MESSAGE)
        }
    }
}

/// The console line reporting a failed request
///
/// Development mode shows the full error chain; otherwise a generic line
/// without any detail.
///
/// # Arguments
///
/// * `err` - The request error
/// * `development` - Whether `NODE_ENV=development` is set
///
/// # Returns
///
/// * `String` - The line printed to stderr
pub fn api_error_line(err: GeminiError, development: bool) -> String {
    if development {
        format!("Gemini API Error (Dev): {:#}", anyhow::Error::new(err))
    } else {
        "❌ Gemini API Error: Something went wrong while generating the commit message."
            .to_string()
    }
}

fn print_missing_key_help() {
    eprintln!("\n❌ Gemini API key not found!");
    println!("\n📝 To fix this, you can:");
    println!("  1. Create a .env file in your current project with GEMINI_API_KEY=your_key");
    println!("  2. Create a .ai-commit.env file in your home directory with GEMINI_API_KEY=your_key");
    println!("  3. Set the GEMINI_API_KEY environment variable");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::test_support::serve_once;
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::net::TcpListener;

    fn environment(dir: &TempDir, api_key: Option<&str>) -> Environment {
        Environment {
            cwd: dir.path().to_path_buf(),
            home_dir: Some(dir.path().join("home")),
            install_dir: Some(dir.path().join("install")),
            api_key: api_key.map(str::to_string),
            node_env: None,
        }
    }

    fn client(base_url: &str) -> GeminiClient {
        GeminiClient::new(Duration::from_secs(5))
            .unwrap()
            .with_base_url(base_url)
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        // Arrange - a listener that must never see a connection
        let dir = TempDir::new().unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let env = environment(&dir, None);

        // Act
        let message = generate_message("prompt", &env, &client(&base_url), false).await;

        // Assert
        assert_eq!(message, CommitMessage::Failed(MISSING_KEY_MESSAGE));
        let accepted = tokio::time::timeout(Duration::from_millis(200), listener.accept()).await;
        assert!(accepted.is_err(), "no connection expected");
    }

    #[tokio::test]
    async fn test_generated_text_is_trimmed() {
        // Arrange
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"  fix(cli): handle empty diff\n"}]}}]}"#;
        let (base_url, _server) = serve_once(200, body).await;
        let dir = TempDir::new().unwrap();
        let env = environment(&dir, Some("key"));

        // Act
        let message = generate_message("prompt", &env, &client(&base_url), false).await;

        // Assert
        assert_eq!(
            message,
            CommitMessage::Generated("fix(cli): handle empty diff".to_string())
        );
        assert!(message.is_generated());
    }

    #[tokio::test]
    async fn test_api_failure_returns_failure_message() {
        // Arrange
        let (base_url, _server) = serve_once(500, r#"{"error":{"message":"boom"}}"#).await;
        let dir = TempDir::new().unwrap();
        let env = environment(&dir, Some("key"));

        // Act
        let message = generate_message("prompt", &env, &client(&base_url), false).await;

        // Assert
        assert_eq!(message.text(), FAILURE_MESSAGE);
        assert!(!message.is_generated());
    }

    #[tokio::test]
    async fn test_api_failure_in_development_mode() {
        // Arrange
        let (base_url, _server) = serve_once(503, "unavailable").await;
        let dir = TempDir::new().unwrap();
        let mut env = environment(&dir, Some("key"));
        env.node_env = Some("development".to_string());

        // Act
        let message = generate_message("prompt", &env, &client(&base_url), false).await;

        // Assert - same message regardless of verbosity
        assert_eq!(message, CommitMessage::Failed(FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_empty_response_returns_placeholder() {
        // Arrange
        let (base_url, _server) = serve_once(200, r#"{"candidates":[{"content":{"parts":[]}}]}"#).await;
        let dir = TempDir::new().unwrap();
        let env = environment(&dir, Some("key"));

        // Act
        let message = generate_message("prompt", &env, &client(&base_url), false).await;

        // Assert
        assert_eq!(message, CommitMessage::Failed(EMPTY_MESSAGE));
    }

    #[test]
    fn test_api_error_line_development_includes_detail() {
        // Arrange
        let err = GeminiError::Status {
            status: 500,
            message: "backend exploded".to_string(),
        };

        // Act
        let line = api_error_line(err, true);

        // Assert
        assert!(line.starts_with("Gemini API Error (Dev): "));
        assert!(line.contains("HTTP 500: backend exploded"));
    }

    #[test]
    fn test_api_error_line_default_is_generic() {
        // Arrange
        let err = GeminiError::Status {
            status: 500,
            message: "backend exploded".to_string(),
        };

        // Act
        let line = api_error_line(err, false);

        // Assert - no detail leaks outside development mode
        assert_eq!(
            line,
            "❌ Gemini API Error: Something went wrong while generating the commit message."
        );
        assert!(!line.contains("backend exploded"));
    }

    #[test]
    fn test_api_error_line_development_timeout() {
        // Arrange
        let err = GeminiError::Timeout(Duration::from_secs(60));

        // Act
        let line = api_error_line(err, true);

        // Assert
        assert_eq!(line, "Gemini API Error (Dev): request timed out after 60s");
    }
}
