//! ai-commit - Conventional Commit Message Generator
//!
//! This library generates commit messages for staged git changes by sending
//! the diff to the Gemini API.
//!
//! # Modules
//!
//! - [`env`] - Explicit snapshot of the process environment
//! - [`config`] - `ai-commit.config.json` loading
//! - [`credentials`] - API key discovery
//! - [`git`] - Git operations (diff, commit)
//! - [`prompt`] - Prompt construction
//! - [`gemini`] - Gemini API client
//! - [`message`] - Message generation and failure policy
//! - [`clipboard`] - System clipboard access
//! - [`sink`] - Printing, copying, and committing the result
//! - [`pipeline`] - The end-to-end flow
//! - [`spinner`] - Progress spinner for the pending request
//!
//! # Example
//!
//! ```no_run
//! use ai_commit::{
//!     clipboard::SystemClipboard,
//!     env::Environment,
//!     gemini::{DEFAULT_TIMEOUT, GeminiClient},
//!     pipeline::{RunOptions, run},
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let env = Environment::from_process()?;
//! let client = GeminiClient::new(DEFAULT_TIMEOUT)?;
//! let outcome = run(&env, RunOptions::default(), &client, &SystemClipboard).await;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

pub mod clipboard;
pub mod config;
pub mod credentials;
pub mod env;
pub mod gemini;
pub mod git;
pub mod lookup;
pub mod message;
pub mod pipeline;
pub mod prompt;
pub mod sink;
pub mod spinner;
