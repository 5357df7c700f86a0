//! End-to-end flow of one invocation
//!
//! Diff → prompt → message → delivery, stopping early when there is nothing
//! staged or the diff cannot be read.

use tracing::{debug, info};

use crate::clipboard::Clipboard;
use crate::config::{CONFIG_FILE_NAME, Config, load_config};
use crate::env::Environment;
use crate::gemini::GeminiClient;
use crate::git::staged_diff;
use crate::lookup::Lookup;
use crate::message::{CommitMessage, generate_message};
use crate::prompt::build_prompt;
use crate::sink::{Delivery, SinkOptions, deliver};

/// Options for a single run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub sink: SinkOptions,
    /// Show a spinner while waiting for the model
    pub spinner: bool,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `git diff --cached` could not be run
    DiffFailed,
    /// The staged diff was empty or whitespace-only
    NoStagedChanges,
    /// A message was produced and delivered
    Delivered {
        message: CommitMessage,
        delivery: Delivery,
    },
}

/// Run the whole pipeline in `env.cwd`
///
/// Every failure is reported on the console; the returned [`Outcome`]
/// describes where the run stopped.
///
/// # Arguments
///
/// * `env` - Working directory, credentials, and development flag
/// * `options` - Copy / auto-commit flags and whether to show a spinner
/// * `client` - Gemini client used for the single request
/// * `clipboard` - Destination for `--copy`
///
/// # Returns
///
/// * `Outcome` - Where the run stopped, with the message when one was delivered
pub async fn run<C: Clipboard>(
    env: &Environment,
    options: RunOptions,
    client: &GeminiClient,
    clipboard: &C,
) -> Outcome {
    let diff = match staged_diff(&env.cwd) {
        Ok(diff) => diff,
        Err(err) => {
            eprintln!("Error getting git diff: {:#}", err);
            return Outcome::DiffFailed;
        }
    };

    if diff.trim().is_empty() {
        println!("🛑 No staged changes detected.");
        println!("💡 Tip: Stage your changes using `git add .` and try again.");
        return Outcome::NoStagedChanges;
    }
    debug!(diff_bytes = diff.len(), "read staged diff");

    let config = project_config(env);
    let prompt = build_prompt(&diff, config.as_ref());

    let message = generate_message(&prompt, env, client, options.spinner).await;
    info!(generated = message.is_generated(), "generation finished");

    let delivery = deliver(&message, options.sink, clipboard, &env.cwd).await;

    Outcome::Delivered { message, delivery }
}

/// Load the project configuration, warning about and ignoring a broken file
fn project_config(env: &Environment) -> Option<Config> {
    match load_config(&env.cwd) {
        Lookup::Found(config) => {
            debug!(file = CONFIG_FILE_NAME, "loaded configuration");
            Some(config)
        }
        Lookup::NotFound => None,
        Lookup::Malformed(reason) => {
            eprintln!("⚠️ Failed to parse {}: {}", CONFIG_FILE_NAME, reason);
            None
        }
    }
}
