//! CLI tool to generate conventional commit messages using the Gemini API
//!
//! This tool reads the staged git diff, asks Gemini for a one-line
//! conventional commit message, and prints it. The message can optionally be
//! copied to the clipboard and used to commit right away.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ai_commit::{
    clipboard::SystemClipboard,
    env::Environment,
    gemini::GeminiClient,
    pipeline::{RunOptions, run},
    sink::SinkOptions,
};

const AFTER_HELP: &str = "\
Examples:
  $ ai-commit                       Generate a commit message for staged changes
  $ ai-commit --copy                Generate and copy the message to clipboard
  $ ai-commit --auto-commit         Generate message and commit changes automatically
  $ ai-commit --copy --auto-commit  Generate, copy, and commit automatically

Note:
  Ensure your Gemini API key is set in the .env file or as GEMINI_API_KEY in your environment.
  Create an ai-commit.config.json file to customize message types and format.";

/// Command-line arguments
#[derive(Parser)]
#[command(name = "ai-commit", version)]
#[command(
    about = "AI-powered tool to generate conventional commit messages using Gemini API",
    long_about = None,
    after_help = AFTER_HELP
)]
struct Args {
    /// Automatically commit changes after generating message
    #[arg(long)]
    auto_commit: bool,

    /// Copy commit message to clipboard
    #[arg(long)]
    copy: bool,

    /// Seconds to wait for the Gemini API before giving up
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Main entry point
///
/// # Process flow
///
/// 1. Parse command-line arguments
/// 2. Capture the process environment
/// 3. Get git diff from staging area (stop if empty)
/// 4. Generate commit message using Gemini (with spinner display)
/// 5. Print, and optionally copy and commit
///
/// Generation, clipboard, and commit failures are reported on the console
/// and do not change the exit status.
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let env = Environment::from_process()?;
    let client = GeminiClient::new(Duration::from_secs(args.timeout))?;

    let options = RunOptions {
        sink: SinkOptions {
            copy: args.copy,
            auto_commit: args.auto_commit,
        },
        spinner: true,
    };

    let outcome = run(&env, options, &client, &SystemClipboard).await;
    tracing::debug!(?outcome, "run finished");

    Ok(())
}

fn setup_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("ai_commit=info"),
        2 => EnvFilter::new("ai_commit=debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
