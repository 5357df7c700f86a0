//! Delivery of the generated message
//!
//! The message is always printed. Copying and committing are independent
//! options and may both apply.

use std::path::Path;

use crate::clipboard::Clipboard;
use crate::git;
use crate::message::CommitMessage;

/// What to do with the message besides printing it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkOptions {
    pub copy: bool,
    pub auto_commit: bool,
}

/// What happened to the message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    /// `Some(success)` when copying was requested
    pub copied: Option<bool>,
    /// `Some(success)` when a commit was attempted
    pub committed: Option<bool>,
}

/// Print the message and apply the requested options
///
/// Failure messages are handled like generated ones: they are copied and
/// committed when asked.
///
/// # Arguments
///
/// * `message` - Generated or failure message
/// * `options` - Whether to copy and/or commit
/// * `clipboard` - Destination for the copy
/// * `repo_dir` - Repository the commit is made in
///
/// # Returns
///
/// * `Delivery` - Result of each requested action
pub async fn deliver<C: Clipboard>(
    message: &CommitMessage,
    options: SinkOptions,
    clipboard: &C,
    repo_dir: &Path,
) -> Delivery {
    println!("\n🔧 Suggested Commit Message:\n{}", message);

    let mut delivery = Delivery::default();

    if options.copy {
        delivery.copied = Some(copy_message(message, clipboard).await);
    }

    if options.auto_commit {
        delivery.committed = Some(commit_changes(repo_dir, message.text()));
    }

    delivery
}

async fn copy_message<C: Clipboard>(message: &CommitMessage, clipboard: &C) -> bool {
    match clipboard.copy(message.text()).await {
        Ok(()) => {
            println!("📋 Commit message copied to clipboard!");
            true
        }
        Err(err) => {
            eprintln!("❌ Error copying commit message to clipboard: {}", err);
            false
        }
    }
}

/// Commit the staged changes with `message`, reporting the result
///
/// # Arguments
///
/// * `repo_dir` - Repository to commit in
/// * `message` - Commit message, passed to git unchanged
///
/// # Returns
///
/// * `bool` - Whether `git commit` succeeded
pub fn commit_changes(repo_dir: &Path, message: &str) -> bool {
    match git::commit(repo_dir, message) {
        Ok(()) => {
            println!("✅ Changes committed successfully!");
            true
        }
        Err(err) => {
            eprintln!("❌ Error committing changes: {:#}", err);
            false
        }
    }
}
