//! Git operations for commit message generation
//!
//! This module provides functions to interact with git:
//! - Get staged diffs
//! - Create a commit with a given message

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Get git diff from the staging area
///
/// Executes `git diff --cached` in `repo_dir` to retrieve all staged changes.
/// The output is returned untrimmed so it can be embedded verbatim.
///
/// # Arguments
///
/// * `repo_dir` - Directory inside the repository
///
/// # Returns
///
/// * `String` - The staged diff, empty when nothing is staged
///
/// # Errors
///
/// * Git command fails to execute
/// * Not in a git repository
///
/// # Example
///
/// ```no_run
/// use ai_commit::git::staged_diff;
///
/// # fn main() -> anyhow::Result<()> {
/// let diff = staged_diff(std::path::Path::new("."))?;
/// println!("Staged changes:\n{}", diff);
/// # Ok(())
/// # }
/// ```
pub fn staged_diff(repo_dir: &Path) -> Result<String> {
    let output = Command::new("git")
        .args(["diff", "--cached"])
        .current_dir(repo_dir)
        .output()
        .context("Failed to execute git command. Make sure git is installed and in PATH")?;

    if !output.status.success() {
        anyhow::bail!(
            "Git diff command failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Execute `git commit -m <message>` in `repo_dir`
///
/// The message is passed as a single argument without going through a
/// shell, so quotes and other metacharacters reach git unchanged.
///
/// # Arguments
///
/// * `repo_dir` - Directory inside the repository
/// * `message` - Full commit message
///
/// # Errors
///
/// * Failed to execute git command
/// * Nothing staged, not a repository, or a hook rejected the commit
pub fn commit(repo_dir: &Path, message: &str) -> Result<()> {
    let output = Command::new("git")
        .args(["commit", "-m", message])
        .current_dir(repo_dir)
        .output()
        .context("Failed to execute git commit command")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let detail = if stderr.trim().is_empty() {
            stdout.trim()
        } else {
            stderr.trim()
        };
        anyhow::bail!(
            "Git commit command failed with exit code {:?}: {}",
            output.status.code(),
            detail
        );
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::Path;
    use std::process::Command;

    pub fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    /// Initialise a repository with an identity and one staged file
    pub fn repo_with_staged_file(dir: &Path) {
        git(dir, &["init", "-q"]);
        git(dir, &["config", "user.name", "Test User"]);
        git(dir, &["config", "user.email", "test@example.com"]);
        git(dir, &["config", "commit.gpgsign", "false"]);
        fs::write(dir.join("hello.txt"), "hello\n").unwrap();
        git(dir, &["add", "hello.txt"]);
    }

    pub fn last_commit_subject(dir: &Path) -> String {
        let output = Command::new("git")
            .args(["log", "-1", "--format=%s"])
            .current_dir(dir)
            .output()
            .unwrap();
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}
