//! Prompt construction for commit message generation
//!
//! The prompt combines the commit types and formatting instructions from the
//! configuration with a fixed set of examples and the staged diff.

use crate::config::Config;

/// Build the prompt sent to the model
///
/// The diff is embedded verbatim. Without a configuration the default types
/// and format are used.
///
/// # Arguments
///
/// * `diff` - Staged diff
/// * `config` - Project configuration, if one was loaded
///
/// # Returns
///
/// * `String` - The complete prompt
///
/// # Example
///
/// ```
/// use ai_commit::prompt::build_prompt;
///
/// let prompt = build_prompt("+added line", None);
/// assert!(prompt.contains("Types: feat, fix, docs, style, refactor, test, chore"));
/// assert!(prompt.contains("Git Diff:\n+added line\n"));
/// ```
pub fn build_prompt(diff: &str, config: Option<&Config>) -> String {
    let default_config = Config::default();
    let config = config.unwrap_or(&default_config);

    format!(
        r#"
You are an AI that writes clear, conventional commit messages.

Types: {types}
{format}

Examples:
- "feat(auth): add password reset functionality"
- "fix(api): resolve user data retrieval issue"
- "docs(readme): update installation instructions"

Git Diff:
{diff}

Generate ONLY the commit message — no explanations, no newlines, just one line.
"#,
        types = config.types_line(),
        format = config.format_text(),
        diff = diff,
    )
}
