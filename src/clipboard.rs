//! System clipboard access
//!
//! Text is piped into the platform's clipboard helper:
//! - macOS: `pbcopy`
//! - Linux: `xclip`, falling back to `xsel`, then `wl-copy`
//! - Windows: `clip`

use std::future::Future;
use std::io;
use std::process::Stdio;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("failed to spawn {program}: {source}. Install a clipboard helper")]
    Spawn {
        program: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("failed to write to {program}: {source}")]
    Write {
        program: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with code {code:?}")]
    Exit {
        program: &'static str,
        code: Option<i32>,
    },
    #[error("clipboard not supported on this platform")]
    Unsupported,
}

/// Destination for copied commit messages
pub trait Clipboard {
    fn copy(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>>;
}

/// Helper programs tried in order, with their arguments
#[cfg(target_os = "macos")]
const HELPERS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "linux")]
const HELPERS: &[(&str, &[&str])] = &[
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("wl-copy", &[]),
];

#[cfg(target_os = "windows")]
const HELPERS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const HELPERS: &[(&str, &[&str])] = &[];

/// The operating system clipboard
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let (program, mut child) = spawn_helper()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|source| ClipboardError::Write { program, source })?;
            // Closing stdin lets the helper finish reading
            drop(stdin);
        }

        let status = child
            .wait()
            .await
            .map_err(|source| ClipboardError::Write { program, source })?;

        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Exit {
                program,
                code: status.code(),
            })
        }
    }
}

fn spawn_helper() -> Result<(&'static str, Child), ClipboardError> {
    let mut last_error = ClipboardError::Unsupported;

    for &(program, args) in HELPERS {
        match Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => {
                tracing::debug!(program, "spawned clipboard helper");
                return Ok((program, child));
            }
            Err(source) => {
                tracing::debug!(program, error = %source, "clipboard helper unavailable");
                last_error = ClipboardError::Spawn { program, source };
            }
        }
    }

    Err(last_error)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use super::{Clipboard, ClipboardError};

    /// Records everything copied to it
    #[derive(Default)]
    pub struct RecordingClipboard {
        pub copied: Mutex<Vec<String>>,
        pub fail: bool,
    }

    impl Clipboard for RecordingClipboard {
        async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Unsupported);
            }
            self.copied.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_program() {
        // Arrange
        let err = ClipboardError::Exit {
            program: "xclip",
            code: Some(1),
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert_eq!(msg, "xclip exited with code Some(1)");
    }
}
