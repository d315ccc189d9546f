//! Copying output to the system clipboard through a platform command.

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Duration;

use thiserror::Error;
use wait_timeout::ChildExt;

/// How long a clipboard command may run before it is killed.
pub const CLIPBOARD_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard command available on this platform")]
    Unsupported,
    #[error("failed to run `{0}`: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("`{0}` timed out after {1:?}")]
    Timeout(String, Duration),
    #[error("`{0}` failed with status {1}")]
    CommandFailed(String, std::process::ExitStatus),
}

/// A destination for copied text.
pub trait Clipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The platform clipboard: `pbcopy` on macOS, `xclip` on Linux.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let command = clipboard_command().ok_or(ClipboardError::Unsupported)?;
        pipe_to(command, text, CLIPBOARD_TIMEOUT)
    }
}

#[cfg(target_os = "macos")]
fn clipboard_command() -> Option<&'static str> {
    Some("pbcopy")
}

#[cfg(target_os = "linux")]
fn clipboard_command() -> Option<&'static str> {
    Some("xclip -selection clipboard")
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn clipboard_command() -> Option<&'static str> {
    None
}

/// Runs `command` through the shell with `input` on stdin, discarding its
/// output. The process is killed if it outlives `timeout`.
pub fn pipe_to(command: &str, input: &str, timeout: Duration) -> Result<(), ClipboardError> {
    let io_err = |e| ClipboardError::Io(command.to_string(), e);

    let mut child = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(io_err)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes()).map_err(io_err)?;
    }

    match child.wait_timeout(timeout).map_err(io_err)? {
        Some(status) if status.success() => Ok(()),
        Some(status) => Err(ClipboardError::CommandFailed(command.to_string(), status)),
        None => {
            child.kill().map_err(io_err)?;
            if let Err(e) = child.wait() {
                tracing::debug!(command, error = %e, "failed to reap timed-out command");
            }
            Err(ClipboardError::Timeout(command.to_string(), timeout))
        }
    }
}
