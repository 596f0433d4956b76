//! System clipboard delivery
//!
//! The clipboard is reached through the platform's own clipboard command,
//! spawned as an external process with the text piped to stdin. A missing
//! or failing command degrades the run to terminal-only output; it never
//! aborts it.

use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard command succeeded on this platform")]
    Unavailable,
    #[error("failed to run {command}: {source}")]
    Io {
        command: &'static str,
        source: std::io::Error,
    },
    #[error("{command} exited with {status}")]
    Failed {
        command: &'static str,
        status: std::process::ExitStatus,
    },
}

/// Candidate clipboard commands for the running platform, tried in order.
fn candidates() -> &'static [(&'static str, &'static [&'static str])] {
    if cfg!(target_os = "macos") {
        &[("pbcopy", &[])]
    } else if cfg!(target_os = "windows") {
        &[("clip", &[])]
    } else {
        &[("xclip", &["-selection", "clipboard"]), ("wl-copy", &[])]
    }
}

/// Place `text` on the system clipboard.
pub fn copy(text: &str) -> Result<(), ClipboardError> {
    let mut last_error = ClipboardError::Unavailable;
    for &(command, args) in candidates() {
        match pipe_to(command, args, text) {
            Ok(()) => return Ok(()),
            Err(err) => last_error = err,
        }
    }
    Err(last_error)
}

fn pipe_to(command: &'static str, args: &[&str], text: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| ClipboardError::Io { command, source })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|source| ClipboardError::Io { command, source })?;
    }

    let status = child
        .wait()
        .map_err(|source| ClipboardError::Io { command, source })?;
    if !status.success() {
        return Err(ClipboardError::Failed { command, status });
    }
    Ok(())
}
