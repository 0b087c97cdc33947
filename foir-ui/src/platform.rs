//! Share and clipboard capabilities backed by external programs.
//!
//! A terminal has no system share sheet, so sharing means piping the text
//! into a user-configured command. The clipboard probes the usual desktop
//! tools when none is configured.

use std::{io::ErrorKind, process::Stdio};

use async_trait::async_trait;
use foir_core::capabilities::{CapabilityError, Clipboard, SharePayload, ShareTarget};
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::debug;

/// Env var carrying the share title to the share command.
pub const SHARE_TITLE_ENV: &str = "FOIR_SHARE_TITLE";

/// Clipboard programs tried in order when none is configured.
const CLIPBOARD_CANDIDATES: [&[&str]; 4] = [
    &["pbcopy"],
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["clip.exe"],
];

/// Runs `argv`, writes `text` to its stdin and waits for a zero exit status.
async fn pipe_to_command(
    argv: &[String],
    text: &str,
    envs: &[(&str, &str)],
) -> Result<(), CapabilityError> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| CapabilityError::Unavailable("empty command".to_string()))?;

    let mut child = Command::new(program)
        .args(args)
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => CapabilityError::Unavailable(program.clone()),
            _ => CapabilityError::Failed(format!("failed to start {program}: {e}")),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .await
            .map_err(|e| CapabilityError::Failed(format!("failed to write to {program}: {e}")))?;
        // stdin is dropped here so the child sees EOF
    }

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| CapabilityError::Failed(format!("failed to wait for {program}: {e}")))?;

    if output.status.success() {
        debug!(program = %program, "command accepted text");
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(CapabilityError::Failed(format!(
            "{program} exited with {}: {}",
            output.status,
            stderr.trim()
        )))
    }
}

/// Sends the share text to a configured program.
#[derive(Debug, Clone, Default)]
pub struct CommandShareTarget {
    command: Option<Vec<String>>,
}

impl CommandShareTarget {
    pub fn new(command: Option<Vec<String>>) -> Self {
        Self { command }
    }
}

#[async_trait]
impl ShareTarget for CommandShareTarget {
    async fn share(
        &self,
        payload: &SharePayload,
    ) -> Result<(), CapabilityError> {
        match &self.command {
            Some(argv) => {
                pipe_to_command(argv, &payload.text, &[(SHARE_TITLE_ENV, payload.title.as_str())]).await
            }
            None => Err(CapabilityError::Unavailable("system share".to_string())),
        }
    }
}

/// Copies text by piping it into a clipboard program.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    candidates: Vec<Vec<String>>,
}

impl CommandClipboard {
    /// Uses `command` when given, otherwise the well-known clipboard tools.
    pub fn new(command: Option<Vec<String>>) -> Self {
        let candidates = match command {
            Some(argv) => vec![argv],
            None => CLIPBOARD_CANDIDATES
                .iter()
                .map(|argv| argv.iter().map(|s| s.to_string()).collect())
                .collect(),
        };
        Self { candidates }
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn copy(
        &self,
        text: &str,
    ) -> Result<(), CapabilityError> {
        let mut last_failure = None;
        for argv in &self.candidates {
            match pipe_to_command(argv, text, &[]).await {
                Ok(()) => return Ok(()),
                Err(CapabilityError::Unavailable(program)) => {
                    debug!(%program, "clipboard program not found");
                }
                Err(e) => {
                    debug!(error = %e, "clipboard program failed");
                    last_failure = Some(e);
                }
            }
        }
        Err(last_failure.unwrap_or_else(|| CapabilityError::Unavailable("clipboard".to_string())))
    }
}
