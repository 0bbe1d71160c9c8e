//! Clipboard helper for generated passwords.

use std::io::Write;
use std::process::{Command, Stdio};

/// Puts text on the system clipboard.
///
/// Behind a trait so callers can be exercised in tests without touching the
/// real clipboard.
pub trait Clipboard {
    fn copy(&self, text: &str) -> anyhow::Result<()>;
}

/// Clipboard backed by the platform's paste-buffer command.
pub struct CommandClipboard;

impl CommandClipboard {
    fn command() -> (&'static str, &'static [&'static str]) {
        if cfg!(target_os = "macos") {
            ("pbcopy", &[])
        } else if cfg!(target_os = "windows") {
            ("clip", &[])
        } else {
            ("xclip", &["-selection", "clipboard"])
        }
    }
}

impl Clipboard for CommandClipboard {
    fn copy(&self, text: &str) -> anyhow::Result<()> {
        let (program, args) = Self::command();
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| anyhow::anyhow!("Failed to launch {}: {}", program, e))?;

        child
            .stdin
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("{} has no stdin", program))?
            .write_all(text.as_bytes())?;

        let status = child.wait()?;
        if !status.success() {
            return Err(anyhow::anyhow!("{} exited with failure", program));
        }
        Ok(())
    }
}
