use std::io::{self, Write};
use std::process::{Command, Stdio};
use tracing::debug;

/// Receives the primary match's code, verbatim.
///
/// Whether the copy lands is the sink's problem; generation and printing
/// never depend on it.
pub trait ClipboardSink {
    /// Copy `text` to wherever the sink points
    fn copy(&self, text: &str) -> io::Result<()>;
}

/// Pipes the text into the platform clipboard tool:
/// `pbcopy` on macOS, `clip` on Windows, `wl-copy` under Wayland,
/// `xclip` otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandClipboard;

impl CommandClipboard {
    fn command() -> Command {
        if cfg!(target_os = "macos") {
            Command::new("pbcopy")
        } else if cfg!(target_os = "windows") {
            Command::new("clip")
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Command::new("wl-copy")
        } else {
            let mut cmd = Command::new("xclip");
            cmd.args(["-sel", "clipboard"]);
            cmd
        }
    }
}

impl ClipboardSink for CommandClipboard {
    fn copy(&self, text: &str) -> io::Result<()> {
        let mut child = Self::command()
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }
        let status = child.wait()?;
        if !status.success() {
            return Err(io::Error::other("clipboard command exited with failure"));
        }
        debug!(bytes = text.len(), "copied to clipboard");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::sync::Mutex;

    /// Sink substitute that records what was copied
    #[derive(Default)]
    struct Recording(Mutex<Vec<String>>);

    impl Recording {
        fn recorded(&self) -> Vec<String> {
            self.0.lock().map(|guard| guard.clone()).unwrap_or_default()
        }
    }

    impl ClipboardSink for Recording {
        fn copy(&self, text: &str) -> io::Result<()> {
            if let Ok(mut guard) = self.0.lock() {
                guard.push(text.to_string());
            }
            Ok(())
        }
    }

    #[test]
    fn sinks_receive_the_code_verbatim() {
        let sink = Recording::default();
        sink.copy("000042").unwrap();
        assert_eq!(sink.recorded(), vec!["000042".to_string()]);
    }
}
