//! System clipboard integration.
//!
//! Pipes text into the first clipboard tool found on `PATH`.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use which::which;

use crate::error::{Result, ShellmateError};

/// Clipboard tools in lookup order, with the arguments that make them read stdin.
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip.exe", &[]),
];

/// First available clipboard tool: `(name, resolved path, args)`.
pub fn find_clipboard_tool() -> Option<(&'static str, PathBuf, &'static [&'static str])> {
    find_tool_with(|name| which(name).ok())
}

fn find_tool_with<F>(lookup: F) -> Option<(&'static str, PathBuf, &'static [&'static str])>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    CLIPBOARD_TOOLS
        .iter()
        .find_map(|(name, args)| lookup(name).map(|path| (*name, path, *args)))
}

/// Copies `text` to the system clipboard, returning the tool name used.
pub fn copy_to_clipboard(text: &str) -> Result<&'static str> {
    let (name, path, args) = find_clipboard_tool()
        .ok_or_else(|| ShellmateError::Other(rust_i18n::t!("clipboard.no_tool").to_string()))?;

    tracing::debug!("Copying {} bytes with {}", text.len(), name);

    let mut child = Command::new(path)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(ShellmateError::Other(
            rust_i18n::t!("clipboard.tool_failed", tool = name, status = status.to_string())
                .to_string(),
        ));
    }
    Ok(name)
}
