//! Input resolution: positional words, or stdin read to EOF.

use std::io::IsTerminal;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{Result, ShellmateError};

/// Text handed to the executor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedInput {
    pub text: String,
    /// Piped input is classified as error output in auto mode.
    pub from_stdin: bool,
}

impl ResolvedInput {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Joins positional words with single spaces and trims the result.
pub fn join_words(words: &[String]) -> String {
    words.join(" ").trim().to_string()
}

/// Reads a stream to EOF as UTF-8 and trims it.
pub async fn read_trimmed<R>(mut reader: R) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    let text = String::from_utf8(buf).map_err(|e| {
        ShellmateError::InvalidInput(
            rust_i18n::t!("input.invalid_utf8", error = e.to_string()).to_string(),
        )
    })?;
    Ok(text.trim().to_string())
}

/// Resolves input from words, falling back to a piped stdin.
///
/// - `force_stdin`: stdin is read even when it is a terminal
/// - words given: joined words, `from_stdin = false`
/// - no words and a terminal stdin: empty input
pub async fn resolve_input(words: &[String], force_stdin: bool) -> Result<ResolvedInput> {
    let stdin_is_terminal = std::io::stdin().is_terminal();
    resolve_from(words, force_stdin, stdin_is_terminal, tokio::io::stdin()).await
}

async fn resolve_from<R>(
    words: &[String],
    force_stdin: bool,
    stdin_is_terminal: bool,
    stdin: R,
) -> Result<ResolvedInput>
where
    R: AsyncRead + Unpin,
{
    if force_stdin {
        return Ok(ResolvedInput {
            text: read_trimmed(stdin).await?,
            from_stdin: true,
        });
    }

    if !words.is_empty() {
        return Ok(ResolvedInput {
            text: join_words(words),
            from_stdin: false,
        });
    }

    if stdin_is_terminal {
        return Ok(ResolvedInput::default());
    }

    let text = read_trimmed(stdin).await?;
    tracing::debug!("Read {} bytes from stdin", text.len());
    Ok(ResolvedInput {
        text,
        from_stdin: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_join_words_trims() {
        assert_eq!(join_words(&words(&["  list", "files  "])), "list files");
        assert_eq!(join_words(&[]), "");
    }

    #[tokio::test]
    async fn test_read_trimmed() {
        let text = read_trimmed(&b"\n  bash: foo: command not found \n"[..])
            .await
            .unwrap();
        assert_eq!(text, "bash: foo: command not found");
    }

    #[tokio::test]
    async fn test_read_trimmed_rejects_invalid_utf8() {
        let err = read_trimmed(&[0xff, 0xfe][..]).await.unwrap_err();
        assert!(matches!(err, ShellmateError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_words_win_over_piped_stdin() {
        let input = resolve_from(&words(&["ls", "-la"]), false, false, &b"ignored"[..])
            .await
            .unwrap();
        assert_eq!(input.text, "ls -la");
        assert!(!input.from_stdin);
    }

    #[tokio::test]
    async fn test_piped_stdin_marks_origin() {
        let input = resolve_from(&[], false, false, &b"Traceback (most recent call last)\n"[..])
            .await
            .unwrap();
        assert_eq!(input.text, "Traceback (most recent call last)");
        assert!(input.from_stdin);
    }

    #[tokio::test]
    async fn test_terminal_without_words_is_empty() {
        let input = resolve_from(&[], false, true, &b"unused"[..]).await.unwrap();
        assert!(input.is_empty());
        assert!(!input.from_stdin);
    }

    #[tokio::test]
    async fn test_forced_stdin_ignores_words() {
        let input = resolve_from(&words(&["ignored"]), true, true, &b"npm ERR! code E404"[..])
            .await
            .unwrap();
        assert_eq!(input.text, "npm ERR! code E404");
        assert!(input.from_stdin);
    }
}
