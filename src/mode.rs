//! Prompt modes and the auto-mode classifier.
//!
//! Auto mode routes free text to a mode with ordered heuristics (first match wins):
//! 1. stdin input or error-looking text -> [`Mode::Fix`]
//! 2. command-looking text -> [`Mode::Explain`]
//! 3. anything else -> [`Mode::Generate`]
//!
//! The heuristics are plain pattern tables, not a shell grammar.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ShellmateError;

/// Which prompt template and output-parsing strategy apply to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Natural-language intent -> shell commands.
    Generate,
    /// Command -> structured explanation.
    Explain,
    /// Failed command / error output -> causes, diagnostics, fixes.
    Fix,
    /// Command -> simpler equivalent.
    Refactor,
    /// Context -> next commands.
    Suggest,
}

impl Mode {
    /// All modes, in CLI order.
    pub const ALL: [Mode; 5] = [
        Mode::Generate,
        Mode::Explain,
        Mode::Fix,
        Mode::Refactor,
        Mode::Suggest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Generate => "generate",
            Mode::Explain => "explain",
            Mode::Fix => "fix",
            Mode::Refactor => "refactor",
            Mode::Suggest => "suggest",
        }
    }

    /// Whether formatted JSON carries an `items` command list for this mode.
    pub fn renders_items(&self) -> bool {
        matches!(self, Mode::Generate | Mode::Refactor | Mode::Suggest)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = ShellmateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ShellmateError::InvalidInput(
                    rust_i18n::t!("mode.invalid", mode = s).to_string(),
                )
            })
    }
}

/// `--mode` value: either a forced mode or auto detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeSelection {
    #[default]
    Auto,
    Forced(Mode),
}

impl std::str::FromStr for ModeSelection {
    type Err = ShellmateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        s.parse().map(Self::Forced)
    }
}

impl ModeSelection {
    /// Resolves the effective mode for an input.
    pub fn resolve(self, input: &str, from_stdin: bool) -> Mode {
        match self {
            Self::Auto => detect_auto_mode(input, from_stdin),
            Self::Forced(mode) => mode,
        }
    }
}

/// Case-insensitive substrings that mark error output.
const ERROR_INDICATORS: &[&str] = &[
    "error",
    "failed",
    "permission denied",
    "no such file",
    "not found",
    "traceback",
    "command not found",
    "syntax error",
];

/// Executables whose leading position marks a command (with an argument shape check).
const KNOWN_EXECUTABLES: &[&str] = &[
    "git", "ls", "cd", "cat", "grep", "find", "tar", "curl", "wget", "docker", "npm", "yarn",
    "pnpm", "node", "python", "rg", "fd", "ssh", "scp", "rsync",
];

/// Shapes that mark command syntax anywhere in the text.
static COMMAND_SHAPES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"[|><]",  // pipe / redirect
        r"--\w+",  // long option
        r"\s-\w",  // short option
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static command shape pattern"))
    .collect()
});

/// Whether the text contains any error indicator.
pub fn has_error_indicators(text: &str) -> bool {
    let lower = text.to_lowercase();
    ERROR_INDICATORS.iter().any(|needle| lower.contains(needle))
}

/// Whether the text looks like a shell command rather than prose.
pub fn looks_like_command(text: &str) -> bool {
    if COMMAND_SHAPES.iter().any(|re| re.is_match(text)) {
        return true;
    }

    let mut tokens = text.split_whitespace();
    let Some(first) = tokens.next() else {
        return false;
    };
    if !KNOWN_EXECUTABLES
        .iter()
        .any(|exe| exe.eq_ignore_ascii_case(first))
    {
        return false;
    }

    let rest: Vec<&str> = tokens.collect();
    // token count <= 2
    rest.len() <= 1
        || rest
            .iter()
            .any(|t| t.contains(|c: char| matches!(c, '.' | '/' | '~')) || t.starts_with('-'))
}

/// Classifies raw input into a mode. Pure and total: falls through to generate.
pub fn detect_auto_mode(input: &str, from_stdin: bool) -> Mode {
    if from_stdin || has_error_indicators(input) {
        return Mode::Fix;
    }
    if looks_like_command(input) {
        return Mode::Explain;
    }
    Mode::Generate
}
