//! Safety gating and terminal UI configuration.

use serde::{Deserialize, Serialize};

/// Dangerous-command handling.
///
/// # Example
/// ```json
/// { "safety": { "warnOnDangerousCommands": true, "blockOnVeryDangerous": false } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SafetyConfig {
    /// Attach warnings for matched patterns (default: `true`).
    pub warn_on_dangerous_commands: bool,

    /// Replace the output when a high-severity pattern matches (default: `false`).
    ///
    /// Independent of `warn_on_dangerous_commands`: with warnings off the
    /// response is still scanned and blocked, only the warning list is empty.
    pub block_on_very_dangerous: bool,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            warn_on_dangerous_commands: true,
            block_on_very_dangerous: false,
        }
    }
}

impl SafetyConfig {
    /// Whether the response needs scanning at all (either flag set).
    pub fn scanning_enabled(&self) -> bool {
        self.warn_on_dangerous_commands || self.block_on_very_dangerous
    }
}

/// UI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    /// Enable colored output (default: `true`).
    pub colored: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { colored: true }
    }
}
