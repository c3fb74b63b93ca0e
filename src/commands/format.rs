/// Output format enum
///
/// Unified processing of the `--json` and `--quiet` flags in the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable response with an appended safety section.
    #[default]
    Text,
    /// Machine-readable JSON report.
    Json,
    /// Extracted command lines only.
    Quiet,
}

impl OutputFormat {
    /// Parse output format from CLI parameters
    ///
    /// `--json` takes precedence over `--quiet`
    pub fn from_cli(json: bool, quiet: bool) -> Self {
        if json {
            Self::Json
        } else if quiet {
            Self::Quiet
        } else {
            Self::Text
        }
    }

    /// Is it in JSON format?
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    /// Whether interactive UI elements (spinner, verbose header) may be shown
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Text)
    }

    /// Get the effective colored setting (color disabled outside text output)
    pub fn effective_colored(&self, config_colored: bool) -> bool {
        self.is_interactive() && config_colored
    }
}
