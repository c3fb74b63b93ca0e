//! command option structure
//!
//! Provide a unified parameter passing method for each command, which is constructed from CLI parameter parsing.
//!
//! # Design
//! - Borrow the resolved input and CLI strings instead of cloning them
//! - Unified `effective_colored()` method to handle output format
//!
//! # Example
//! ```no_run
//! use shellmate::commands::options::RunOptions;
//! use shellmate::commands::format::OutputFormat;
//! use shellmate::llm::ModelOverrides;
//! use shellmate::mode::ModeSelection;
//!
//! let options = RunOptions {
//!     input: "find recent pdf files",
//!     from_stdin: false,
//!     mode: ModeSelection::Auto,
//!     detail: false,
//!     provider_override: None,
//!     overrides: ModelOverrides::default(),
//!     format: OutputFormat::Quiet,
//!     verbose: false,
//!     copy: false,
//! };
//! ```

use std::path::Path;

use super::format::OutputFormat;
use super::input::ResolvedInput;
use crate::cli::Cli;
use crate::config::AppConfig;
use crate::llm::ModelOverrides;
use crate::mode::ModeSelection;

/// Options of one generate/explain/fix/refactor/suggest invocation
///
/// # Field description
/// - `input`: trimmed user input (words or stdin)
/// - `from_stdin`: input was piped in (auto mode treats it as error output)
/// - `mode`: forced mode or auto detection
/// - `detail`: request the extended explanation (explain mode)
/// - `provider_override`: `--provider`
/// - `overrides`: `--model`, `--temperature`, `--max-tokens`, `--timeout-ms`, `--retries`
/// - `format`: output format (Text/JSON/Quiet)
/// - `verbose`: print `Provider:` / `Model:` / `Mode:` before the output
/// - `copy`: copy the final output to the clipboard
#[derive(Debug, Clone)]
pub struct RunOptions<'a> {
    pub input: &'a str,
    pub from_stdin: bool,
    pub mode: ModeSelection,
    pub detail: bool,
    pub provider_override: Option<&'a str>,
    pub overrides: ModelOverrides,
    pub format: OutputFormat,
    pub verbose: bool,
    pub copy: bool,
}

impl<'a> RunOptions<'a> {
    /// Build from CLI parameters, a resolved mode and the resolved input
    pub fn from_cli(cli: &'a Cli, mode: ModeSelection, input: &'a ResolvedInput) -> Self {
        Self {
            input: &input.text,
            from_stdin: input.from_stdin,
            mode,
            detail: cli.detail,
            provider_override: cli.provider.as_deref(),
            overrides: cli.model_overrides(),
            format: cli.output_format(),
            verbose: cli.verbose,
            copy: cli.copy,
        }
    }

    /// Get effective colored settings
    pub fn effective_colored(&self, config: &AppConfig) -> bool {
        self.format.effective_colored(config.ui.colored)
    }
}

/// `config doctor` options
#[derive(Debug, Clone, Default)]
pub struct DoctorOptions<'a> {
    pub config_path: Option<&'a Path>,
    pub provider_override: Option<&'a str>,
    pub model_override: Option<&'a str>,
    /// Network check timeout (defaults to 8000 ms)
    pub timeout_ms: Option<u64>,
}

impl<'a> DoctorOptions<'a> {
    pub fn from_cli(cli: &'a Cli) -> Self {
        Self {
            config_path: cli.config.as_deref(),
            provider_override: cli.provider.as_deref(),
            model_override: cli.model.as_deref(),
            timeout_ms: cli.timeout_ms,
        }
    }
}
