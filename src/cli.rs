use std::path::PathBuf;

use clap::{Parser, Subcommand, builder::styling};

use crate::commands::format::OutputFormat;
use crate::llm::ModelOverrides;
use crate::mode::Mode;

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Cyan.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "shellmate")]
#[command(author, version, long_about = None)]
#[command(styles = STYLES)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Auto mode input: intent, command, or error output
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub input: Vec<String>,

    /// Model name
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Provider name
    #[arg(short, long, global = true)]
    pub provider: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Force mode: auto|generate|explain|fix|refactor|suggest
    #[arg(long, global = true)]
    pub mode: Option<String>,

    /// Sampling temperature
    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Retry attempts for provider requests
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// Include more detailed explanations (explain mode)
    #[arg(long, global = true)]
    pub detail: bool,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Print commands only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Copy output to clipboard
    #[arg(long, global = true)]
    pub copy: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell commands from natural language
    Gen {
        /// Natural language intent
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        intent: Vec<String>,
    },

    /// Explain a shell command
    Explain {
        /// Command to explain
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Suggest fixes for failed commands
    Fix {
        /// Read error context from stdin
        #[arg(long)]
        stdin: bool,

        /// Paste mode (read from stdin until EOF)
        #[arg(long)]
        paste: bool,

        /// Command and error output
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        context: Vec<String>,
    },

    /// Refactor a shell command to a simpler alternative
    Refactor {
        /// Command to refactor
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Suggest next commands based on context
    Suggest {
        /// Optional context
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        context: Vec<String>,
    },

    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Check configuration and provider connectivity
    Doctor,
}

/// What a command-line invocation asks the executor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputRequest<'a> {
    /// Mode fixed by the subcommand; `None` means `--mode` / auto detection.
    pub mode: Option<Mode>,
    pub words: &'a [String],
    /// `fix --stdin` / `fix --paste`: read stdin even when it is a terminal.
    pub force_stdin: bool,
    /// Print a paste prompt before reading a terminal stdin.
    pub paste: bool,
}

impl Cli {
    /// Generation overrides given on the command line.
    pub fn model_overrides(&self) -> ModelOverrides {
        ModelOverrides {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout_ms: self.timeout_ms,
            retries: self.retries,
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_cli(self.json, self.quiet)
    }

    /// The executor request, or `None` for `config doctor`.
    pub fn input_request(&self) -> Option<InputRequest<'_>> {
        let fixed = |mode, words| InputRequest {
            mode: Some(mode),
            words,
            force_stdin: false,
            paste: false,
        };

        match &self.command {
            None => Some(InputRequest {
                mode: None,
                words: &self.input,
                force_stdin: false,
                paste: false,
            }),
            Some(Commands::Gen { intent }) => Some(fixed(Mode::Generate, intent)),
            Some(Commands::Explain { command }) => Some(fixed(Mode::Explain, command)),
            Some(Commands::Refactor { command }) => Some(fixed(Mode::Refactor, command)),
            Some(Commands::Suggest { context }) => Some(fixed(Mode::Suggest, context)),
            Some(Commands::Fix {
                stdin,
                paste,
                context,
            }) => Some(InputRequest {
                mode: Some(Mode::Fix),
                words: context,
                force_stdin: *stdin || *paste,
                paste: *paste,
            }),
            Some(Commands::Config { .. }) => None,
        }
    }
}
