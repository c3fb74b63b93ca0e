//! Command implementations.
//!
//! # Modules
//! - `execute` - Executor: provider, prompt, generation, safety gating, formatting.
//! - `run` - CLI flow around the executor (spinner, verbose header, clipboard).
//! - `doctor` - `config doctor` checks.
//! - `input` - Positional words / stdin resolution.
//! - `format` - Output format definition.
//! - `options` - Command option structs.
//! - `json` - JSON error output.
//!
//! # Architecture
//! ```text
//! CLI (cli.rs)
//!   ├── commands/input.rs ─> commands/run.rs ─> commands/execute.rs
//!   │                                             ├── mode / llm::prompt
//!   │                                             ├── llm::provider
//!   │                                             └── safety / output
//!   ├── commands/doctor.rs
//!   └── shared command options (commands/options.rs)
//! ```

/// Configuration and connectivity checks.
pub mod doctor;
/// Executor orchestration.
pub mod execute;
/// Output format types and parsing helpers.
pub mod format;
/// Input resolution from words or stdin.
pub mod input;
/// Shared JSON output helpers.
pub mod json;
/// Shared command option structs.
pub mod options;
/// Request command flow.
pub mod run;

// Re-export for external use (tests, library users).
pub use execute::{ExecutorResult, execute, execute_with_provider};
pub use format::OutputFormat;
pub use options::{DoctorOptions, RunOptions};
